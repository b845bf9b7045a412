use std::fmt;

use crate::board::{BoardSize, Layout};
use crate::field::Visual;
use crate::geometry::Rect;

/// Something a board can draw its fields onto.
pub trait Surface {
    fn blit(&mut self, visual: Visual, at: Rect);
}

/// A character grid standing in for a window, one glyph per cell.
///
/// Blitted rectangles are mapped back to cells through the layout stride, so anything that
/// does not start on a cell boundary is ignored.
pub struct TextSurface {
    size: BoardSize,
    layout: Layout,
    glyphs: Vec<Vec<char>>,
    blits: usize
}

impl TextSurface {
    pub fn new(size: BoardSize, layout: Layout) -> TextSurface {
        TextSurface{size, layout, glyphs: vec![vec![' '; size.width]; size.height], blits: 0}
    }

    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        self.glyphs.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Total number of blits received so far.
    pub fn blits(&self) -> usize {
        self.blits
    }

    fn cell_index(&self, at: Rect) -> Option<(usize, usize)> {
        let stride = self.layout.stride();
        if stride <= 0 {
            return None
        }
        let dx = at.x - self.layout.origin.0;
        let dy = at.y - self.layout.origin.1;
        if dx < 0 || dy < 0 || dx % stride != 0 || dy % stride != 0 {
            return None
        }
        let (x, y) = ((dx / stride) as usize, (dy / stride) as usize);
        if x >= self.size.width || y >= self.size.height {
            return None
        }
        Some((x, y))
    }
}

impl Surface for TextSurface {
    fn blit(&mut self, visual: Visual, at: Rect) {
        if let Some((x, y)) = self.cell_index(at) {
            self.glyphs[y][x] = visual.glyph();
            self.blits += 1;
        }
    }
}

impl fmt::Display for TextSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = "  ".to_owned();
        for i in 0..self.size.width{
            result += &(i % 10).to_string()[..];
        }
        result += "\n";
        for (i, row) in self.glyphs.iter().enumerate() {
            result += &(i % 10).to_string()[..];
            result += " ";
            result.extend(row.iter());
            result += "\n";
        }
        write!(f, "{}", result)
    }
}

#[cfg(test)]
mod surface_tests {
    use super::*;
    use crate::geometry::{Pixel, Point};

    fn surface() -> TextSurface {
        TextSurface::new(BoardSize::new(3, 2), Layout::default())
    }

    #[test]
    fn blit_lands_on_the_matching_cell() {
        let mut surface = surface();
        let layout = Layout::default();
        surface.blit(Visual::Number(2), layout.cell_rect(Point(2, 1)));
        surface.blit(Visual::Hidden, layout.cell_rect(Point(0, 0)));
        assert_eq!(surface.glyph(2, 1), Some('2'));
        assert_eq!(surface.glyph(0, 0), Some('□'));
        assert_eq!(surface.glyph(1, 0), Some(' '));
        assert_eq!(surface.blits(), 2);
    }

    #[test]
    fn blit_off_grid_is_ignored() {
        let mut surface = surface();
        surface.blit(Visual::Mine, Rect::new(Pixel(5, 0), 30, 30));
        surface.blit(Visual::Mine, Rect::new(Pixel(-33, 0), 30, 30));
        surface.blit(Visual::Mine, Rect::new(Pixel(99, 0), 30, 30));
        assert_eq!(surface.blits(), 0);
    }

    #[test]
    fn collapsed_layout_draws_nothing() {
        let layout = Layout{padding: -30, ..Layout::default()};
        let mut surface = TextSurface::new(BoardSize::new(3, 2), layout);
        surface.blit(Visual::Mine, Rect::new(Pixel(0, 0), 30, 30));
        assert_eq!(surface.blits(), 0);
    }

    #[test]
    fn display_has_headers() {
        let mut surface = surface();
        surface.blit(Visual::Empty, Layout::default().cell_rect(Point(1, 0)));
        assert_eq!(surface.to_string(), "  012\n0  _ \n1    \n");
    }
}
