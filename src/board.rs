use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::convert::TryFrom;
use std::fmt;
use itertools::iproduct;
use tracing::{debug, info, trace};

use crate::error::BoardError;
use crate::field::Field;
use crate::geometry::{Pixel, Point, Rect};
use crate::render::Surface;

/// Neighbours in the order the flood fill visits them, and whether the fill cascades through them.
/// Edge neighbours cascade; corner neighbours are revealed but never expand.
const NEIGHBOUR_STEPS: [((i32, i32), bool); 8] = [
    ((-1, 0), true), ((1, 0), true), ((0, -1), true), ((0, 1), true),
    ((-1, -1), false), ((1, 1), false), ((1, -1), false), ((-1, 1), false)
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    pub width: usize,
    pub height: usize
}

impl BoardSize {
    pub fn new(width: usize, height: usize) -> BoardSize {
        BoardSize{width, height}
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn points(&self) -> Vec<Point> {
        (0..self.area()).filter_map(|x| self.point_from_integer(x)).collect()
    }

    /// Decodes a linear index, counting along the x axis first.
    pub fn point_from_integer(&self, x: usize) -> Option<Point> {
        if x >= self.area() {
            return None
        }
        Some(Point(x % self.width, x / self.width))
    }

    pub fn contains(&self, point: &Point) -> bool {
        point.0 < self.width && point.1 < self.height
    }
}

/// Where the cells sit in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left corner of cell (0, 0).
    pub origin: Pixel,
    pub cell_size: i32,
    /// Gap between neighbouring cells.
    pub padding: i32
}

impl Default for Layout {
    fn default() -> Self {
        Layout{origin: Pixel(0, 0), cell_size: 30, padding: 3}
    }
}

impl Layout {
    pub fn stride(&self) -> i32 {
        self.cell_size + self.padding
    }

    pub fn cell_rect(&self, point: Point) -> Rect {
        let stride = self.stride();
        let top_left = self.origin.translate(point.0 as i32 * stride, point.1 as i32 * stride);
        Rect::new(top_left, self.cell_size, self.cell_size)
    }

    /// Pixel size of a whole board: cells plus the gaps between them, no outer margin.
    /// `None` if it does not fit in pixel coordinates.
    pub fn image_size(&self, size: BoardSize) -> Option<(i32, i32)> {
        let extent = |n: usize| -> Option<i32> {
            let n = i32::try_from(n).ok()?;
            let gaps = (n - 1).max(0).checked_mul(self.padding)?;
            n.checked_mul(self.cell_size)?.checked_add(gaps)
        };
        Some((extent(size.width)?, extent(size.height)?))
    }
}

fn sample_points<R: Rng + ?Sized>(size: &BoardSize, n: usize, rng: &mut R) -> Vec<Point>{
    let mut possible: Vec<usize> = (0..size.area()).collect();
    possible.shuffle(rng);
    possible.iter().take(n).filter_map(|&x| size.point_from_integer(x)).collect()
}

/// Checks the geometry and returns the board's image size. Every cell rectangle of a board that
/// passes lies inside `origin + image size`, so later pixel arithmetic cannot overflow.
fn validate(size: &BoardSize, layout: &Layout) -> Result<(i32, i32), BoardError> {
    if size.width == 0 || size.height == 0 {
        return Err(BoardError::EmptyBoard)
    }
    if layout.cell_size <= 0 {
        return Err(BoardError::ZeroCellSize)
    }
    if layout.padding < 0 {
        return Err(BoardError::NegativePadding(layout.padding))
    }
    let (width, height) = layout.image_size(*size).ok_or(BoardError::LayoutTooLarge)?;
    layout.origin.0.checked_add(width)
        .and(layout.origin.1.checked_add(height))
        .ok_or(BoardError::LayoutTooLarge)?;
    Ok((width, height))
}

/// A grid of fields, indexed `[x][y]`.
///
/// Mines and counts are fixed once the board is built; afterwards fields only change by being
/// revealed through [`Board::click_at`].
pub struct Board {
    size: BoardSize,
    fields: Vec<Vec<Field>>,
    mine_count: usize,
    layout: Layout,
    image_size: (i32, i32),
    /// Empty fields a corner step revealed that have not spread to their neighbours yet.
    unexpanded: HashSet<Point>,
    changed: bool
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = "  ".to_owned();
        for i in 0..self.size.width{
            result += &(i % 10).to_string()[..];
        }
        result += "\n";
        for y in 0..self.size.height {
            result += &(y % 10).to_string()[..];
            result += " ";
            for x in 0..self.size.width {
                result.push(self.fields[x][y].visual().glyph());
            }
            result += "\n";
        }
        write!(f, "{}", result)
    }
}

impl Board {
    /// Builds a board with `mine_count` mines drawn from `rng`, with neighbour counts filled in.
    pub fn new<R: Rng + ?Sized>(size: BoardSize, mine_count: usize, layout: Layout, rng: &mut R)
        -> Result<Board, BoardError> {
        let image_size = validate(&size, &layout)?;
        if mine_count > size.area() {
            return Err(BoardError::TooManyMines{mines: mine_count, cells: size.area()})
        }
        let mut board = Board::setup(size, mine_count, layout, image_size);
        board.place_mines(rng);
        board.count_neighbour_mines();
        info!(width = size.width, height = size.height, mines = mine_count, "created board");
        Ok(board)
    }

    /// Builds a board with mines at exactly the given points.
    pub fn with_mines(size: BoardSize, layout: Layout, mines: &[Point]) -> Result<Board, BoardError> {
        let image_size = validate(&size, &layout)?;
        let mut seen = HashSet::with_capacity(mines.len());
        for point in mines {
            if !size.contains(point) {
                return Err(BoardError::MineOutOfBounds(*point))
            }
            if !seen.insert(*point) {
                return Err(BoardError::DuplicateMine(*point))
            }
        }
        let mut board = Board::setup(size, mines.len(), layout, image_size);
        for point in mines {
            board.fields[point.0][point.1].set_mine();
        }
        board.count_neighbour_mines();
        debug!(width = size.width, height = size.height, mines = mines.len(), "created board from mine list");
        Ok(board)
    }

    fn setup(size: BoardSize, mine_count: usize, layout: Layout, image_size: (i32, i32)) -> Board {
        let mut fields = Vec::with_capacity(size.width);
        for x in 0..size.width {
            let mut column = Vec::with_capacity(size.height);
            for y in 0..size.height {
                column.push(Field::create_hidden(layout.cell_rect(Point(x, y))));
            }
            fields.push(column);
        }
        Board{size, fields, mine_count, layout, image_size, unexpanded: HashSet::new(), changed: true}
    }

    fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for point in sample_points(&self.size, self.mine_count, rng) {
            self.fields[point.0][point.1].set_mine();
        }
    }

    fn count_neighbour_mines(&mut self) {
        for point in self.size.points() {
            let count = self.neighbour_points(&point).iter()
                .filter(|neighbour| self.fields[neighbour.0][neighbour.1].is_mine())
                .count();
            self.fields[point.0][point.1].set_adjacent_mine_count(count as u8);
        }
    }

    pub fn size(&self) -> BoardSize {
        self.size
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn field(&self, point: Point) -> Option<&Field> {
        self.fields.get(point.0).and_then(|column| column.get(point.1))
    }

    fn field_signed(&self, x: isize, y: isize) -> Option<&Field> {
        if x < 0 || y < 0 {
            return None
        }
        self.field(Point(x as usize, y as usize))
    }

    /// Whether there is a mine at `(x, y)`; `false` off the board.
    pub fn is_mine(&self, x: isize, y: isize) -> bool {
        self.field_signed(x, y).map_or(false, |field| field.is_mine())
    }

    /// Whether the field at `(x, y)` shows a number; `false` off the board.
    pub fn has_neighbour_mines(&self, x: isize, y: isize) -> bool {
        self.field_signed(x, y).map_or(false, |field| field.adjacent_mine_count() > 0)
    }

    /// The up to 8 in-bounds cells around `point`.
    pub fn neighbour_points(&self, point: &Point) -> Vec<Point>{
        iproduct!(-1..2, -1..2)
            .filter(|&(i, j)| i != 0 || j != 0)
            .filter_map(|offset| point.offset(offset, self.size.width, self.size.height))
            .collect()
    }

    pub fn cell_rect(&self, point: Point) -> Option<Rect> {
        self.field(point).map(|field| field.bounds())
    }

    /// The rectangle covering every cell, gaps included.
    pub fn bounds(&self) -> Rect {
        let (width, height) = self.image_size;
        Rect::new(self.layout.origin, width, height)
    }

    pub fn hidden_count(&self) -> usize {
        self.fields.iter().flatten().filter(|field| field.is_hidden()).count()
    }

    /// Whether anything was revealed since the last [`Board::draw`].
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Finds the cell under `pixel`, or `None` if it falls into a gap or outside the board.
    pub fn find_cell_at(&self, pixel: Pixel) -> Option<Point> {
        iproduct!(0..self.size.width, 0..self.size.height)
            .map(|(x, y)| Point(x, y))
            .find(|point| self.fields[point.0][point.1].bounds().contains(pixel))
    }

    /// Reveals the cell under `pixel` and whatever the flood fill reaches from it.
    ///
    /// Returns the clicked cell, or `None` if the press missed every cell, in which case nothing
    /// changes.
    pub fn click_at(&mut self, pixel: Pixel) -> Option<Point> {
        let point = match self.find_cell_at(pixel) {
            Some(point) => point,
            None => {
                trace!(x = pixel.0, y = pixel.1, "press missed every cell");
                return None
            }
        };
        let hidden_before = self.hidden_count();
        self.discover(point);
        self.changed = true;
        debug!(cell = %point, revealed = hidden_before - self.hidden_count(), "clicked cell");
        Some(point)
    }

    /// Flood fill starting at `start`, which is always revealed.
    ///
    /// A numbered cell is revealed and stops. An empty cell is revealed, then each edge neighbour
    /// gets the same treatment, then each still-hidden corner neighbour is revealed without
    /// expanding further. An edge step enters a neighbour that is still hidden, or one a corner
    /// step opened earlier without expanding it, so the whole edge-connected empty region opens
    /// whatever order the steps run in. Frames on an explicit stack stand in for recursion.
    fn discover(&mut self, start: Point) {
        struct Frame {
            point: Point,
            next: usize
        }

        let mut stack = Vec::<Frame>::with_capacity(16);
        if self.enter(start, true) {
            stack.push(Frame{point: start, next: 0});
        }
        while let Some(frame) = stack.last_mut() {
            let step = frame.next;
            let point = frame.point;
            frame.next += 1;

            let (offset, cascade) = match NEIGHBOUR_STEPS.get(step) {
                Some(&entry) => entry,
                None => {
                    stack.pop();
                    continue;
                }
            };
            let neighbour = match point.offset(offset, self.size.width, self.size.height) {
                Some(neighbour) => neighbour,
                None => continue
            };
            let expand = if self.fields[neighbour.0][neighbour.1].is_hidden() {
                self.enter(neighbour, cascade)
            } else {
                cascade && self.unexpanded.remove(&neighbour)
            };
            if expand {
                stack.push(Frame{point: neighbour, next: 0});
            }
        }
    }

    /// Reveals a field and reports whether the fill should expand from it.
    fn enter(&mut self, point: Point, cascade: bool) -> bool {
        let field = &mut self.fields[point.0][point.1];
        field.reveal();
        if field.adjacent_mine_count() > 0 {
            return false
        }
        if cascade {
            self.unexpanded.remove(&point);
        } else {
            self.unexpanded.insert(point);
        }
        cascade
    }

    /// Blits every field that changed since the last draw, returning how many were drawn.
    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) -> usize {
        if !self.changed {
            return 0
        }
        let mut drawn = 0;
        for field in self.fields.iter_mut().flatten() {
            if field.is_changed() {
                surface.blit(field.visual(), field.bounds());
                field.mark_drawn();
                drawn += 1;
            }
        }
        self.changed = false;
        drawn
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
mod board_size_tests {
    use super::*;
    use itertools::Itertools;

    proptest! {
        #[test]
        fn area_correctness(width in 0..1000usize, height in 0..1000usize) {
            prop_assert_eq!(BoardSize{width, height}.area(), width * height);
        }

        #[test]
        fn point_from_integer_correctness(x in 0..2_000_000usize, width in 1..1000usize, height in 1..1000usize) {
            let size = BoardSize{width, height};
            match size.point_from_integer(x) {
                None => prop_assert!(x >= width * height),
                Some(point) => {
                    prop_assert!(point.0 == x % width && point.0 < width);
                    prop_assert!(point.1 == x / width && point.1 < height);
                }
            }
        }

        #[test]
        fn points_cover_the_board_once(width in 0..60usize, height in 0..60usize) {
            let size = BoardSize{width, height};
            let points = size.points();
            prop_assert_eq!(points.len(), size.area());
            prop_assert!(points.iter().all(|point| size.contains(point)));
            prop_assert_eq!(points.iter().unique().count(), size.area());
        }

        #[test]
        fn sampled_points_are_distinct(width in 1..40usize, height in 1..40usize,
                                       mines in 0..1600usize, seed in any::<u64>()) {
            use rand::{SeedableRng, rngs::StdRng};
            let size = BoardSize{width, height};
            let mines = mines.min(size.area());
            let points = sample_points(&size, mines, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(points.len(), mines);
            prop_assert_eq!(points.iter().unique().count(), mines);
        }
    }

    #[test]
    fn image_size_has_no_trailing_padding() {
        let layout = Layout::default();
        assert_eq!(layout.image_size(BoardSize::new(1, 1)), Some((30, 30)));
        assert_eq!(layout.image_size(BoardSize::new(20, 15)), Some((20 * 30 + 19 * 3, 15 * 30 + 14 * 3)));
    }

    #[test]
    fn image_size_overflow_is_none() {
        let layout = Layout::default();
        assert_eq!(layout.image_size(BoardSize::new(100_000_000, 1)), None);
        assert_eq!(layout.image_size(BoardSize::new(1, usize::MAX)), None);
        let wide = Layout{cell_size: i32::MAX, padding: 1, ..Layout::default()};
        assert_eq!(wide.image_size(BoardSize::new(1, 1)), Some((i32::MAX, i32::MAX)));
        assert_eq!(wide.image_size(BoardSize::new(2, 1)), None);
    }
}
