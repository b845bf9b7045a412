use std::fmt;

/// A cell position on the board: `Point(x, y)`, column first.
#[derive(Debug, Eq, Clone, Hash, Copy)]
pub struct Point(pub usize, pub usize);

impl Point {
    pub fn distance(&self, other: &Point) -> usize{
        //l-inf norm, so the 8 surrounding cells are all at distance 1
        (self.0 as i64 - other.0 as i64).abs().max((self.1 as i64 - other.1 as i64).abs()) as usize
    }

    /// Moves the point by a signed offset, returning `None` if it would leave the board.
    pub fn offset(&self, (dx, dy): (i32, i32), width: usize, height: usize) -> Option<Point> {
        let x = self.0 as i64 + dx as i64;
        let y = self.1 as i64 + dy as i64;
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            return None
        }
        Some(Point(x as usize, y as usize))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 == other.1
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// A position in pixels. Signed, since presses can land left of or above the board.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
pub struct Pixel(pub i32, pub i32);

impl Pixel {
    pub fn translate(&self, dx: i32, dy: i32) -> Pixel {
        Pixel(self.0 + dx, self.1 + dy)
    }
}

/// An axis-aligned rectangle in pixels.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32
}

impl Rect {
    pub fn new(top_left: Pixel, width: i32, height: i32) -> Rect {
        Rect{x: top_left.0, y: top_left.1, width, height}
    }

    pub fn top_left(&self) -> Pixel {
        Pixel(self.x, self.y)
    }

    pub fn center(&self) -> Pixel {
        Pixel(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Half-open containment: the left and top edges are inside, the right and bottom edges are not.
    pub fn contains(&self, pixel: Pixel) -> bool {
        pixel.0 >= self.x && pixel.0 < self.x + self.width
            && pixel.1 >= self.y && pixel.1 < self.y + self.height
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
mod geometry_tests {
    use super::*;

    #[test]
    fn offset_stays_on_board() {
        let corner = Point(0, 0);
        assert_eq!(corner.offset((-1, 0), 3, 3), None);
        assert_eq!(corner.offset((0, -1), 3, 3), None);
        assert_eq!(corner.offset((1, 1), 3, 3), Some(Point(1, 1)));
        assert_eq!(Point(2, 2).offset((1, 0), 3, 3), None);
        assert_eq!(Point(2, 2).offset((0, 1), 3, 3), None);
    }

    #[test]
    fn rect_edges_are_half_open() {
        let rect = Rect::new(Pixel(10, 20), 30, 30);
        assert!(rect.contains(Pixel(10, 20)));
        assert!(rect.contains(Pixel(39, 49)));
        assert!(!rect.contains(Pixel(40, 20)));
        assert!(!rect.contains(Pixel(10, 50)));
        assert!(!rect.contains(Pixel(9, 25)));
        assert_eq!(rect.center(), Pixel(25, 35));
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(x1 in 0..1000usize, y1 in 0..1000usize,
                                 x2 in 0..1000usize, y2 in 0..1000usize) {
            let point1 = Point(x1, y1);
            let point2 = Point(x2, y2);
            prop_assert_eq!(point1.distance(&point2), point2.distance(&point1));
            match point1 == point2 {
                true => prop_assert_eq!(point1.distance(&point2), 0),
                false => prop_assert_ne!(point1.distance(&point2), 0)
            }
        }

        #[test]
        fn center_is_inside(x in -1000..1000i32, y in -1000..1000i32,
                            width in 1..200i32, height in 1..200i32) {
            let rect = Rect{x, y, width, height};
            prop_assert!(rect.contains(rect.center()));
            prop_assert!(rect.contains(rect.top_left()));
        }

        #[test]
        fn translate_round_trips(x in -1000..1000i32, y in -1000..1000i32,
                                 dx in -1000..1000i32, dy in -1000..1000i32) {
            let pixel = Pixel(x, y);
            prop_assert_eq!(pixel.translate(dx, dy).translate(-dx, -dy), pixel);
        }
    }
}
