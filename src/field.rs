use tracing::debug;

use crate::geometry::Rect;

/// What a renderer should draw for a field. Pixel assets for each kind are owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visual {
    Hidden,
    Mine,
    Number(u8),
    Empty
}

impl Visual {
    pub fn glyph(&self) -> char {
        match *self {
            Visual::Hidden => '□',
            Visual::Mine => 'X',
            Visual::Number(n) => std::char::from_digit(n as u32, 10).unwrap_or('?'),
            Visual::Empty => '_'
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    adjacent_mine_count: u8,
    is_mine: bool,
    hidden: bool,
    bounds: Rect,
    changed: bool
}

impl Field {
    pub(crate) fn create_hidden(bounds: Rect) -> Field {
        Field{adjacent_mine_count: 0, is_mine: false, hidden: true, bounds, changed: true}
    }

    pub(crate) fn set_mine(&mut self) {
        self.is_mine = true;
        self.changed = true;
    }

    pub(crate) fn set_adjacent_mine_count(&mut self, count: u8) {
        self.adjacent_mine_count = count;
        self.changed = true;
    }

    /// Uncovers the field. Revealing twice is harmless.
    pub fn reveal(&mut self) {
        self.hidden = false;
        self.changed = true;
        debug!(count = self.adjacent_mine_count, mine = self.is_mine, "freed field");
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mine_count
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Whether the field changed since it was last drawn.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn mark_drawn(&mut self) {
        self.changed = false;
    }

    pub fn visual(&self) -> Visual {
        match (self.hidden, self.is_mine) {
            (true, _) => Visual::Hidden,
            (false, true) => Visual::Mine,
            (false, false) => {
                if self.adjacent_mine_count > 0 {
                    Visual::Number(self.adjacent_mine_count)
                }
                else {
                    Visual::Empty
                }
            }
        }
    }
}

#[cfg(test)]
mod field_tests {
    use super::*;
    use crate::geometry::Pixel;

    fn field() -> Field {
        Field::create_hidden(Rect::new(Pixel(0, 0), 30, 30))
    }

    #[test]
    fn starts_hidden_and_dirty() {
        let field = field();
        assert!(field.is_hidden());
        assert!(field.is_changed());
        assert_eq!(field.visual(), Visual::Hidden);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut field = field();
        field.set_adjacent_mine_count(3);
        field.reveal();
        field.mark_drawn();
        let before = (field.is_hidden(), field.is_mine(), field.adjacent_mine_count(), field.visual());

        field.reveal();
        let after = (field.is_hidden(), field.is_mine(), field.adjacent_mine_count(), field.visual());
        assert_eq!(before, after);
    }

    #[test]
    fn visual_selection() {
        let mut mine = field();
        mine.set_mine();
        mine.set_adjacent_mine_count(2);
        assert_eq!(mine.visual(), Visual::Hidden);
        mine.reveal();
        assert_eq!(mine.visual(), Visual::Mine);

        let mut number = field();
        number.set_adjacent_mine_count(4);
        number.reveal();
        assert_eq!(number.visual(), Visual::Number(4));

        let mut empty = field();
        empty.reveal();
        assert_eq!(empty.visual(), Visual::Empty);
    }

    #[test]
    fn glyphs() {
        assert_eq!(Visual::Hidden.glyph(), '□');
        assert_eq!(Visual::Mine.glyph(), 'X');
        assert_eq!(Visual::Number(7).glyph(), '7');
        assert_eq!(Visual::Empty.glyph(), '_');
    }
}
