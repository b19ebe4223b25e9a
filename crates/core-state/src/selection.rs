use core_text::Position;

/// How navigation keys interact with the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    #[default]
    None,
    /// Extended by shifted navigation; collapses on plain navigation.
    Shift,
    /// Toggled by the mark key; plain navigation extends it.
    Mark,
    /// Whole document, entered through select-all.
    All,
}

/// Selection anchor and live end. `start` is the anchor and may sort after `end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub mode: SelectionMode,
    pub start: Position,
    pub end: Position,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether a non-empty range is currently selected.
    pub fn is_active(&self) -> bool {
        self.mode != SelectionMode::None && !self.is_empty()
    }

    /// Endpoints in document order.
    pub fn ordered(&self) -> (Position, Position) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    pub fn clear_at(&mut self, pos: Position) {
        self.mode = SelectionMode::None;
        self.start = pos;
        self.end = pos;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_sorts_backward_selection() {
        let sel = Selection {
            mode: SelectionMode::Shift,
            start: Position::new(4, 2),
            end: Position::new(1, 7),
        };
        assert_eq!(sel.ordered(), (Position::new(1, 7), Position::new(4, 2)));
        assert!(sel.is_active());
    }

    #[test]
    fn empty_or_none_is_inactive() {
        let mut sel = Selection::default();
        assert!(!sel.is_active());
        sel.mode = SelectionMode::Mark;
        assert!(sel.is_empty());
        assert!(!sel.is_active());
        sel.end = Position::new(0, 1);
        assert!(sel.is_active());
        sel.clear_at(Position::new(2, 0));
        assert_eq!(sel.mode, SelectionMode::None);
        assert_eq!(sel.start, Position::new(2, 0));
    }
}
