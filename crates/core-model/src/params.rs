use crate::{Viewport, WrapAdapter};
use core_state::TextBuffer;
use core_text::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    None,
    Soft,
}

/// How typed characters land in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    #[default]
    Insert,
    Overwrite,
}

impl InsertMode {
    pub fn toggled(self) -> Self {
        match self {
            InsertMode::Insert => InsertMode::Overwrite,
            InsertMode::Overwrite => InsertMode::Insert,
        }
    }

    /// Status-line tag.
    pub fn label(self) -> &'static str {
        match self {
            InsertMode::Insert => "INS",
            InsertMode::Overwrite => "OVR",
        }
    }
}

/// Detached view state of a window, independent of any window or buffer.
///
/// The top-left is always stored logically: `top_offset` is the byte offset
/// of the first visible sub-line, so the same value can be re-applied under a
/// different wrap width or with wrapping switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewParameters {
    pub top_line: usize,
    pub top_offset: usize,
    pub left_col: usize,
    pub wrap_mode: WrapMode,
    pub tab_size: usize,
    pub tab_spaces: bool,
    pub auto_indent: bool,
    pub indent_aware_home: bool,
    pub insert_mode: InsertMode,
    pub last_set_pos: usize,
}

impl Default for ViewParameters {
    fn default() -> Self {
        Self::new(8, WrapMode::None)
    }
}

impl ViewParameters {
    /// Parameters for a fresh view anchored at the document start.
    pub fn new(tab_size: usize, wrap_mode: WrapMode) -> Self {
        Self {
            top_line: 0,
            top_offset: 0,
            left_col: 0,
            wrap_mode,
            tab_size: tab_size.max(1),
            tab_spaces: false,
            auto_indent: true,
            indent_aware_home: true,
            insert_mode: InsertMode::Insert,
            last_set_pos: 0,
        }
    }

    /// Record the viewport part: anchor, wrap mode and tab size.
    pub fn capture_viewport(&mut self, viewport: &Viewport, text: &dyn TextBuffer) {
        match viewport.adapter() {
            WrapAdapter::Off { top_line, left_col } => {
                self.top_line = *top_line;
                self.top_offset = 0;
                self.left_col = *left_col;
            }
            WrapAdapter::Soft { top, metrics } => {
                self.top_line = top.line;
                self.top_offset = metrics.line_pos(text, top.line, 0, top.sub_line);
                self.left_col = 0;
            }
        }
        self.wrap_mode = viewport.wrap_mode();
        self.tab_size = viewport.tab_size();
    }

    /// Restore the viewport part. Does not scroll to the cursor; callers do
    /// that once the rest of the window state is in place.
    pub fn apply_viewport(&self, viewport: &mut Viewport, text: &dyn TextBuffer) {
        viewport.set_tab_size(self.tab_size);
        viewport.switch_wrap(self.wrap_mode);
        viewport.restore_top(
            Position::new(self.top_line, self.top_offset),
            self.left_col,
            text,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::EditBuffer;
    use core_text::WrapPosition;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_mode_toggles() {
        assert_eq!(InsertMode::Insert.toggled(), InsertMode::Overwrite);
        assert_eq!(InsertMode::Overwrite.toggled().label(), "INS");
    }

    #[test]
    fn wrapped_anchor_is_stored_as_byte_offset() {
        let text = EditBuffer::from_str("p", "aaaa bbbb cccc\nx\ny\nz");
        let mut vp = Viewport::new(2, 6, 8);
        vp.set_wrap(WrapMode::Soft, &text);
        // wrap width 5: "aaaa " "bbbb " "cccc"
        if let WrapAdapter::Soft { top, .. } = vp.adapter_mut() {
            *top = WrapPosition::new(0, 2);
        }
        let mut params = ViewParameters::default();
        params.capture_viewport(&vp, &text);
        assert_eq!((params.top_line, params.top_offset), (0, 10));
        assert_eq!(params.wrap_mode, WrapMode::Soft);

        // re-applied to a wider viewport: same logical line
        let mut other = Viewport::new(2, 40, 4);
        params.apply_viewport(&mut other, &text);
        assert_eq!(other.wrap_mode(), WrapMode::Soft);
        assert_eq!(other.tab_size(), 8);
        // wrap width 39 keeps the line whole, offset 10 falls on sub-line 0
        assert_eq!(other.adapter().top(), WrapPosition::new(0, 0));
    }

    #[test]
    fn unwrapped_anchor_round_trips() {
        let text = EditBuffer::from_str("p", "0\n1\n2\n3\n4\n5");
        let mut vp = Viewport::new(2, 10, 8);
        if let WrapAdapter::Off { top_line, left_col } = vp.adapter_mut() {
            *top_line = 3;
            *left_col = 2;
        }
        let mut params = ViewParameters::new(4, WrapMode::Soft);
        params.capture_viewport(&vp, &text);
        assert_eq!(params.wrap_mode, WrapMode::None);
        let mut other = Viewport::new(2, 10, 8);
        other.set_wrap(WrapMode::Soft, &text);
        params.apply_viewport(&mut other, &text);
        assert_eq!(other.wrap_mode(), WrapMode::None);
        assert_eq!(other.adapter().top_line(), 3);
        assert_eq!(other.adapter().left_col(), 2);
    }
}
