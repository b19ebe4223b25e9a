//! Text buffer contract consumed by the edit window, plus a rope-backed reference buffer.
//!
//! The window never touches storage directly. Everything it needs from a
//! buffer (line metrics, tab-aware column mapping, cursor, selection, edit
//! primitives, undo) goes through [`TextBuffer`]. [`EditBuffer`] is the
//! implementation shipped with the workspace; hosts with their own storage
//! implement the trait instead.
//!
//! Cursor and selection live in the buffer, not the window, so two windows
//! attached to the same buffer one after another share them. The window owns
//! only view state (scroll anchor, wrap metrics, sticky column).
//!
//! Undo policy of [`EditBuffer`]:
//! - character inserts, overwrites, deletes and backspaces coalesce into one
//!   undo unit until the cursor is moved or a structural edit happens;
//! - line breaks, merges, block inserts and selection edits are discrete units.

use core_text::Position;

mod clipboard;
mod edit_buffer;
mod selection;
pub mod undo;

pub use clipboard::{Clipboard, TextBlock};
pub use edit_buffer::EditBuffer;
pub use selection::{Selection, SelectionMode};
pub use undo::{History, UNDO_HISTORY_MAX};

/// Operations the edit window requires from a text buffer.
///
/// Positions handed in must satisfy `line < line_count()` and
/// `byte <= line_max(line)`; implementations may assert on violations.
/// Edit primitives return `false` when nothing changed (for example a merge on
/// the last line) and leave the buffer untouched in that case.
pub trait TextBuffer {
    /// Display name used in logs.
    fn name(&self) -> &str;

    fn line_count(&self) -> usize;
    /// Byte length of `line`, excluding the line terminator.
    fn line_max(&self, line: usize) -> usize;
    /// Content of `line` without its terminator.
    fn line_text(&self, line: usize) -> String;

    fn cursor(&self) -> Position;
    fn set_cursor(&mut self, pos: Position);

    /// Cells occupied by the grapheme at `pos`; 1 at the line end.
    fn width_at(&self, pos: Position, tabsize: usize) -> usize;
    /// Tab-aware screen column of `pos` in its unwrapped line.
    fn screen_col(&self, pos: Position, tabsize: usize) -> usize;
    /// Byte offset in `line` of the grapheme covering screen column `col`, clamped to the line end.
    fn line_pos(&self, line: usize, col: usize, tabsize: usize) -> usize;

    /// Move the cursor by `delta` graphemes within its line, clamped to the line bounds.
    fn adjust_position(&mut self, delta: isize);
    fn next_word(&mut self);
    fn previous_word(&mut self);

    fn insert_char(&mut self, c: char) -> bool;
    fn overwrite_char(&mut self, c: char) -> bool;
    /// Delete the grapheme under the cursor. False at the line end.
    fn delete_char(&mut self) -> bool;
    /// Delete the grapheme before the cursor. False at the line start.
    fn backspace_char(&mut self) -> bool;
    /// Join lines: with `backspace` the cursor line onto the previous one,
    /// otherwise the next line onto the cursor line.
    fn merge(&mut self, backspace: bool) -> bool;
    /// Split the cursor line; the cursor moves to the start of the new line.
    fn break_line(&mut self) -> bool;
    /// Insert text that may span lines; the cursor moves to its end.
    fn insert_text(&mut self, text: &str) -> bool;

    fn selection_mode(&self) -> SelectionMode;
    /// Entering `Shift` or `Mark` from `None` anchors the selection at the cursor.
    /// `All` selects the whole document. `None` clears the range.
    fn set_selection_mode(&mut self, mode: SelectionMode);
    fn selection_start(&self) -> Position;
    fn selection_end(&self) -> Position;
    /// Select an explicit range in `Shift` mode.
    fn set_selection(&mut self, start: Position, end: Position);
    /// Move the selection end to the cursor.
    fn set_selection_end(&mut self);
    fn selection_empty(&self) -> bool;
    /// Delete the selected range and place the cursor at its earlier endpoint.
    fn delete_selection(&mut self) -> bool;
    /// Detached copy of the selected text, `None` when nothing is selected.
    fn convert_selection(&self) -> Option<TextBlock>;
    fn insert_block(&mut self, block: &TextBlock) -> bool;
    /// Replace the selected range with `text` as one undo unit.
    fn replace_selection(&mut self, text: &str) -> bool;

    /// Undo one unit. `None` when there is nothing to undo, otherwise the remaining depth.
    fn apply_undo(&mut self) -> Option<usize>;
    fn apply_redo(&mut self) -> Option<usize>;
    fn is_modified(&self) -> bool;
}

/// Line ending style detected from source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::Crlf => "\r\n",
        }
    }
}

/// Result of normalizing line endings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    pub normalized: String,
    /// Majority style of the input, ties resolved CRLF > LF > CR.
    pub original: LineEnding,
    pub mixed: bool,
}

/// Rewrite CRLF and lone CR terminators to LF.
pub fn normalize_line_endings(input: &str) -> NormalizedText {
    let (mut crlf, mut lf, mut cr) = (0usize, 0usize, 0usize);
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                crlf += 1;
                out.push('\n');
            }
            '\r' => {
                cr += 1;
                out.push('\n');
            }
            '\n' => {
                lf += 1;
                out.push('\n');
            }
            c => out.push(c),
        }
    }
    let mut original = LineEnding::Lf;
    let mut max = 0;
    for (style, count) in [
        (LineEnding::Crlf, crlf),
        (LineEnding::Lf, lf),
        (LineEnding::Cr, cr),
    ] {
        if count > max {
            max = count;
            original = style;
        }
    }
    let mixed = [crlf, lf, cr].iter().filter(|c| **c > 0).count() > 1;
    NormalizedText {
        normalized: out,
        original,
        mixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_and_cr_become_lf() {
        let n = normalize_line_endings("a\r\nb\r\nc\rd\n");
        assert_eq!(n.normalized, "a\nb\nc\nd\n");
        assert_eq!(n.original, LineEnding::Crlf);
        assert!(n.mixed);
    }

    #[test]
    fn lf_only_input_is_untouched() {
        let n = normalize_line_endings("x\ny");
        assert_eq!(n.normalized, "x\ny");
        assert_eq!(n.original, LineEnding::Lf);
        assert!(!n.mixed);
        assert_eq!(n.original.as_str(), "\n");
    }
}
