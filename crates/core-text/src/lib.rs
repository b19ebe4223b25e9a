//! Rope-backed text storage and the coordinate types shared by every other crate.
//!
//! Two coordinate spaces live here:
//! * [`Position`]: a logical `(line, byte)` address inside the unwrapped
//!   document. Byte offsets always sit on grapheme boundaries once clamped.
//! * [`WrapPosition`]: a `(line, sub_line)` address inside the soft-wrapped
//!   display.
//!
//! Keeping them as distinct types means a wrapped anchor can never be fed to an
//! API expecting a byte offset. Screen columns are plain `usize` values
//! computed through [`grapheme::screen_col`].
//!
//! The buffer is LF-only. Callers normalize CRLF / CR input before
//! construction (see `core_state::normalize_line_endings`).

use ropey::{Rope, RopeSlice};
use std::ops::Range;

pub mod grapheme;
pub mod motion;
mod position;
pub mod width;

pub use position::{Position, WrapPosition};
pub use width::egc_width;

/// Named text stored in a `ropey::Rope`.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    pub name: String,
}

fn without_newline(line: RopeSlice<'_>) -> RopeSlice<'_> {
    let chars = line.len_chars();
    if chars > 0 && line.char(chars - 1) == '\n' {
        line.slice(..chars - 1)
    } else {
        line
    }
}

impl Buffer {
    pub fn from_str(name: impl Into<String>, content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
            name: name.into(),
        }
    }

    /// Lines in the buffer. A trailing newline opens an empty last line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line `idx` including its newline, `None` past the end.
    pub fn line(&self, idx: usize) -> Option<String> {
        (idx < self.line_count()).then(|| self.rope.line(idx).to_string())
    }

    /// Line text without its newline. Empty for out-of-range lines.
    pub fn line_content(&self, idx: usize) -> String {
        if idx >= self.line_count() {
            return String::new();
        }
        without_newline(self.rope.line(idx)).to_string()
    }

    /// Byte length of a line excluding its newline.
    pub fn line_byte_len(&self, idx: usize) -> usize {
        if idx >= self.line_count() {
            return 0;
        }
        without_newline(self.rope.line(idx)).len_bytes()
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    fn offset(&self, pos: Position) -> usize {
        self.rope.line_to_byte(pos.line) + pos.byte
    }

    fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.rope.len_bytes());
        let line = self.rope.byte_to_line(offset);
        Position::new(line, offset - self.rope.line_to_byte(line))
    }

    /// Char range covering the text between `a` and `b` in either order.
    fn char_span(&self, a: Position, b: Position) -> Range<usize> {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let total = self.rope.len_bytes();
        let start = self.offset(start).min(total);
        let end = self.offset(end).min(total).max(start);
        self.rope.byte_to_char(start)..self.rope.byte_to_char(end)
    }

    /// Insert `g` at `pos` and advance `pos` past it on the same line.
    pub fn insert_grapheme(&mut self, pos: &mut Position, g: &str) {
        let at = self.rope.byte_to_char(self.offset(*pos));
        self.rope.insert(at, g);
        pos.byte += g.len();
    }

    /// Insert text that may span lines; `pos` ends up after it.
    pub fn insert_str(&mut self, pos: &mut Position, s: &str) {
        let offset = self.offset(*pos);
        self.rope.insert(self.rope.byte_to_char(offset), s);
        *pos = self.position_of(offset + s.len());
    }

    /// Split the line at `pos`; `pos` moves to the start of the new line.
    pub fn insert_newline(&mut self, pos: &mut Position) {
        let at = self.rope.byte_to_char(self.offset(*pos));
        self.rope.insert_char(at, '\n');
        *pos = Position::new(pos.line + 1, 0);
    }

    /// Backspace: remove the grapheme before `pos`, or join with the
    /// previous line at a line start. No-op at the document start.
    pub fn delete_grapheme_before(&mut self, pos: &mut Position) {
        let start = if pos.byte > 0 {
            let content = self.line_content(pos.line);
            Position::new(pos.line, grapheme::prev_boundary(&content, pos.byte))
        } else if pos.line > 0 {
            Position::new(pos.line - 1, self.line_byte_len(pos.line - 1))
        } else {
            return;
        };
        self.delete_range(start, *pos);
        *pos = start;
    }

    /// Remove the grapheme at `pos`, or join the next line at a line end.
    pub fn delete_grapheme_at(&mut self, pos: &mut Position) {
        let len = self.line_byte_len(pos.line);
        let end = if pos.byte < len {
            let content = self.line_content(pos.line);
            Position::new(pos.line, grapheme::next_boundary(&content, pos.byte))
        } else if pos.line + 1 < self.line_count() {
            Position::new(pos.line + 1, 0)
        } else {
            return;
        };
        self.delete_range(*pos, end);
    }

    /// Text between two positions in either order.
    pub fn slice(&self, a: Position, b: Position) -> String {
        self.rope.slice(self.char_span(a, b)).to_string()
    }

    /// Remove the text between two positions in either order and return it.
    pub fn delete_range(&mut self, a: Position, b: Position) -> String {
        let span = self.char_span(a, b);
        let removed = self.rope.slice(span.clone()).to_string();
        self.rope.remove(span);
        removed
    }
}
