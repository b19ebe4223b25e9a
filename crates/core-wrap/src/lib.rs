//! Soft-wrap metrics: mapping between logical `(line, byte)` positions and wrapped
//! `(line, sub_line)` rows.
//!
//! A logical line of text is split into sub-lines no wider than the wrap width.
//! Break points prefer the position right after a run of blanks; a word longer
//! than the width is split at the last grapheme that fits. A single grapheme
//! wider than the width occupies a sub-line on its own. Tabs expand relative to
//! the start of the sub-line they land on, since each sub-line is drawn from
//! column 0.
//!
//! Metrics hold no reference to the text. Every query receives the buffer, so
//! the same object stays valid across edits and buffer swaps; only width and
//! tab size are state.

use core_state::TextBuffer;
use core_text::{Position, WrapPosition, grapheme};
use tracing::debug;

/// Wrapped-coordinate queries used by the viewport and the cursor navigator.
pub trait WrapMetrics {
    fn wrap_width(&self) -> usize;
    fn set_wrap_width(&mut self, width: usize);
    fn tab_size(&self) -> usize;
    fn set_tab_size(&mut self, tabsize: usize);

    /// Number of sub-lines `line` wraps into (at least 1).
    fn line_count(&self, text: &dyn TextBuffer, line: usize) -> usize;
    /// Sub-line containing `pos`. A byte offset equal to a break point belongs to the later sub-line.
    fn find_line(&self, text: &dyn TextBuffer, pos: Position) -> usize;
    /// Byte offset in `line` of the grapheme covering `col` on sub-line `sub_line`.
    ///
    /// The result never leaves the sub-line: on every sub-line but the last it is
    /// clamped to the start of the sub-line's final grapheme.
    fn line_pos(&self, text: &dyn TextBuffer, line: usize, col: usize, sub_line: usize) -> usize;
    /// Column of `pos` within its sub-line.
    fn screen_col(&self, text: &dyn TextBuffer, pos: Position) -> usize;

    /// Advance `pos` by `count` sub-lines. Returns true on overflow, in which case
    /// `pos` is left on the last sub-line of the document.
    fn add_lines(&self, text: &dyn TextBuffer, pos: &mut WrapPosition, count: usize) -> bool {
        let mut count = count;
        loop {
            let last = self.line_count(text, pos.line) - 1;
            let below = last - pos.sub_line.min(last);
            if count <= below {
                pos.sub_line += count;
                return false;
            }
            if pos.line + 1 >= text.line_count() {
                pos.sub_line = self.line_count(text, pos.line) - 1;
                return true;
            }
            count -= below + 1;
            pos.line += 1;
            pos.sub_line = 0;
        }
    }

    /// Move `pos` back by `count` sub-lines. Returns true on underflow, in which case
    /// `pos` is left at `(0, 0)`.
    fn sub_lines(&self, text: &dyn TextBuffer, pos: &mut WrapPosition, count: usize) -> bool {
        let mut count = count;
        loop {
            if count <= pos.sub_line {
                pos.sub_line -= count;
                return false;
            }
            if pos.line == 0 {
                pos.sub_line = 0;
                return true;
            }
            count -= pos.sub_line + 1;
            pos.line -= 1;
            pos.sub_line = self.line_count(text, pos.line) - 1;
        }
    }

    /// Last sub-line of the document.
    fn end(&self, text: &dyn TextBuffer) -> WrapPosition {
        let line = text.line_count().saturating_sub(1);
        WrapPosition::new(line, self.line_count(text, line) - 1)
    }

    /// Total number of sub-lines in the document.
    fn size(&self, text: &dyn TextBuffer) -> usize {
        (0..text.line_count())
            .map(|line| self.line_count(text, line))
            .sum()
    }

    fn to_wrapped(&self, text: &dyn TextBuffer, pos: Position) -> WrapPosition {
        WrapPosition::new(pos.line, self.find_line(text, pos))
    }
}

/// Grapheme and tab aware [`WrapMetrics`] implementation.
#[derive(Debug, Clone)]
pub struct WrapInfo {
    width: usize,
    tabsize: usize,
}

impl WrapInfo {
    /// Width and tab size are clamped to at least 1.
    pub fn new(width: usize, tabsize: usize) -> Self {
        Self {
            width: width.max(1),
            tabsize: tabsize.max(1),
        }
    }

    /// Start byte of every sub-line of `line`. The first entry is always 0.
    pub fn breaks(&self, line: &str) -> Vec<usize> {
        let mut starts = vec![0usize];
        let mut col = 0usize;
        // Byte just after the most recent blank on the current sub-line.
        let mut soft: Option<usize> = None;
        for (idx, g) in grapheme::iter_indices(line) {
            let mut w = grapheme::cell_width(g, col, self.tabsize);
            while col + w > self.width {
                let start = *starts.last().unwrap_or(&0);
                if idx <= start {
                    break;
                }
                let brk = match soft {
                    Some(b) if b > start && b <= idx => b,
                    _ => idx,
                };
                starts.push(brk);
                soft = None;
                col = self.span_width(&line[brk..idx]);
                w = grapheme::cell_width(g, col, self.tabsize);
            }
            col += w;
            if is_blank(g) {
                soft = Some(idx + g.len());
            }
        }
        starts
    }

    fn span_width(&self, s: &str) -> usize {
        grapheme::screen_col(s, s.len(), self.tabsize)
    }

    fn sub_line_bounds(starts: &[usize], sub_line: usize, line_len: usize) -> (usize, usize) {
        let sub = sub_line.min(starts.len() - 1);
        let end = starts.get(sub + 1).copied().unwrap_or(line_len);
        (starts[sub], end)
    }
}

fn is_blank(g: &str) -> bool {
    g == " " || g == "\t"
}

impl WrapMetrics for WrapInfo {
    fn wrap_width(&self) -> usize {
        self.width
    }

    fn set_wrap_width(&mut self, width: usize) {
        let width = width.max(1);
        if width != self.width {
            debug!(target: "view.wrap", old = self.width, new = width, "wrap_width_changed");
        }
        self.width = width;
    }

    fn tab_size(&self) -> usize {
        self.tabsize
    }

    fn set_tab_size(&mut self, tabsize: usize) {
        self.tabsize = tabsize.max(1);
    }

    fn line_count(&self, text: &dyn TextBuffer, line: usize) -> usize {
        self.breaks(&text.line_text(line)).len()
    }

    fn find_line(&self, text: &dyn TextBuffer, pos: Position) -> usize {
        let starts = self.breaks(&text.line_text(pos.line));
        starts[1..].iter().take_while(|s| **s <= pos.byte).count()
    }

    fn line_pos(&self, text: &dyn TextBuffer, line: usize, col: usize, sub_line: usize) -> usize {
        let content = text.line_text(line);
        let starts = self.breaks(&content);
        let last = sub_line >= starts.len() - 1;
        let (start, end) = Self::sub_line_bounds(&starts, sub_line, content.len());
        let piece = &content[start..end];
        let rel = grapheme::byte_at_col(piece, col, self.tabsize);
        if !last && rel >= piece.len() {
            start + grapheme::prev_boundary(piece, piece.len())
        } else {
            start + rel
        }
    }

    fn screen_col(&self, text: &dyn TextBuffer, pos: Position) -> usize {
        let content = text.line_text(pos.line);
        let starts = self.breaks(&content);
        let sub = starts[1..].iter().take_while(|s| **s <= pos.byte).count();
        let start = starts[sub];
        let byte = pos.byte.clamp(start, content.len());
        grapheme::screen_col(&content[start..], byte - start, self.tabsize)
    }
}
