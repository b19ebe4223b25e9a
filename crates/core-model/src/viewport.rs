use crate::{WrapAdapter, WrapMode};
use core_state::TextBuffer;
use core_text::{Position, WrapPosition};
use core_wrap::{WrapInfo, WrapMetrics};
use tracing::{debug, trace};

/// Scrollbar geometry in rows: `first` of `total` rows, `visible` rows shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarState {
    pub total: usize,
    pub first: usize,
    pub visible: usize,
}

/// Visible region of the text plus the redraw flag.
#[derive(Debug)]
pub struct Viewport {
    adapter: WrapAdapter,
    height: usize,
    width: usize,
    tab_size: usize,
    screen_col: usize,
    redraw: bool,
}

impl Viewport {
    /// Unwrapped viewport anchored at the document start. Zero sizes clamp to 1.
    pub fn new(height: usize, width: usize, tab_size: usize) -> Self {
        Self {
            adapter: WrapAdapter::default(),
            height: height.max(1),
            width: width.max(1),
            tab_size: tab_size.max(1),
            screen_col: 0,
            redraw: true,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn tab_size(&self) -> usize {
        self.tab_size
    }
    /// Screen column of the cursor as of the last visibility check.
    pub fn screen_col(&self) -> usize {
        self.screen_col
    }
    pub fn set_screen_col(&mut self, col: usize) {
        self.screen_col = col;
    }
    pub fn adapter(&self) -> &WrapAdapter {
        &self.adapter
    }
    pub fn adapter_mut(&mut self) -> &mut WrapAdapter {
        &mut self.adapter
    }
    pub fn wrap_mode(&self) -> WrapMode {
        self.adapter.mode()
    }
    pub fn metrics(&self) -> Option<&dyn WrapMetrics> {
        self.adapter.metrics()
    }

    /// Wrap width used for soft wrapping: one column is kept free for the cursor at line end.
    pub fn wrap_width(&self) -> usize {
        self.width.saturating_sub(1).max(1)
    }

    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }
    pub fn request_redraw(&mut self) {
        self.redraw = true;
    }
    /// Return the redraw flag and clear it.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Returns true when the tab size changed.
    pub fn set_tab_size(&mut self, tab_size: usize) -> bool {
        let tab_size = tab_size.max(1);
        if tab_size == self.tab_size {
            return false;
        }
        self.tab_size = tab_size;
        if let WrapAdapter::Soft { metrics, .. } = &mut self.adapter {
            metrics.set_tab_size(tab_size);
        }
        self.redraw = true;
        true
    }

    /// Scroll the minimum amount that brings the cursor on screen.
    /// Returns true when the anchor moved.
    pub fn ensure_cursor_visible(&mut self, text: &dyn TextBuffer) -> bool {
        let cursor = text.cursor();
        debug_assert!(cursor.line < text.line_count(), "cursor line out of range");
        let height = self.height;
        let width = self.width;
        let mut moved = false;
        match &mut self.adapter {
            WrapAdapter::Off { top_line, left_col } => {
                self.screen_col = text.screen_col(cursor, self.tab_size);
                let glyph = if cursor.byte == text.line_max(cursor.line) {
                    1
                } else {
                    text.width_at(cursor, self.tab_size)
                };
                if let Some(first) = scroll_intent(*top_line, cursor.line, height) {
                    *top_line = first;
                    moved = true;
                }
                if self.screen_col < *left_col {
                    *left_col = self.screen_col;
                    moved = true;
                }
                if self.screen_col + glyph > *left_col + width {
                    // a glyph wider than the view keeps its first column visible
                    *left_col = (self.screen_col + glyph - width).min(self.screen_col);
                    moved = true;
                }
                if moved {
                    trace!(target: "view.scroll", top_line = *top_line, left_col = *left_col, "scroll");
                }
            }
            WrapAdapter::Soft { top, metrics } => {
                let sub = metrics.find_line(text, cursor);
                self.screen_col = metrics.screen_col(text, cursor);
                let at = WrapPosition::new(cursor.line, sub);
                let line = top.line.min(text.line_count().saturating_sub(1));
                let clamped = WrapPosition::new(
                    line,
                    top.sub_line.min(metrics.line_count(text, line).saturating_sub(1)),
                );
                if clamped != *top {
                    *top = clamped;
                    moved = true;
                }
                if at < *top {
                    *top = at;
                    moved = true;
                } else {
                    let mut bottom = *top;
                    metrics.add_lines(text, &mut bottom, height - 1);
                    while cursor.line > bottom.line {
                        let rest = metrics
                            .line_count(text, bottom.line)
                            .saturating_sub(bottom.sub_line);
                        metrics.add_lines(text, top, rest);
                        bottom = WrapPosition::new(bottom.line + 1, 0);
                        moved = true;
                    }
                    if cursor.line == bottom.line && sub > bottom.sub_line {
                        metrics.add_lines(text, top, sub - bottom.sub_line);
                        moved = true;
                    }
                }
                if moved {
                    trace!(target: "view.scroll", line = top.line, sub_line = top.sub_line, "scroll_wrapped");
                }
            }
        }
        self.redraw |= moved;
        moved
    }

    /// Change the text area size. Returns true when the wrap layout was
    /// recomputed, in which case the caller should refresh its sticky column
    /// from [`Viewport::screen_col`].
    pub fn resize(&mut self, height: usize, width: usize, text: &dyn TextBuffer) -> bool {
        let height = height.max(1);
        let width = width.max(1);
        if width != self.width || height > self.height {
            self.redraw = true;
        }
        debug!(target: "view.resize", old_height = self.height, old_width = self.width, height, width, "resize");
        self.height = height;
        self.width = width;
        let wrap_width = self.wrap_width();
        let rewrapped = match &mut self.adapter {
            WrapAdapter::Soft { top, metrics } => {
                let byte = metrics.line_pos(text, top.line, 0, top.sub_line);
                metrics.set_wrap_width(wrap_width);
                top.sub_line = metrics.find_line(text, Position::new(top.line, byte));
                true
            }
            WrapAdapter::Off { .. } => false,
        };
        self.ensure_cursor_visible(text);
        rewrapped
    }

    /// Switch wrap mode and scroll to the cursor. Same mode is a no-op.
    pub fn set_wrap(&mut self, mode: WrapMode, text: &dyn TextBuffer) -> bool {
        if !self.switch_wrap(mode) {
            return false;
        }
        self.ensure_cursor_visible(text);
        true
    }

    /// Enable soft wrapping with caller supplied metrics. Width and tab size
    /// are overwritten with the viewport's own.
    pub fn enable_with(&mut self, metrics: Box<dyn WrapMetrics>, text: &dyn TextBuffer) {
        self.install_metrics(metrics);
        self.ensure_cursor_visible(text);
    }

    pub(crate) fn switch_wrap(&mut self, mode: WrapMode) -> bool {
        if mode == self.wrap_mode() {
            return false;
        }
        match mode {
            WrapMode::Soft => {
                let metrics = Box::new(WrapInfo::new(self.wrap_width(), self.tab_size));
                self.install_metrics(metrics);
            }
            WrapMode::None => {
                let top_line = self.adapter.top_line();
                self.adapter = WrapAdapter::Off {
                    top_line,
                    left_col: 0,
                };
                self.redraw = true;
                debug!(target: "view.wrap", top_line, "wrap_disabled");
            }
        }
        true
    }

    fn install_metrics(&mut self, mut metrics: Box<dyn WrapMetrics>) {
        metrics.set_wrap_width(self.wrap_width());
        metrics.set_tab_size(self.tab_size);
        let top = WrapPosition::new(self.adapter.top_line(), 0);
        debug!(target: "view.wrap", width = metrics.wrap_width(), top_line = top.line, "wrap_enabled");
        self.adapter = WrapAdapter::Soft { top, metrics };
        self.redraw = true;
    }

    /// Re-anchor from a logical top-left. Out of range values are clamped to the text.
    pub(crate) fn restore_top(&mut self, top: Position, left: usize, text: &dyn TextBuffer) {
        let mut top = top;
        top.clamp_to(text.line_count(), |l| text.line_max(l));
        match &mut self.adapter {
            WrapAdapter::Off { top_line, left_col } => {
                *top_line = top.line;
                *left_col = left;
            }
            WrapAdapter::Soft { top: anchor, metrics } => {
                *anchor = WrapPosition::new(top.line, metrics.find_line(text, top));
            }
        }
        self.redraw = true;
    }

    /// Put the anchor back at the document start.
    pub fn reset_top(&mut self) {
        match &mut self.adapter {
            WrapAdapter::Off { top_line, left_col } => {
                *top_line = 0;
                *left_col = 0;
            }
            WrapAdapter::Soft { top, .. } => *top = WrapPosition::new(0, 0),
        }
        self.redraw = true;
    }

    pub fn scrollbar(&self, text: &dyn TextBuffer) -> ScrollbarState {
        match &self.adapter {
            WrapAdapter::Off { top_line, .. } => ScrollbarState {
                total: text.line_count().max(top_line + self.height),
                first: *top_line,
                visible: self.height,
            },
            WrapAdapter::Soft { top, metrics } => {
                let first = (0..top.line)
                    .map(|l| metrics.line_count(text, l))
                    .sum::<usize>()
                    + top.sub_line;
                ScrollbarState {
                    total: metrics.size(text).max(first + self.height),
                    first,
                    visible: self.height,
                }
            }
        }
    }
}

/// New first line that brings `cursor_line` into `[first, first + height)`,
/// or `None` when it is already there.
pub fn scroll_intent(first: usize, cursor_line: usize, height: usize) -> Option<usize> {
    if height == 0 {
        return None;
    }
    if cursor_line < first {
        Some(cursor_line)
    } else if cursor_line >= first + height {
        Some(cursor_line + 1 - height)
    } else {
        None
    }
}
