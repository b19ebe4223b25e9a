//! Cursor movement.
//!
//! Horizontal moves and line-end jumps make the new screen column sticky.
//! Vertical and page moves aim for the sticky column and keep it, except when
//! they hit a document edge, where the cursor clamps to the line end (or the
//! start) and the sticky column is refreshed.

use crate::{MotionKind, WindowState};
use core_model::WrapAdapter;
use core_state::TextBuffer;
use core_text::{Position, WrapPosition, grapheme};
use tracing::trace;

pub(crate) fn handle_motion(kind: MotionKind, state: &mut WindowState, text: &mut dyn TextBuffer) {
    let before = text.cursor();
    match kind {
        MotionKind::CharRight => char_right(state, text),
        MotionKind::CharLeft => char_left(state, text),
        MotionKind::WordRight => {
            text.next_word();
            state.settle(text);
        }
        MotionKind::WordLeft => {
            text.previous_word();
            state.settle(text);
        }
        MotionKind::LineDown => line_down(state, text),
        MotionKind::LineUp => line_up(state, text),
        MotionKind::PageDown => page_down(state, text),
        MotionKind::PageUp => page_up(state, text),
        MotionKind::Home => home(state, text),
        MotionKind::End => {
            let cur = text.cursor();
            text.set_cursor(Position::new(cur.line, text.line_max(cur.line)));
            state.settle(text);
        }
        MotionKind::DocumentStart => {
            text.set_cursor(Position::origin());
            state.viewport.ensure_cursor_visible(text);
            state.last_set_pos = 0;
        }
        MotionKind::DocumentEnd => {
            let line = text.line_count() - 1;
            text.set_cursor(Position::new(line, text.line_max(line)));
            state.settle(text);
        }
    }
    let after = text.cursor();
    trace!(target: "actions.motion", motion = ?kind, line = before.line, byte = before.byte, to_line = after.line, to_byte = after.byte, sticky = state.last_set_pos, "motion");
}

fn char_right(state: &mut WindowState, text: &mut dyn TextBuffer) {
    let cur = text.cursor();
    if cur.byte == text.line_max(cur.line) {
        if cur.line + 1 >= text.line_count() {
            return;
        }
        text.set_cursor(Position::new(cur.line + 1, 0));
    } else {
        text.adjust_position(1);
    }
    state.settle(text);
}

fn char_left(state: &mut WindowState, text: &mut dyn TextBuffer) {
    let cur = text.cursor();
    if text.screen_col(cur, state.viewport.tab_size()) == 0 {
        if cur.line == 0 {
            return;
        }
        let line = cur.line - 1;
        text.set_cursor(Position::new(line, text.line_max(line)));
    } else {
        text.adjust_position(-1);
    }
    state.settle(text);
}

/// Where a vertical step lands and whether the sticky column must be refreshed.
struct Landing {
    pos: Position,
    refresh: bool,
}

fn land(state: &mut WindowState, text: &mut dyn TextBuffer, landing: Landing) {
    text.set_cursor(landing.pos);
    if landing.refresh {
        state.settle(text);
    } else {
        state.viewport.ensure_cursor_visible(text);
    }
}

fn line_down(state: &mut WindowState, text: &mut dyn TextBuffer) {
    let cur = text.cursor();
    let sticky = state.last_set_pos;
    let tab = state.viewport.tab_size();
    let has_next = cur.line + 1 < text.line_count();
    let at_end = Landing {
        pos: Position::new(cur.line, text.line_max(cur.line)),
        refresh: true,
    };
    let landing = match state.viewport.metrics() {
        None if has_next => Landing {
            pos: Position::new(cur.line + 1, text.line_pos(cur.line + 1, sticky, tab)),
            refresh: false,
        },
        None => at_end,
        Some(metrics) => {
            let next_sub = metrics.find_line(text, cur) + 1;
            if next_sub < metrics.line_count(text, cur.line) {
                Landing {
                    pos: Position::new(cur.line, metrics.line_pos(text, cur.line, sticky, next_sub)),
                    refresh: false,
                }
            } else if has_next {
                Landing {
                    pos: Position::new(cur.line + 1, metrics.line_pos(text, cur.line + 1, sticky, 0)),
                    refresh: false,
                }
            } else {
                at_end
            }
        }
    };
    land(state, text, landing);
}

fn line_up(state: &mut WindowState, text: &mut dyn TextBuffer) {
    let cur = text.cursor();
    let sticky = state.last_set_pos;
    let tab = state.viewport.tab_size();
    let at_start = Landing {
        pos: Position::new(cur.line, 0),
        refresh: true,
    };
    let landing = match state.viewport.metrics() {
        None if cur.line > 0 => Landing {
            pos: Position::new(cur.line - 1, text.line_pos(cur.line - 1, sticky, tab)),
            refresh: false,
        },
        None => at_start,
        Some(metrics) => {
            let sub = metrics.find_line(text, cur);
            if sub > 0 {
                Landing {
                    pos: Position::new(cur.line, metrics.line_pos(text, cur.line, sticky, sub - 1)),
                    refresh: false,
                }
            } else if cur.line > 0 {
                let line = cur.line - 1;
                let last_sub = metrics.line_count(text, line) - 1;
                Landing {
                    pos: Position::new(line, metrics.line_pos(text, line, sticky, last_sub)),
                    refresh: false,
                }
            } else {
                at_start
            }
        }
    };
    land(state, text, landing);
}

/// Rows moved by a page step: one row of overlap is kept.
fn page_step(height: usize) -> usize {
    height.saturating_sub(1).max(1)
}

fn page_down(state: &mut WindowState, text: &mut dyn TextBuffer) {
    let cur = text.cursor();
    let sticky = state.last_set_pos;
    let tab = state.viewport.tab_size();
    let height = state.viewport.height();
    let step = page_step(height);
    let lines = text.line_count();
    let mut scrolled = false;
    let landing = match state.viewport.adapter_mut() {
        WrapAdapter::Off { top_line, .. } => {
            // keep the top line when the end of the text is already on screen
            if *top_line + height < lines {
                *top_line = (*top_line + step).min(lines - height);
                scrolled = true;
            }
            if cur.line + step < lines {
                let line = cur.line + step;
                Landing {
                    pos: Position::new(line, text.line_pos(line, sticky, tab)),
                    refresh: false,
                }
            } else {
                let line = lines - 1;
                Landing {
                    pos: Position::new(line, text.line_max(line)),
                    refresh: true,
                }
            }
        }
        WrapAdapter::Soft { top, metrics } => {
            let mut target = WrapPosition::new(cur.line, metrics.find_line(text, cur));
            let overflow = metrics.add_lines(text, &mut target, step);
            let mut new_top = *top;
            if !metrics.add_lines(text, &mut new_top, height) {
                metrics.sub_lines(text, &mut new_top, 1);
                scrolled = new_top != *top;
                *top = new_top;
            }
            if overflow {
                Landing {
                    pos: Position::new(target.line, text.line_max(target.line)),
                    refresh: true,
                }
            } else {
                let byte = metrics.line_pos(text, target.line, sticky, target.sub_line);
                Landing {
                    pos: Position::new(target.line, byte),
                    refresh: false,
                }
            }
        }
    };
    if scrolled {
        state.viewport.request_redraw();
    }
    land(state, text, landing);
}

fn page_up(state: &mut WindowState, text: &mut dyn TextBuffer) {
    let cur = text.cursor();
    let sticky = state.last_set_pos;
    let tab = state.viewport.tab_size();
    let step = page_step(state.viewport.height());
    let scrolled;
    let mut at_origin = false;
    let landing = match state.viewport.adapter_mut() {
        WrapAdapter::Off { top_line, .. } => {
            if *top_line < step {
                scrolled = *top_line != 0;
                *top_line = 0;
            } else {
                *top_line -= step;
                scrolled = true;
            }
            if cur.line < step {
                at_origin = true;
                Landing {
                    pos: Position::origin(),
                    refresh: false,
                }
            } else {
                let line = cur.line - step;
                Landing {
                    pos: Position::new(line, text.line_pos(line, sticky, tab)),
                    refresh: false,
                }
            }
        }
        WrapAdapter::Soft { top, metrics } => {
            let mut target = WrapPosition::new(cur.line, metrics.find_line(text, cur));
            let underflow = metrics.sub_lines(text, &mut target, step);
            let before = *top;
            metrics.sub_lines(text, top, step);
            scrolled = before != *top;
            if underflow {
                at_origin = true;
                Landing {
                    pos: Position::origin(),
                    refresh: false,
                }
            } else {
                let byte = metrics.line_pos(text, target.line, sticky, target.sub_line);
                Landing {
                    pos: Position::new(target.line, byte),
                    refresh: false,
                }
            }
        }
    };
    if scrolled {
        state.viewport.request_redraw();
    }
    if at_origin {
        state.last_set_pos = 0;
    }
    land(state, text, landing);
}

fn home(state: &mut WindowState, text: &mut dyn TextBuffer) {
    let cur = text.cursor();
    let mut byte = text.line_pos(cur.line, 0, state.viewport.tab_size());
    if state.indent_aware_home {
        let indent = grapheme::indent_len(&text.line_text(cur.line));
        if indent > 0 && cur.byte != indent {
            byte = indent;
        }
    }
    text.set_cursor(Position::new(cur.line, byte));
    state.settle(text);
}

/// Jump to 1-based `line`, keeping the byte offset when the new line is long enough.
pub(crate) fn goto_line(state: &mut WindowState, text: &mut dyn TextBuffer, line: usize) {
    if line < 1 {
        return;
    }
    state.reset_selection(text);
    let cur = text.cursor();
    let line = line.min(text.line_count()) - 1;
    text.set_cursor(Position::new(line, cur.byte.min(text.line_max(line))));
    state.settle(text);
    trace!(target: "actions.motion", line, "goto_line");
}
