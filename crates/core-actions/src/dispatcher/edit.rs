//! Text mutation: typing, delete/backspace/newline, indentation and the clipboard.
//!
//! Destructive keys pressed while a selection exists act on the selection
//! through [`selection::delete_selection`]; a typed character then lands in
//! insert mode regardless of the window's insert mode.

use super::selection;
use crate::{EditKind, WindowState};
use core_model::InsertMode;
use core_state::{SelectionMode, TextBuffer};
use core_text::{Position, grapheme};
use tracing::trace;

pub(crate) fn handle_edit(kind: EditKind, state: &mut WindowState, text: &mut dyn TextBuffer) {
    match kind {
        EditKind::Type(c) => type_char(state, text, c),
        EditKind::Tab => tab(state, text),
        EditKind::Unindent => reindent(state, text, false),
        EditKind::Delete => delete(state, text),
        EditKind::Backspace => backspace(state, text),
        EditKind::Newline => newline(state, text),
    }
}

fn has_selection(text: &dyn TextBuffer) -> bool {
    text.selection_mode() != SelectionMode::None
}

fn type_char(state: &mut WindowState, text: &mut dyn TextBuffer, c: char) {
    let mut mode = state.insert_mode;
    if has_selection(text) {
        selection::delete_selection(state, text);
        mode = InsertMode::Insert;
    }
    match mode {
        InsertMode::Insert => text.insert_char(c),
        InsertMode::Overwrite => text.overwrite_char(c),
    };
    state.viewport.request_redraw();
    state.settle(text);
}

fn tab(state: &mut WindowState, text: &mut dyn TextBuffer) {
    if has_selection(text) && !text.selection_empty() {
        reindent(state, text, true);
        return;
    }
    if !state.tab_spaces {
        type_char(state, text, '\t');
        return;
    }
    if has_selection(text) {
        state.reset_selection(text);
    }
    let tab = state.viewport.tab_size();
    let col = text.screen_col(text.cursor(), tab);
    for _ in 0..tab - col % tab {
        text.insert_char(' ');
    }
    state.viewport.request_redraw();
    state.settle(text);
}

/// Lines covered by the selection, or the cursor line. A selection ending at
/// column 0 does not include that last line.
fn affected_lines(text: &dyn TextBuffer) -> (usize, usize) {
    if !has_selection(text) || text.selection_empty() {
        let line = text.cursor().line;
        return (line, line);
    }
    let a = text.selection_start();
    let b = text.selection_end();
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    let last = if end.byte == 0 && end.line > start.line {
        end.line - 1
    } else {
        end.line
    };
    (start.line, last)
}

fn reindent(state: &mut WindowState, text: &mut dyn TextBuffer, indent: bool) {
    let tab = state.viewport.tab_size();
    let unit = if state.tab_spaces {
        " ".repeat(tab)
    } else {
        "\t".to_string()
    };
    let (first, last) = affected_lines(text);
    let old: Vec<String> = (first..=last).map(|l| text.line_text(l)).collect();
    let new: Vec<String> = old
        .iter()
        .map(|line| {
            if indent {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{unit}{line}")
                }
            } else {
                strip_indent_unit(line, tab).to_string()
            }
        })
        .collect();
    if new == old {
        return;
    }
    let end = Position::new(last, text.line_max(last));
    text.set_selection(Position::new(first, 0), end);
    text.replace_selection(&new.join("\n"));
    let new_end = Position::new(last, text.line_max(last));
    text.set_cursor(new_end);
    text.set_selection(Position::new(first, 0), new_end);
    state.viewport.request_redraw();
    state.settle(text);
    trace!(target: "actions.edit", first, last, indent, "reindent");
}

/// One tab, or up to `tab` leading spaces, removed from the front of `line`.
fn strip_indent_unit(line: &str, tab: usize) -> &str {
    if let Some(rest) = line.strip_prefix('\t') {
        return rest;
    }
    let spaces = line.bytes().take(tab).take_while(|b| *b == b' ').count();
    &line[spaces..]
}

fn delete(state: &mut WindowState, text: &mut dyn TextBuffer) {
    if has_selection(text) {
        selection::delete_selection(state, text);
        return;
    }
    let cur = text.cursor();
    let changed = if cur.byte != text.line_max(cur.line) {
        text.delete_char()
    } else {
        text.merge(false)
    };
    if changed {
        state.viewport.request_redraw();
    }
    state.viewport.ensure_cursor_visible(text);
}

fn backspace(state: &mut WindowState, text: &mut dyn TextBuffer) {
    if has_selection(text) {
        selection::delete_selection(state, text);
        return;
    }
    let cur = text.cursor();
    let changed = if cur.byte != 0 {
        text.backspace_char()
    } else {
        text.merge(true)
    };
    if changed {
        state.viewport.request_redraw();
    }
    state.settle(text);
}

fn newline(state: &mut WindowState, text: &mut dyn TextBuffer) {
    if has_selection(text) {
        selection::delete_selection(state, text);
    }
    let cur = text.cursor();
    let indent = if state.auto_indent {
        let line = text.line_text(cur.line);
        line[..grapheme::indent_len(&line).min(cur.byte)].to_string()
    } else {
        String::new()
    };
    if indent.is_empty() {
        text.break_line();
    } else {
        text.insert_text(&format!("\n{indent}"));
    }
    state.viewport.request_redraw();
    state.settle(text);
}

/// Copy the selection to the clipboard, deleting it when `cut` is set.
///
/// An empty selection is dropped silently. Copying a mark selection turns it
/// into a shift selection so the next plain move releases it.
pub(crate) fn cut_copy(state: &mut WindowState, text: &mut dyn TextBuffer, cut: bool) {
    if !has_selection(text) {
        return;
    }
    if text.selection_empty() {
        state.reset_selection(text);
        return;
    }
    if let Some(block) = text.convert_selection() {
        trace!(target: "actions.edit", cut, lines = block.line_count(), "clipboard_store");
        state.clipboard.set(block);
    }
    if cut {
        selection::delete_selection(state, text);
    } else if text.selection_mode() == SelectionMode::Mark {
        text.set_selection_mode(SelectionMode::Shift);
    }
}

pub(crate) fn paste(state: &mut WindowState, text: &mut dyn TextBuffer) {
    let Some(block) = state.clipboard.get() else {
        return;
    };
    if has_selection(text) {
        text.replace_selection(block.as_str());
        state.reset_selection(text);
    } else {
        text.insert_block(&block);
    }
    state.viewport.request_redraw();
    state.settle(text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_indent_unit_removes_one_level() {
        assert_eq!(strip_indent_unit("\t\tx", 4), "\tx");
        assert_eq!(strip_indent_unit("      x", 4), "  x");
        assert_eq!(strip_indent_unit("  x", 4), "x");
        assert_eq!(strip_indent_unit("x", 4), "x");
    }
}
