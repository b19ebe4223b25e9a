use crate::WindowState;
use core_events::KeyEvent;
use core_state::{SelectionMode, TextBuffer};
use tracing::trace;

/// Selection-mode change caused by a navigation key, applied before the key runs.
///
/// Plain navigation drops a shift or select-all selection; shifted navigation
/// starts (or keeps) a shift selection unless a mark selection is active.
pub(crate) fn apply_key_transition(state: &mut WindowState, text: &mut dyn TextBuffer, key: &KeyEvent) {
    if !key.code.is_navigation() {
        return;
    }
    let mode = text.selection_mode();
    if matches!(mode, SelectionMode::Shift | SelectionMode::All) && !key.is_shift() {
        state.reset_selection(text);
    } else if key.is_shift() && mode != SelectionMode::Mark {
        text.set_selection_mode(SelectionMode::Shift);
    }
    if mode != text.selection_mode() {
        trace!(target: "actions.selection", from = ?mode, to = ?text.selection_mode(), "transition");
    }
}

/// Bring the selection end to the cursor; an empty shift selection collapses.
pub(crate) fn sync(state: &mut WindowState, text: &mut dyn TextBuffer) {
    let mode = text.selection_mode();
    if !matches!(mode, SelectionMode::Shift | SelectionMode::Mark) {
        return;
    }
    if text.selection_end() != text.cursor() {
        state.viewport.request_redraw();
    }
    text.set_selection_end();
    if mode == SelectionMode::Shift && text.selection_empty() {
        state.reset_selection(text);
    }
}

pub(crate) fn toggle_mark(state: &mut WindowState, text: &mut dyn TextBuffer) {
    if text.selection_mode() == SelectionMode::Mark {
        state.reset_selection(text);
    } else {
        text.set_selection_mode(SelectionMode::Mark);
    }
}

pub(crate) fn cancel_mark(state: &mut WindowState, text: &mut dyn TextBuffer) {
    if text.selection_mode() == SelectionMode::Mark {
        state.reset_selection(text);
    }
}

pub(crate) fn select_all(state: &mut WindowState, text: &mut dyn TextBuffer) {
    text.set_selection_mode(SelectionMode::All);
    state.viewport.request_redraw();
    state.settle(text);
}

/// Delete the selected range and leave the cursor at its earlier endpoint.
pub(crate) fn delete_selection(state: &mut WindowState, text: &mut dyn TextBuffer) {
    let start = text.selection_start();
    let end = text.selection_end();
    text.delete_selection();
    text.set_cursor(start.min(end));
    state.viewport.request_redraw();
    state.settle(text);
    state.reset_selection(text);
    trace!(target: "actions.selection", line = start.min(end).line, "delete_selection");
}
