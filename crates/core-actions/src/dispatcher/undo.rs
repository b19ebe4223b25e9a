//! Undo / redo dispatch. History lives in the buffer; the window only
//! re-anchors the view and reports an empty history.

use crate::{Notification, WindowState};
use core_state::TextBuffer;
use tracing::trace;

pub(crate) fn handle_undo(state: &mut WindowState, text: &mut dyn TextBuffer) {
    match text.apply_undo() {
        Some(remaining) => {
            trace!(target: "actions.edit", op = "undo", remaining, "history");
            restore_view(state, text);
        }
        None => state.notify(Notification::NothingToUndo),
    }
}

pub(crate) fn handle_redo(state: &mut WindowState, text: &mut dyn TextBuffer) {
    match text.apply_redo() {
        Some(remaining) => {
            trace!(target: "actions.edit", op = "redo", remaining, "history");
            restore_view(state, text);
        }
        None => state.notify(Notification::NothingToRedo),
    }
}

fn restore_view(state: &mut WindowState, text: &mut dyn TextBuffer) {
    state.reset_selection(text);
    state.viewport.request_redraw();
    state.settle(text);
}
