//! Dispatcher applying an [`Action`] to a window and its buffer.
//!
//! Sub-modules:
//! * `motion`    - cursor movement, page moves, goto line
//! * `selection` - selection-mode transitions, mark, select all, delete selection
//! * `edit`      - typing, delete/backspace/newline, indent, clipboard
//! * `search`    - find, replace, skip, replace all, find next
//! * `undo`      - undo / redo
//!
//! Handlers receive the window state and the buffer as separate borrows.
//! Each one finishes with the viewport re-anchored on the cursor.

use crate::{Action, Notification, WindowState};
use core_state::TextBuffer;

mod edit;
pub(crate) mod motion;
pub(crate) mod search;
pub(crate) mod selection;
mod undo;

pub use search::{FindAction, FindOutcome};

/// Result of dispatching a single [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The cursor moved or the window asked for a repaint.
    pub dirty: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self { dirty: true }
    }
    pub fn clean() -> Self {
        Self { dirty: false }
    }
}

/// Apply `action`. Selection transitions for the triggering key have already run.
pub fn dispatch(
    action: Action,
    state: &mut WindowState,
    text: &mut dyn TextBuffer,
) -> DispatchResult {
    let before = text.cursor();
    match action {
        Action::Motion(kind) => motion::handle_motion(kind, state, text),
        Action::Edit(kind) => edit::handle_edit(kind, state, text),
        Action::ToggleInsertMode => {
            state.insert_mode = state.insert_mode.toggled();
            tracing::debug!(target: "actions.edit", mode = state.insert_mode.label(), "insert_mode");
        }
        Action::Cut => edit::cut_copy(state, text, true),
        Action::Copy => edit::cut_copy(state, text, false),
        Action::Paste => edit::paste(state, text),
        Action::Undo => undo::handle_undo(state, text),
        Action::Redo => undo::handle_redo(state, text),
        Action::SelectAll => selection::select_all(state, text),
        Action::ToggleMark => selection::toggle_mark(state, text),
        Action::CancelMark => selection::cancel_mark(state, text),
        Action::GotoLinePrompt => state.notify(Notification::GotoLine),
        Action::FindPrompt { replace } => state.notify(Notification::Find { replace }),
        Action::FindNext { backward } => {
            search::find_next(state, text, backward);
        }
        Action::InsertSpecial => state.notify(Notification::InsertSpecial),
    }
    if before != text.cursor() || state.viewport.needs_redraw() {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}
