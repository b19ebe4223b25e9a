//! Edit window: the cursor and viewport engine driven by key events.
//!
//! Flow of a key through the crate:
//! 1. [`EditWindow::process_key`] applies the selection-mode transition for
//!    navigation keys (shifted navigation starts or extends a selection, plain
//!    navigation drops a shift selection).
//! 2. [`translate_key`] maps the key to an [`Action`].
//! 3. [`dispatcher::dispatch`] runs the action against the window state and
//!    the borrowed buffer. Every handler leaves buffer, cursor, selection and
//!    viewport consistent before returning.
//! 4. The selection end is synced to the cursor; an empty shift selection
//!    collapses.
//!
//! Rendering is not done here. Renderers poll [`EditWindow::take_redraw`] and
//! read the viewport, cursor, selection and scrollbar geometry.
//!
//! Expected empty results (search miss, nothing to undo) are reported through
//! the window's [`Notifier`], never as errors.

pub mod dispatcher;
mod key_translator;
mod notify;
mod window;

pub use dispatcher::{DispatchResult, FindAction, FindOutcome};
pub use key_translator::translate_key;
pub use notify::{CollectingNotifier, LogNotifier, Notification, Notifier};
pub use window::{EditWindow, SharedFinder, SharedText, StatusInfo, WindowState};

pub use core_model::{InsertMode, ScrollbarState, ViewParameters, WrapMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    CharRight,
    CharLeft,
    WordRight,
    WordLeft,
    LineDown,
    LineUp,
    PageDown,
    PageUp,
    Home,
    End,
    DocumentStart,
    DocumentEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// Printable character (tab included).
    Type(char),
    /// Tab key: indents a selection, otherwise types a tab or spaces.
    Tab,
    /// Shift-Tab: unindent the selected lines or the cursor line.
    Unindent,
    Delete,
    Backspace,
    Newline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Motion(MotionKind),
    Edit(EditKind),
    ToggleInsertMode,
    Cut,
    Copy,
    Paste,
    Undo,
    Redo,
    SelectAll,
    ToggleMark,
    CancelMark,
    GotoLinePrompt,
    FindPrompt { replace: bool },
    FindNext { backward: bool },
    InsertSpecial,
}
