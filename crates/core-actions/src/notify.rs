use crate::FindAction;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// Messages and prompt requests a window raises towards its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    NotFound,
    NothingToUndo,
    NothingToRedo,
    /// Open the find dialog, with replace fields when `replace` is set.
    Find { replace: bool },
    /// A match was found and a replacement is configured: offer replace / skip.
    ReplaceButtons,
    /// Show the replace buttons again after `action` moved to the next match.
    ReshowReplaceButtons(FindAction),
    GotoLine,
    InsertSpecial,
}

/// Host surface for [`Notification`]s. A window owns exactly one.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Emits each notification as a tracing event.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        info!(target: "actions.notify", ?notification, "notify");
    }
}

/// Records notifications into a shared list the host can inspect.
#[derive(Debug, Clone, Default)]
pub struct CollectingNotifier {
    seen: Rc<RefCell<Vec<Notification>>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.borrow_mut())
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}
