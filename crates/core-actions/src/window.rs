use crate::dispatcher::{self, FindAction, FindOutcome, search, selection};
use crate::{LogNotifier, Notifier, translate_key};
use core_events::KeyEvent;
use core_model::{InsertMode, ScrollbarState, ViewParameters, Viewport, WrapMode};
use core_search::{Finder, SearchContext, SearchError};
use core_state::{Clipboard, Selection, TextBuffer};
use core_text::Position;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

/// Buffer handle shared between the host and the window displaying it.
pub type SharedText = Rc<RefCell<dyn TextBuffer>>;
/// Finder handle; windows may share one or each carry their own.
pub type SharedFinder = Rc<RefCell<Finder>>;

/// Default text area used until the host reports a size.
const INITIAL_HEIGHT: usize = 10;
const INITIAL_WIDTH: usize = 10;

/// Everything a window owns besides the buffer handle.
///
/// Dispatcher handlers take this together with a borrowed buffer so the
/// buffer is borrowed exactly once per key.
pub struct WindowState {
    pub(crate) viewport: Viewport,
    pub(crate) clipboard: Clipboard,
    pub(crate) finder: SharedFinder,
    pub(crate) notifier: Box<dyn Notifier>,
    pub(crate) insert_mode: InsertMode,
    /// Sticky screen column used by vertical movement.
    pub(crate) last_set_pos: usize,
    pub(crate) tab_spaces: bool,
    pub(crate) auto_indent: bool,
    pub(crate) indent_aware_home: bool,
}

impl WindowState {
    /// Scroll to the cursor and make its column the sticky column.
    pub(crate) fn settle(&mut self, text: &dyn TextBuffer) {
        self.viewport.ensure_cursor_visible(text);
        self.last_set_pos = self.viewport.screen_col();
    }

    pub(crate) fn reset_selection(&mut self, text: &mut dyn TextBuffer) {
        text.set_selection_mode(core_state::SelectionMode::None);
        self.viewport.request_redraw();
    }

    pub(crate) fn notify(&mut self, notification: crate::Notification) {
        self.notifier.notify(notification);
    }

    fn apply_parameters(&mut self, params: &ViewParameters, text: &dyn TextBuffer) {
        params.apply_viewport(&mut self.viewport, text);
        self.insert_mode = params.insert_mode;
        self.last_set_pos = params.last_set_pos;
        self.tab_spaces = params.tab_spaces;
        self.auto_indent = params.auto_indent;
        self.indent_aware_home = params.indent_aware_home;
    }
}

/// Status line data: 1-based line and column, modified flag, insert mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub name: String,
    pub line: usize,
    pub column: usize,
    pub modified: bool,
    pub insert_mode: InsertMode,
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} L: {:<4} C: {:<4} {} {}",
            self.name,
            self.line,
            self.column,
            if self.modified { '*' } else { ' ' },
            self.insert_mode.label()
        )
    }
}

/// A scrollable view onto one text buffer.
pub struct EditWindow {
    text: SharedText,
    state: WindowState,
}

impl EditWindow {
    /// Window with default view parameters and a [`LogNotifier`].
    pub fn new(text: SharedText, clipboard: Clipboard, finder: SharedFinder) -> Self {
        Self::with_parameters(text, clipboard, finder, &ViewParameters::default())
    }

    pub fn with_parameters(
        text: SharedText,
        clipboard: Clipboard,
        finder: SharedFinder,
        params: &ViewParameters,
    ) -> Self {
        let mut state = WindowState {
            viewport: Viewport::new(INITIAL_HEIGHT, INITIAL_WIDTH, params.tab_size),
            clipboard,
            finder,
            notifier: Box::new(LogNotifier),
            insert_mode: params.insert_mode,
            last_set_pos: params.last_set_pos,
            tab_spaces: params.tab_spaces,
            auto_indent: params.auto_indent,
            indent_aware_home: params.indent_aware_home,
        };
        {
            let guard = text.borrow();
            state.apply_parameters(params, &*guard);
            state.viewport.ensure_cursor_visible(&*guard);
        }
        state.viewport.request_redraw();
        Self { text, state }
    }

    pub fn text(&self) -> SharedText {
        Rc::clone(&self.text)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.state.viewport
    }

    pub fn cursor(&self) -> Position {
        self.text.borrow().cursor()
    }

    pub fn selection(&self) -> Selection {
        let text = self.text.borrow();
        Selection {
            mode: text.selection_mode(),
            start: text.selection_start(),
            end: text.selection_end(),
        }
    }

    pub fn insert_mode(&self) -> InsertMode {
        self.state.insert_mode
    }

    pub fn last_set_pos(&self) -> usize {
        self.state.last_set_pos
    }

    pub fn needs_redraw(&self) -> bool {
        self.state.viewport.needs_redraw()
    }

    /// Return whether a repaint is due and clear the flag.
    pub fn take_redraw(&mut self) -> bool {
        self.state.viewport.take_redraw()
    }

    pub fn scrollbar(&self) -> ScrollbarState {
        self.state.viewport.scrollbar(&*self.text.borrow())
    }

    pub fn status(&self) -> StatusInfo {
        let text = self.text.borrow();
        let cursor = text.cursor();
        StatusInfo {
            name: text.name().to_string(),
            line: cursor.line + 1,
            column: text.screen_col(cursor, self.state.viewport.tab_size()) + 1,
            modified: text.is_modified(),
            insert_mode: self.state.insert_mode,
        }
    }

    /// Replace the notifier; the previous one is dropped.
    pub fn set_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.state.notifier = notifier;
    }

    pub fn set_finder(&mut self, finder: SharedFinder) {
        self.state.finder = finder;
    }

    pub fn set_tab_size(&mut self, tab_size: usize) {
        if self.state.viewport.set_tab_size(tab_size) {
            let text = self.text.borrow();
            self.state.viewport.ensure_cursor_visible(&*text);
        }
    }

    pub fn set_wrap(&mut self, mode: WrapMode) {
        let text = self.text.borrow();
        self.state.viewport.set_wrap(mode, &*text);
    }

    /// Resize the text area. Zero sizes clamp to 1.
    pub fn resize(&mut self, height: usize, width: usize) {
        let text = self.text.borrow();
        if self.state.viewport.resize(height, width, &*text) {
            self.state.last_set_pos = self.state.viewport.screen_col();
        }
    }

    /// Attach another buffer and return the previous handle.
    ///
    /// Attaching the buffer already shown changes nothing. With `params` the
    /// view is restored from them; otherwise a wrapped view restarts at the top.
    pub fn set_text(&mut self, text: SharedText, params: Option<&ViewParameters>) -> SharedText {
        if Rc::ptr_eq(&self.text, &text) {
            return text;
        }
        let previous = std::mem::replace(&mut self.text, text);
        let guard = self.text.borrow();
        match params {
            Some(params) => self.state.apply_parameters(params, &*guard),
            None if self.state.viewport.wrap_mode() == WrapMode::Soft => {
                self.state.viewport.reset_top()
            }
            None => {}
        }
        self.state.viewport.ensure_cursor_visible(&*guard);
        self.state.viewport.request_redraw();
        debug!(target: "actions.window", name = guard.name(), restored = params.is_some(), "set_text");
        drop(guard);
        previous
    }

    /// Detach the view state so it can be re-applied to any window.
    pub fn save_view_parameters(&self) -> ViewParameters {
        let text = self.text.borrow();
        let mut params = ViewParameters {
            tab_spaces: self.state.tab_spaces,
            auto_indent: self.state.auto_indent,
            indent_aware_home: self.state.indent_aware_home,
            insert_mode: self.state.insert_mode,
            last_set_pos: self.state.last_set_pos,
            ..ViewParameters::default()
        };
        params.capture_viewport(&self.state.viewport, &*text);
        params
    }

    /// Move to 1-based `line`, clamped to the document. Ignored below 1.
    pub fn goto_line(&mut self, line: usize) {
        let shared = Rc::clone(&self.text);
        let mut guard = shared.borrow_mut();
        dispatcher::motion::goto_line(&mut self.state, &mut *guard, line);
    }

    /// Handle one key. Returns false when the key has no binding.
    pub fn process_key(&mut self, key: &KeyEvent) -> bool {
        let shared = Rc::clone(&self.text);
        let mut guard = shared.borrow_mut();
        let text: &mut dyn TextBuffer = &mut *guard;
        selection::apply_key_transition(&mut self.state, text, key);
        let handled = match translate_key(key) {
            Some(action) => {
                let result = dispatcher::dispatch(action, &mut self.state, text);
                trace!(target: "actions.dispatch", %key, ?action, dirty = result.dirty, "key");
                true
            }
            None => {
                trace!(target: "actions.dispatch", %key, "unbound_key");
                false
            }
        };
        selection::sync(&mut self.state, text);
        handled
    }

    /// Run a find dialog action. A supplied context replaces the finder's.
    pub fn find_activated(
        &mut self,
        action: FindAction,
        context: Option<SearchContext>,
    ) -> Result<FindOutcome, SearchError> {
        let shared = Rc::clone(&self.text);
        let mut guard = shared.borrow_mut();
        let text: &mut dyn TextBuffer = &mut *guard;
        let outcome = search::find_activated(&mut self.state, text, action, context)?;
        selection::sync(&mut self.state, text);
        Ok(outcome)
    }

    /// Repeat the last search; `backward` reverses the configured direction.
    pub fn find_next(&mut self, backward: bool) -> FindOutcome {
        let shared = Rc::clone(&self.text);
        let mut guard = shared.borrow_mut();
        let text: &mut dyn TextBuffer = &mut *guard;
        let outcome = search::find_next(&mut self.state, text, backward);
        selection::sync(&mut self.state, text);
        outcome
    }
}
