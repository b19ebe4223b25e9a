#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{
    CollectingNotifier, EditWindow, Notification, SharedFinder, SharedText, ViewParameters,
    WrapMode,
};
use core_events::parse_key_sequence;
use core_search::Finder;
use core_state::{Clipboard, EditBuffer, TextBuffer};
use core_text::Position;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing_subscriber::fmt::MakeWriter;

/// A window over an [`EditBuffer`] with a collecting notifier attached.
pub struct Harness {
    pub window: EditWindow,
    pub buffer: Rc<RefCell<EditBuffer>>,
    pub clipboard: Clipboard,
    pub finder: SharedFinder,
    pub notes: CollectingNotifier,
}

impl Harness {
    pub fn new(content: &str, height: usize, width: usize) -> Self {
        Self::with_parameters(content, height, width, &ViewParameters::default())
    }

    pub fn with_parameters(
        content: &str,
        height: usize,
        width: usize,
        params: &ViewParameters,
    ) -> Self {
        let buffer = Rc::new(RefCell::new(EditBuffer::from_str("test.txt", content)));
        let shared: SharedText = buffer.clone();
        let clipboard = Clipboard::new();
        let finder: SharedFinder = Rc::new(RefCell::new(Finder::default()));
        let mut window =
            EditWindow::with_parameters(shared, clipboard.clone(), Rc::clone(&finder), params);
        let notes = CollectingNotifier::new();
        window.set_notifier(Box::new(notes.clone()));
        window.resize(height, width);
        Self {
            window,
            buffer,
            clipboard,
            finder,
            notes,
        }
    }

    pub fn wrapped(content: &str, height: usize, width: usize) -> Self {
        let mut h = Self::new(content, height, width);
        h.window.set_wrap(WrapMode::Soft);
        h
    }

    /// Feed a whitespace separated key sequence such as `"S-Down C-c"`.
    pub fn press(&mut self, keys: &str) {
        for key in parse_key_sequence(keys).expect("valid key notation") {
            self.window.process_key(&key);
        }
    }

    /// Press `key` `times` times.
    pub fn repeat(&mut self, key: &str, times: usize) {
        for _ in 0..times {
            self.press(key);
        }
    }

    pub fn text(&self) -> String {
        self.buffer.borrow().text()
    }

    pub fn cursor(&self) -> Position {
        self.window.cursor()
    }

    pub fn place(&mut self, line: usize, byte: usize) {
        self.buffer.borrow_mut().set_cursor(Position::new(line, byte));
    }

    pub fn top_line(&self) -> usize {
        self.window.viewport().adapter().top_line()
    }

    pub fn notes(&self) -> Vec<Notification> {
        self.notes.take()
    }
}

/// `count` lines numbered from zero.
pub fn numbered_lines(count: usize) -> String {
    (0..count)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Clone)]
pub struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    pub fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Self { inner: buf.clone() }, buf)
    }
}

pub struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl Write for LockedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

/// Run `f` under a fmt subscriber at `level` and return what it logged.
pub fn capture_logs(level: tracing::Level, f: impl FnOnce()) -> String {
    let (writer, buffer) = BufferWriter::new();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(writer)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.lock().expect("log buffer poisoned").clone();
    String::from_utf8(bytes).expect("utf8 log output")
}
