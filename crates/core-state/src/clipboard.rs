use std::cell::RefCell;
use std::rc::Rc;

/// Detached copy of selected text. Independent of the buffer it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBlock {
    text: String,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }
}

/// Single-slot cut/copy clipboard shared by every window of a host.
///
/// Clones refer to the same slot; the last writer wins and the previous block is dropped.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    slot: Rc<RefCell<Option<TextBlock>>>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, block: TextBlock) {
        *self.slot.borrow_mut() = Some(block);
    }

    pub fn get(&self) -> Option<TextBlock> {
        self.slot.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.borrow().is_none()
    }

    pub fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}
