/// Logical `(line, byte)` address in the unwrapped document.
///
/// Ordering is lexicographic on `(line, byte)`, which is document order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub byte: usize,
}

impl Position {
    pub const fn new(line: usize, byte: usize) -> Self {
        Self { line, byte }
    }

    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Pull the position back inside a document of `line_count` lines whose
    /// byte lengths are reported by `line_max`.
    pub fn clamp_to(&mut self, line_count: usize, mut line_max: impl FnMut(usize) -> usize) {
        if line_count == 0 {
            *self = Self::origin();
            return;
        }
        self.line = self.line.min(line_count - 1);
        self.byte = self.byte.min(line_max(self.line));
    }

    /// Clamp only the byte offset, for callers that already trust the line.
    pub fn clamp_to_line_max(&mut self, line_max: usize) {
        self.byte = self.byte.min(line_max);
    }
}

/// Address of a display row in the soft-wrapped document: logical line plus
/// the wrapped row (sub-line) within it. Never carries a byte offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WrapPosition {
    pub line: usize,
    pub sub_line: usize,
}

impl WrapPosition {
    pub const fn new(line: usize, sub_line: usize) -> Self {
        Self { line, sub_line }
    }
}
