use crate::undo::{History, content_hash};
use crate::{Selection, SelectionMode, TextBlock, TextBuffer, normalize_line_endings};
use core_text::{Buffer, Position, grapheme, motion};
use tracing::trace;

/// Rope-backed [`TextBuffer`] with cursor, selection, undo history and a modified flag.
pub struct EditBuffer {
    buffer: Buffer,
    cursor: Position,
    selection: Selection,
    undo: History,
    clean_hash: u64,
    modified: bool,
}

impl EditBuffer {
    /// Empty buffer with one empty line.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_str(name, "")
    }

    /// Build from arbitrary text; CRLF and CR terminators are normalized to LF.
    pub fn from_str(name: impl Into<String>, content: &str) -> Self {
        let normalized = normalize_line_endings(content);
        let buffer = Buffer::from_str(name, &normalized.normalized);
        let clean_hash = content_hash(&buffer);
        Self {
            buffer,
            cursor: Position::origin(),
            selection: Selection::default(),
            undo: History::new(),
            clean_hash,
            modified: false,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }

    /// Record the current contents as the unmodified state.
    pub fn mark_saved(&mut self) {
        self.clean_hash = content_hash(&self.buffer);
        self.modified = false;
    }

    fn end_of_text(&self) -> Position {
        let last = self.buffer.line_count().saturating_sub(1);
        Position::new(last, self.buffer.line_byte_len(last))
    }

    fn assert_valid(&self, pos: Position) {
        debug_assert!(
            pos.line < self.buffer.line_count(),
            "line {} out of range ({} lines)",
            pos.line,
            self.buffer.line_count()
        );
        debug_assert!(
            pos.byte <= self.buffer.line_byte_len(pos.line),
            "byte {} past end of line {}",
            pos.byte,
            pos.line
        );
    }

    fn begin_typing(&mut self) {
        self.undo.checkpoint_typing(self.cursor, &self.buffer);
    }

    fn discrete_edit(&mut self) {
        self.undo.checkpoint(self.cursor, &self.buffer);
    }

    fn touched(&mut self) {
        self.modified = true;
    }

    fn after_history_move(&mut self) {
        let mut cursor = self.cursor;
        cursor.clamp_to(self.buffer.line_count(), |l| self.buffer.line_byte_len(l));
        self.cursor = cursor;
        self.selection.clear_at(cursor);
        self.modified = content_hash(&self.buffer) != self.clean_hash;
    }
}

impl TextBuffer for EditBuffer {
    fn name(&self) -> &str {
        &self.buffer.name
    }

    fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    fn line_max(&self, line: usize) -> usize {
        self.buffer.line_byte_len(line)
    }

    fn line_text(&self, line: usize) -> String {
        self.buffer.line_content(line)
    }

    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) {
        self.assert_valid(pos);
        let mut pos = pos;
        pos.clamp_to(self.buffer.line_count(), |l| self.buffer.line_byte_len(l));
        if pos != self.cursor {
            self.undo.close_run();
        }
        self.cursor = pos;
    }

    fn width_at(&self, pos: Position, tabsize: usize) -> usize {
        grapheme::width_at(&self.buffer.line_content(pos.line), pos.byte, tabsize)
    }

    fn screen_col(&self, pos: Position, tabsize: usize) -> usize {
        grapheme::screen_col(&self.buffer.line_content(pos.line), pos.byte, tabsize)
    }

    fn line_pos(&self, line: usize, col: usize, tabsize: usize) -> usize {
        grapheme::byte_at_col(&self.buffer.line_content(line), col, tabsize)
    }

    fn adjust_position(&mut self, delta: isize) {
        let mut pos = self.cursor;
        for _ in 0..delta.unsigned_abs() {
            if delta > 0 {
                motion::right(&self.buffer, &mut pos);
            } else {
                motion::left(&self.buffer, &mut pos);
            }
        }
        self.set_cursor(pos);
    }

    fn next_word(&mut self) {
        let mut pos = self.cursor;
        motion::word_forward(&self.buffer, &mut pos);
        self.set_cursor(pos);
    }

    fn previous_word(&mut self) {
        let mut pos = self.cursor;
        motion::word_backward(&self.buffer, &mut pos);
        self.set_cursor(pos);
    }

    fn insert_char(&mut self, c: char) -> bool {
        if c == '\n' {
            return self.break_line();
        }
        self.begin_typing();
        let mut tmp = [0u8; 4];
        self.buffer
            .insert_grapheme(&mut self.cursor, c.encode_utf8(&mut tmp));
        self.touched();
        true
    }

    fn overwrite_char(&mut self, c: char) -> bool {
        if c == '\n' || self.cursor.byte >= self.buffer.line_byte_len(self.cursor.line) {
            return self.insert_char(c);
        }
        self.begin_typing();
        self.buffer.delete_grapheme_at(&mut self.cursor);
        let mut tmp = [0u8; 4];
        self.buffer
            .insert_grapheme(&mut self.cursor, c.encode_utf8(&mut tmp));
        self.touched();
        true
    }

    fn delete_char(&mut self) -> bool {
        if self.cursor.byte >= self.buffer.line_byte_len(self.cursor.line) {
            return false;
        }
        self.begin_typing();
        self.buffer.delete_grapheme_at(&mut self.cursor);
        self.touched();
        true
    }

    fn backspace_char(&mut self) -> bool {
        if self.cursor.byte == 0 {
            return false;
        }
        self.begin_typing();
        self.buffer.delete_grapheme_before(&mut self.cursor);
        self.touched();
        true
    }

    fn merge(&mut self, backspace: bool) -> bool {
        if backspace {
            if self.cursor.line == 0 {
                return false;
            }
            self.discrete_edit();
            let mut pos = Position::new(self.cursor.line, 0);
            self.buffer.delete_grapheme_before(&mut pos);
            self.cursor = pos;
        } else {
            if self.cursor.line + 1 >= self.buffer.line_count() {
                return false;
            }
            self.discrete_edit();
            let mut pos = Position::new(self.cursor.line + 1, 0);
            self.buffer.delete_grapheme_before(&mut pos);
        }
        trace!(target: "state.edit", line = self.cursor.line, backspace, "merge");
        self.touched();
        true
    }

    fn break_line(&mut self) -> bool {
        self.discrete_edit();
        self.buffer.insert_newline(&mut self.cursor);
        self.touched();
        true
    }

    fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let normalized = normalize_line_endings(text);
        self.discrete_edit();
        self.buffer
            .insert_str(&mut self.cursor, &normalized.normalized);
        self.touched();
        true
    }

    fn selection_mode(&self) -> SelectionMode {
        self.selection.mode
    }

    fn set_selection_mode(&mut self, mode: SelectionMode) {
        match mode {
            SelectionMode::None => self.selection.clear_at(self.cursor),
            SelectionMode::Shift | SelectionMode::Mark => {
                if matches!(self.selection.mode, SelectionMode::None | SelectionMode::All) {
                    self.selection.start = self.cursor;
                    self.selection.end = self.cursor;
                }
                self.selection.mode = mode;
            }
            SelectionMode::All => {
                let end = self.end_of_text();
                self.set_cursor(end);
                self.selection = Selection {
                    mode,
                    start: Position::origin(),
                    end,
                };
            }
        }
    }

    fn selection_start(&self) -> Position {
        self.selection.start
    }

    fn selection_end(&self) -> Position {
        self.selection.end
    }

    fn set_selection(&mut self, start: Position, end: Position) {
        self.assert_valid(start);
        self.assert_valid(end);
        self.selection = Selection {
            mode: SelectionMode::Shift,
            start,
            end,
        };
    }

    fn set_selection_end(&mut self) {
        self.selection.end = self.cursor;
    }

    fn selection_empty(&self) -> bool {
        self.selection.is_empty()
    }

    fn delete_selection(&mut self) -> bool {
        if !self.selection.is_active() {
            return false;
        }
        let (start, end) = self.selection.ordered();
        self.discrete_edit();
        self.buffer.delete_range(start, end);
        self.cursor = start;
        self.selection.start = start;
        self.selection.end = start;
        self.touched();
        true
    }

    fn convert_selection(&self) -> Option<TextBlock> {
        if !self.selection.is_active() {
            return None;
        }
        let (start, end) = self.selection.ordered();
        Some(TextBlock::new(self.buffer.slice(start, end)))
    }

    fn insert_block(&mut self, block: &TextBlock) -> bool {
        self.insert_text(block.as_str())
    }

    fn replace_selection(&mut self, text: &str) -> bool {
        let active = self.selection.is_active();
        if !active && text.is_empty() {
            return false;
        }
        self.discrete_edit();
        if active {
            let (start, end) = self.selection.ordered();
            self.buffer.delete_range(start, end);
            self.cursor = start;
        }
        let normalized = normalize_line_endings(text);
        self.buffer
            .insert_str(&mut self.cursor, &normalized.normalized);
        self.selection.start = self.cursor;
        self.selection.end = self.cursor;
        self.touched();
        true
    }

    fn apply_undo(&mut self) -> Option<usize> {
        if !self.undo.undo(&mut self.cursor, &mut self.buffer) {
            return None;
        }
        self.after_history_move();
        Some(self.undo.undo_depth())
    }

    fn apply_redo(&mut self) -> Option<usize> {
        if !self.undo.redo(&mut self.cursor, &mut self.buffer) {
            return None;
        }
        self.after_history_move();
        Some(self.undo.redo_depth())
    }

    fn is_modified(&self) -> bool {
        self.modified
    }
}
