//! Snapshot history for [`EditBuffer`](crate::EditBuffer).
//!
//! Every undo unit is a full copy of the rope plus the cursor. Ropes share
//! structure, so a copy costs roughly the edited chunks. A typing run (character
//! inserts, overwrites, single-grapheme deletes) is captured by the snapshot
//! taken at its first edit; moving the cursor or any structural edit closes it.

use core_text::{Buffer, Position};
use std::collections::VecDeque;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use tracing::trace;

/// Oldest units are dropped past this depth.
pub const UNDO_HISTORY_MAX: usize = 200;

#[derive(Clone)]
struct Snapshot {
    buffer: Buffer,
    cursor: Position,
    hash: u64,
}

impl Snapshot {
    fn capture(cursor: Position, buffer: &Buffer) -> Self {
        Self {
            hash: content_hash(buffer),
            buffer: buffer.clone(),
            cursor,
        }
    }
}

/// Undo and redo stacks plus the open typing run, if any.
#[derive(Default)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    /// Edits recorded since the run snapshot; `None` when no run is open.
    run: Option<u32>,
    deduped: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn in_typing_run(&self) -> bool {
        self.run.is_some()
    }

    /// Checkpoints dropped because the content equalled the previous unit.
    pub fn deduped(&self) -> u64 {
        self.deduped
    }

    fn record(&mut self, cursor: Position, buffer: &Buffer) {
        let snap = Snapshot::capture(cursor, buffer);
        if self.undo.back().is_some_and(|last| last.hash == snap.hash) {
            self.deduped += 1;
            trace!(target: "state.undo", depth = self.undo.len(), "checkpoint_deduped");
            return;
        }
        self.undo.push_back(snap);
        if self.undo.len() > UNDO_HISTORY_MAX {
            self.undo.pop_front();
        }
        if !self.redo.is_empty() {
            trace!(target: "state.undo", dropped = self.redo.len(), "redo_discarded");
            self.redo.clear();
        }
        trace!(target: "state.undo", depth = self.undo.len(), lines = buffer.line_count(), "checkpoint");
    }

    /// Standalone unit: closes any typing run first.
    pub fn checkpoint(&mut self, cursor: Position, buffer: &Buffer) {
        self.close_run();
        self.record(cursor, buffer);
    }

    /// Called before each typing edit; only the first edit of a run records.
    pub fn checkpoint_typing(&mut self, cursor: Position, buffer: &Buffer) {
        match &mut self.run {
            Some(edits) => *edits += 1,
            None => {
                self.record(cursor, buffer);
                self.run = Some(1);
            }
        }
    }

    pub fn close_run(&mut self) {
        if let Some(edits) = self.run.take() {
            trace!(target: "state.undo", edits, "typing_run_closed");
        }
    }

    /// Swap the current state with the newest undo unit. False when empty.
    pub fn undo(&mut self, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        self.close_run();
        let Some(snap) = self.undo.pop_back() else {
            return false;
        };
        self.redo.push(swap_in(snap, cursor, buffer));
        trace!(target: "state.undo", undo = self.undo.len(), redo = self.redo.len(), "undo");
        true
    }

    pub fn redo(&mut self, cursor: &mut Position, buffer: &mut Buffer) -> bool {
        self.close_run();
        let Some(snap) = self.redo.pop() else {
            return false;
        };
        self.undo.push_back(swap_in(snap, cursor, buffer));
        trace!(target: "state.undo", undo = self.undo.len(), redo = self.redo.len(), "redo");
        true
    }
}

fn swap_in(snap: Snapshot, cursor: &mut Position, buffer: &mut Buffer) -> Snapshot {
    let hash = content_hash(buffer);
    Snapshot {
        buffer: std::mem::replace(buffer, snap.buffer),
        cursor: std::mem::replace(cursor, snap.cursor),
        hash,
    }
}

pub(crate) fn content_hash(buf: &Buffer) -> u64 {
    let mut h = DefaultHasher::new();
    h.write(buf.text().as_bytes());
    h.finish()
}
