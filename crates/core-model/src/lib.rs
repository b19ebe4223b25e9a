//! View model of the edit window: scroll anchor, wrap state and the
//! parameters needed to re-hydrate a view when a buffer is reattached.
//!
//! A [`Viewport`] owns everything about *where* the window looks; the buffer
//! owns *what* is looked at (text, cursor, selection). The anchor is a
//! [`WrapAdapter`], so a wrapped `(line, sub_line)` anchor and an unwrapped
//! `(line, left_col)` anchor are different variants and can never be confused.
//!
//! Invariants after every public call that takes the buffer:
//! * `height >= 1` and `width >= 1`.
//! * After [`Viewport::ensure_cursor_visible`] the cursor row lies in
//!   `[top, top + height)`, counted in sub-lines when wrapping.
//! * Without wrapping the cursor cell lies in `[left_col, left_col + width)`.
//! * With wrapping there is no horizontal scroll; `left_col` reads as 0.
//!
//! Redraw is a sticky flag: any anchor change sets it and only
//! [`Viewport::take_redraw`] clears it.

mod params;
mod viewport;
mod wrap_adapter;

pub use params::{InsertMode, ViewParameters, WrapMode};
pub use viewport::{ScrollbarState, Viewport, scroll_intent};
pub use wrap_adapter::WrapAdapter;
