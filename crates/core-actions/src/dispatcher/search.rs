//! Find / replace orchestration on top of a [`Matcher`].
//!
//! A successful find selects the match in shift mode. Forward searches leave
//! the cursor at the match end and backward searches at the match start, so a
//! repeated search in the same direction continues past the current match.

use crate::{Notification, WindowState};
use core_search::{FindFlags, Finder, MatchRange, Matcher, SearchContext, SearchError};
use core_state::{SelectionMode, TextBuffer};
use core_text::Position;
use std::rc::Rc;
use tracing::{debug, trace};

/// Buttons of the find / replace dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindAction {
    Find,
    /// Replace the current match, then move to the next one.
    Replace,
    /// Leave the current match and move to the next one.
    Skip,
    ReplaceAll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindOutcome {
    Found,
    /// No match. A replace-all that replaced nothing reports this too.
    NotFound,
    Replaced(usize),
}

pub(crate) fn find_activated(
    state: &mut WindowState,
    text: &mut dyn TextBuffer,
    action: FindAction,
    context: Option<SearchContext>,
) -> Result<FindOutcome, SearchError> {
    if let Some(context) = context {
        state.finder.borrow_mut().set_context(context)?;
    }
    let shared = Rc::clone(&state.finder);
    let finder = shared.borrow();
    let backward = finder.flags().contains(FindFlags::BACKWARD);
    debug!(target: "actions.search", ?action, backward, "find_activated");
    let outcome = match action {
        FindAction::Find => {
            if !find(text, &*finder, backward) {
                return Ok(not_found(state));
            }
            state.viewport.request_redraw();
            state.viewport.ensure_cursor_visible(text);
            if finder.context().has_replacement() {
                state.notify(Notification::ReplaceButtons);
            }
            FindOutcome::Found
        }
        FindAction::Replace | FindAction::Skip => {
            if action == FindAction::Replace && replace_current(text, &*finder) {
                state.viewport.request_redraw();
            }
            if !find(text, &*finder, backward) {
                state.viewport.ensure_cursor_visible(text);
                return Ok(not_found(state));
            }
            state.viewport.request_redraw();
            state.viewport.ensure_cursor_visible(text);
            state.notify(Notification::ReshowReplaceButtons(action));
            FindOutcome::Found
        }
        FindAction::ReplaceAll => {
            let count = replace_all(text, &finder)?;
            if count == 0 {
                return Ok(not_found(state));
            }
            state.viewport.request_redraw();
            state.settle(text);
            FindOutcome::Replaced(count)
        }
    };
    Ok(outcome)
}

/// Repeat the configured search; `backward` flips its direction.
pub(crate) fn find_next(state: &mut WindowState, text: &mut dyn TextBuffer, backward: bool) -> FindOutcome {
    let shared = Rc::clone(&state.finder);
    let finder = shared.borrow();
    let reverse = finder.flags().contains(FindFlags::BACKWARD) != backward;
    let outcome = if find(text, &*finder, reverse) {
        state.viewport.request_redraw();
        FindOutcome::Found
    } else {
        not_found(state)
    };
    state.viewport.ensure_cursor_visible(text);
    outcome
}

fn not_found(state: &mut WindowState) -> FindOutcome {
    trace!(target: "actions.search", "not_found");
    state.notify(Notification::NotFound);
    FindOutcome::NotFound
}

fn current_match(text: &dyn TextBuffer) -> Option<(Position, Position)> {
    if text.selection_mode() == SelectionMode::None || text.selection_empty() {
        return None;
    }
    let a = text.selection_start();
    let b = text.selection_end();
    Some(if a <= b { (a, b) } else { (b, a) })
}

/// Search from the cursor, stepping over the current selection, and select the hit.
fn find(text: &mut dyn TextBuffer, matcher: &dyn Matcher, backward: bool) -> bool {
    let cursor = text.cursor();
    let (lo, hi) = current_match(text).unwrap_or((cursor, cursor));
    let from = if backward { lo } else { hi };
    let Some(found) = matcher.find(text, from, backward) else {
        return false;
    };
    if backward {
        text.set_cursor(found.start);
        text.set_selection(found.end, found.start);
    } else {
        text.set_cursor(found.end);
        text.set_selection(found.start, found.end);
    }
    trace!(target: "actions.search", line = found.start.line, byte = found.start.byte, "match");
    true
}

/// Replace the selected match. Without a configured replacement the match is removed.
fn replace_current(text: &mut dyn TextBuffer, matcher: &dyn Matcher) -> bool {
    let Some((start, end)) = current_match(text) else {
        return false;
    };
    let replacement = matcher
        .replacement(text, &MatchRange { start, end })
        .unwrap_or_default();
    text.replace_selection(&replacement)
}

/// Replace every match in one forward sweep.
///
/// The sweep never wraps, so a replacement containing the pattern cannot
/// be matched again. With wrap-around enabled the sweep covers the whole
/// document; otherwise it runs from the cursor to the end. Nothing is
/// touched when there is no match.
fn replace_all(text: &mut dyn TextBuffer, finder: &Finder) -> Result<usize, SearchError> {
    let mut context = finder.context().clone();
    let whole_document = context.flags.contains(FindFlags::WRAP);
    context.flags -= FindFlags::WRAP | FindFlags::BACKWARD;
    let sweep = Finder::new(context)?;
    let start = if whole_document {
        Position::origin()
    } else {
        let cursor = text.cursor();
        current_match(text).map_or(cursor, |(lo, _)| lo)
    };
    let Some(first) = sweep.find(text, start, false) else {
        return Ok(0);
    };
    text.set_selection_mode(SelectionMode::None);
    text.set_cursor(first.start);
    let mut count = 0;
    while find(text, &sweep, false) {
        if !replace_current(text, &sweep) {
            break;
        }
        count += 1;
    }
    debug!(target: "actions.search", count, whole_document, "replace_all");
    Ok(count)
}
