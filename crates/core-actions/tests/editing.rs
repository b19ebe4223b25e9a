mod common;

use common::Harness;
use core_actions::{InsertMode, Notification, ViewParameters, WrapMode};
use core_events::{KeyEvent, keys_for_text};
use core_state::{SelectionMode, TextBuffer};
use core_text::Position;
use pretty_assertions::assert_eq;

fn type_text(h: &mut Harness, text: &str) {
    for key in keys_for_text(text) {
        h.window.process_key(&key);
    }
}

#[test]
fn typing_inserts_at_the_cursor() {
    let mut h = Harness::new("", 10, 40);
    type_text(&mut h, "hi there");
    assert_eq!(h.text(), "hi there");
    assert_eq!(h.cursor(), Position::new(0, 8));
    assert_eq!(h.window.last_set_pos(), 8);
    assert!(h.buffer.borrow().is_modified());
}

#[test]
fn insert_key_toggles_overwrite() {
    let mut h = Harness::new("abc", 10, 40);
    h.press("Insert");
    assert_eq!(h.window.insert_mode(), InsertMode::Overwrite);
    type_text(&mut h, "XY");
    assert_eq!(h.text(), "XYc");
    h.press("Insert");
    assert_eq!(h.window.insert_mode(), InsertMode::Insert);
    type_text(&mut h, "Z");
    assert_eq!(h.text(), "XYZc");
}

#[test]
fn typing_over_a_selection_inserts_even_in_overwrite() {
    let mut h = Harness::new("abcd", 10, 40);
    h.press("Insert S-Right S-Right");
    type_text(&mut h, "Z");
    assert_eq!(h.text(), "Zcd");
    assert_eq!(h.window.selection().mode, SelectionMode::None);
    assert_eq!(h.window.insert_mode(), InsertMode::Overwrite);
}

#[test]
fn delete_and_backspace_join_lines_at_the_edges() {
    let mut h = Harness::new("ab\ncd", 10, 40);
    h.press("End Delete");
    assert_eq!(h.text(), "abcd");
    h.press("Backspace");
    assert_eq!(h.text(), "acd");
    h.press("C-End Enter Home Backspace");
    assert_eq!(h.text(), "acd");
    assert_eq!(h.cursor(), Position::new(0, 3));
    h.press("Delete");
    assert_eq!(h.text(), "acd");
}

#[test]
fn delete_removes_the_selection() {
    let mut h = Harness::new("one\ntwo\nthree", 10, 40);
    h.press("Right S-Down Delete");
    assert_eq!(h.text(), "owo\nthree");
    assert_eq!(h.cursor(), Position::new(0, 1));
    h.press("S-End Backspace");
    assert_eq!(h.text(), "o\nthree");
}

#[test]
fn enter_carries_the_indent() {
    let mut h = Harness::new("    body", 10, 40);
    h.press("End Enter");
    assert_eq!(h.text(), "    body\n    ");
    assert_eq!(h.cursor(), Position::new(1, 4));
}

#[test]
fn enter_inside_the_indent_keeps_only_the_part_before_the_cursor() {
    let mut h = Harness::new("    body", 10, 40);
    h.place(0, 2);
    h.press("Enter");
    assert_eq!(h.text(), "  \n    body");
    assert_eq!(h.cursor(), Position::new(1, 2));
}

#[test]
fn enter_without_auto_indent() {
    let params = ViewParameters {
        auto_indent: false,
        ..ViewParameters::default()
    };
    let mut h = Harness::with_parameters("    body", 10, 40, &params);
    h.press("End Enter");
    assert_eq!(h.text(), "    body\n");
}

#[test]
fn tab_inserts_a_tab_or_spaces() {
    let mut h = Harness::new("ab", 10, 40);
    h.press("Right Tab");
    assert_eq!(h.text(), "a\tb");
    assert_eq!(h.window.status().column, 9);

    let params = ViewParameters {
        tab_spaces: true,
        tab_size: 4,
        ..ViewParameters::default()
    };
    let mut h = Harness::with_parameters("ab", 10, 40, &params);
    h.press("Right Tab");
    assert_eq!(h.text(), "a   b");
    assert_eq!(h.cursor(), Position::new(0, 4));
}

#[test]
fn tab_and_shift_tab_reindent_selected_lines() {
    let mut h = Harness::new("a\nb\nc", 10, 40);
    h.press("S-Down S-Down Tab");
    assert_eq!(h.text(), "\ta\n\tb\nc");
    let sel = h.window.selection();
    assert_eq!(sel.mode, SelectionMode::Shift);
    assert_eq!(sel.ordered(), (Position::origin(), Position::new(1, 2)));
    h.press("S-Tab");
    assert_eq!(h.text(), "a\nb\nc");
    h.press("C-z");
    assert_eq!(h.text(), "\ta\n\tb\nc");
}

#[test]
fn shift_tab_without_selection_unindents_the_cursor_line() {
    let mut h = Harness::new("        x", 10, 40);
    h.press("S-Tab");
    assert_eq!(h.text(), "x");
    h.press("S-Tab");
    assert_eq!(h.text(), "x");
}

#[test]
fn undo_and_redo_restore_text() {
    let mut h = Harness::new("", 10, 40);
    type_text(&mut h, "abc");
    h.press("C-z");
    assert_eq!(h.text(), "");
    assert!(!h.buffer.borrow().is_modified());
    h.press("C-y");
    assert_eq!(h.text(), "abc");
    assert_eq!(h.cursor(), Position::new(0, 3));
    assert!(h.notes().is_empty());
}

#[test]
fn empty_history_notifies() {
    let mut h = Harness::new("text", 10, 40);
    h.press("C-z C-y");
    assert_eq!(
        h.notes(),
        vec![Notification::NothingToUndo, Notification::NothingToRedo]
    );
}

#[test]
fn prompts_are_requested_through_the_notifier() {
    let mut h = Harness::new("text", 10, 40);
    h.press("C-g C-f C-r F9");
    assert_eq!(
        h.notes(),
        vec![
            Notification::GotoLine,
            Notification::Find { replace: false },
            Notification::Find { replace: true },
            Notification::InsertSpecial,
        ]
    );
}

#[test]
fn unbound_keys_are_reported() {
    let mut h = Harness::new("text", 10, 40);
    let alt: KeyEvent = "M-x".parse().expect("key");
    assert!(!h.window.process_key(&alt));
    assert!(h.window.process_key(&KeyEvent::char('x')));
    assert_eq!(h.text(), "xtext");
}

#[test]
fn status_reports_one_based_position() {
    let mut h = Harness::new("\tab\ncd", 10, 40);
    h.press("End");
    let status = h.window.status();
    assert_eq!((status.line, status.column), (1, 11));
    assert!(!status.modified);
    type_text(&mut h, "!");
    let status = h.window.status();
    assert!(status.modified);
    assert_eq!(status.to_string(), "test.txt L: 1    C: 12   * INS");
}

#[test]
fn typing_in_a_wrapped_view_follows_the_cursor() {
    let mut h = Harness::new("", 3, 6);
    h.window.set_wrap(WrapMode::Soft);
    type_text(&mut h, "aaaa bbbb cccc dddd");
    let top = h.window.viewport().adapter().top();
    assert_eq!(top.line, 0);
    assert_eq!(top.sub_line, 1);
}
