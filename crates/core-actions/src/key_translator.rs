//! Key -> Action translation.
//!
//! Stateless: every binding is a single key with modifiers. Navigation keys
//! accept shift (selection is handled before translation); Ctrl selects the
//! word / document variants of left, right, home and end. Alt has no bindings.

use crate::{Action, EditKind, MotionKind};
use core_events::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key to the action it triggers, `None` for unbound keys.
pub fn translate_key(key: &KeyEvent) -> Option<Action> {
    if key.mods.contains(KeyModifiers::ALT) {
        return None;
    }
    let ctrl = key.mods.contains(KeyModifiers::CTRL);
    let shift = key.is_shift();
    let motion = |kind| Some(Action::Motion(kind));
    match key.code {
        KeyCode::Right if ctrl => motion(MotionKind::WordRight),
        KeyCode::Right => motion(MotionKind::CharRight),
        KeyCode::Left if ctrl => motion(MotionKind::WordLeft),
        KeyCode::Left => motion(MotionKind::CharLeft),
        KeyCode::Down if !ctrl => motion(MotionKind::LineDown),
        KeyCode::Up if !ctrl => motion(MotionKind::LineUp),
        KeyCode::PageDown if !ctrl => motion(MotionKind::PageDown),
        KeyCode::PageUp if !ctrl => motion(MotionKind::PageUp),
        KeyCode::Home if ctrl => motion(MotionKind::DocumentStart),
        KeyCode::Home => motion(MotionKind::Home),
        KeyCode::End if ctrl => motion(MotionKind::DocumentEnd),
        KeyCode::End => motion(MotionKind::End),

        KeyCode::Insert if ctrl => Some(Action::Copy),
        KeyCode::Insert if shift => Some(Action::Paste),
        KeyCode::Insert => Some(Action::ToggleInsertMode),
        KeyCode::Delete if shift => Some(Action::Cut),
        KeyCode::Delete if !ctrl => Some(Action::Edit(EditKind::Delete)),
        KeyCode::Enter if !ctrl => Some(Action::Edit(EditKind::Newline)),
        KeyCode::Backspace if !ctrl => Some(Action::Edit(EditKind::Backspace)),
        KeyCode::Tab if ctrl => None,
        KeyCode::Tab if shift => Some(Action::Edit(EditKind::Unindent)),
        KeyCode::Tab => Some(Action::Edit(EditKind::Tab)),
        KeyCode::Esc => Some(Action::CancelMark),
        KeyCode::F(3) => Some(Action::FindNext { backward: shift }),
        KeyCode::F(9) => Some(Action::InsertSpecial),

        KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
            'c' => Some(Action::Copy),
            'x' => Some(Action::Cut),
            'v' => Some(Action::Paste),
            'y' => Some(Action::Redo),
            'z' => Some(Action::Undo),
            'a' => Some(Action::SelectAll),
            'g' => Some(Action::GotoLinePrompt),
            ' ' => Some(Action::ToggleMark),
            'f' => Some(Action::FindPrompt { replace: false }),
            'r' => Some(Action::FindPrompt { replace: true }),
            _ => None,
        },
        KeyCode::Char(c) if c.is_control() => None,
        KeyCode::Char(c) => Some(Action::Edit(EditKind::Type(c))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tr(notation: &str) -> Option<Action> {
        let key: KeyEvent = notation.parse().expect("valid key notation");
        translate_key(&key)
    }

    #[test]
    fn navigation_ignores_shift_and_uses_ctrl_variants() {
        assert_eq!(tr("Right"), Some(Action::Motion(MotionKind::CharRight)));
        assert_eq!(tr("S-Right"), Some(Action::Motion(MotionKind::CharRight)));
        assert_eq!(tr("C-S-Left"), Some(Action::Motion(MotionKind::WordLeft)));
        assert_eq!(tr("C-End"), Some(Action::Motion(MotionKind::DocumentEnd)));
        assert_eq!(tr("S-PageDown"), Some(Action::Motion(MotionKind::PageDown)));
        assert_eq!(tr("C-Down"), None);
    }

    #[test]
    fn clipboard_bindings_have_two_spellings() {
        assert_eq!(tr("C-c"), Some(Action::Copy));
        assert_eq!(tr("C-Insert"), Some(Action::Copy));
        assert_eq!(tr("C-x"), Some(Action::Cut));
        assert_eq!(tr("S-Delete"), Some(Action::Cut));
        assert_eq!(tr("C-v"), Some(Action::Paste));
        assert_eq!(tr("S-Insert"), Some(Action::Paste));
        assert_eq!(tr("Insert"), Some(Action::ToggleInsertMode));
    }

    #[test]
    fn commands_and_prompts() {
        assert_eq!(tr("C-z"), Some(Action::Undo));
        assert_eq!(tr("C-y"), Some(Action::Redo));
        assert_eq!(tr("C-Space"), Some(Action::ToggleMark));
        assert_eq!(tr("Esc"), Some(Action::CancelMark));
        assert_eq!(tr("C-r"), Some(Action::FindPrompt { replace: true }));
        assert_eq!(tr("S-F3"), Some(Action::FindNext { backward: true }));
        assert_eq!(tr("F9"), Some(Action::InsertSpecial));
        assert_eq!(tr("C-q"), None);
        assert_eq!(tr("M-x"), None);
    }

    #[test]
    fn printable_keys_type() {
        assert_eq!(tr("x"), Some(Action::Edit(EditKind::Type('x'))));
        assert_eq!(tr("Space"), Some(Action::Edit(EditKind::Type(' '))));
        assert_eq!(tr("Tab"), Some(Action::Edit(EditKind::Tab)));
        assert_eq!(tr("S-Tab"), Some(Action::Edit(EditKind::Unindent)));
        assert_eq!(tr("Enter"), Some(Action::Edit(EditKind::Newline)));
    }
}
