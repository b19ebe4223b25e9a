//! Key event types consumed by the edit window.
//!
//! A [`KeyEvent`] is a normalized logical key plus a modifier mask. Hosts
//! translate whatever their terminal library reports into this form before
//! calling `EditWindow::process_key`.
//!
//! Key notation (used by the replay binary and tests) is Emacs-like:
//! `a`, `C-f`, `S-Down`, `C-S-Home`, `M-x`, `F3`, `S-F3`, `Space`, `C-Space`.
//! Sequences are whitespace separated, see [`parse_key_sequence`].

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CTRL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    pub fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    /// True when the shift modifier is held.
    pub fn is_shift(&self) -> bool {
        self.mods.contains(KeyModifiers::SHIFT)
    }

    /// The key with every modifier removed.
    pub fn base(&self) -> KeyCode {
        self.code
    }
}

/// Normalized logical key representations consumed by higher layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    F(u8),
}

impl KeyCode {
    /// Navigation keys whose shifted form extends a selection.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            KeyCode::Up
                | KeyCode::Down
                | KeyCode::Left
                | KeyCode::Right
                | KeyCode::Home
                | KeyCode::End
                | KeyCode::PageUp
                | KeyCode::PageDown
        )
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.contains(KeyModifiers::CTRL) {
            f.write_str("C-")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            f.write_str("M-")?;
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            f.write_str("S-")?;
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key notation")]
    Empty,
    #[error("unknown key name: {0}")]
    UnknownKey(String),
    #[error("unknown modifier prefix in {0}")]
    UnknownModifier(String),
}

fn named_key(name: &str) -> Option<KeyCode> {
    let code = match name {
        "Enter" | "Return" | "RET" => KeyCode::Enter,
        "Esc" | "Escape" => KeyCode::Esc,
        "Backspace" | "BS" => KeyCode::Backspace,
        "Tab" | "TAB" => KeyCode::Tab,
        "Up" => KeyCode::Up,
        "Down" => KeyCode::Down,
        "Left" => KeyCode::Left,
        "Right" => KeyCode::Right,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" | "PgUp" => KeyCode::PageUp,
        "PageDown" | "PgDn" => KeyCode::PageDown,
        "Insert" | "Ins" => KeyCode::Insert,
        "Delete" | "Del" => KeyCode::Delete,
        "Space" | "SPC" => KeyCode::Char(' '),
        _ => {
            let n = name.strip_prefix('F')?.parse::<u8>().ok()?;
            if (1..=24).contains(&n) {
                KeyCode::F(n)
            } else {
                return None;
            }
        }
    };
    Some(code)
}

impl FromStr for KeyEvent {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }
        let mut mods = KeyModifiers::empty();
        let mut rest = s;
        // A lone "-" or a trailing "-" after a modifier is the minus key.
        while rest.len() > 2 && rest.as_bytes()[1] == b'-' {
            let m = match &rest[..1] {
                "C" => KeyModifiers::CTRL,
                "M" | "A" => KeyModifiers::ALT,
                "S" => KeyModifiers::SHIFT,
                _ => return Err(KeyParseError::UnknownModifier(s.to_string())),
            };
            mods |= m;
            rest = &rest[2..];
        }
        let mut chars = rest.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => KeyCode::Char(c),
            _ => named_key(rest).ok_or_else(|| KeyParseError::UnknownKey(rest.to_string()))?,
        };
        Ok(KeyEvent { code, mods })
    }
}

/// Parse a whitespace separated key sequence such as `"C-f S-Down x Enter"`.
pub fn parse_key_sequence(s: &str) -> Result<Vec<KeyEvent>, KeyParseError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Keys that type `text` literally: newlines become Enter, tabs become Tab.
pub fn keys_for_text(text: &str) -> Vec<KeyEvent> {
    text.chars()
        .map(|c| match c {
            '\n' => KeyEvent::plain(KeyCode::Enter),
            '\t' => KeyEvent::plain(KeyCode::Tab),
            c => KeyEvent::char(c),
        })
        .collect()
}
