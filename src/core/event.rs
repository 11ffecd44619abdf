//! Key events as seen by widgets.
//!
//! These types are independent of any terminal library; the terminal backend
//! converts its native events into them.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    F(u8),
    Enter,
    Tab,
    BackTab,
    Esc,
    Backspace,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers(u8);

impl KeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(1 << 0);
    pub const CONTROL: Self = Self(1 << 1);
    pub const ALT: Self = Self(1 << 2);
    pub const SUPER: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for KeyModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for KeyModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// A key press. Upper-case ASCII letters are normalized to lower case plus
/// `SHIFT`, so `Key::from('Q') == Key::shift(KeyCode::Char('q'))`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        let mut key = Self { code, modifiers };
        if let KeyCode::Char(ch) = key.code {
            if ch.is_ascii_uppercase() {
                key.code = KeyCode::Char(ch.to_ascii_lowercase());
                key.modifiers |= KeyModifiers::SHIFT;
            }
        }
        key
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    /// The character typed, if this is an unmodified (or shifted) char key.
    pub fn as_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch)
                if !self.modifiers.contains(KeyModifiers::CONTROL)
                    && !self.modifiers.contains(KeyModifiers::ALT) =>
            {
                if self.modifiers.contains(KeyModifiers::SHIFT) {
                    Some(ch.to_ascii_uppercase())
                } else {
                    Some(ch)
                }
            }
            _ => None,
        }
    }
}

impl From<char> for Key {
    fn from(ch: char) -> Self {
        Self::simple(KeyCode::Char(ch))
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Self::simple(code)
    }
}

/// Parses bindings such as `q`, `esc`, `ctrl+c` or `alt+F4`.
impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let err = || ParseKeyError(value.to_string());
        let mut modifiers = KeyModifiers::NONE;
        let mut key_part: Option<&str> = None;
        for part in value.split('+').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "alt" | "option" => modifiers |= KeyModifiers::ALT,
                "super" | "meta" | "cmd" => modifiers |= KeyModifiers::SUPER,
                _ if key_part.is_some() => return Err(err()),
                _ => key_part = Some(part),
            }
        }
        let code = key_part.and_then(parse_key_code).ok_or_else(err)?;
        Ok(Key::new(code, modifiers))
    }
}

fn parse_key_code(value: &str) -> Option<KeyCode> {
    let lc = value.to_ascii_lowercase();
    let code = match lc.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        _ if lc.len() > 1 && lc.starts_with('f') => KeyCode::F(lc[1..].parse().ok()?),
        _ => {
            let mut chars = value.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };
    Some(code)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid key binding `{0}`")]
pub struct ParseKeyError(pub String);

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (KeyModifiers::CONTROL, "ctrl+"),
            (KeyModifiers::ALT, "alt+"),
            (KeyModifiers::SUPER, "super+"),
            (KeyModifiers::SHIFT, "shift+"),
        ] {
            if self.modifiers.contains(flag) {
                f.write_str(name)?;
            }
        }
        match self.code {
            KeyCode::Char(' ') => f.write_str("space"),
            KeyCode::Char(ch) => write!(f, "{ch}"),
            KeyCode::F(n) => write!(f, "f{n}"),
            other => write!(f, "{}", format!("{other:?}").to_ascii_lowercase()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/event.rs"]
mod tests;
