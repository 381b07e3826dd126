//! Keystrokes, input events, and key-script parsing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A keystroke as delivered by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// A printable character, `' '` included.
    Char(char),
    /// A character typed with the control modifier held. Bindings and
    /// incoming events are compared case-folded, see [`Key::normalized`].
    Ctrl(char),
    Enter,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Escape,
    Function(u8),
}

/// Everything the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    /// Pointer pressed anywhere outside the popup.
    PointerOutside,
    /// The popup reports a pointer selection of the item at this index.
    PointerSelect(usize),
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        InputEvent::Key(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyParseError {
    #[error("unknown key `{0}`")]
    Unknown(String),
    #[error("unterminated `<` in key script at byte {0}")]
    Unterminated(usize),
}

impl Key {
    /// Fold `Ctrl` letters to lowercase, matching how bindings are parsed.
    /// Plain characters keep their case.
    pub fn normalized(self) -> Key {
        match self {
            Key::Ctrl(c) => Key::Ctrl(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let key = match lower.as_str() {
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "space" => Key::Char(' '),
            "bs" | "backspace" => Key::Backspace,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "esc" | "escape" => Key::Escape,
            "lt" => Key::Char('<'),
            _ => {
                if let Some(rest) = lower.strip_prefix("ctrl+") {
                    let mut chars = rest.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Key::Ctrl(c),
                        _ => return Err(KeyParseError::Unknown(s.to_string())),
                    }
                } else if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    Key::Function(n)
                } else {
                    let mut chars = s.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Key::Char(c),
                        _ => return Err(KeyParseError::Unknown(s.to_string())),
                    }
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(' ') => f.write_str("space"),
            Key::Char('<') => f.write_str("lt"),
            Key::Char(c) => write!(f, "{c}"),
            Key::Ctrl(c) => write!(f, "ctrl+{c}"),
            Key::Enter => f.write_str("enter"),
            Key::Tab => f.write_str("tab"),
            Key::Backspace => f.write_str("bs"),
            Key::Up => f.write_str("up"),
            Key::Down => f.write_str("down"),
            Key::Left => f.write_str("left"),
            Key::Right => f.write_str("right"),
            Key::Escape => f.write_str("esc"),
            Key::Function(n) => write!(f, "f{n}"),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// Parse a key script such as `table_2<ctrl+_>f<enter>`.
///
/// Characters outside angle brackets are typed as-is. Bracketed tokens name a
/// key (`<enter>`, `<ctrl+_>`, `<f1>`, ...), a pointer click outside the popup
/// (`<click>`), or a pointer pick of popup item N (`<pick:N>`).
pub fn parse_script(script: &str) -> Result<Vec<InputEvent>, KeyParseError> {
    let mut events = Vec::new();
    let mut rest = script;
    let mut offset = 0;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            let end = rest.find('>').ok_or(KeyParseError::Unterminated(offset))?;
            let token = &rest[1..end];
            let event = if token.eq_ignore_ascii_case("click") {
                InputEvent::PointerOutside
            } else if let Some(index) = token.strip_prefix("pick:") {
                let index = index
                    .parse()
                    .map_err(|_| KeyParseError::Unknown(token.to_string()))?;
                InputEvent::PointerSelect(index)
            } else {
                InputEvent::Key(token.parse()?)
            };
            events.push(event);
            rest = &rest[end + 1..];
            offset += end + 1;
        } else {
            events.push(InputEvent::Key(Key::Char(c)));
            rest = &rest[c.len_utf8()..];
            offset += c.len_utf8();
        }
    }

    Ok(events)
}
