//! Abstract key ids understood by the engine.
//!
//! Hosts translate platform key codes into this space before calling
//! `process_key`. Printable ASCII keys use their own code point (letters in
//! lowercase, with case carried by the shift flag), control keys use their
//! ASCII control code, and navigation keys live above `0xFF`.

pub const BACKSPACE: u16 = 0x08;
pub const TAB: u16 = 0x09;
pub const RETURN: u16 = 0x0D;
pub const ESC: u16 = 0x1B;
pub const SPACE: u16 = 0x20;
pub const DELETE: u16 = 0x7F;

pub const LEFT: u16 = 0x100;
pub const RIGHT: u16 = 0x101;
pub const UP: u16 = 0x102;
pub const DOWN: u16 = 0x103;
pub const HOME: u16 = 0x104;
pub const END: u16 = 0x105;
pub const PAGE_UP: u16 = 0x106;
pub const PAGE_DOWN: u16 = 0x107;

/// Convention-independent category of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// A letter `a`..`z` (always lowercase here).
    Letter(char),
    /// An unshifted digit.
    Digit(char),
    /// Space, punctuation, tab or return. Carries the character the key types.
    Boundary(char),
    Backspace,
    Escape,
    /// Navigation and other non-text keys that abandon the current word.
    Reset,
}

/// Classify a key id. Uppercase ASCII ids are folded to lowercase letters;
/// the caller decides case from [`is_upper`].
pub fn classify(key: u16, shift: bool) -> KeyClass {
    match key {
        BACKSPACE => KeyClass::Backspace,
        ESC => KeyClass::Escape,
        SPACE => KeyClass::Boundary(' '),
        TAB => KeyClass::Boundary('\t'),
        RETURN => KeyClass::Boundary('\n'),
        0x61..=0x7A => KeyClass::Letter(key as u8 as char),
        0x41..=0x5A => KeyClass::Letter((key as u8).to_ascii_lowercase() as char),
        0x30..=0x39 if shift => KeyClass::Boundary(shifted_digit(key as u8 as char)),
        0x30..=0x39 => KeyClass::Digit(key as u8 as char),
        0x21..=0x7E => KeyClass::Boundary(key as u8 as char),
        _ => KeyClass::Reset,
    }
}

/// Whether a letter key should be typed in uppercase.
pub fn is_upper(key: u16, shift: bool) -> bool {
    shift || (0x41..=0x5A).contains(&key)
}

/// Map a typed ASCII character to `(key_id, shift)`.
///
/// Shifted digit symbols (`!@#$%^&*()`) map back to their digit key with
/// shift set, the way a physical keyboard reports them.
pub fn from_char(ch: char) -> Option<(u16, bool)> {
    match ch {
        'a'..='z' | '0'..='9' => Some((ch as u16, false)),
        'A'..='Z' => Some((ch.to_ascii_lowercase() as u16, true)),
        ' ' => Some((SPACE, false)),
        '\t' => Some((TAB, false)),
        '\n' | '\r' => Some((RETURN, false)),
        '!' | '@' | '#' | '$' | '%' | '^' | '&' | '*' | '(' | ')' => {
            let digit = "1234567890"
                .chars()
                .nth("!@#$%^&*()".find(ch)?)?;
            Some((digit as u16, true))
        }
        '!'..='~' => Some((ch as u16, false)),
        _ => None,
    }
}

/// Character typed by a printable key, if any.
pub fn to_char(key: u16, shift: bool) -> Option<char> {
    match classify(key, shift) {
        KeyClass::Letter(c) if is_upper(key, shift) => Some(c.to_ascii_uppercase()),
        KeyClass::Letter(c) | KeyClass::Digit(c) | KeyClass::Boundary(c) => Some(c),
        _ => None,
    }
}

/// Vowel letters (`a e i o u y`), by base letter.
pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

fn shifted_digit(d: char) -> char {
    match d {
        '1' => '!',
        '2' => '@',
        '3' => '#',
        '4' => '$',
        '5' => '%',
        '6' => '^',
        '7' => '&',
        '8' => '*',
        '9' => '(',
        _ => ')',
    }
}
