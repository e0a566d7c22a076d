//! Action descriptor returned to the host for every keystroke.
//!
//! An action is either a no-op (let the key through untouched) or a
//! replacement: delete `backspace_count` characters before the caret, then
//! type `replacement`. The replacement text lives in a fixed-capacity array so
//! producing an action never touches the heap.

use crate::encoding::{self, OutputEncoding};
use serde::{Serialize, Serializer};
use std::fmt;

/// Maximum number of characters in a replacement.
pub const REPLACEMENT_CAPACITY: usize = 64;

/// Fixed-capacity character sequence.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Replacement {
    chars: [char; REPLACEMENT_CAPACITY],
    len: usize,
}

impl Replacement {
    pub const fn new() -> Self {
        Self {
            chars: ['\0'; REPLACEMENT_CAPACITY],
            len: 0,
        }
    }

    /// Build from a slice, keeping at most `REPLACEMENT_CAPACITY` characters.
    pub fn from_chars(chars: &[char]) -> Self {
        let mut r = Self::new();
        for &c in chars {
            if !r.push(c) {
                break;
            }
        }
        r
    }

    /// Append a character; returns false (and drops it) when full.
    pub fn push(&mut self, c: char) -> bool {
        if self.len == REPLACEMENT_CAPACITY {
            return false;
        }
        self.chars[self.len] = c;
        self.len += 1;
        true
    }

    /// Append every character of `s` that still fits.
    pub fn push_str(&mut self, s: &str) {
        for c in s.chars() {
            if !self.push(c) {
                break;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn as_slice(&self) -> &[char] {
        &self.chars[..self.len]
    }

    /// Encode as UTF-8 into a stack buffer.
    pub fn encode_utf8<'a>(&self, buf: &'a mut [u8; REPLACEMENT_CAPACITY * 4]) -> &'a str {
        let mut n = 0;
        for c in self.as_slice() {
            n += c.encode_utf8(&mut buf[n..]).len();
        }
        // Only whole chars were written.
        std::str::from_utf8(&buf[..n]).unwrap_or_default()
    }
}

impl Default for Replacement {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for &c in self.as_slice() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string())
    }
}

impl Serialize for Replacement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Kind of edit requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Pass the key through untouched.
    NoOp,
    /// Delete `backspace_count` characters, then type the replacement.
    Replace,
}

/// Result of one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Action {
    pub kind: ActionKind,
    pub backspace_count: u8,
    pub replacement: Replacement,
}

impl Action {
    /// Let the key through.
    pub const fn none() -> Self {
        Self {
            kind: ActionKind::NoOp,
            backspace_count: 0,
            replacement: Replacement::new(),
        }
    }

    /// Swallow the key without changing the text field.
    pub const fn consume() -> Self {
        Self {
            kind: ActionKind::Replace,
            backspace_count: 0,
            replacement: Replacement::new(),
        }
    }

    pub fn replace(backspace_count: usize, replacement: Replacement) -> Self {
        Self {
            kind: ActionKind::Replace,
            backspace_count: backspace_count.min(u8::MAX as usize) as u8,
            replacement,
        }
    }

    /// Minimal edit turning `before` into `after`: keep the common prefix,
    /// delete the rest of `before` and type the rest of `after`.
    ///
    /// Identical texts yield a no-op.
    pub fn diff(before: &Replacement, after: &Replacement) -> Self {
        let prefix = before
            .as_slice()
            .iter()
            .zip(after.as_slice())
            .take_while(|(a, b)| a == b)
            .count();
        if prefix == before.len() && prefix == after.len() {
            return Self::none();
        }
        Self::replace(
            before.len() - prefix,
            Replacement::from_chars(&after.as_slice()[prefix..]),
        )
    }

    pub fn is_noop(&self) -> bool {
        self.kind == ActionKind::NoOp
    }

    pub fn text(&self) -> &[char] {
        self.replacement.as_slice()
    }

    /// Replacement text as bytes in `encoding`. The backspace count is
    /// unaffected: it always counts characters.
    pub fn encoded_text(&self, encoding: OutputEncoding) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.replacement.len() * 2);
        for &c in self.text() {
            encoding::encode_char(c, encoding, &mut out);
        }
        out
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::none()
    }
}
