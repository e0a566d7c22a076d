//! Raw keystroke history for the word being typed.
//!
//! The raw history stores the literal `(key, shift)` pairs exactly as typed,
//! independent of whatever the composed buffer shows. Each entry also records
//! the composed position it produced or modified (its *slot*), so deleting a
//! composed character can drop exactly the keystrokes behind it.

use crate::action::Replacement;
use crate::keys;
use std::fmt;

/// Maximum number of keystrokes kept for one word.
pub const RAW_CAPACITY: usize = 64;

/// One literal keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKey {
    pub key: u16,
    pub shift: bool,
    /// Composed position this keystroke produced or modified.
    pub slot: u8,
}

impl RawKey {
    /// The character this keystroke types on its own.
    pub fn to_char(&self) -> char {
        keys::to_char(self.key, self.shift).unwrap_or('?')
    }

    /// Lowercase letter for this keystroke, if it is a letter.
    pub fn letter(&self) -> Option<char> {
        match keys::classify(self.key, self.shift) {
            keys::KeyClass::Letter(c) => Some(c),
            _ => None,
        }
    }
}

/// Bounded raw history. Overflow drops the oldest keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInput {
    keys: [RawKey; RAW_CAPACITY],
    len: usize,
}

impl RawInput {
    /// Create a new empty history.
    pub const fn new() -> Self {
        Self {
            keys: [RawKey {
                key: 0,
                shift: false,
                slot: 0,
            }; RAW_CAPACITY],
            len: 0,
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

    /// Record a keystroke. Returns true if the oldest one was dropped to make room.
    pub fn push(&mut self, key: u16, shift: bool, slot: usize) -> bool {
        let dropped = self.len == RAW_CAPACITY;
        if dropped {
            self.keys.copy_within(1.., 0);
            self.len -= 1;
        }
        self.keys[self.len] = RawKey {
            key,
            shift,
            slot: slot.min(u8::MAX as usize) as u8,
        };
        self.len += 1;
        dropped
    }

    pub fn pop(&mut self) -> Option<RawKey> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.keys[self.len])
    }

    pub fn last(&self) -> Option<&RawKey> {
        self.as_slice().last()
    }

    pub fn as_slice(&self) -> &[RawKey] {
        &self.keys[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawKey> {
        self.as_slice().iter()
    }

    /// Drop every keystroke attributed to `slot`. Returns how many were removed.
    pub fn remove_slot(&mut self, slot: usize) -> usize {
        let mut kept = 0;
        for i in 0..self.len {
            if self.keys[i].slot as usize != slot {
                self.keys[kept] = self.keys[i];
                kept += 1;
            }
        }
        let removed = self.len - kept;
        self.len = kept;
        removed
    }

    /// Follow the composed buffer dropping its first character: forget the
    /// keystrokes behind it and shift the remaining slots down.
    pub fn release_first_slot(&mut self) {
        self.remove_slot(0);
        for k in &mut self.keys[..self.len] {
            k.slot = k.slot.saturating_sub(1);
        }
    }

    /// Attribute the last `count` keystrokes to `slot`.
    pub fn reslot_tail(&mut self, count: usize, slot: usize) {
        let start = self.len.saturating_sub(count);
        for k in &mut self.keys[start..self.len] {
            k.slot = slot.min(u8::MAX as usize) as u8;
        }
    }

    /// Attribute each keystroke to its own position (after a literal restore).
    pub fn reslot_sequential(&mut self) {
        for (i, k) in self.keys[..self.len].iter_mut().enumerate() {
            k.slot = i.min(u8::MAX as usize) as u8;
        }
    }

    /// Write the literal typed text into `out` (replacing its contents).
    pub fn render_into(&self, out: &mut Replacement) {
        out.clear();
        for k in self.iter() {
            out.push(k.to_char());
        }
    }
}

impl Default for RawInput {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RawInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for k in self.iter() {
            f.write_char(k.to_char())?;
        }
        Ok(())
    }
}
