//! Compose session management.
//!
//! The `ComposeSession` owns the per-word state the engine mutates on every
//! keystroke: the composed buffer, the raw keystroke history, the committed
//! word history and the count of boundary characters typed since the last
//! commit. It keeps the composed and raw halves consistent; the engine
//! decides what to do with them.

use crate::composition::{ComposedChar, Composition};
use crate::history::{WordHistory, WordSnapshot};
use crate::keys;
use crate::raw_input::RawInput;

/// Logical state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposeState {
    /// Buffers empty.
    #[default]
    Idle,
    /// A word is being typed.
    Composing,
}

/// Outcome of a backspace on an empty buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryStep {
    /// No committed word to step back into.
    Nothing,
    /// A boundary character was deleted; more remain before the word.
    Deleted,
    /// The last boundary character was deleted and the word was restored.
    Restored,
}

#[derive(Debug, Clone, Default)]
pub struct ComposeSession {
    composition: Composition,
    raw: RawInput,
    history: WordHistory,
    boundaries_since_commit: u8,
}

impl ComposeSession {
    /// Create a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn composition_mut(&mut self) -> &mut Composition {
        &mut self.composition
    }

    pub fn raw(&self) -> &RawInput {
        &self.raw
    }

    pub fn history(&self) -> &WordHistory {
        &self.history
    }

    pub fn state(&self) -> ComposeState {
        if self.composition.is_empty() && self.raw.is_empty() {
            ComposeState::Idle
        } else {
            ComposeState::Composing
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state() == ComposeState::Idle
    }

    /// Append a composed character produced by keystroke `(key, shift)`.
    pub fn push_char(&mut self, c: ComposedChar, key: u16, shift: bool) {
        if self.composition.push(c) {
            self.raw.release_first_slot();
        }
        self.raw.push(key, shift, self.composition.len() - 1);
    }

    /// Append the literal character for a modifier key typed twice in a row.
    /// The earlier modifier keystroke moves to the new character along with
    /// this one, so deleting it forgets both.
    pub fn push_reverted(&mut self, c: ComposedChar, key: u16, shift: bool) {
        self.push_char(c, key, shift);
        self.raw.reslot_tail(2, self.composition.len() - 1);
    }

    /// Record a modifier keystroke that changed the character at `slot`.
    pub fn record_modifier(&mut self, key: u16, shift: bool, slot: usize) {
        self.raw.push(key, shift, slot);
    }

    /// Forget the most recent modifier keystroke (its transform was undone).
    pub fn drop_last_keystroke(&mut self) {
        self.raw.pop();
    }

    /// Delete the last composed character together with the keystrokes
    /// attributed to it.
    pub fn pop_char(&mut self) -> Option<ComposedChar> {
        let c = self.composition.pop()?;
        self.raw.remove_slot(self.composition.len());
        Some(c)
    }

    /// Commit the current word at a boundary: snapshot both halves into word
    /// history and clear them. On an empty buffer only counts the boundary.
    /// Returns true if a word was committed.
    pub fn commit(&mut self) -> bool {
        if self.composition.is_empty() {
            if self.boundaries_since_commit > 0 {
                self.boundaries_since_commit = self.boundaries_since_commit.saturating_add(1);
            }
            return false;
        }
        self.history.push(self.composition, self.raw);
        self.composition.clear();
        self.raw.clear();
        self.boundaries_since_commit = 1;
        true
    }

    /// Backspace on an empty buffer: step back over one boundary character,
    /// restoring the committed word when the last one goes.
    pub fn step_back(&mut self) -> BoundaryStep {
        if self.boundaries_since_commit == 0 {
            return BoundaryStep::Nothing;
        }
        self.boundaries_since_commit -= 1;
        if self.boundaries_since_commit > 0 {
            return BoundaryStep::Deleted;
        }
        match self.history.pop() {
            Some(WordSnapshot { composition, raw }) => {
                self.composition = composition;
                self.raw = raw;
                BoundaryStep::Restored
            }
            None => BoundaryStep::Deleted,
        }
    }

    /// Replace the composed buffer with the literal keystrokes. Raw history
    /// is kept as is.
    pub fn restore_literal(&mut self) {
        self.composition.clear();
        for k in self.raw.iter() {
            let base = match keys::classify(k.key, k.shift) {
                keys::KeyClass::Letter(c) | keys::KeyClass::Digit(c) => c,
                _ => continue,
            };
            self.composition
                .push(ComposedChar::plain(base, keys::is_upper(k.key, k.shift)));
        }
        self.raw.reslot_sequential();
    }

    /// Drop the current word without committing it. The text on screen no
    /// longer matches it (a shortcut was expanded), so the boundary count is
    /// reset too.
    pub fn discard_word(&mut self) {
        self.clear();
        self.boundaries_since_commit = 0;
    }

    /// Clear both buffers without touching word history.
    pub fn clear(&mut self) {
        self.composition.clear();
        self.raw.clear();
    }

    /// Abandon the current word and forget committed words: the caret moved,
    /// so nothing behind it can be stepped back into.
    pub fn reset(&mut self) {
        self.clear();
        self.history.clear();
        self.boundaries_since_commit = 0;
    }
}
