//! Word history: a bounded undo log of committed words.
//!
//! At every word boundary the engine pushes the pre-boundary composed buffer
//! together with its raw keystrokes. Backspacing back across the boundary
//! pops the pair and restores both halves at once. Raw keystrokes are never
//! re-derived from the composed form.

use crate::composition::Composition;
use crate::raw_input::RawInput;
use std::collections::VecDeque;

/// Number of committed words remembered.
pub const WORD_HISTORY_CAPACITY: usize = 10;

/// A committed word: what was on screen and what was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSnapshot {
    pub composition: Composition,
    pub raw: RawInput,
}

/// Ring of the most recent committed words. Pre-sized, never reallocates.
#[derive(Debug, Clone)]
pub struct WordHistory {
    entries: VecDeque<WordSnapshot>,
}

impl WordHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(WORD_HISTORY_CAPACITY),
        }
    }

    /// Remember a committed word, evicting the oldest when full.
    pub fn push(&mut self, composition: Composition, raw: RawInput) {
        if self.entries.len() == WORD_HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(WordSnapshot { composition, raw });
    }

    /// Take back the most recent word.
    pub fn pop(&mut self) -> Option<WordSnapshot> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        WORD_HISTORY_CAPACITY
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for WordHistory {
    fn default() -> Self {
        Self::new()
    }
}
