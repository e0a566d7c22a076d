//! Key-role tables for the two Vietnamese input conventions.
//!
//! A convention decides what each letter or digit key *may* do. Whether a
//! modifier actually transforms the word is decided later by the syllable
//! validator; a rejected modifier is typed literally.
//!
//! ## Conventions Overview
//!
//! - **Telex**: modifiers are letters. `s f r x j` add a tone, `z` removes
//!   diacritics, doubling `a e o` adds a circumflex, `w` adds a horn (or a
//!   breve on `a`, or types `ư` on its own), and `dd` gives `đ`.
//!
//! - **VNI**: modifiers are digits. `1`-`5` add a tone, `6` circumflex,
//!   `7` horn, `8` breve, `9` stroke, `0` removes diacritics. Digits are never
//!   ambiguous with letters, so the stroke may be typed late (`duong9`).

use libviet_core::{InputConvention, Mark, Tone};
use phf::phf_map;

/// What a key may do under a convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    /// Types itself.
    Literal,
    /// Puts a tone on the syllable.
    Tone(Tone),
    /// Puts a mark on one of the listed `(base, mark)` targets.
    Mark(&'static [(char, Mark)]),
    /// Strikes a `d`.
    Stroke,
    /// Removes the tone, or the marks when there is no tone.
    Remove,
}

const CIRCUMFLEX_A: &[(char, Mark)] = &[('a', Mark::Circumflex)];
const CIRCUMFLEX_E: &[(char, Mark)] = &[('e', Mark::Circumflex)];
const CIRCUMFLEX_O: &[(char, Mark)] = &[('o', Mark::Circumflex)];
const CIRCUMFLEX_ANY: &[(char, Mark)] = &[
    ('a', Mark::Circumflex),
    ('e', Mark::Circumflex),
    ('o', Mark::Circumflex),
];
const HORN: &[(char, Mark)] = &[('u', Mark::Horn), ('o', Mark::Horn)];
const BREVE: &[(char, Mark)] = &[('a', Mark::Breve)];
const TELEX_W: &[(char, Mark)] = &[('u', Mark::Horn), ('o', Mark::Horn), ('a', Mark::Breve)];

static TELEX: phf::Map<char, KeyRole> = phf_map! {
    's' => KeyRole::Tone(Tone::Acute),
    'f' => KeyRole::Tone(Tone::Grave),
    'r' => KeyRole::Tone(Tone::Hook),
    'x' => KeyRole::Tone(Tone::Tilde),
    'j' => KeyRole::Tone(Tone::Dot),
    'z' => KeyRole::Remove,
    'a' => KeyRole::Mark(CIRCUMFLEX_A),
    'e' => KeyRole::Mark(CIRCUMFLEX_E),
    'o' => KeyRole::Mark(CIRCUMFLEX_O),
    'w' => KeyRole::Mark(TELEX_W),
    'd' => KeyRole::Stroke,
};

static VNI: phf::Map<char, KeyRole> = phf_map! {
    '1' => KeyRole::Tone(Tone::Acute),
    '2' => KeyRole::Tone(Tone::Grave),
    '3' => KeyRole::Tone(Tone::Hook),
    '4' => KeyRole::Tone(Tone::Tilde),
    '5' => KeyRole::Tone(Tone::Dot),
    '6' => KeyRole::Mark(CIRCUMFLEX_ANY),
    '7' => KeyRole::Mark(HORN),
    '8' => KeyRole::Mark(BREVE),
    '9' => KeyRole::Stroke,
    '0' => KeyRole::Remove,
};

/// Key-role lookup for one convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Convention {
    kind: InputConvention,
}

impl Convention {
    pub fn new(kind: InputConvention) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> InputConvention {
        self.kind
    }

    /// Role of a lowercase letter or digit key.
    pub fn role(&self, key: char) -> KeyRole {
        let table = match self.kind {
            InputConvention::Telex => &TELEX,
            InputConvention::Vni => &VNI,
        };
        table.get(&key).copied().unwrap_or(KeyRole::Literal)
    }

    /// Whether the stroke may land on a `d` that is not the last character.
    ///
    /// Telex strokes only an adjacent `d` (so `deadline` stays intact); the
    /// VNI `9` is never a letter and may come late.
    pub fn delayed_stroke(&self) -> bool {
        self.kind == InputConvention::Vni
    }

    /// Vowel a key types on its own when it has nothing to modify
    /// (Telex `w` → `ư`).
    pub fn standalone_vowel(&self, key: char) -> Option<(char, Mark)> {
        match (self.kind, key) {
            (InputConvention::Telex, 'w') => Some(('u', Mark::Horn)),
            _ => None,
        }
    }
}

impl Default for Convention {
    fn default() -> Self {
        Self::new(InputConvention::default())
    }
}
