//! Foreign-word heuristic.
//!
//! Looks at the literal keystrokes of a finished word and guesses whether it
//! was meant as a foreign (mostly English) word. The checks escalate with the
//! number of keystrokes:
//!
//! 1. two keys: a handful of digraphs that are almost never Vietnamese;
//! 2. three keys: foreign-only trigraphs, minus anything that reads as
//!    consonant + vowel + Telex tone key (`nes`, `tef`);
//! 3. four keys or more: consonant clusters and vowel patterns Vietnamese
//!    spelling never produces;
//! 4. any length: a short list of common English words, and words starting
//!    with a letter no Vietnamese initial uses.
//!
//! The verdict only matters for words with no diacritics left, so a false
//! positive costs nothing: restoring a bare word re-types the same letters.

use libviet_core::{keys, RawInput};
use phf::phf_set;

static DIGRAPHS: phf::Set<&'static str> = phf_set! {
    "ex", "ok", "of", "if", "is", "it", "at",
};

/// Three-letter English spellings. Some also read as a Vietnamese
/// consonant + vowel + Telex tone key (`has` is há, `box` is bõ); those are
/// filtered out again by [`is_toned_syllable`].
static TRIGRAPHS: phf::Set<&'static str> = phf_set! {
    "ele", "imp", "com", "exp", "ght", "tch", "sch", "thr", "str", "spr", "scr", "phr",
    "chr", "ack", "eck", "ick", "ock", "uck", "dge",
    "and", "you", "yet", "yes", "was", "has", "his", "her", "box", "six", "mix", "tax",
    "bus", "car", "bar",
};

/// Single-letter initials that can start a toned three-key syllable.
const SIMPLE_INITIALS: &[char] = &[
    'b', 'c', 'd', 'g', 'h', 'k', 'l', 'm', 'n', 'p', 'r', 's', 't', 'v', 'x',
];

static COMMON_WORDS: phf::Set<&'static str> = phf_set! {
    "with", "have", "that", "this", "from", "they", "what", "when", "here", "them", "then",
    "each", "such", "only", "just", "also", "both", "word", "term", "over", "more", "make",
    "take", "give", "come", "work", "help", "need", "want", "look", "used", "know", "gone",
    "done", "code", "file", "test", "data", "user", "save", "load",
};

/// Consonant pairs that never start or end a Vietnamese syllable.
const FOREIGN_CLUSTERS: &[&str] = &["kn", "wr", "ps", "pt"];

const TONE_KEYS: &[char] = &['s', 'f', 'r', 'x', 'j'];

/// Longest word the heuristic looks at.
const MAX_WORD: usize = 32;

fn is_consonant(c: char) -> bool {
    c.is_ascii_lowercase() && !keys::is_vowel(c)
}

/// Whether the raw keystrokes of a word look like a foreign word.
pub fn is_foreign(raw: &RawInput) -> bool {
    let mut buf = [0u8; MAX_WORD];
    let mut len = 0;
    for k in raw.iter() {
        let Some(c) = k.letter() else {
            return false;
        };
        if len == MAX_WORD {
            return false;
        }
        buf[len] = c as u8;
        len += 1;
    }
    match std::str::from_utf8(&buf[..len]) {
        Ok(word) => looks_foreign(word),
        Err(_) => false,
    }
}

/// Heuristic over a lowercase ASCII word.
pub fn looks_foreign(word: &str) -> bool {
    if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return false;
    }
    if COMMON_WORDS.contains(word) {
        return true;
    }
    if word.len() > MAX_WORD {
        return false;
    }
    let mut letters = ['\0'; MAX_WORD];
    for (slot, c) in letters.iter_mut().zip(word.chars()) {
        *slot = c;
    }
    let chars = &letters[..word.len()];
    // f j z never start a Vietnamese word
    if chars.len() >= 2 && matches!(chars[0], 'f' | 'j' | 'z') {
        return true;
    }
    match chars.len() {
        1 => false,
        2 => DIGRAPHS.contains(word),
        3 => TRIGRAPHS.contains(word) && !is_toned_syllable(chars),
        _ => long_word_is_foreign(word, chars),
    }
}

/// Vietnamese initial + vowel + tone key, e.g. `has` for há. `yes` and
/// `was` do not qualify: neither y nor w starts a Vietnamese syllable.
fn is_toned_syllable(chars: &[char]) -> bool {
    SIMPLE_INITIALS.contains(&chars[0])
        && keys::is_vowel(chars[1])
        && TONE_KEYS.contains(&chars[2])
}

fn long_word_is_foreign(word: &str, chars: &[char]) -> bool {
    // Three consonants in a row, except the ngh initial
    for (i, w) in chars.windows(3).enumerate() {
        if w.iter().all(|&c| is_consonant(c)) && !(i == 0 && w == ['n', 'g', 'h']) {
            return true;
        }
    }
    if FOREIGN_CLUSTERS.iter().any(|c| word.contains(c)) {
        return true;
    }
    if chars
        .windows(2)
        .any(|w| matches!(w[0], 'f' | 'w' | 'j' | 'z') && is_consonant(w[1]))
    {
        return true;
    }
    if word.contains("ee") || word.contains("oo") {
        return true;
    }
    for v in ['a', 'e', 'i', 'o', 'u', 'y'] {
        if chars.iter().filter(|&&c| c == v).count() >= 3 {
            return true;
        }
    }
    if chars.len() >= 5 {
        let vowels = chars.iter().filter(|&&c| keys::is_vowel(c)).count();
        if vowels * 5 > chars.len() * 3 {
            return true;
        }
    }
    if word.contains("tion") || word.contains("sion") {
        return true;
    }
    if word.contains("que") {
        return true;
    }
    // Doubled consonants, except the Telex dd and the cc/gg that
    // only come from modifier slips
    chars.windows(2).any(|w| {
        w[0] == w[1] && is_consonant(w[0]) && !matches!(w[0], 'd' | 'c' | 'g')
    })
}
