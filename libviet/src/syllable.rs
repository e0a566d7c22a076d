//! Syllable validator.
//!
//! A Vietnamese syllable is (initial consonant cluster, vowel nucleus, final
//! consonant). The composed buffer is decomposed greedily: the longest
//! matching initial, then the maximal run of vowels, then whatever is left
//! must be a final. A modifier is only accepted if the word it would produce
//! still decomposes cleanly; a rejected modifier is typed literally.
//!
//! The nucleus table lists fully marked nuclei. A nucleus typed so far
//! matches an entry when the base letters agree and every mark already
//! present agrees, so `uo` is valid on the way to `ươ` or `uô`.

use libviet_core::composition::accepts_mark;
use libviet_core::{ComposedChar, Mark, Tone};
use phf::phf_set;
use std::ops::Range;

/// Initial consonant clusters, including the `kr` toponym extension
/// (Krông Búk).
static INITIALS: phf::Set<&'static str> = phf_set! {
    "b", "c", "d", "đ", "g", "h", "k", "l", "m", "n", "p", "q", "r", "s", "t", "v", "x",
    "ch", "gh", "gi", "kh", "ng", "nh", "ph", "qu", "th", "tr",
    "ngh",
    "kr",
};

/// Final consonants, including the `k` toponym extension (Đắk Lắk).
static FINALS: phf::Set<&'static str> = phf_set! {
    "c", "ch", "m", "n", "ng", "nh", "p", "t",
    "k",
};

/// Finals after which only the acute or dot-below tone may appear.
static STOP_FINALS: phf::Set<&'static str> = phf_set! {
    "c", "ch", "p", "t", "k",
};

/// Fully marked nuclei and whether a final consonant may follow.
static NUCLEI: &[(&str, bool)] = &[
    ("a", true),
    ("ă", true),
    ("â", true),
    ("e", true),
    ("ê", true),
    ("i", true),
    ("o", true),
    ("ô", true),
    ("ơ", true),
    ("u", true),
    ("ư", true),
    ("y", false),
    ("ai", false),
    ("ao", false),
    ("au", false),
    ("ay", false),
    ("âu", false),
    ("ây", false),
    ("eo", false),
    ("êu", false),
    ("ia", false),
    ("iê", true),
    ("iu", false),
    ("oa", true),
    ("oă", true),
    ("oe", true),
    ("oi", false),
    ("ôi", false),
    ("ơi", false),
    ("oo", true),
    ("ua", false),
    ("uâ", true),
    ("uê", true),
    ("ui", false),
    ("uô", true),
    ("uơ", false),
    ("uy", true),
    ("ưa", false),
    ("ưi", false),
    ("ươ", true),
    ("ưu", false),
    ("yê", true),
    ("iêu", false),
    ("yêu", false),
    ("oai", false),
    ("oao", false),
    ("oay", false),
    ("oeo", false),
    ("uây", false),
    ("uôi", false),
    ("ươi", false),
    ("ươu", false),
    ("uya", false),
    ("uyê", true),
    ("uyu", false),
];

/// Decomposition of a word into index ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllable {
    pub initial: Range<usize>,
    pub nucleus: Range<usize>,
    pub coda: Range<usize>,
}

impl Syllable {
    pub fn has_coda(&self) -> bool {
        !self.coda.is_empty()
    }
}

/// Letters of a cluster as a string key, `đ` for a struck `d`.
fn cluster<'a>(chars: &[ComposedChar], buf: &'a mut [u8; 16]) -> &'a str {
    let mut n = 0;
    for c in chars {
        let ch = if c.stroke && c.base == 'd' { 'đ' } else { c.base };
        if n + ch.len_utf8() > buf.len() {
            break;
        }
        n += ch.encode_utf8(&mut buf[n..]).len();
    }
    std::str::from_utf8(&buf[..n]).unwrap_or_default()
}

/// Split a marked vowel into base letter and mark.
fn vowel_parts(c: char) -> (char, Mark) {
    match c {
        'ă' => ('a', Mark::Breve),
        'â' => ('a', Mark::Circumflex),
        'ê' => ('e', Mark::Circumflex),
        'ô' => ('o', Mark::Circumflex),
        'ơ' => ('o', Mark::Horn),
        'ư' => ('u', Mark::Horn),
        _ => (c, Mark::None),
    }
}

/// Table entry the nucleus is compatible with, if any.
fn nucleus_entry(vowels: &[ComposedChar]) -> Option<(&'static str, bool)> {
    NUCLEI.iter().copied().find(|(pattern, _)| {
        pattern.chars().count() == vowels.len()
            && pattern.chars().zip(vowels).all(|(p, v)| {
                let (base, mark) = vowel_parts(p);
                base == v.base && (v.mark == Mark::None || v.mark == mark)
            })
    })
}

/// Whether the nucleus is in the table, and if so whether it may take a
/// final. The `u` of a `qu` initial also counts as a glide, so `quynh` reads
/// with the `uy` nucleus.
fn nucleus_fit(chars: &[ComposedChar], syllable: &Syllable, initial: &str) -> Option<bool> {
    let vowels = &chars[syllable.nucleus.clone()];
    let own = nucleus_entry(vowels).map(|(_, takes_coda)| takes_coda);
    if initial != "qu" || vowels.len() > 2 {
        return own;
    }
    let mut glided = [ComposedChar::plain('u', false); 3];
    glided[0] = chars[syllable.initial.end - 1];
    glided[1..=vowels.len()].copy_from_slice(vowels);
    let with_glide = nucleus_entry(&glided[..=vowels.len()]).map(|(_, takes_coda)| takes_coda);
    match (own, with_glide) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(false) || b.unwrap_or(false)),
    }
}

/// Decompose `chars` into initial, nucleus and coda without judging the
/// nucleus or coda. Returns `None` if the word contains a non-letter or
/// starts with a consonant cluster that is not a valid initial.
pub fn parse(chars: &[ComposedChar]) -> Option<Syllable> {
    if chars.iter().any(|c| !c.base.is_ascii_lowercase()) {
        return None;
    }
    let leading = chars.iter().take_while(|c| !c.is_vowel()).count();

    // `gi` and `qu` swallow their vowel letter as part of the initial
    let mut initial_len = None;
    let mut buf = [0u8; 16];
    for len in (0..=leading.min(3)).rev() {
        if len == 0 {
            initial_len = Some(0);
            break;
        }
        if INITIALS.contains(cluster(&chars[..len], &mut buf)) {
            initial_len = Some(len);
            break;
        }
    }
    let mut initial_len = initial_len?;
    if leading > initial_len {
        return None;
    }
    if initial_len == 1
        && chars.len() > 1
        && matches!((chars[0].base, chars[1].base), ('g', 'i') | ('q', 'u'))
    {
        if chars.get(2).is_some_and(ComposedChar::is_vowel) {
            initial_len = 2;
        }
    }

    let nucleus_len = chars[initial_len..]
        .iter()
        .take_while(|c| c.is_vowel())
        .count();
    let nucleus = initial_len..initial_len + nucleus_len;
    Some(Syllable {
        initial: 0..initial_len,
        coda: nucleus.end..chars.len(),
        nucleus,
    })
}

/// Whether `chars` is a valid (possibly still incomplete) syllable.
pub fn validate(chars: &[ComposedChar]) -> bool {
    parse(chars).is_some_and(|s| validate_parsed(chars, &s))
}

/// Check a decomposition against the pattern tables.
pub fn validate_parsed(chars: &[ComposedChar], syllable: &Syllable) -> bool {
    let mut buf = [0u8; 16];
    let initial = cluster(&chars[syllable.initial.clone()], &mut buf);
    let vowels = &chars[syllable.nucleus.clone()];

    if vowels.is_empty() {
        // A bare initial is a word still being typed
        return !syllable.has_coda() && (initial.is_empty() || INITIALS.contains(initial));
    }
    // q is only ever written as qu
    if initial == "q" {
        return false;
    }
    // gh and ngh only before front vowels
    if (initial == "gh" || initial == "ngh") && !matches!(vowels[0].base, 'i' | 'e' | 'y') {
        return false;
    }
    if chars.iter().any(|c| !accepts_mark(c.base, c.mark)) {
        return false;
    }
    if chars.iter().any(|c| c.stroke && c.base != 'd') {
        return false;
    }
    let Some(takes_coda) = nucleus_fit(chars, syllable, initial) else {
        return false;
    };
    if !syllable.has_coda() {
        return true;
    }
    if !takes_coda {
        return false;
    }
    let mut buf = [0u8; 16];
    let coda = cluster(&chars[syllable.coda.clone()], &mut buf);
    if !FINALS.contains(coda) {
        return false;
    }
    if STOP_FINALS.contains(coda)
        && chars
            .iter()
            .any(|c| !matches!(c.tone, Tone::None | Tone::Acute | Tone::Dot))
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build composed chars from a lowercase Vietnamese string (marks only;
    /// tones are added by the caller where needed).
    fn word(s: &str) -> Vec<ComposedChar> {
        s.chars()
            .map(|ch| {
                if ch == 'đ' {
                    let mut c = ComposedChar::plain('d', false);
                    c.stroke = true;
                    return c;
                }
                let (base, mark) = vowel_parts(ch);
                let mut c = ComposedChar::plain(base, false);
                c.mark = mark;
                c
            })
            .collect()
    }

    fn valid(s: &str) -> bool {
        validate(&word(s))
    }

    #[test]
    fn parse_splits_initial_nucleus_coda() {
        let chars = word("nghiêng");
        let s = parse(&chars).unwrap();
        assert_eq!(s.initial, 0..3);
        assert_eq!(s.nucleus, 3..5);
        assert_eq!(s.coda, 5..7);
    }

    #[test]
    fn parse_gi_and_qu() {
        let gia = word("gia");
        assert_eq!(parse(&gia).unwrap().nucleus, 2..3);

        // gi without a following vowel: g + i
        let gin = word("gin");
        assert_eq!(parse(&gin).unwrap().nucleus, 1..2);

        let quy = word("quyên");
        assert_eq!(parse(&quy).unwrap().initial, 0..2);
        assert_eq!(parse(&quy).unwrap().nucleus, 2..4);
    }

    #[test]
    fn valid_common_syllables() {
        for s in [
            "viêt", "nam", "đương", "nguyên", "khuya", "tiêng", "hoa", "hoăc", "xoong", "quyên",
            "giương", "người", "thuơ", "ươu", "yêu", "ăn", "đ", "ngh", "gi", "uo", "ie", "duong",
            "quynh", "quyt", "quych", "quan", "quyêt",
        ] {
            assert!(valid(s), "{} should be valid", s);
        }
    }

    #[test]
    fn toponym_extensions() {
        assert!(valid("krông"));
        assert!(valid("đăk"));
    }

    #[test]
    fn invalid_syllables() {
        for s in [
            "fan", "wa", "jo", "bl", "aâ", "ăi", "muă", "ngha", "ast", "ais", "mưan", "hôs",
            "ghi1", "eê", "đđ", "qu", "qa",
        ] {
            assert!(!valid(s), "{} should be invalid", s);
        }
    }

    #[test]
    fn gh_needs_front_vowel() {
        assert!(valid("ghe"));
        assert!(valid("nghi"));
        assert!(!valid("gha"));
        assert!(!valid("nghu"));
    }

    #[test]
    fn stop_finals_restrict_tones() {
        let mut chars = word("hoc");
        chars[1].tone = Tone::Dot;
        assert!(validate(&chars));
        chars[1].tone = Tone::Acute;
        assert!(validate(&chars));
        chars[1].tone = Tone::Grave;
        assert!(!validate(&chars));

        let mut chars = word("ban");
        chars[1].tone = Tone::Grave;
        assert!(validate(&chars));
    }

    #[test]
    fn marks_only_on_letters_that_take_them() {
        let mut chars = word("ben");
        chars[1].mark = Mark::Horn;
        assert!(!validate(&chars));
        let mut chars = word("ban");
        chars[2].mark = Mark::Circumflex;
        assert!(!validate(&chars));
    }

    #[test]
    fn digits_are_never_valid() {
        let mut chars = word("a");
        chars.push(ComposedChar::plain('1', false));
        assert!(parse(&chars).is_none());
    }

    #[test]
    fn bare_initials_are_incomplete_words() {
        assert!(valid("q"), "a bare q is still being typed");
        assert!(valid("ng"));
        assert!(!valid("ngt"));
    }
}
