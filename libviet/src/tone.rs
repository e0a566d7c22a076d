//! Tone and mark placement.
//!
//! Every modifier is applied to a copy of the composed buffer and kept only if
//! the result is accepted: free-tone mode accepts anything, a word that
//! already carries a horn skips the syllable check, and otherwise the new word
//! must validate. Callers treat a rejected modifier as a literal key.

use crate::syllable::{self, Syllable};
use libviet_core::{ComposedChar, Composition, Mark, Tone};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Where the tone goes on `oa`, `oe` and `uy` with no final consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneStyle {
    /// hoà, thuý
    #[default]
    Modern,
    /// hòa, thúy
    Traditional,
}

/// Placement options for one keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToneRules {
    pub style: ToneStyle,
    pub free_tone: bool,
}

/// Result of a mark keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The mark landed on this position.
    Applied(usize),
    /// Every target already carries the mark; the key changes nothing.
    Absorbed,
    /// No acceptable target.
    Rejected,
}

impl ToneRules {
    pub fn new(style: ToneStyle, free_tone: bool) -> Self {
        Self { style, free_tone }
    }

    /// Whether the edit `before` → `after` may stand.
    pub fn accept(&self, before: &[ComposedChar], after: &[ComposedChar]) -> bool {
        self.free_tone
            || before.iter().any(|c| c.mark == Mark::Horn)
            || syllable::validate(after)
    }
}

/// Vowel that carries the tone in a parsed syllable.
pub fn tone_position(chars: &[ComposedChar], syl: &Syllable, style: ToneStyle) -> Option<usize> {
    let nucleus = syl.nucleus.clone();
    let vowels = &chars[nucleus.clone()];
    let start = nucleus.start;
    match vowels.len() {
        0 => return None,
        1 => return Some(start),
        _ => {}
    }
    if let Some(i) = vowels.iter().rposition(|c| c.mark != Mark::None) {
        return Some(start + i);
    }
    if vowels.len() == 3 {
        return Some(start + 1);
    }
    if syl.has_coda() {
        return Some(start + 1);
    }
    let pair = (vowels[0].base, vowels[1].base);
    if matches!(pair, ('o', 'a') | ('o', 'e') | ('u', 'y')) && style == ToneStyle::Modern {
        return Some(start + 1);
    }
    Some(start)
}

/// Tone target for any word: the placement rules when it parses, the last
/// vowel letter otherwise.
fn placement(chars: &[ComposedChar], style: ToneStyle) -> Option<usize> {
    syllable::parse(chars)
        .and_then(|syl| tone_position(chars, &syl, style))
        .or_else(|| chars.iter().rposition(ComposedChar::is_vowel))
}

/// Put `tone` on the word, replacing any existing tone. Returns the position
/// it landed on.
pub fn apply_tone(comp: &mut Composition, tone: Tone, rules: &ToneRules) -> Option<usize> {
    let before = *comp;
    let pos = placement(comp.as_slice(), rules.style)?;
    for c in comp.as_mut_slice() {
        c.tone = Tone::None;
    }
    comp.as_mut_slice()[pos].tone = tone;
    if rules.accept(before.as_slice(), comp.as_slice()) {
        Some(pos)
    } else {
        trace!(word = %before, ?tone, "tone rejected");
        *comp = before;
        None
    }
}

/// Index of the `u` in an adjacent `uo` pair that can take the double horn.
fn horn_pair(chars: &[ComposedChar]) -> Option<usize> {
    (0..chars.len().saturating_sub(1)).rev().find(|&i| {
        let (u, o) = (&chars[i], &chars[i + 1]);
        let after_q = i > 0 && chars[i - 1].base == 'q';
        u.base == 'u'
            && o.base == 'o'
            && !after_q
            && !(u.mark == Mark::Horn && o.mark == Mark::Horn)
    })
}

/// Put a mark on the last acceptable target from `targets`, switching any
/// different mark already there.
pub fn apply_mark(comp: &mut Composition, targets: &[(char, Mark)], rules: &ToneRules) -> MarkOutcome {
    let before = *comp;
    let wants_horn = |base| targets.contains(&(base, Mark::Horn));

    if wants_horn('u') && wants_horn('o') {
        if let Some(i) = horn_pair(comp.as_slice()) {
            let chars = comp.as_mut_slice();
            chars[i].mark = Mark::Horn;
            chars[i + 1].mark = Mark::Horn;
            if rules.accept(before.as_slice(), comp.as_slice()) {
                return MarkOutcome::Applied(i + 1);
            }
            *comp = before;
        }
    }

    let mut already_marked = false;
    for i in (0..before.len()).rev() {
        let c = before.as_slice()[i];
        for &(base, mark) in targets {
            if c.base != base {
                continue;
            }
            if c.mark == mark {
                already_marked = true;
                continue;
            }
            let chars = comp.as_mut_slice();
            chars[i].mark = mark;
            // ươ → uô: the u loses its horn with the o
            if base == 'o' && c.mark == Mark::Horn && i > 0 && chars[i - 1].base == 'u' {
                chars[i - 1].mark = Mark::None;
            }
            if rules.accept(before.as_slice(), comp.as_slice()) {
                return MarkOutcome::Applied(i);
            }
            *comp = before;
        }
    }

    if already_marked {
        MarkOutcome::Absorbed
    } else {
        trace!(word = %before, "mark rejected");
        MarkOutcome::Rejected
    }
}

/// Strike a `d`. Without `delayed` only a trailing `d` qualifies.
pub fn apply_stroke(comp: &mut Composition, delayed: bool, rules: &ToneRules) -> Option<usize> {
    let before = *comp;
    let pos = if delayed {
        comp.iter().position(|c| c.base == 'd' && !c.stroke)?
    } else {
        let last = comp.len().checked_sub(1)?;
        let c = comp.get(last)?;
        if c.base != 'd' || c.stroke {
            return None;
        }
        last
    };
    comp.as_mut_slice()[pos].stroke = true;
    if rules.accept(before.as_slice(), comp.as_slice()) {
        Some(pos)
    } else {
        *comp = before;
        None
    }
}

/// Remove the tone, or every mark and stroke if there is no tone. Returns the
/// last position changed, or `None` if the word was already bare.
pub fn remove_diacritics(comp: &mut Composition) -> Option<usize> {
    if let Some(pos) = comp.tone_position() {
        for c in comp.as_mut_slice() {
            c.tone = Tone::None;
        }
        return Some(pos);
    }
    let mut changed = None;
    for (i, c) in comp.as_mut_slice().iter_mut().enumerate() {
        if c.mark != Mark::None || c.stroke {
            c.mark = Mark::None;
            c.stroke = false;
            changed = Some(i);
        }
    }
    changed
}

/// Move an existing tone to where the placement rules put it for the word as
/// it is now. Words that do not validate are left alone.
pub fn reposition_tone(comp: &mut Composition, style: ToneStyle) {
    let Some(current) = comp.tone_position() else {
        return;
    };
    let chars = comp.as_slice();
    let Some(syl) = syllable::parse(chars) else {
        return;
    };
    if !syllable::validate_parsed(chars, &syl) {
        return;
    }
    let Some(target) = tone_position(chars, &syl, style) else {
        return;
    };
    if target != current {
        let chars = comp.as_mut_slice();
        chars[target].tone = chars[current].tone;
        chars[current].tone = Tone::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(s: &str) -> Composition {
        let mut c = Composition::new();
        for ch in s.chars() {
            c.push(ComposedChar::plain(ch, false));
        }
        c
    }

    const CIRCUMFLEX_E: &[(char, Mark)] = &[('e', Mark::Circumflex)];
    const TELEX_W: &[(char, Mark)] = &[('u', Mark::Horn), ('o', Mark::Horn), ('a', Mark::Breve)];

    #[test]
    fn tone_on_single_vowel() {
        let mut c = comp("ban");
        assert_eq!(apply_tone(&mut c, Tone::Grave, &ToneRules::default()), Some(1));
        assert_eq!(c.to_string(), "bàn");
    }

    #[test]
    fn tone_style_on_open_diphthong() {
        let mut modern = comp("hoa");
        apply_tone(&mut modern, Tone::Grave, &ToneRules::default());
        assert_eq!(modern.to_string(), "hoà");

        let mut traditional = comp("hoa");
        let rules = ToneRules::new(ToneStyle::Traditional, false);
        apply_tone(&mut traditional, Tone::Grave, &rules);
        assert_eq!(traditional.to_string(), "hòa");

        let mut closed = comp("hoan");
        apply_tone(&mut closed, Tone::Grave, &rules);
        assert_eq!(closed.to_string(), "hoàn");
    }

    #[test]
    fn tone_prefers_marked_vowel() {
        let mut c = comp("nguoi");
        apply_mark(&mut c, TELEX_W, &ToneRules::default());
        assert_eq!(c.to_string(), "ngươi");
        apply_tone(&mut c, Tone::Grave, &ToneRules::default());
        assert_eq!(c.to_string(), "người");
    }

    #[test]
    fn tone_first_of_falling_diphthong() {
        let mut c = comp("mua");
        apply_tone(&mut c, Tone::Acute, &ToneRules::default());
        assert_eq!(c.to_string(), "múa");
    }

    #[test]
    fn tone_rejected_on_stop_final() {
        let mut c = comp("hoc");
        assert_eq!(apply_tone(&mut c, Tone::Grave, &ToneRules::default()), None);
        assert_eq!(c.to_string(), "hoc");

        let free = ToneRules::new(ToneStyle::Modern, true);
        assert!(apply_tone(&mut c, Tone::Grave, &free).is_some());
    }

    #[test]
    fn circumflex_and_switch() {
        let mut c = comp("vie");
        assert_eq!(apply_mark(&mut c, CIRCUMFLEX_E, &ToneRules::default()), MarkOutcome::Applied(2));
        assert_eq!(c.to_string(), "viê");
        assert_eq!(apply_mark(&mut c, CIRCUMFLEX_E, &ToneRules::default()), MarkOutcome::Absorbed);

        let mut c = comp("to");
        apply_mark(&mut c, &[('o', Mark::Circumflex)], &ToneRules::default());
        assert_eq!(apply_mark(&mut c, TELEX_W, &ToneRules::default()), MarkOutcome::Applied(1));
        assert_eq!(c.to_string(), "tơ");
    }

    #[test]
    fn horn_candidates_from_the_end() {
        let mut c = comp("mua");
        assert_eq!(apply_mark(&mut c, TELEX_W, &ToneRules::default()), MarkOutcome::Applied(1));
        assert_eq!(c.to_string(), "mưa");
    }

    #[test]
    fn horn_skips_qu() {
        let mut c = comp("quo");
        apply_mark(&mut c, TELEX_W, &ToneRules::default());
        assert_eq!(c.to_string(), "quơ");
    }

    #[test]
    fn mark_rejected_without_target() {
        let mut c = comp("bi");
        assert_eq!(apply_mark(&mut c, TELEX_W, &ToneRules::default()), MarkOutcome::Rejected);
        assert_eq!(c.to_string(), "bi");
    }

    #[test]
    fn stroke_adjacent_or_delayed() {
        let mut c = comp("dd");
        c.pop();
        assert_eq!(apply_stroke(&mut c, false, &ToneRules::default()), Some(0));
        assert_eq!(c.to_string(), "đ");

        let mut c = comp("duong");
        assert_eq!(apply_stroke(&mut c, false, &ToneRules::default()), None);
        assert_eq!(apply_stroke(&mut c, true, &ToneRules::default()), Some(0));
        assert_eq!(c.to_string(), "đuong");
    }

    #[test]
    fn remove_tone_then_marks() {
        let mut c = comp("viet");
        apply_mark(&mut c, CIRCUMFLEX_E, &ToneRules::default());
        apply_tone(&mut c, Tone::Dot, &ToneRules::default());
        assert_eq!(c.to_string(), "việt");

        assert_eq!(remove_diacritics(&mut c), Some(2));
        assert_eq!(c.to_string(), "viêt");
        assert_eq!(remove_diacritics(&mut c), Some(2));
        assert_eq!(c.to_string(), "viet");
        assert_eq!(remove_diacritics(&mut c), None);
    }

    #[test]
    fn reposition_after_append() {
        let rules = ToneRules::new(ToneStyle::Traditional, false);
        let mut c = comp("hoa");
        apply_tone(&mut c, Tone::Grave, &rules);
        assert_eq!(c.to_string(), "hòa");
        c.push(ComposedChar::plain('n', false));
        reposition_tone(&mut c, rules.style);
        assert_eq!(c.to_string(), "hoàn");
    }

    #[test]
    fn horn_bypasses_validation() {
        let rules = ToneRules::default();
        let mut c = comp("u");
        apply_mark(&mut c, TELEX_W, &rules);
        c.push(ComposedChar::plain('f', false));
        assert!(!syllable::validate(c.as_slice()));
        assert!(apply_tone(&mut c, Tone::Acute, &rules).is_some());
    }
}
