//! Telex convention tests
//!
//! Tests typing through the public `Engine` with Telex keystrokes:
//! - tones (`s f r x j`), marks (`aa ee oo w`), stroke (`dd`), removal (`z`)
//! - horn compounds and tone placement on multi-vowel nuclei
//! - reverting a modifier by typing it again
//! - modifiers rejected by the syllable validator

mod common;

use common::{type_keys, typed, Field};
use libviet::{telex_engine, ActionKind, Engine, ToneStyle, VietConfig};

fn telex(script: &str) -> String {
    typed(&mut telex_engine(), script)
}

#[test]
fn test_single_modifiers() {
    assert_eq!(telex("as"), "á");
    assert_eq!(telex("af"), "à");
    assert_eq!(telex("ar"), "ả");
    assert_eq!(telex("ax"), "ã");
    assert_eq!(telex("aj"), "ạ");
    assert_eq!(telex("aa"), "â");
    assert_eq!(telex("aw"), "ă");
    assert_eq!(telex("ee"), "ê");
    assert_eq!(telex("oo"), "ô");
    assert_eq!(telex("ow"), "ơ");
    assert_eq!(telex("uw"), "ư");
    assert_eq!(telex("dd"), "đ");
}

#[test]
fn test_words() {
    assert_eq!(telex("vieejt"), "việt");
    assert_eq!(telex("duocw"), "dươc");
    assert_eq!(telex("dduwowcj"), "được");
    assert_eq!(telex("nguoiw"), "ngươi");
    assert_eq!(telex("nguowif"), "người");
    assert_eq!(telex("tuoiws"), "tưới");
    assert_eq!(telex("tieengs"), "tiếng");
    assert_eq!(telex("khuyeen"), "khuyên");
    assert_eq!(telex("quas"), "quá");
    assert_eq!(telex("gif"), "gì");
    assert_eq!(telex("giaf"), "già");
    assert_eq!(telex("muaw"), "mưa");
}

#[test]
fn test_qu_with_y_and_final() {
    assert_eq!(telex("quynhf"), "quỳnh");
    assert_eq!(telex("quyts"), "quýt");
    assert_eq!(telex("quychs"), "quých");
    assert_eq!(telex("quyeets"), "quyết");
    assert_eq!(telex("huynhf"), "huỳnh");
}

#[test]
fn test_tone_before_final() {
    // Tone typed before the final consonant still lands correctly
    assert_eq!(telex("hoafn"), "hoàn");
    assert_eq!(telex("tiesng"), "tiéng");
    assert_eq!(telex("vieetj"), "việt");
}

#[test]
fn test_uppercase() {
    assert_eq!(telex("Vieejt"), "Việt");
    assert_eq!(telex("VIEEJT"), "VIỆT");
    assert_eq!(telex("DDa"), "Đa");
    assert_eq!(telex("W"), "Ư");
}

#[test]
fn test_revert_by_repetition() {
    assert_eq!(telex("aaa"), "aa");
    assert_eq!(telex("ass"), "as");
    assert_eq!(telex("ddd"), "dd");
    assert_eq!(telex("aww"), "aw");
    assert_eq!(telex("ww"), "w");
    assert_eq!(telex("www"), "ww", "w stays literal after a ww revert");
    assert_eq!(telex("aaaa"), "aaa", "a fresh a after the revert is rejected");
}

#[test]
fn test_revert_raw_history() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "ass");
    assert_eq!(field.text, "as");
    assert_eq!(engine.raw_input().to_string(), "ass");
}

#[test]
fn test_switch_tone_and_mark() {
    assert_eq!(telex("asf"), "à");
    assert_eq!(telex("oow"), "ơ");
    assert_eq!(telex("aaw"), "ă");
}

#[test]
fn test_remove_diacritics() {
    assert_eq!(telex("asz"), "a");
    assert_eq!(telex("vieejtz"), "viêt");
    assert_eq!(telex("z"), "z");
}

#[test]
fn test_standalone_w() {
    assert_eq!(telex("w"), "ư");
    assert_eq!(telex("tw"), "tư");
    assert_eq!(telex("nhw"), "như");
    assert_eq!(telex("nhwngx"), "những");
    // bt is not an initial, so w stays a letter
    assert_eq!(telex("btw"), "btw");
}

#[test]
fn test_skip_w_shortcut() {
    let mut config = VietConfig::default();
    config.skip_w_shortcut = true;
    let mut engine = Engine::new(config);
    assert_eq!(typed(&mut engine, "w"), "w");

    let mut config = VietConfig::default();
    config.skip_w_shortcut = true;
    let mut engine = Engine::new(config);
    assert_eq!(typed(&mut engine, "tw"), "tư", "only the first letter is affected");
}

#[test]
fn test_rejected_modifiers_are_literal() {
    // Stop finals only take the acute or dot tone
    assert_eq!(telex("hocf"), "hocf");
    // f is not an initial
    assert_eq!(telex("fix"), "fix");
    // No vowel to carry the tone
    assert_eq!(telex("ths"), "ths");
    // dd is only a stroke right after the d
    assert_eq!(telex("add"), "add");
}

#[test]
fn test_traditional_tone_style() {
    let mut config = VietConfig::default();
    config.tone_style = ToneStyle::Traditional;
    let mut engine = Engine::new(config);
    assert_eq!(typed(&mut engine, "hoaf"), "hòa");

    let mut engine = telex_engine();
    assert_eq!(typed(&mut engine, "hoaf"), "hoà");
}

#[test]
fn test_free_tone() {
    let mut config = VietConfig::default();
    config.free_tone_enabled = true;
    let mut engine = Engine::new(config);
    assert_eq!(typed(&mut engine, "hocf"), "hòc");
}

#[test]
fn test_minimal_edits() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "vie");
    assert!(field.actions.iter().all(|a| a.is_noop()), "plain letters pass through");

    type_keys(&mut engine, &mut field, "e");
    let action = field.last_action();
    assert_eq!(action.kind, ActionKind::Replace);
    assert_eq!(action.backspace_count, 1);
    assert_eq!(action.replacement.to_string(), "ê");

    type_keys(&mut engine, &mut field, "t");
    assert!(field.last_action().is_noop());
    assert_eq!(field.text, "viêt");
}
