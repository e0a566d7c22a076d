//! Word boundary and word history tests
//!
//! Tests what happens when a word ends:
//! - words with diacritics are always kept as composed
//! - bare words that look foreign are re-emitted as typed
//! - backspacing across the boundary restores the word and its exact
//!   keystrokes, never a reconstruction
//! - reset keys forget the history

mod common;

use common::{type_keys, typed, Field};
use libviet::{keys, telex_engine, ActionKind, ComposeState, Engine, VietConfig};

#[test]
fn test_transformed_word_is_kept() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "test ");
    assert_eq!(field.text, "tét ");
    assert!(field.last_action().is_noop());
    assert_eq!(engine.state(), ComposeState::Idle);
}

#[test]
fn test_foreign_word_restored() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "fix ");
    assert_eq!(field.text, "fix ");
    let action = field.last_action();
    assert_eq!(action.kind, ActionKind::Replace);
    assert_eq!(action.backspace_count, 3);
    assert_eq!(action.replacement.to_string(), "fix ");
}

#[test]
fn test_reverted_word_restored() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "bos");
    assert_eq!(field.text, "bó");
    type_keys(&mut engine, &mut field, "s");
    assert_eq!(field.text, "bos");
    type_keys(&mut engine, &mut field, " ");
    assert_eq!(field.text, "boss ");
}

#[test]
fn test_restore_disabled() {
    let mut config = VietConfig::default();
    config.base.set_foreign_word_restore(false);
    let mut engine = Engine::new(config);
    assert_eq!(typed(&mut engine, "boss "), "bos ");
}

#[test]
fn test_vietnamese_word_not_restored() {
    let mut engine = telex_engine();
    assert_eq!(typed(&mut engine, "ban an "), "ban an ");
}

#[test]
fn test_punctuation_ends_word() {
    let mut engine = telex_engine();
    assert_eq!(typed(&mut engine, "vieejt, nam."), "việt, nam.");
}

#[test]
fn test_backspace_restores_word() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "vieejt ");
    assert_eq!(engine.state(), ComposeState::Idle);

    type_keys(&mut engine, &mut field, "<bs>");
    assert_eq!(field.text, "việt");
    assert_eq!(engine.text(), "việt");
    assert_eq!(engine.raw_input().to_string(), "vieejt");

    type_keys(&mut engine, &mut field, "<bs>");
    assert_eq!(field.text, "việ");
    assert_eq!(
        engine.raw_input().to_string(),
        "vieej",
        "raw history comes from the snapshot, not from the composed text"
    );

    // Editing continues on the restored word
    type_keys(&mut engine, &mut field, "t");
    assert_eq!(field.text, "việt");
}

#[test]
fn test_backspace_over_several_boundaries() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "an  ");
    type_keys(&mut engine, &mut field, "<bs>");
    assert!(engine.composition().is_empty(), "one space still separates the word");
    type_keys(&mut engine, &mut field, "<bs>");
    assert_eq!(engine.text(), "an");
    assert_eq!(field.text, "an");
}

#[test]
fn test_restored_foreign_word_history() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "boss <bs>");
    assert_eq!(field.text, "boss");
    assert_eq!(engine.text(), "boss", "history holds what is on screen");
}

#[test]
fn test_reset_key_forgets_history() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "vieejt <left><bs>");
    assert!(engine.composition().is_empty());
    assert_eq!(engine.state(), ComposeState::Idle);
}

#[test]
fn test_ctrl_key_resets() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "vie");
    let action = engine.process_key(b'a' as u16, false, true);
    assert!(action.is_noop());
    assert!(engine.composition().is_empty());
    assert!(engine.process_key(keys::BACKSPACE, false, false).is_noop());
}

#[test]
fn test_history_is_bounded() {
    let mut engine = telex_engine();
    for _ in 0..20 {
        typed(&mut engine, "an ");
    }
    assert_eq!(engine.state(), ComposeState::Idle);
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "<bs>");
    assert_eq!(engine.text(), "an");
}
