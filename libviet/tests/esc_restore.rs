//! ESC restore tests
//!
//! Tests replacing the current word with its literal keystrokes:
//! - every transform of the word is undone at once
//! - the keystrokes are kept, so a second restore changes nothing
//! - with the option off, ESC abandons the word and passes through

mod common;

use common::{type_keys, Field};
use libviet::{keys, telex_engine, vni_engine, ActionKind, ComposeState, Engine, VietConfig};

fn esc_engine() -> Engine {
    let mut config = VietConfig::default();
    config.base.set_esc_restore(true);
    Engine::new(config)
}

#[test]
fn test_escape_restores_keystrokes() {
    let mut engine = esc_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "vieejt");
    assert_eq!(field.text, "việt");

    type_keys(&mut engine, &mut field, "<esc>");
    assert_eq!(field.text, "vieejt");
    assert_eq!(engine.text(), "vieejt");
    assert_eq!(engine.raw_input().to_string(), "vieejt", "raw history is kept");
    assert_eq!(engine.state(), ComposeState::Composing);
}

#[test]
fn test_escape_keeps_case() {
    let mut engine = esc_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "Vieejt<esc>");
    assert_eq!(field.text, "Vieejt");
}

#[test]
fn test_escape_is_idempotent() {
    let mut engine = esc_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "dduwowcj");
    assert_eq!(field.text, "được");

    let first = engine.restore_escape();
    assert_eq!(first.kind, ActionKind::Replace);
    assert_eq!(first.backspace_count, 5);
    assert_eq!(first.replacement.to_string(), "dduwowcj");

    let second = engine.restore_escape();
    assert!(second.is_noop(), "nothing left to restore");
    assert_eq!(engine.text(), "dduwowcj");
}

#[test]
fn test_escape_after_revert() {
    let mut engine = esc_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "aaa<esc>");
    assert_eq!(field.text, "aaa");
}

#[test]
fn test_escape_vni() {
    let mut engine = vni_engine();
    let mut config = engine.config().clone();
    config.base.set_esc_restore(true);
    engine.configure(config);

    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "Vie65t<esc>");
    assert_eq!(field.text, "Vie65t");
}

#[test]
fn test_escape_then_backspace() {
    let mut engine = esc_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "as<esc><bs>");
    assert_eq!(field.text, "a");
    assert_eq!(engine.raw_input().to_string(), "a");
}

#[test]
fn test_escape_on_empty_word() {
    let mut engine = esc_engine();
    assert!(engine.restore_escape().is_noop());
    assert!(engine.process_key(keys::ESC, false, false).is_noop());
}

#[test]
fn test_escape_disabled() {
    let mut engine = telex_engine();
    let mut field = Field::new();
    type_keys(&mut engine, &mut field, "vieejt");
    assert!(engine.restore_escape().is_noop());

    type_keys(&mut engine, &mut field, "<esc>");
    assert_eq!(field.text, "việt", "the word is left as is");
    assert_eq!(engine.state(), ComposeState::Idle);
}
