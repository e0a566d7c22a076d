//! Shared helpers for the integration tests.
//!
//! `type_keys` replays a keystroke script against an engine and applies every
//! action to a simulated text field, the way a host would: a no-op lets the
//! key through (a printable key is typed, backspace deletes one character),
//! a replacement deletes `backspace_count` characters and types its text.

#![allow(dead_code)]

use libviet::{keys, Action, ActionKind, Engine};

/// Simulated text field plus every action produced so far.
#[derive(Debug, Default)]
pub struct Field {
    pub text: String,
    pub actions: Vec<Action>,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_action(&self) -> Action {
        self.actions.last().copied().unwrap_or_default()
    }
}

/// Script tokens: `<bs>`, `<esc>` and `<left>` name special keys, every
/// other character is typed as is.
fn tokens(script: &str) -> Vec<(u16, bool, Option<char>)> {
    let mut out = Vec::new();
    let mut rest = script;
    while let Some(c) = rest.chars().next() {
        if let Some(r) = rest.strip_prefix("<bs>") {
            out.push((keys::BACKSPACE, false, None));
            rest = r;
        } else if let Some(r) = rest.strip_prefix("<esc>") {
            out.push((keys::ESC, false, None));
            rest = r;
        } else if let Some(r) = rest.strip_prefix("<left>") {
            out.push((keys::LEFT, false, None));
            rest = r;
        } else {
            let (key, shift) = keys::from_char(c).expect("typeable character");
            out.push((key, shift, Some(c)));
            rest = &rest[c.len_utf8()..];
        }
    }
    out
}

/// Type `script` into `field` through `engine`.
pub fn type_keys(engine: &mut Engine, field: &mut Field, script: &str) {
    for (key, shift, typed) in tokens(script) {
        let action = engine.process_key(key, shift, false);
        match action.kind {
            ActionKind::NoOp => match typed {
                Some(c) => field.text.push(c),
                None if key == keys::BACKSPACE => {
                    field.text.pop();
                }
                None => {}
            },
            ActionKind::Replace => {
                for _ in 0..action.backspace_count {
                    field.text.pop();
                }
                field.text.extend(action.text());
            }
        }
        field.actions.push(action);
    }
}

/// Type `script` into a fresh field and return its text.
pub fn typed(engine: &mut Engine, script: &str) -> String {
    let mut field = Field::new();
    type_keys(engine, &mut field, script);
    field.text
}
