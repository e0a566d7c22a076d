//! Vietnamese input engine for libviet
//!
//! The engine takes one keystroke at a time and answers with an [`Action`]
//! telling the host how to bring its text field in line with the composed
//! word. Calls must be made in keystroke order, one at a time: every action
//! assumes the previous one has already been applied.

use crate::config::VietConfig;
use crate::conventions::{Convention, KeyRole};
use crate::foreign;
use crate::tone::{self, MarkOutcome, ToneRules};
use libviet_core::keys::{self, KeyClass};
use libviet_core::{
    Action, ComposeSession, ComposeState, ComposedChar, Composition, InputConvention, RawInput,
    Replacement, Shortcut, ShortcutTable, Tone, COMPOSITION_CAPACITY, REPLACEMENT_CAPACITY,
};
use tracing::{debug, trace};

/// The last modifier that changed the word, kept so that typing the same key
/// again (or backspace) can undo exactly that change.
#[derive(Debug, Clone, Copy)]
struct Transform {
    key: char,
    before: Composition,
}

/// What a letter or digit key did to the composed word.
enum KeyEffect {
    /// A modifier changed the character at this position.
    Modified(usize),
    /// A modifier typed a new character of its own (Telex `w` → `ư`).
    Inserted,
    /// A modifier key already fully applied; swallow it.
    Absorbed,
    /// Type the key as is.
    Literal,
}

/// Public engine for libviet
pub struct Engine {
    config: VietConfig,
    convention: Convention,
    session: ComposeSession,
    shortcuts: ShortcutTable,
    last_transform: Option<Transform>,
    /// `ww` was reverted in this word; further `w`s are literal.
    w_skipped: bool,
}

impl Engine {
    /// Construct an Engine from a configuration.
    pub fn new(config: VietConfig) -> Self {
        Self {
            convention: Convention::new(config.base.convention),
            config,
            session: ComposeSession::new(),
            shortcuts: ShortcutTable::new(),
            last_transform: None,
            w_skipped: false,
        }
    }

    pub fn config(&self) -> &VietConfig {
        &self.config
    }

    /// Replace the configuration. Switching convention abandons the word in
    /// progress.
    pub fn configure(&mut self, config: VietConfig) {
        if config.base.convention != self.config.base.convention {
            debug!(from = ?self.config.base.convention, to = ?config.base.convention, "convention changed");
            self.clear();
        }
        self.convention = Convention::new(config.base.convention);
        self.config = config;
    }

    /// Main input API: process one keystroke.
    pub fn process_key(&mut self, key: u16, shift: bool, ctrl: bool) -> Action {
        if ctrl {
            self.clear();
            return Action::none();
        }
        match keys::classify(key, shift) {
            KeyClass::Letter(c) | KeyClass::Digit(c) => self.compose_key(c, key, shift),
            KeyClass::Backspace => self.backspace(),
            KeyClass::Escape if self.config.base.esc_restore_enabled => self.restore_escape(),
            KeyClass::Escape | KeyClass::Reset => {
                self.clear();
                Action::none()
            }
            KeyClass::Boundary(ch) => self.word_boundary(ch),
        }
    }

    /// Replace the current word with its literal keystrokes. The keystrokes
    /// are kept, so editing continues from the literal text and a second call
    /// changes nothing.
    pub fn restore_escape(&mut self) -> Action {
        if !self.config.base.esc_restore_enabled || self.session.raw().is_empty() {
            return Action::none();
        }
        let before = self.render();
        self.session.restore_literal();
        self.last_transform = None;
        debug!(raw = %self.session.raw(), "escape restore");
        Action::diff(&before, &self.render())
    }

    /// Abandon the current word and forget committed words.
    pub fn clear(&mut self) {
        self.session.reset();
        self.last_transform = None;
        self.w_skipped = false;
    }

    // ========== Introspection ==========

    pub fn composition(&self) -> &Composition {
        self.session.composition()
    }

    pub fn raw_input(&self) -> &RawInput {
        self.session.raw()
    }

    pub fn state(&self) -> ComposeState {
        self.session.state()
    }

    /// The composed word as displayed.
    pub fn text(&self) -> String {
        self.session.composition().to_string()
    }

    /// Replacement text of `action` in the configured output encoding.
    pub fn encode(&self, action: &Action) -> Vec<u8> {
        action.encoded_text(self.config.base.output_encoding)
    }

    // ========== Shortcuts ==========

    /// Add or replace a shortcut. Returns false when the table is full.
    pub fn add_shortcut(&mut self, trigger: &str, replacement: &str) -> bool {
        self.shortcuts.add(trigger, replacement)
    }

    pub fn insert_shortcut(&mut self, shortcut: Shortcut) -> bool {
        self.shortcuts.insert(shortcut)
    }

    /// Remove a shortcut. Returns true if it existed.
    pub fn remove_shortcut(&mut self, trigger: &str) -> bool {
        self.shortcuts.remove(trigger).is_some()
    }

    pub fn lookup_shortcut(&self, trigger: &str) -> Option<&str> {
        self.shortcuts.lookup(trigger)
    }

    pub fn shortcuts_count(&self) -> usize {
        self.shortcuts.count()
    }

    pub fn shortcuts_capacity(&self) -> usize {
        self.shortcuts.capacity()
    }

    pub fn shortcuts_is_at_capacity(&self) -> bool {
        self.shortcuts.is_at_capacity()
    }

    pub fn shortcuts(&self) -> &ShortcutTable {
        &self.shortcuts
    }

    pub fn shortcuts_mut(&mut self) -> &mut ShortcutTable {
        &mut self.shortcuts
    }

    // ========== Keystroke handling ==========

    fn rules(&self) -> ToneRules {
        ToneRules::new(self.config.tone_style, self.config.free_tone_enabled)
    }

    fn render(&self) -> Replacement {
        let mut out = Replacement::new();
        self.session.composition().render_into(&mut out);
        out
    }

    fn compose_key(&mut self, c: char, key: u16, shift: bool) -> Action {
        let upper = keys::is_upper(key, shift);
        let plain = ComposedChar::plain(c, upper);
        let before = self.render();
        let before_comp = *self.session.composition();
        trace!(key = %c, word = %before, "compose");

        // Same modifier twice in a row: undo it and type the key
        if let Some(t) = self.last_transform.take() {
            if t.key == c {
                debug!(key = %c, "modifier reverted");
                if self.convention.standalone_vowel(c).is_some() {
                    self.w_skipped = true;
                }
                *self.session.composition_mut() = t.before;
                self.session.push_reverted(plain, key, shift);
                return self.finish(before, plain.to_char(), before_comp.len());
            }
        }

        let rules = self.rules();
        let effect = match self.convention.role(c) {
            KeyRole::Literal => KeyEffect::Literal,
            KeyRole::Tone(tone) => self.apply_tone(tone, &rules),
            KeyRole::Mark(targets) => {
                match tone::apply_mark(self.session.composition_mut(), targets, &rules) {
                    MarkOutcome::Applied(slot) => KeyEffect::Modified(slot),
                    MarkOutcome::Absorbed => KeyEffect::Absorbed,
                    MarkOutcome::Rejected => self.standalone_vowel(c, key, shift, &rules),
                }
            }
            KeyRole::Stroke => {
                let delayed = self.convention.delayed_stroke();
                tone::apply_stroke(self.session.composition_mut(), delayed, &rules)
                    .map_or(KeyEffect::Literal, KeyEffect::Modified)
            }
            KeyRole::Remove => tone::remove_diacritics(self.session.composition_mut())
                .map_or(KeyEffect::Literal, KeyEffect::Modified),
        };

        match effect {
            KeyEffect::Modified(slot) => {
                self.session.record_modifier(key, shift, slot);
                self.last_transform = Some(Transform {
                    key: c,
                    before: before_comp,
                });
                tone::reposition_tone(self.session.composition_mut(), self.config.tone_style);
                Action::diff(&before, &self.render())
            }
            KeyEffect::Inserted => {
                self.last_transform = Some(Transform {
                    key: c,
                    before: before_comp,
                });
                self.finish(before, plain.to_char(), before_comp.len())
            }
            KeyEffect::Absorbed => {
                let slot = self.session.composition().len().saturating_sub(1);
                self.session.record_modifier(key, shift, slot);
                Action::consume()
            }
            KeyEffect::Literal => {
                if self.convention.role(c) != KeyRole::Literal {
                    trace!(key = %c, "modifier typed literally");
                }
                self.session.push_char(plain, key, shift);
                self.finish(before, plain.to_char(), before_comp.len())
            }
        }
    }

    /// Tone key: a tone already on the word is dropped and the key typed,
    /// otherwise the tone is placed.
    fn apply_tone(&mut self, tone: Tone, rules: &ToneRules) -> KeyEffect {
        let comp = self.session.composition_mut();
        if let Some(pos) = comp.tone_position() {
            if comp.as_slice()[pos].tone == tone {
                comp.as_mut_slice()[pos].tone = Tone::None;
                return KeyEffect::Literal;
            }
        }
        tone::apply_tone(comp, tone, rules).map_or(KeyEffect::Literal, KeyEffect::Modified)
    }

    /// Telex `w` with nothing to put a horn on types `ư`.
    fn standalone_vowel(&mut self, c: char, key: u16, shift: bool, rules: &ToneRules) -> KeyEffect {
        let Some((base, mark)) = self.convention.standalone_vowel(c) else {
            return KeyEffect::Literal;
        };
        let comp = self.session.composition();
        if self.w_skipped || (self.config.skip_w_shortcut && comp.is_empty()) {
            return KeyEffect::Literal;
        }
        let vowel = ComposedChar {
            mark,
            ..ComposedChar::plain(base, keys::is_upper(key, shift))
        };
        let mut trial = *comp;
        trial.push(vowel);
        if !rules.accept(comp.as_slice(), trial.as_slice()) {
            return KeyEffect::Literal;
        }
        self.session.push_char(vowel, key, shift);
        KeyEffect::Inserted
    }

    /// Action for a keystroke that appended a character. A plain append of
    /// the key's own character is left to the host.
    fn finish(&mut self, mut before: Replacement, typed: char, before_len: usize) -> Action {
        tone::reposition_tone(self.session.composition_mut(), self.config.tone_style);
        if before_len == COMPOSITION_CAPACITY {
            // The oldest character fell out of the buffer but stays on screen
            before = Replacement::from_chars(&before.as_slice()[1..]);
        }
        let after = self.render();
        let n = before.len();
        if after.len() == n + 1
            && after.as_slice()[..n] == *before.as_slice()
            && after.as_slice()[n] == typed
        {
            return Action::none();
        }
        Action::diff(&before, &after)
    }

    fn backspace(&mut self) -> Action {
        if self.session.composition().is_empty() {
            self.session.clear();
            let step = self.session.step_back();
            debug!(?step, "backspace on empty word");
            return Action::none();
        }
        if let Some(t) = self.last_transform.take() {
            let before = self.render();
            *self.session.composition_mut() = t.before;
            self.session.drop_last_keystroke();
            debug!(key = %t.key, "backspace undid modifier");
            return Action::diff(&before, &self.render());
        }

        let comp = self.session.composition();
        let last_plain = comp.last().is_some_and(|c| !c.is_transformed());
        if last_plain && !comp.has_transforms() {
            self.session.pop_char();
            if self.session.composition().is_empty() {
                self.session.clear();
            }
            return Action::replace(1, Replacement::new());
        }

        let before = self.render();
        self.session.pop_char();
        if self.session.composition().is_empty() {
            self.session.clear();
        }
        tone::reposition_tone(self.session.composition_mut(), self.config.tone_style);
        let after = self.render();
        if last_plain && after.as_slice() == &before.as_slice()[..before.len() - 1] {
            return Action::replace(1, Replacement::new());
        }
        Action::replace(before.len(), after)
    }

    fn word_boundary(&mut self, ch: char) -> Action {
        if self.session.is_empty() {
            self.session.commit();
            return Action::none();
        }
        let len = self.session.composition().len();
        let mut out = Replacement::new();

        let action = if self.config.base.shortcuts_enabled && self.expand_shortcut(&mut out) {
            debug!(expansion = %out, "shortcut expanded");
            out.push(ch);
            self.session.discard_word();
            Action::replace(len, out)
        } else if self.config.base.foreign_word_restore_enabled
            && !self.session.composition().has_transforms()
            && foreign::is_foreign(self.session.raw())
        {
            self.session.raw().render_into(&mut out);
            debug!(raw = %out, "foreign word restored");
            out.push(ch);
            self.session.restore_literal();
            self.session.commit();
            Action::replace(len, out)
        } else {
            self.session.commit();
            Action::none()
        };

        self.last_transform = None;
        self.w_skipped = false;
        action
    }

    /// Expansion for the word as displayed, or failing that as typed.
    fn expand_shortcut(&self, out: &mut Replacement) -> bool {
        let convention: InputConvention = self.config.base.convention;
        let mut text = Replacement::new();
        let mut buf = [0u8; REPLACEMENT_CAPACITY * 4];

        self.session.composition().render_into(&mut text);
        if self.shortcuts.expand(text.encode_utf8(&mut buf), convention, out) {
            return true;
        }
        self.session.raw().render_into(&mut text);
        self.shortcuts.expand(text.encode_utf8(&mut buf), convention, out)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(VietConfig::default())
    }
}

/// Create an engine using the Telex convention with default settings.
pub fn telex_engine() -> Engine {
    Engine::new(VietConfig::default())
}

/// Create an engine using the VNI convention with default settings.
pub fn vni_engine() -> Engine {
    let mut config = VietConfig::default();
    config.base.set_convention(InputConvention::Vni);
    Engine::new(config)
}
