//! libviet-core
//!
//! Language-level data model shared by the libviet input engine: the abstract
//! key id space, composed characters and the composed buffer, the raw
//! keystroke history, the committed-word history, the shortcut table, the
//! `Action` descriptor handed back to hosts, and base configuration.
//!
//! Everything touched per keystroke is a fixed-capacity value type; only the
//! word history and the shortcut table live on the heap, and both are sized
//! once at construction.
//!
//! Public API:
//! - `Composition` / `ComposedChar` - the word as displayed
//! - `RawInput` - literal keystrokes for the current word
//! - `WordHistory` - committed (composed, raw) snapshots
//! - `ShortcutTable` - bounded abbreviation expansion
//! - `Action` - backspace count + replacement text for the host
//! - `ComposeSession` - per-word state owned by an engine
//! - `OutputEncoding` - Unicode or a legacy byte encoding for hosts
//! - `Config` - convention and feature flags
use serde::{Deserialize, Serialize};

pub mod keys;

pub mod action;
pub use action::{Action, ActionKind, Replacement, REPLACEMENT_CAPACITY};

pub mod composition;
pub use composition::{ComposedChar, Composition, Mark, Tone, COMPOSITION_CAPACITY};

pub mod encoding;
pub use encoding::OutputEncoding;

pub mod raw_input;
pub use raw_input::{RawInput, RawKey, RAW_CAPACITY};

pub mod history;
pub use history::{WordHistory, WordSnapshot, WORD_HISTORY_CAPACITY};

pub mod shortcut;
pub use shortcut::{CaseMode, ConventionFilter, Shortcut, ShortcutTable, SHORTCUT_CAPACITY};

pub mod session;
pub use session::{BoundaryStep, ComposeSession, ComposeState};

/// Keystroke convention used to type diacritics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputConvention {
    /// Letter modifiers: `s f r x j` tones, `aa ee oo w` marks, `dd` stroke.
    #[default]
    Telex,
    /// Digit modifiers: `1-5` tones, `6 7 8` marks, `9` stroke.
    Vni,
}

/// Generic configuration for the engine.
///
/// Placement and validation options specific to the Vietnamese rules live in
/// `VietConfig` in the `libviet` crate, which flattens this struct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Active keystroke convention
    pub convention: InputConvention,

    /// ESC replaces the current word with its literal keystrokes
    pub esc_restore_enabled: bool,

    /// At a word boundary, a word with no diacritics left that looks foreign
    /// is re-emitted as typed
    pub foreign_word_restore_enabled: bool,

    /// Expand shortcuts at word boundaries
    pub shortcuts_enabled: bool,

    /// Byte encoding hosts should emit the replacement text in
    pub output_encoding: OutputEncoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            convention: InputConvention::Telex,
            // ESC restore is opt-in: many hosts use ESC to dismiss UI
            esc_restore_enabled: false,
            foreign_word_restore_enabled: true,
            shortcuts_enabled: true,
            output_encoding: OutputEncoding::Unicode,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    // ========== Convention ==========

    pub fn set_convention(&mut self, convention: InputConvention) {
        self.convention = convention;
    }

    pub fn get_convention(&self) -> InputConvention {
        self.convention
    }

    // ========== Restore Behaviour ==========

    /// Enable or disable ESC restore.
    pub fn set_esc_restore(&mut self, enabled: bool) {
        self.esc_restore_enabled = enabled;
    }

    pub fn is_esc_restore(&self) -> bool {
        self.esc_restore_enabled
    }

    /// Enable or disable foreign-word restore at word boundaries.
    pub fn set_foreign_word_restore(&mut self, enabled: bool) {
        self.foreign_word_restore_enabled = enabled;
    }

    pub fn is_foreign_word_restore(&self) -> bool {
        self.foreign_word_restore_enabled
    }

    // ========== Shortcuts ==========

    pub fn set_shortcuts_enabled(&mut self, enabled: bool) {
        self.shortcuts_enabled = enabled;
    }

    pub fn is_shortcuts_enabled(&self) -> bool {
        self.shortcuts_enabled
    }

    // ========== Output ==========

    pub fn set_output_encoding(&mut self, encoding: OutputEncoding) {
        self.output_encoding = encoding;
    }

    pub fn get_output_encoding(&self) -> OutputEncoding {
        self.output_encoding
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }
}
