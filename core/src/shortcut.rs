//! Shortcut table: abbreviation expansion.
//!
//! Maps a trigger (e.g. "vn") to a replacement (e.g. "Việt Nam"). The table
//! holds at most [`SHORTCUT_CAPACITY`] entries, pre-sized at construction.
//! Adding a new trigger at capacity fails and leaves the table untouched;
//! replacing an existing trigger always succeeds.
//!
//! Entries can be limited to one input convention and can follow the case
//! of the typed trigger (`VN` → `VIỆT NAM`, `Vn` → `Việt Nam`).

use crate::action::{Replacement, REPLACEMENT_CAPACITY};
use crate::utils::normalize;
use crate::InputConvention;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Maximum number of shortcuts.
pub const SHORTCUT_CAPACITY: usize = 200;

/// Longest replacement kept, leaving room for one boundary character.
pub const MAX_REPLACEMENT_CHARS: usize = REPLACEMENT_CAPACITY - 1;

/// Which convention a shortcut applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConventionFilter {
    #[default]
    All,
    Telex,
    Vni,
}

impl ConventionFilter {
    pub fn applies_to(self, convention: InputConvention) -> bool {
        match self {
            ConventionFilter::All => true,
            ConventionFilter::Telex => convention == InputConvention::Telex,
            ConventionFilter::Vni => convention == InputConvention::Vni,
        }
    }
}

/// How the replacement's case follows the typed trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    /// Trigger must match exactly; replacement is emitted as defined.
    #[default]
    Exact,
    /// Trigger matches case-insensitively; all-caps input gives an all-caps
    /// replacement, a capitalized input capitalizes the first letter.
    MatchCase,
}

/// One shortcut entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub trigger: String,
    pub replacement: String,
    #[serde(default)]
    pub convention: ConventionFilter,
    #[serde(default)]
    pub case_mode: CaseMode,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl Shortcut {
    /// Create a shortcut for every convention, matched exactly.
    ///
    /// Both strings are NFC-normalized; the replacement is truncated to
    /// [`MAX_REPLACEMENT_CHARS`] characters.
    pub fn new(trigger: &str, replacement: &str) -> Self {
        let replacement: String = normalize(replacement)
            .chars()
            .take(MAX_REPLACEMENT_CHARS)
            .collect();
        Self {
            trigger: normalize(trigger),
            replacement,
            convention: ConventionFilter::All,
            case_mode: CaseMode::Exact,
            enabled: true,
        }
    }

    /// Limit the shortcut to one convention.
    pub fn for_convention(mut self, convention: ConventionFilter) -> Self {
        self.convention = convention;
        self
    }

    /// Follow the case of the typed trigger.
    pub fn match_case(mut self) -> Self {
        self.case_mode = CaseMode::MatchCase;
        self.trigger = self.trigger.to_lowercase();
        self
    }

    /// Table key: match-case triggers are stored lowercase.
    fn key(&self) -> String {
        match self.case_mode {
            CaseMode::Exact => self.trigger.clone(),
            CaseMode::MatchCase => self.trigger.to_lowercase(),
        }
    }

    /// Write the replacement for `typed` into `out`, applying the case mode.
    fn expand_into(&self, typed: &str, out: &mut Replacement) {
        out.clear();
        let match_case = self.case_mode == CaseMode::MatchCase;
        let letters = typed.chars().filter(|c| c.is_alphabetic()).count();
        let all_upper = match_case
            && letters > 1
            && typed
                .chars()
                .filter(|c| c.is_alphabetic())
                .all(char::is_uppercase);
        let capitalize = match_case && typed.chars().next().is_some_and(char::is_uppercase);

        for (i, c) in self.replacement.chars().enumerate() {
            if all_upper || (capitalize && i == 0) {
                for u in c.to_uppercase() {
                    out.push(u);
                }
            } else {
                out.push(c);
            }
        }
    }
}

/// Bounded trigger → shortcut map.
#[derive(Debug, Clone)]
pub struct ShortcutTable {
    entries: AHashMap<String, Shortcut>,
}

impl ShortcutTable {
    /// Create an empty table pre-sized for [`SHORTCUT_CAPACITY`] entries.
    pub fn new() -> Self {
        Self {
            entries: AHashMap::with_capacity(SHORTCUT_CAPACITY),
        }
    }

    /// Add or replace a plain shortcut. Returns false when the table is full
    /// and `trigger` is not already present.
    pub fn add(&mut self, trigger: &str, replacement: &str) -> bool {
        self.insert(Shortcut::new(trigger, replacement))
    }

    /// Add or replace a fully specified shortcut.
    pub fn insert(&mut self, shortcut: Shortcut) -> bool {
        let key = shortcut.key();
        if key.is_empty() {
            return false;
        }
        if !self.entries.contains_key(&key) && self.is_at_capacity() {
            tracing::debug!(trigger = %key, "shortcut table full, rejecting");
            return false;
        }
        self.entries.insert(key, shortcut);
        true
    }

    pub fn remove(&mut self, trigger: &str) -> Option<Shortcut> {
        let key = normalize(trigger);
        match self.entries.remove(&key) {
            Some(s) => Some(s),
            None => self.entries.remove(&key.to_lowercase()),
        }
    }

    /// Replacement registered for `trigger`, normalized the way `add` stores
    /// it.
    pub fn lookup(&self, trigger: &str) -> Option<&str> {
        let key = normalize(trigger);
        self.entries
            .get(&key)
            .or_else(|| self.entries.get(&key.to_lowercase()))
            .map(|s| s.replacement.as_str())
    }

    /// Enabled shortcut matching `typed` under `convention`: exact triggers
    /// first, then case-insensitive ones.
    pub fn find(&self, typed: &str, convention: InputConvention) -> Option<&Shortcut> {
        let usable = |s: &&Shortcut| s.enabled && s.convention.applies_to(convention);
        if let Some(s) = self.entries.get(typed).filter(usable) {
            return Some(s);
        }
        if !typed.chars().any(char::is_uppercase) {
            return None;
        }
        self.entries
            .get(&typed.to_lowercase())
            .filter(usable)
            .filter(|s| s.case_mode == CaseMode::MatchCase)
    }

    /// Expand `typed` into `out`. Returns false when nothing matched.
    pub fn expand(&self, typed: &str, convention: InputConvention, out: &mut Replacement) -> bool {
        match self.find(typed, convention) {
            Some(s) => {
                s.expand_into(typed, out);
                true
            }
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        SHORTCUT_CAPACITY
    }

    pub fn is_at_capacity(&self) -> bool {
        self.entries.len() >= SHORTCUT_CAPACITY
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shortcut> {
        self.entries.values()
    }

    // ========== Import / Export ==========

    /// Export every entry as a JSON array, sorted by trigger.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut all: Vec<&Shortcut> = self.entries.values().collect();
        all.sort_by(|a, b| a.trigger.cmp(&b.trigger));
        serde_json::to_string_pretty(&all)
    }

    /// Import a JSON array of shortcuts. Entries are normalized like
    /// [`Shortcut::new`]; import stops at capacity. Returns how many entries
    /// were added or replaced.
    pub fn from_json(&mut self, json: &str) -> Result<usize, serde_json::Error> {
        let parsed: Vec<Shortcut> = serde_json::from_str(json)?;
        let mut added = 0;
        for s in parsed {
            let mut entry = Shortcut::new(&s.trigger, &s.replacement).for_convention(s.convention);
            if s.case_mode == CaseMode::MatchCase {
                entry = entry.match_case();
            }
            entry.enabled = s.enabled;
            if !self.insert(entry) {
                break;
            }
            added += 1;
        }
        Ok(added)
    }
}

impl Default for ShortcutTable {
    fn default() -> Self {
        Self::new()
    }
}
