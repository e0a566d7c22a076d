/// Vietnamese-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `libviet_core::Config` (flattened via serde)
/// - Tone placement style for `oa`, `oe` and `uy`
/// - Free tone placement (skip syllable validation)
/// - Whether a Telex `w` at the start of a word types `ư`
///
/// # Example
///
/// ```rust
/// use libviet::{Engine, VietConfig};
///
/// let mut config = VietConfig::default();
/// config.base_mut().set_esc_restore(true);
/// let engine = Engine::new(config);
/// assert!(engine.config().base().is_esc_restore());
/// ```
use crate::tone::ToneStyle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct VietConfig {
    /// Base configuration fields (convention, restore flags, shortcuts)
    #[serde(flatten)]
    pub base: libviet_core::Config,

    /// Tone placement on open `oa`/`oe`/`uy`
    pub tone_style: ToneStyle,

    /// Accept tones and marks anywhere, without syllable validation
    pub free_tone_enabled: bool,

    /// A Telex `w` at the start of a word stays `w` instead of `ư`
    pub skip_w_shortcut: bool,
}

impl Default for VietConfig {
    fn default() -> Self {
        Self {
            base: libviet_core::Config::default(),
            tone_style: ToneStyle::Modern,
            free_tone_enabled: false,
            skip_w_shortcut: false,
        }
    }
}

impl VietConfig {
    /// Convert this config into the base config
    pub fn into_base(self) -> libviet_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &libviet_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut libviet_core::Config {
        &mut self.base
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
