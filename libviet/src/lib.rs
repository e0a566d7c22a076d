//! # libviet
//!
//! Vietnamese input method engine built on libviet-core.
//!
//! Keystrokes typed in the Telex or VNI convention go in one at a time; each
//! call returns an [`Action`] (pass the key through, or delete N characters
//! and type a replacement) that keeps the host's text field in step with the
//! composed word.
//!
//! ```rust
//! use libviet::{keys, telex_engine};
//!
//! let mut engine = telex_engine();
//! for ch in "vieejt".chars() {
//!     let (key, shift) = keys::from_char(ch).unwrap();
//!     engine.process_key(key, shift, false);
//! }
//! assert_eq!(engine.text(), "việt");
//! ```

pub mod config;
pub mod conventions;
pub mod engine;
pub mod foreign;
pub mod syllable;
pub mod tone;

// Re-export the data model from core
pub use libviet_core::*;

pub use config::VietConfig;
pub use conventions::{Convention, KeyRole};
pub use engine::{telex_engine, vni_engine, Engine};
pub use tone::{MarkOutcome, ToneRules, ToneStyle};
