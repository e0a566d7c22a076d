//! Output encodings.
//!
//! The engine always composes Unicode. Hosts that still talk to legacy
//! Vietnamese fonts convert the replacement text with [`encode`]:
//!
//! - `Tcvn3`: one byte per character (TCVN 5712 / ABC fonts). Toned
//!   capitals have no code of their own; they share the lowercase byte and
//!   are drawn by the capital variant of the font.
//! - `VniWindows`: base letter followed by one diacritic byte (`Việt` is
//!   `Vieät`), with single bytes for ơ ư đ and the toned i forms.
//! - `Cp1258`: Windows-1258, precomposed where the code page has the
//!   character, otherwise base letter plus a combining tone byte.
//!
//! Characters an encoding cannot express become `?`.

use crate::composition::{ComposedChar, Mark, Tone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Byte encoding of the text handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputEncoding {
    #[default]
    Unicode,
    Tcvn3,
    VniWindows,
    Cp1258,
}

impl OutputEncoding {
    pub fn name(self) -> &'static str {
        match self {
            OutputEncoding::Unicode => "unicode",
            OutputEncoding::Tcvn3 => "tcvn3",
            OutputEncoding::VniWindows => "vni_windows",
            OutputEncoding::Cp1258 => "cp1258",
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "unicode" | "utf8" | "utf_8" => Ok(OutputEncoding::Unicode),
            "tcvn3" => Ok(OutputEncoding::Tcvn3),
            "vni" | "vni_windows" => Ok(OutputEncoding::VniWindows),
            "cp1258" | "windows_1258" => Ok(OutputEncoding::Cp1258),
            other => Err(format!("unknown encoding '{}'", other)),
        }
    }
}

/// Encode `text` for the host.
pub fn encode(text: &str, encoding: OutputEncoding) -> Vec<u8> {
    if encoding == OutputEncoding::Unicode {
        return text.as_bytes().to_vec();
    }
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        encode_char(ch, encoding, &mut out);
    }
    out
}

/// Append the encoded form of `ch` to `out`.
pub fn encode_char(ch: char, encoding: OutputEncoding, out: &mut Vec<u8>) {
    if encoding == OutputEncoding::Unicode {
        let mut buf = [0u8; 4];
        out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
        return;
    }
    if ch.is_ascii() {
        out.push(ch as u8);
        return;
    }
    let Some(c) = ComposedChar::from_char(ch) else {
        out.push(b'?');
        return;
    };
    match encoding {
        OutputEncoding::Tcvn3 => out.push(tcvn3(c)),
        OutputEncoding::VniWindows => vni_windows(c, out),
        OutputEncoding::Cp1258 => cp1258(c, out),
        OutputEncoding::Unicode => {}
    }
}

/// Lowercase TCVN3 bytes indexed by tone.
fn tcvn3_row(base: char, mark: Mark) -> Option<[u8; 6]> {
    let row = match (base, mark) {
        ('a', Mark::None) => [b'a', 0xB8, 0xB5, 0xB6, 0xB7, 0xB9],
        ('a', Mark::Breve) => [0xA8, 0xBE, 0xBB, 0xBC, 0xBD, 0xC6],
        ('a', Mark::Circumflex) => [0xA9, 0xCA, 0xC7, 0xC8, 0xC9, 0xCB],
        ('e', Mark::None) => [b'e', 0xD0, 0xCC, 0xCE, 0xCF, 0xD1],
        ('e', Mark::Circumflex) => [0xAA, 0xD5, 0xD2, 0xD3, 0xD4, 0xD6],
        ('i', Mark::None) => [b'i', 0xDD, 0xD7, 0xD8, 0xDC, 0xDE],
        ('o', Mark::None) => [b'o', 0xE3, 0xDF, 0xE1, 0xE2, 0xE4],
        ('o', Mark::Circumflex) => [0xAB, 0xE8, 0xE5, 0xE6, 0xE7, 0xE9],
        ('o', Mark::Horn) => [0xAC, 0xED, 0xEA, 0xEB, 0xEC, 0xEE],
        ('u', Mark::None) => [b'u', 0xF3, 0xEF, 0xF1, 0xF2, 0xF4],
        ('u', Mark::Horn) => [0xAD, 0xF8, 0xF5, 0xF6, 0xF7, 0xF9],
        ('y', Mark::None) => [b'y', 0xFD, 0xFA, 0xFB, 0xFC, 0xFE],
        _ => return None,
    };
    Some(row)
}

fn tcvn3(c: ComposedChar) -> u8 {
    if c.stroke {
        return if c.upper { 0xA7 } else { 0xAE };
    }
    if c.upper && c.tone == Tone::None {
        // Untoned marked capitals have their own codes
        match (c.base, c.mark) {
            ('a', Mark::Breve) => return 0xA1,
            ('a', Mark::Circumflex) => return 0xA2,
            ('e', Mark::Circumflex) => return 0xA3,
            ('o', Mark::Circumflex) => return 0xA4,
            ('o', Mark::Horn) => return 0xA5,
            ('u', Mark::Horn) => return 0xA6,
            _ => return c.base.to_ascii_uppercase() as u8,
        }
    }
    match tcvn3_row(c.base, c.mark) {
        Some(row) => row[c.tone.index()],
        None => b'?',
    }
}

/// VNI Windows diacritic byte for a mark and tone on a/e/o/u/y, lowercase.
fn vni_diacritic(mark: Mark, tone: Tone) -> Option<u8> {
    let row: [u8; 6] = match mark {
        Mark::None => [0, 0xF9, 0xF8, 0xFB, 0xF5, 0xEF],
        Mark::Circumflex => [0xE2, 0xE1, 0xE0, 0xE5, 0xE3, 0xE4],
        Mark::Breve => [0xEA, 0xE9, 0xE8, 0xFA, 0xFC, 0xEB],
        Mark::Horn => return None,
    };
    Some(row[tone.index()]).filter(|&b| b != 0)
}

fn vni_windows(c: ComposedChar, out: &mut Vec<u8>) {
    // Lowercase Latin-1 bytes; the capital form is 0x20 lower
    let case = |b: u8| if c.upper { b - 0x20 } else { b };
    if c.stroke {
        out.push(case(0xF1));
        return;
    }
    // Single-byte forms: toned i, ỵ
    let single = match (c.base, c.tone) {
        ('i', Tone::Acute) => Some(0xED),
        ('i', Tone::Grave) => Some(0xEC),
        ('i', Tone::Hook) => Some(0xE6),
        ('i', Tone::Tilde) => Some(0xF3),
        ('i', Tone::Dot) => Some(0xF2),
        ('y', Tone::Dot) => Some(0xEE),
        _ => None,
    };
    if let Some(b) = single {
        out.push(case(b));
        return;
    }
    let base = match (c.base, c.mark) {
        ('o', Mark::Horn) => case(0xF4),
        ('u', Mark::Horn) => case(0xF6),
        _ if c.upper => c.base.to_ascii_uppercase() as u8,
        _ => c.base as u8,
    };
    out.push(base);
    let mark = if c.mark == Mark::Horn { Mark::None } else { c.mark };
    if let Some(d) = vni_diacritic(mark, c.tone) {
        out.push(case(d));
    }
}

fn cp1258(c: ComposedChar, out: &mut Vec<u8>) {
    let case = |b: u8| if c.upper { b - 0x20 } else { b };
    if c.stroke {
        out.push(case(0xF0));
        return;
    }
    // Precomposed toned letters the code page carries
    let precomposed = match (c.base, c.mark, c.tone) {
        ('a', Mark::None, Tone::Grave) => Some(0xE0),
        ('a', Mark::None, Tone::Acute) => Some(0xE1),
        ('e', Mark::None, Tone::Grave) => Some(0xE8),
        ('e', Mark::None, Tone::Acute) => Some(0xE9),
        ('i', Mark::None, Tone::Acute) => Some(0xED),
        ('o', Mark::None, Tone::Acute) => Some(0xF3),
        ('u', Mark::None, Tone::Grave) => Some(0xF9),
        ('u', Mark::None, Tone::Acute) => Some(0xFA),
        _ => None,
    };
    if let Some(b) = precomposed {
        out.push(case(b));
        return;
    }
    let base = match (c.base, c.mark) {
        ('a', Mark::Circumflex) => case(0xE2),
        ('a', Mark::Breve) => case(0xE3),
        ('e', Mark::Circumflex) => case(0xEA),
        ('o', Mark::Circumflex) => case(0xF4),
        ('o', Mark::Horn) => case(0xF5),
        ('u', Mark::Horn) => case(0xFD),
        _ if c.upper => c.base.to_ascii_uppercase() as u8,
        _ => c.base as u8,
    };
    out.push(base);
    let combining = match c.tone {
        Tone::None => None,
        Tone::Grave => Some(0xCC),
        Tone::Hook => Some(0xD2),
        Tone::Tilde => Some(0xDE),
        Tone::Acute => Some(0xEC),
        Tone::Dot => Some(0xF2),
    };
    out.extend(combining);
}
