//! Composed characters and the fixed-capacity composed buffer.
//!
//! The composition is the word exactly as it should appear on screen right
//! now: each slot is a base letter plus an optional tone, an optional vowel
//! mark and a stroke flag. It never allocates; rendering writes into a
//! [`Replacement`] supplied by the caller.

use crate::action::Replacement;
use crate::keys;
use std::fmt;

/// Maximum number of characters in a composed word.
pub const COMPOSITION_CAPACITY: usize = 64;

/// Pitch tone carried by a vowel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    None,
    /// sắc
    Acute,
    /// huyền
    Grave,
    /// hỏi
    Hook,
    /// ngã
    Tilde,
    /// nặng
    Dot,
}

impl Tone {
    const ALL: [Tone; 6] = [
        Tone::None,
        Tone::Acute,
        Tone::Grave,
        Tone::Hook,
        Tone::Tilde,
        Tone::Dot,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Tone::None => 0,
            Tone::Acute => 1,
            Tone::Grave => 2,
            Tone::Hook => 3,
            Tone::Tilde => 4,
            Tone::Dot => 5,
        }
    }
}

/// Vowel-quality mark, orthogonal to tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mark {
    #[default]
    None,
    /// â ê ô
    Circumflex,
    /// ă
    Breve,
    /// ơ ư
    Horn,
}

/// One character of the composed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposedChar {
    /// Lowercase ASCII base letter or digit.
    pub base: char,
    pub tone: Tone,
    pub mark: Mark,
    /// Only meaningful on `d` (đ).
    pub stroke: bool,
    pub upper: bool,
}

impl ComposedChar {
    /// A plain, untransformed character.
    pub const fn plain(base: char, upper: bool) -> Self {
        Self {
            base,
            tone: Tone::None,
            mark: Mark::None,
            stroke: false,
            upper,
        }
    }

    pub fn is_vowel(&self) -> bool {
        keys::is_vowel(self.base)
    }

    /// True if a tone, mark or stroke is attached.
    pub fn is_transformed(&self) -> bool {
        self.tone != Tone::None || self.mark != Mark::None || self.stroke
    }

    /// Decompose a displayed character. Returns `None` for anything that is
    /// neither a Vietnamese letter nor an ASCII letter or digit.
    pub fn from_char(ch: char) -> Option<Self> {
        let lower = ch.to_lowercase().next()?;
        let upper = lower != ch;
        if lower == 'đ' {
            return Some(Self {
                stroke: true,
                ..Self::plain('d', upper)
            });
        }
        for (base, mark) in VOWEL_ROWS {
            let Some(row) = vowel_row(base, mark) else {
                continue;
            };
            if let Some(i) = row.iter().position(|&c| c == lower) {
                return Some(Self {
                    tone: Tone::ALL[i],
                    mark,
                    ..Self::plain(base, upper)
                });
            }
        }
        lower
            .is_ascii_alphanumeric()
            .then(|| Self::plain(lower, upper))
    }

    /// The character as displayed.
    pub fn to_char(&self) -> char {
        let lower = if self.stroke && self.base == 'd' {
            'đ'
        } else {
            match vowel_row(self.base, self.mark) {
                Some(row) => row[self.tone.index()],
                None => self.base,
            }
        };
        if self.upper {
            lower.to_uppercase().next().unwrap_or(lower)
        } else {
            lower
        }
    }
}

/// Every (vowel, mark) pair with precomposed forms.
const VOWEL_ROWS: [(char, Mark); 12] = [
    ('a', Mark::None),
    ('a', Mark::Breve),
    ('a', Mark::Circumflex),
    ('e', Mark::None),
    ('e', Mark::Circumflex),
    ('i', Mark::None),
    ('o', Mark::None),
    ('o', Mark::Circumflex),
    ('o', Mark::Horn),
    ('u', Mark::None),
    ('u', Mark::Horn),
    ('y', Mark::None),
];

/// Precomposed forms indexed by tone, for each (vowel, mark) pair.
fn vowel_row(base: char, mark: Mark) -> Option<&'static [char; 6]> {
    let row = match (base, mark) {
        ('a', Mark::None) => &['a', 'á', 'à', 'ả', 'ã', 'ạ'],
        ('a', Mark::Breve) => &['ă', 'ắ', 'ằ', 'ẳ', 'ẵ', 'ặ'],
        ('a', Mark::Circumflex) => &['â', 'ấ', 'ầ', 'ẩ', 'ẫ', 'ậ'],
        ('e', Mark::None) => &['e', 'é', 'è', 'ẻ', 'ẽ', 'ẹ'],
        ('e', Mark::Circumflex) => &['ê', 'ế', 'ề', 'ể', 'ễ', 'ệ'],
        ('i', Mark::None) => &['i', 'í', 'ì', 'ỉ', 'ĩ', 'ị'],
        ('o', Mark::None) => &['o', 'ó', 'ò', 'ỏ', 'õ', 'ọ'],
        ('o', Mark::Circumflex) => &['ô', 'ố', 'ồ', 'ổ', 'ỗ', 'ộ'],
        ('o', Mark::Horn) => &['ơ', 'ớ', 'ờ', 'ở', 'ỡ', 'ợ'],
        ('u', Mark::None) => &['u', 'ú', 'ù', 'ủ', 'ũ', 'ụ'],
        ('u', Mark::Horn) => &['ư', 'ứ', 'ừ', 'ử', 'ữ', 'ự'],
        ('y', Mark::None) => &['y', 'ý', 'ỳ', 'ỷ', 'ỹ', 'ỵ'],
        _ => return None,
    };
    Some(row)
}

/// Whether `base` can carry `mark` at all.
pub fn accepts_mark(base: char, mark: Mark) -> bool {
    mark == Mark::None || vowel_row(base, mark).is_some()
}

/// Fixed-capacity composed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Composition {
    chars: [ComposedChar; COMPOSITION_CAPACITY],
    len: usize,
}

impl Composition {
    /// Create a new empty composition.
    pub const fn new() -> Self {
        Self {
            chars: [ComposedChar::plain(' ', false); COMPOSITION_CAPACITY],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a character. At capacity the oldest character is dropped first;
    /// returns true when that happened.
    pub fn push(&mut self, c: ComposedChar) -> bool {
        let dropped = self.len == COMPOSITION_CAPACITY;
        if dropped {
            self.chars.copy_within(1.., 0);
            self.len -= 1;
        }
        self.chars[self.len] = c;
        self.len += 1;
        dropped
    }

    pub fn pop(&mut self) -> Option<ComposedChar> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.chars[self.len])
    }

    pub fn get(&self, index: usize) -> Option<&ComposedChar> {
        self.as_slice().get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ComposedChar> {
        self.as_mut_slice().get_mut(index)
    }

    pub fn last(&self) -> Option<&ComposedChar> {
        self.as_slice().last()
    }

    pub fn as_slice(&self) -> &[ComposedChar] {
        &self.chars[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [ComposedChar] {
        &mut self.chars[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComposedChar> {
        self.as_slice().iter()
    }

    /// True if any character carries a tone, mark or stroke.
    pub fn has_transforms(&self) -> bool {
        self.iter().any(ComposedChar::is_transformed)
    }

    /// Position of the character carrying a tone, if any.
    pub fn tone_position(&self) -> Option<usize> {
        self.iter().position(|c| c.tone != Tone::None)
    }

    /// Render the displayed text into `out` (replacing its contents).
    pub fn render_into(&self, out: &mut Replacement) {
        out.clear();
        for c in self.iter() {
            out.push(c.to_char());
        }
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for c in self.iter() {
            f.write_char(c.to_char())?;
        }
        Ok(())
    }
}
