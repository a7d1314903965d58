use std::borrow::Cow;

use encoding_rs::SHIFT_JIS;

use crate::common::metadata::{Version, MODE_INDICATOR_BITS};

// Mode
//------------------------------------------------------------------------------

/// Data encoding mode, the discriminant is its 4 bit indicator.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
    Kanji = 0b1000,
}

static ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

impl Mode {
    /// Most compact single mode that can carry all of `data`.
    pub fn select(data: &[u8]) -> Mode {
        let fits = |mode: Mode| data.iter().all(|&b| mode.contains(b));
        match [Self::Numeric, Self::Alphanumeric].into_iter().find(|&m| fits(m)) {
            Some(mode) => mode,
            None if to_kanji(data).is_some() => Self::Kanji,
            None => Self::Byte,
        }
    }

    /// Whether a lone byte is encodable. Kanji works on Shift JIS pairs and
    /// accepts none.
    pub fn contains(self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => ALPHANUMERIC_CHARSET.contains(&byte),
            Self::Byte => true,
            Self::Kanji => false,
        }
    }

    /// Value of one chunk: up to 3 digits, up to 2 alphanumeric characters,
    /// a byte, or a Shift JIS pair.
    pub fn encode_chunk(self, chunk: &[u8]) -> u16 {
        match self {
            Self::Numeric => chunk.iter().fold(0, |acc, &b| acc * 10 + u16::from(b - b'0')),
            Self::Alphanumeric => chunk.iter().fold(0, |acc, &b| {
                let value = ALPHANUMERIC_CHARSET.iter().position(|&c| c == b).unwrap_or(0);
                acc * 45 + value as u16
            }),
            Self::Byte => u16::from(chunk[0]),
            Self::Kanji => {
                let sjis = u16::from_be_bytes([chunk[0], chunk[1]]);
                let offset = sjis - if sjis <= 0x9FFC { 0x8140 } else { 0xC140 };
                (offset >> 8) * 0xC0 + (offset & 0xFF)
            }
        }
    }

    /// Bits taken by `chars` characters, headers excluded.
    pub fn encoded_len(self, chars: usize) -> usize {
        match self {
            Self::Numeric => chars / 3 * 10 + [0, 4, 7][chars % 3],
            Self::Alphanumeric => chars / 2 * 11 + chars % 2 * 6,
            Self::Byte => chars * 8,
            Self::Kanji => chars * 13,
        }
    }

    // Bytes consumed per chunk
    fn chunk_size(self) -> usize {
        match self {
            Self::Numeric => 3,
            Self::Alphanumeric | Self::Kanji => 2,
            Self::Byte => 1,
        }
    }
}


// Kanji
//------------------------------------------------------------------------------

/// Shift JIS bytes of `data` if it is UTF-8 text made only of double-byte
/// characters in the Kanji mode ranges.
pub fn to_kanji(data: &[u8]) -> Option<Vec<u8>> {
    let text = std::str::from_utf8(data).ok().filter(|t| !t.is_empty())?;
    let (sjis, _, had_errors) = SHIFT_JIS.encode(text);
    if had_errors || sjis.len() % 2 != 0 {
        return None;
    }
    let in_range = sjis.chunks_exact(2).all(|pair| {
        matches!(u16::from_be_bytes([pair[0], pair[1]]), 0x8140..=0x9FFC | 0xE040..=0xEBBF)
    });
    in_range.then(|| sjis.into_owned())
}

// Segment
//------------------------------------------------------------------------------

/// Data in a single mode. Kanji data is held as Shift JIS pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment<'a> {
    pub mode: Mode,
    pub data: Cow<'a, [u8]>,
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, data: Cow<'a, [u8]>) -> Self {
        Self { mode, data }
    }

    pub fn char_count(&self) -> usize {
        match self.mode {
            Mode::Kanji => self.data.len() / 2,
            _ => self.data.len(),
        }
    }

    /// Header & data bits at version `ver`.
    pub fn bit_len(&self, ver: Version) -> usize {
        MODE_INDICATOR_BITS
            + ver.char_count_bits(self.mode)
            + self.mode.encoded_len(self.char_count())
    }

    /// Chunk values with their bit widths.
    pub fn chunks(&self) -> impl Iterator<Item = (u16, usize)> + '_ {
        let mode = self.mode;
        self.data.chunks(mode.chunk_size()).map(move |chunk| {
            let chars = if mode == Mode::Kanji { 1 } else { chunk.len() };
            (mode.encode_chunk(chunk), mode.encoded_len(chars))
        })
    }
}
