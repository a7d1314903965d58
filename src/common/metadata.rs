use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use super::codec::types::Mode;
use super::error::{QRError, QRResult};
use super::mask::MaskPattern;

// Symbol summary
//------------------------------------------------------------------------------

/// Version, level & mask of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub version: Version,
    pub ec_level: ECLevel,
    pub mask: Option<MaskPattern>,
}

impl Metadata {
    pub fn new(version: Version, ec_level: ECLevel, mask: Option<MaskPattern>) -> Self {
        Self { version, ec_level, mask }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ Version: {}, Ec level: {:?}, Mask: ", self.version.0, self.ec_level)?;
        match self.mask {
            Some(m) => write!(f, "{} }}", *m),
            None => f.write_str("None }"),
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

/// Share of codewords that can be restored.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash, Default)]
pub enum ECLevel {
    /// ~7%
    L,
    /// ~15%
    #[default]
    M,
    /// ~25%
    Q,
    /// ~30%
    H,
}

impl ECLevel {
    // Indicator bits of the format information, L & M are swapped
    fn indicator(self) -> u32 {
        [0b01, 0b00, 0b11, 0b10][self as usize]
    }
}

impl FromStr for ECLevel {
    type Err = QRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s.trim().to_ascii_uppercase().as_str() {
            "L" => Self::L,
            "M" => Self::M,
            "Q" => Self::Q,
            "H" => Self::H,
            _ => return Err(QRError::InvalidECLevel),
        };
        Ok(level)
    }
}

// Version
//------------------------------------------------------------------------------

pub const MODE_INDICATOR_BITS: usize = 4;

pub const FORMAT_INFO_BITS: usize = 15;

pub const VERSION_INFO_BITS: usize = 18;

/// Symbol size, 1 to 40. Width grows by 4 modules per version.
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &usize {
        &self.0
    }
}

/// How the data codewords of a symbol are split into error correction
/// blocks. Short blocks come first, long blocks hold one extra codeword.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BlockLayout {
    pub short_len: usize,
    pub short_count: usize,
    pub long_count: usize,
}

impl BlockLayout {
    /// Data codeword count of every block in order.
    pub fn block_lens(self) -> impl Iterator<Item = usize> {
        let short = std::iter::repeat(self.short_len).take(self.short_count);
        short.chain(std::iter::repeat(self.short_len + 1).take(self.long_count))
    }
}

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        if (1..=40).contains(&version) {
            Ok(Self(version))
        } else {
            Err(QRError::InvalidVersion)
        }
    }

    pub(crate) fn all() -> impl Iterator<Item = Version> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }

    pub const fn width(self) -> usize {
        17 + 4 * self.0
    }

    /// Row & column coordinates shared by the alignment pattern centers.
    pub fn alignment_centers(self) -> Vec<usize> {
        let v = self.0;
        if v < 2 {
            return Vec::new();
        }
        let count = v / 7 + 2;
        let last = self.width() - 7;
        // Every gap but the first is the same even step
        let step = match v {
            32 => 26,
            _ => (4 * v + 2 * count + 1) / (2 * count - 2) * 2,
        };
        std::iter::once(6).chain((0..count - 1).rev().map(|i| last - i * step)).collect()
    }

    /// Modules left for codeword bits once every function pattern and info
    /// area is in place.
    pub fn raw_data_modules(self) -> usize {
        let v = self.0;
        let alignment = match v {
            1 => 0,
            _ => {
                let n = v / 7 + 2;
                (25 * n - 10) * n - 55
            }
        };
        let version_info = if v >= 7 { 2 * VERSION_INFO_BITS } else { 0 };
        (16 * v + 128) * v + 64 - alignment - version_info
    }

    pub fn total_codewords(self) -> usize {
        self.raw_data_modules() / 8
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        usize::from(ECC_PER_BLOCK[ecl as usize][self.0])
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        usize::from(BLOCK_COUNT[ecl as usize][self.0])
    }

    pub fn block_layout(self, ecl: ECLevel) -> BlockLayout {
        let blocks = self.block_count(ecl);
        let per_block = self.total_codewords() / blocks;
        let long_count = self.total_codewords() % blocks;
        BlockLayout {
            short_len: per_block - self.ecc_per_block(ecl),
            short_count: blocks - long_count,
            long_count,
        }
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.block_count(ecl) * self.ecc_per_block(ecl)
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        8 * self.data_codewords(ecl)
    }

    /// Width of the character count field, which grows at versions 10 & 27.
    pub fn char_count_bits(self, mode: Mode) -> usize {
        let widths = match mode {
            Mode::Numeric => [10, 12, 14],
            Mode::Alphanumeric => [9, 11, 13],
            Mode::Byte => [8, 16, 16],
            Mode::Kanji => [8, 10, 12],
        };
        match self.0 {
            1..=9 => widths[0],
            10..=26 => widths[1],
            _ => widths[2],
        }
    }

    /// Most characters a single `mode` segment can carry.
    pub fn char_capacity(self, mode: Mode, ecl: ECLevel) -> usize {
        let header = MODE_INDICATOR_BITS + self.char_count_bits(mode);
        let bits = self.data_bit_capacity(ecl).saturating_sub(header);
        // Encoded length grows with the count, bisect for the last fit
        let (mut lo, mut hi) = (0, bits);
        while lo < hi {
            let mid = (lo + hi + 1) / 2;
            if mode.encoded_len(mid) <= bits {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        lo
    }

    /// 6 bit version number followed by its BCH(18,6) parity.
    pub fn info(self) -> u32 {
        bch_code(self.0 as u32, VERSION_INFO_GENERATOR)
    }
}

#[cfg(test)]
mod version_tests {
    use test_case::test_case;

    use super::{BlockLayout, ECLevel, Version};
    use crate::common::codec::types::Mode;

    #[test_case(0, false)]
    #[test_case(1, true)]
    #[test_case(40, true)]
    #[test_case(41, false)]
    fn test_new(v: usize, ok: bool) {
        assert_eq!(Version::new(v).is_ok(), ok);
    }

    #[test]
    fn test_all_is_ascending() {
        let widths = Version::all().map(Version::width).collect::<Vec<_>>();
        assert_eq!(widths.len(), 40);
        assert_eq!((widths[0], widths[39]), (21, 177));
        assert!(widths.windows(2).all(|w| w[1] == w[0] + 4));
    }

    #[test_case(1, &[])]
    #[test_case(2, &[6, 18])]
    #[test_case(7, &[6, 22, 38])]
    #[test_case(15, &[6, 26, 48, 70])]
    #[test_case(32, &[6, 34, 60, 86, 112, 138])]
    #[test_case(40, &[6, 30, 58, 86, 114, 142, 170])]
    fn test_alignment_centers(v: usize, exp: &[usize]) {
        assert_eq!(Version(v).alignment_centers(), exp);
    }

    #[test_case(1, 26, 0)]
    #[test_case(2, 44, 7)]
    #[test_case(7, 196, 0)]
    #[test_case(21, 1156, 4)]
    #[test_case(40, 3706, 0)]
    fn test_codewords(v: usize, total: usize, leftover_bits: usize) {
        let ver = Version(v);
        assert_eq!(ver.total_codewords(), total);
        assert_eq!(ver.raw_data_modules() - 8 * total, leftover_bits);
    }

    #[test]
    fn test_block_layout() {
        let layout = Version(5).block_layout(ECLevel::Q);
        assert_eq!(layout, BlockLayout { short_len: 15, short_count: 2, long_count: 2 });
        assert_eq!(layout.block_lens().collect::<Vec<_>>(), [15, 15, 16, 16]);

        let layout = Version(40).block_layout(ECLevel::H);
        assert_eq!((layout.short_len, layout.short_count, layout.long_count), (15, 20, 61));
        assert_eq!(Version(1).block_layout(ECLevel::M).long_count, 0);
    }

    #[test]
    fn test_block_lens_cover_data_codewords() {
        for ver in Version::all() {
            for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
                let layout = ver.block_layout(ecl);
                assert_eq!(layout.block_lens().count(), ver.block_count(ecl));
                assert_eq!(layout.block_lens().sum::<usize>(), ver.data_codewords(ecl));
            }
        }
    }

    #[test_case(1, Mode::Numeric, ECLevel::H, 17)]
    #[test_case(1, Mode::Alphanumeric, ECLevel::M, 20)]
    #[test_case(1, Mode::Byte, ECLevel::L, 17)]
    #[test_case(1, Mode::Byte, ECLevel::M, 14)]
    #[test_case(1, Mode::Kanji, ECLevel::L, 10)]
    #[test_case(10, Mode::Alphanumeric, ECLevel::Q, 221)]
    #[test_case(40, Mode::Numeric, ECLevel::H, 3057)]
    #[test_case(40, Mode::Alphanumeric, ECLevel::H, 1852)]
    #[test_case(40, Mode::Byte, ECLevel::L, 2953)]
    #[test_case(40, Mode::Byte, ECLevel::M, 2331)]
    #[test_case(40, Mode::Byte, ECLevel::Q, 1663)]
    #[test_case(40, Mode::Byte, ECLevel::H, 1273)]
    #[test_case(40, Mode::Kanji, ECLevel::L, 1817)]
    fn test_char_capacity(v: usize, mode: Mode, ecl: ECLevel, exp: usize) {
        assert_eq!(Version(v).char_capacity(mode, ecl), exp);
    }

    #[test_case(9, Mode::Byte, 8)]
    #[test_case(10, Mode::Byte, 16)]
    #[test_case(26, Mode::Numeric, 12)]
    #[test_case(27, Mode::Numeric, 14)]
    #[test_case(27, Mode::Kanji, 12)]
    fn test_char_count_bits(v: usize, mode: Mode, exp: usize) {
        assert_eq!(Version(v).char_count_bits(mode), exp);
    }

    #[test_case(7, 0x07C94)]
    #[test_case(8, 0x085BC)]
    #[test_case(21, 0x15683)]
    #[test_case(40, 0x28C69)]
    fn test_version_info(v: usize, exp: u32) {
        assert_eq!(Version(v).info(), exp);
    }

    #[test_case("L", Some(ECLevel::L))]
    #[test_case(" q ", Some(ECLevel::Q))]
    #[test_case("h", Some(ECLevel::H))]
    #[test_case("X", None)]
    #[test_case("", None)]
    fn test_ec_level_from_str(s: &str, exp: Option<ECLevel>) {
        assert_eq!(s.parse::<ECLevel>().ok(), exp);
    }

    #[test]
    fn test_ec_level_default() {
        assert_eq!(ECLevel::default(), ECLevel::M);
    }
}

// Format information
//------------------------------------------------------------------------------

/// Level indicator & mask followed by BCH(15,5) parity, XORed with the fixed
/// format mask so the result is never all light.
pub fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    bch_code(ecl.indicator() << 3 | u32::from(*mask), FORMAT_INFO_GENERATOR) ^ FORMAT_MASK
}

// Appends the remainder of `data` divided by `generator` in GF(2)
fn bch_code(data: u32, generator: u32) -> u32 {
    let degree = 31 - generator.leading_zeros();
    let mut rem = data << degree;
    while rem != 0 && 31 - rem.leading_zeros() >= degree {
        rem ^= generator << (31 - rem.leading_zeros() - degree);
    }
    data << degree | rem
}


// Global constants
//------------------------------------------------------------------------------

const FORMAT_INFO_GENERATOR: u32 = 0x537;

const VERSION_INFO_GENERATOR: u32 = 0x1F25;

const FORMAT_MASK: u32 = 0x5412;

// Indexed by [ECLevel][version], index 0 is unused.
static ECC_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

static BLOCK_COUNT: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];
