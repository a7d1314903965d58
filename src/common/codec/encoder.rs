use std::borrow::Cow;

use tracing::debug;

use super::types::{to_kanji, Mode, Segment};
use crate::common::bit_utils::BitStream;
use crate::common::error::{QRError, QRResult};
use crate::common::metadata::{ECLevel, Version, MODE_INDICATOR_BITS};

/// Alternating pad codewords filling the capacity after the data.
const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Data codewords of a symbol, with the version & mode they were built for.
#[derive(Debug, Clone)]
pub struct DataCodewords {
    pub bits: BitStream,
    pub version: Version,
    pub mode: Mode,
}

/// Encodes `data` into the data codewords of a symbol at level `ecl`. The
/// smallest fitting version is used unless `version` pins one, the most
/// compact mode unless `mode` forces one.
pub fn encode_data(
    data: &[u8],
    ecl: ECLevel,
    version: Option<Version>,
    mode: Option<Mode>,
) -> QRResult<DataCodewords> {
    let seg = build_segment(data, mode)?;
    let fits = |ver: Version| seg.bit_len(ver) <= ver.data_bit_capacity(ecl);
    let version = match version {
        Some(ver) if fits(ver) => ver,
        Some(ver) => {
            let (needed, capacity) = (seg.bit_len(ver), ver.data_bit_capacity(ecl));
            debug!(needed, capacity, version = *ver, "Data doesn't fit the requested version");
            return Err(QRError::CapacityExceeded);
        }
        // The count field widens at versions 10 & 27, so each version is checked
        None => Version::all().find(|&ver| fits(ver)).ok_or(QRError::CapacityExceeded)?,
    };
    debug!(mode = ?seg.mode, version = *version, ec_level = ?ecl, "Resolved mode and version");

    let mut bits = BitStream::new(version.data_bit_capacity(ecl));
    write_segment(&seg, version, &mut bits);
    write_terminator(&mut bits);
    write_padding(&mut bits);
    debug_assert_eq!(bits.remaining(), 0);

    Ok(DataCodewords { bits, version, mode: seg.mode })
}

pub(crate) fn build_segment(data: &[u8], mode: Option<Mode>) -> QRResult<Segment<'_>> {
    let mode = mode.unwrap_or_else(|| Mode::select(data));
    let data = match mode {
        Mode::Kanji => Cow::Owned(to_kanji(data).ok_or(QRError::UnsupportedCharacter)?),
        _ if data.iter().all(|&b| mode.contains(b)) => Cow::Borrowed(data),
        _ => return Err(QRError::UnsupportedCharacter),
    };
    Ok(Segment::new(mode, data))
}

fn write_segment(seg: &Segment<'_>, ver: Version, out: &mut BitStream) {
    write_header(seg, ver, out);
    for (value, len) in seg.chunks() {
        out.push_bits(value, len);
    }
}

fn write_header(seg: &Segment<'_>, ver: Version, out: &mut BitStream) {
    out.push_bits(seg.mode as u8, MODE_INDICATOR_BITS);
    out.push_bits(seg.char_count(), ver.char_count_bits(seg.mode));
}

// Up to 4 zero bits, fewer when the capacity runs out
fn write_terminator(out: &mut BitStream) {
    let len = out.remaining().min(4);
    out.push_bits(0_u8, len);
}

fn write_padding(out: &mut BitStream) {
    let fill = out.len().next_multiple_of(8) - out.len();
    out.push_bits(0_u8, fill);
    let pads = out.remaining() / 8;
    for &pad in PAD_CODEWORDS.iter().cycle().take(pads) {
        out.push_bits(pad, 8);
    }
}
