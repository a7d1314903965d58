use image::{GrayImage, Luma};

use crate::common::{
    iter::placement_order,
    mask::MaskPattern,
    metadata::{format_info, ECLevel, Metadata, Version, FORMAT_INFO_BITS, VERSION_INFO_BITS},
};

/// A QR symbol as two row-major planes of `width * width` modules: the module
/// colors, and which modules belong to function patterns or info areas.
/// Reserved modules are never masked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    w: usize,
    ver: Version,
    ecl: ECLevel,
    mask: Option<MaskPattern>,
    dark: Vec<bool>,
    reserved: Vec<bool>,
}

impl QR {
    /// Blank symbol with every function pattern drawn and the info areas
    /// reserved. Format info reads as zero until a mask is applied.
    pub(crate) fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        let mut qr = Self {
            w,
            ver,
            ecl,
            mask: None,
            dark: vec![false; w * w],
            reserved: vec![false; w * w],
        };
        qr.stamp_function_patterns();
        qr
    }

    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mask(&self) -> Option<MaskPattern> {
        self.mask
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new(self.ver, self.ecl, self.mask)
    }

    pub fn count_dark_modules(&self) -> usize {
        self.dark.iter().filter(|&&d| d).count()
    }

    /// Whether the module at (r, c) is dark. Positions outside the symbol
    /// read as light, like the quiet zone.
    pub fn is_dark(&self, r: usize, c: usize) -> bool {
        r < self.w && c < self.w && self.dark[r * self.w + c]
    }

    /// Rows of modules, `true` is dark.
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        self.dark.chunks(self.w).map(<[bool]>::to_vec).collect()
    }

    fn put(&mut self, r: usize, c: usize, dark: bool) {
        let i = r * self.w + c;
        self.dark[i] = dark;
        self.reserved[i] = true;
    }
}

// Function patterns & info areas
//------------------------------------------------------------------------------

impl QR {
    fn stamp_function_patterns(&mut self) {
        let w = self.w;

        // Timing lines first, finders and alignments overwrite the crossings
        for i in 0..w {
            self.put(6, i, i % 2 == 0);
            self.put(i, 6, i % 2 == 0);
        }

        // Ring 2 is the light gap, ring 4 the separator
        for (r, c) in [(3, 3), (3, w - 4), (w - 4, 3)] {
            self.stamp_rings(r, c, 4, |ring| ring != 2 && ring != 4);
        }

        let centers = self.ver.alignment_centers();
        if let (Some(&first), Some(&last)) = (centers.first(), centers.last()) {
            for &r in &centers {
                for &c in &centers {
                    let under_finder = (r, c) == (first, first)
                        || (r, c) == (first, last)
                        || (r, c) == (last, first);
                    if !under_finder {
                        self.stamp_rings(r, c, 2, |ring| ring != 1);
                    }
                }
            }
        }

        self.write_format_info(0);
        self.put(w - 8, 8, true);

        if *self.ver >= 7 {
            self.write_version_info(self.ver.info());
        }
    }

    // Square rings around (r, c) out to `radius`, clipped to the symbol
    fn stamp_rings(&mut self, r: usize, c: usize, radius: usize, dark_ring: fn(usize) -> bool) {
        let last = self.w - 1;
        for i in r.saturating_sub(radius)..=(r + radius).min(last) {
            for j in c.saturating_sub(radius)..=(c + radius).min(last) {
                let ring = i.abs_diff(r).max(j.abs_diff(c));
                self.put(i, j, dark_ring(ring));
            }
        }
    }

    fn write_format_info(&mut self, bits: u32) {
        for i in 0..FORMAT_INFO_BITS {
            for (r, c) in format_bit_positions(self.w, i) {
                self.put(r, c, bits >> i & 1 == 1);
            }
        }
    }

    // Bottom left block is the transpose of the top right one
    fn write_version_info(&mut self, bits: u32) {
        for i in 0..VERSION_INFO_BITS {
            let (a, b) = (self.w - 11 + i % 3, i / 3);
            let dark = bits >> i & 1 == 1;
            self.put(b, a, dark);
            self.put(a, b, dark);
        }
    }
}

// Both copies of format bit `i`, counted from the least significant bit. The
// first wraps around the top left finder, the second is split between the
// other two.
fn format_bit_positions(w: usize, i: usize) -> [(usize, usize); 2] {
    let around = match i {
        0..=5 => (i, 8),
        6 => (7, 8),
        7 => (8, 8),
        8 => (8, 7),
        _ => (8, 14 - i),
    };
    let split = if i < 8 { (8, w - 1 - i) } else { (w - 15 + i, 8) };
    [around, split]
}


// Codeword placement & masking
//------------------------------------------------------------------------------

impl QR {
    /// Writes codeword bits, most significant first, into the unreserved
    /// modules in placement order. Modules past the last bit stay light.
    pub(crate) fn place_codewords(&mut self, codewords: &[u8]) {
        let mut bits = codewords.iter().flat_map(|&b| (0..8).rev().map(move |i| b >> i & 1 == 1));
        for (r, c) in placement_order(self.ver) {
            let i = r * self.w + c;
            if !self.reserved[i] {
                self.dark[i] = bits.next().unwrap_or(false);
            }
        }
        debug_assert!(bits.next().is_none(), "codewords overflow the data region");
    }

    /// Inverts every unreserved module the pattern selects, then writes the
    /// matching format info.
    pub(crate) fn apply_mask(&mut self, mask: MaskPattern) {
        let w = self.w;
        let modules = self.dark.iter_mut().zip(&self.reserved).enumerate();
        for (i, (dark, &reserved)) in modules {
            if !reserved && mask.flips(i / w, i % w) {
                *dark = !*dark;
            }
        }
        self.mask = Some(mask);
        self.write_format_info(format_info(self.ecl, mask));
    }
}


// Render
//------------------------------------------------------------------------------

impl QR {
    /// Quiet zone width in modules
    pub const QUIET_ZONE: usize = 4;

    // Module color with the quiet zone around the symbol
    fn is_dark_padded(&self, r: usize, c: usize) -> bool {
        let qz = Self::QUIET_ZONE;
        r >= qz && c >= qz && self.is_dark(r - qz, c - qz)
    }

    /// Grayscale image with the quiet zone, `module_sz` pixels per module.
    /// Dark modules are black (0) and light modules white (255).
    pub fn to_image(&self, module_sz: u32) -> GrayImage {
        let sz = module_sz.max(1);
        let side = (self.w + 2 * Self::QUIET_ZONE) as u32 * sz;
        GrayImage::from_fn(side, side, |x, y| {
            let dark = self.is_dark_padded((y / sz) as usize, (x / sz) as usize);
            Luma([if dark { 0 } else { 255 }])
        })
    }

    /// Text for dark background terminals, light modules are drawn as
    /// blocks.
    pub fn to_str(&self, module_sz: usize) -> String {
        let sz = module_sz.max(1);
        let side = (self.w + 2 * Self::QUIET_ZONE) * sz;
        let mut canvas = String::with_capacity(side * (side * 3 + 1));
        for y in 0..side {
            let row = (0..side).map(|x| if self.is_dark_padded(y / sz, x / sz) { ' ' } else { '█' });
            canvas.extend(row);
            canvas.push('\n');
        }
        canvas
    }
}

#[cfg(test)]
mod render_tests {
    use crate::builder::QRBuilder;
    use crate::common::metadata::ECLevel;

    #[test]
    fn test_to_image() {
        let qr = QRBuilder::new(b"HELLO").ec_level(ECLevel::M).build().unwrap();
        let img = qr.to_image(3);
        assert_eq!(img.dimensions(), (29 * 3, 29 * 3));
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(11, 11).0, [255]);
        for r in 0..21 {
            for c in 0..21 {
                let px = img.get_pixel(12 + c * 3 + 1, 12 + r * 3 + 1).0[0];
                assert_eq!(px == 0, qr.is_dark(r as usize, c as usize));
            }
        }
    }

    #[test]
    fn test_zero_module_size() {
        let qr = QRBuilder::new(b"HELLO").build().unwrap();
        assert_eq!(qr.to_image(0).dimensions(), (29, 29));
        assert_eq!(qr.to_str(0).lines().count(), 29);
    }

    #[test]
    fn test_to_str() {
        let qr = QRBuilder::new(b"HELLO").build().unwrap();
        let s = qr.to_str(2);
        let lines = s.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 58);
        assert!(lines.iter().all(|l| l.chars().count() == 58));
        assert!(lines[0].chars().all(|c| c == '█'));
        // Top left finder corner
        assert_eq!(lines[8].chars().nth(8), Some(' '));
        assert_eq!(lines[9].chars().nth(9), Some(' '));
    }
}
