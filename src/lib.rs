//! # qrsmith
//!
//! A Rust library for generating QR codes with Reed-Solomon error correction.
//! Text or bytes go in, a square matrix of dark & light modules comes out,
//! ready to be rendered as an image or printed to a terminal.
//!
//! ## Features
//!
//! - **Automatic encoding**: Picks the most compact mode (numeric, alphanumeric, byte or kanji)
//!   and the smallest version that fits the data
//! - **Reed-Solomon Error Correction**: Configurable levels (L, M, Q, H)
//! - **Mask selection**: Scores all 8 masks with the standard penalty rules and keeps the best
//! - **Rendering**: Grayscale images through the `image` crate, or block character strings
//! - **Input validation**: Form style checks & URL / e-mail classification for user input
//!
//! ## Quick Start
//!
//! ```rust
//! use qrsmith::{encode, ECLevel};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = encode("HELLO", ECLevel::M)?;
//! assert_eq!(qr.width(), 21);
//!
//! let img = qr.to_image(4); // 4 pixels per module
//! assert_eq!(img.width(), (21 + 8) * 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrsmith::{ECLevel, MaskPattern, Mode, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"https://example.com")
//!     .version(Version::new(3)?)       // Smallest fitting version if not provided
//!     .ec_level(ECLevel::Q)            // Defaults to ECLevel::M
//!     .mode(Mode::Byte)                // Most compact mode if not provided
//!     .mask(MaskPattern::new(2)?)      // Lowest penalty mask if not provided
//!     .build()?;
//!
//! assert_eq!(qr.width(), 29);
//! assert_eq!(qr.mask(), Some(MaskPattern::new(2)?));
//! # Ok(())
//! # }
//! ```
//!
//! ### Form input
//!
//! ```rust
//! use qrsmith::{encode, validate_input, ECLevel, InputKind, QRError};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = validate_input("  https://example.com  ")?;
//! assert_eq!(input.kind, InputKind::Url);
//! let qr = encode(input.as_bytes(), ECLevel::M)?;
//! println!("{}", qr.to_str(1));
//!
//! assert_eq!(validate_input("   "), Err(QRError::EmptyData));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod validate;

pub use builder::{error_correction_capacity, QRBuilder, QR};
pub use common::codec::types::Mode;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Metadata, Version};
pub use validate::{validate_input, Input, InputKind, MAX_INPUT_CHARS};

/// Encodes `data` at error correction level `ecl` with automatic mode,
/// version & mask.
pub fn encode(data: impl AsRef<[u8]>, ecl: ECLevel) -> QRResult<QR> {
    QRBuilder::new(data.as_ref()).ec_level(ecl).build()
}
