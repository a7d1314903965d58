use std::fmt::{Debug, Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Input validation
    EmptyData,
    InputTooLong { len: usize, max: usize },

    // Encoding
    UnsupportedCharacter,
    CapacityExceeded,

    // Configuration
    InvalidVersion,
    InvalidECLevel,
    InvalidMaskPattern,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        match *self {
            Self::EmptyData => f.write_str("Please enter a URL or text"),
            Self::InputTooLong { len, max } => {
                write!(f, "Input text is too long ({len} characters, max {max})")
            }
            Self::UnsupportedCharacter => {
                f.write_str("Data contains a character the encoding mode cannot represent")
            }
            Self::CapacityExceeded => {
                f.write_str("Data too long for the largest QR version at this error correction level")
            }
            Self::InvalidVersion => f.write_str("Invalid version, expected 1 to 40"),
            Self::InvalidECLevel => f.write_str("Invalid error correction level, expected L, M, Q or H"),
            Self::InvalidMaskPattern => f.write_str("Invalid mask pattern, expected 0 to 7"),
        }
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
