use crate::common::error::{QRError, QRResult};

pub const MAX_INPUT_CHARS: usize = 2000;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum InputKind {
    Url,
    Email,
    Text,
}

/// Trimmed form input ready to be encoded.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Input {
    pub text: String,
    pub kind: InputKind,
}

impl Input {
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// Trims `raw` and checks it is non-empty & at most 2000 characters. Any
/// text is accepted, the kind is informational.
pub fn validate_input(raw: &str) -> QRResult<Input> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(QRError::EmptyData);
    }

    let len = text.chars().count();
    if len > MAX_INPUT_CHARS {
        return Err(QRError::InputTooLong { len, max: MAX_INPUT_CHARS });
    }

    let kind = if is_url(text) {
        InputKind::Url
    } else if is_email(text) {
        InputKind::Email
    } else {
        InputKind::Text
    };

    Ok(Input { text: text.to_string(), kind })
}

// Scheme followed by at least one character
fn is_url(text: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        text.len() > scheme.len()
            && text.is_char_boundary(scheme.len())
            && text[..scheme.len()].eq_ignore_ascii_case(scheme)
    })
}

// local@domain.tld with no whitespace & a single @
fn is_email(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.char_indices().any(|(i, ch)| ch == '.' && i > 0 && i + 1 < domain.len())
}
