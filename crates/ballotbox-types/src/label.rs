//! Fixed-size option labels.
//!
//! Labels are short opaque names stored in a 32-byte zero-padded buffer.

use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// A 32-byte option name, zero padded.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OptionLabel([u8; 32]);

impl OptionLabel {
    pub const LEN: usize = 32;

    /// Create a label from text.
    ///
    /// # Errors
    /// - `LabelTooLong` if the text is longer than 32 bytes
    /// - `InvalidLabel` if the text contains a NUL byte
    pub fn new(text: &str) -> Result<Self, TypesError> {
        let bytes = text.as_bytes();
        if bytes.len() > Self::LEN {
            return Err(TypesError::LabelTooLong {
                max: Self::LEN,
                actual: bytes.len(),
            });
        }
        if bytes.contains(&0) {
            return Err(TypesError::InvalidLabel(
                "label contains a NUL byte".to_string(),
            ));
        }

        let mut buf = [0u8; 32];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(buf))
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Label text without padding.
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(Self::LEN);
        // Only constructed from &str, so the prefix is valid UTF-8.
        std::str::from_utf8(&self.0[..end]).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OptionLabel({:?})", self.as_str())
    }
}

impl FromStr for OptionLabel {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
