use thiserror::Error;

/// Errors that can occur in type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypesError {
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    #[error("Invalid address length: expected 20, got {0}")]
    InvalidAddressLength(usize),

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Bech32 error: {0}")]
    Bech32Error(String),

    #[error("Label too long: max {max} bytes, got {actual}")]
    LabelTooLong { max: usize, actual: usize },

    #[error("Invalid label: {0}")]
    InvalidLabel(String),
}

impl From<hex::FromHexError> for TypesError {
    fn from(e: hex::FromHexError) -> Self {
        TypesError::InvalidHex(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_error_display() {
        let err = TypesError::LabelTooLong { max: 32, actual: 40 };
        assert!(err.to_string().contains("32"));
        assert!(err.to_string().contains("40"));
    }

    #[test]
    fn test_hex_error_conversion() {
        let err: TypesError = hex::decode("zz").unwrap_err().into();
        assert!(matches!(err, TypesError::InvalidHex(_)));
    }
}
