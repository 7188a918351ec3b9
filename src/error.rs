//! Error types for conversion operations

/// Errors that can occur during HTML to text conversion
///
/// The string pipeline ([`crate::convert`]) is total and never produces these;
/// they surface only from byte decoding and the cooperative timeout.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Character encoding error (invalid bytes, unsupported charset)
    #[error("Encoding error: {0}")]
    EncodingError(String),
    /// Conversion timeout exceeded
    #[error("Conversion timeout exceeded")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ConversionError::EncodingError("bad byte".to_string()).to_string(),
            "Encoding error: bad byte"
        );
        assert_eq!(
            ConversionError::Timeout.to_string(),
            "Conversion timeout exceeded"
        );
    }
}
