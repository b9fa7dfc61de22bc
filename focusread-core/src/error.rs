//! Core error types (deterministic only)

use thiserror::Error;

/// Core errors
///
/// Segmentation, emphasis and styling are total over their inputs; these
/// variants only surface from parsing host-supplied names and from the
/// reconstruction check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Feature name not recognised
    #[error("unknown feature '{0}'")]
    UnknownFeature(String),

    /// Styled output does not reproduce the source text
    #[error("reconstruction mismatch: expected {expected_len} bytes, got {actual_len} (first difference at byte {offset})")]
    LossyReconstruction {
        /// Length of the source text
        expected_len: usize,
        /// Length of the reconstructed text
        actual_len: usize,
        /// Byte offset of the first differing byte
        offset: usize,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_feature_display() {
        let error = CoreError::UnknownFeature("sparkles".to_string());
        assert_eq!(error.to_string(), "unknown feature 'sparkles'");
    }

    #[test]
    fn test_lossy_reconstruction_display() {
        let error = CoreError::LossyReconstruction {
            expected_len: 10,
            actual_len: 9,
            offset: 4,
        };
        let msg = error.to_string();
        assert!(msg.contains("expected 10 bytes"));
        assert!(msg.contains("byte 4"));
    }
}
