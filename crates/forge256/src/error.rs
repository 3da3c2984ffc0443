//! Error types for forge256.
//!
//! Hashing itself cannot fail; only parsing a digest back from text can.

/// Failure to parse a hex-encoded digest.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DigestParseError {
    #[error("Invalid digest length: expected {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
