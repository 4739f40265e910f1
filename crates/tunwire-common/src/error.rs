// ============================================
// File: crates/tunwire-common/src/error.rs
// ============================================
//! # Common Error Types
//!
//! ## Creation Reason
//! Provides foundational error types and result aliases used across
//! all tunwire crates, enabling consistent error handling.
//!
//! ## Main Functionality
//! - `CommonError`: Base error enum for buffer and value handling
//! - `Result<T>`: Type alias using `CommonError`
//!
//! ## ⚠️ Important Note for Next Developer
//! - Never include buffer contents in error messages
//! - Size errors always report both the required and available length
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

// ============================================
// Result Type Alias
// ============================================

/// Common result type for operations that may fail.
pub type Result<T> = std::result::Result<T, CommonError>;

// ============================================
// CommonError
// ============================================

/// Common error types shared across tunwire crates.
///
/// # Example
/// ```
/// use tunwire_common::error::{CommonError, Result};
///
/// fn first_byte(data: &[u8]) -> Result<u8> {
///     data.first().copied().ok_or(CommonError::BufferTooShort {
///         needed: 1,
///         available: 0,
///     })
/// }
///
/// assert!(first_byte(&[]).is_err());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    // ========================================
    // Buffer Errors
    // ========================================

    /// A read or write would cross the end of the buffer.
    #[error("Buffer too short: needed {needed} bytes, {available} available")]
    BufferTooShort {
        /// Bytes the operation needed from the cursor position
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// Data length doesn't match expected size.
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length received
        actual: usize,
    },

    // ========================================
    // Decoding Errors
    // ========================================

    /// Failed to decode a textual representation.
    #[error("Decoding error: {context}: {details}")]
    Decoding {
        /// What was being decoded
        context: String,
        /// Error details
        details: String,
    },
}

impl CommonError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `BufferTooShort` error.
    pub const fn too_short(needed: usize, available: usize) -> Self {
        Self::BufferTooShort { needed, available }
    }

    /// Creates an `InvalidLength` error.
    pub const fn invalid_length(expected: usize, actual: usize) -> Self {
        Self::InvalidLength { expected, actual }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if the error is about buffer size or bounds.
    #[must_use]
    pub const fn is_size_error(&self) -> bool {
        matches!(self, Self::BufferTooShort { .. } | Self::InvalidLength { .. })
    }
}

// ============================================
// Error Conversions
// ============================================

impl From<bytes::TryGetError> for CommonError {
    fn from(err: bytes::TryGetError) -> Self {
        Self::too_short(err.requested, err.available)
    }
}

impl From<base64::DecodeError> for CommonError {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decoding {
            context: "base64 decode".into(),
            details: err.to_string(),
        }
    }
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CommonError::too_short(4, 1);
        assert!(err.to_string().contains('4'));
        assert!(err.to_string().contains('1'));
    }

    #[test]
    fn test_error_classification() {
        assert!(CommonError::too_short(2, 0).is_size_error());
        assert!(CommonError::invalid_length(32, 31).is_size_error());

        let decoding = CommonError::Decoding {
            context: "base64 decode".into(),
            details: "bad symbol".into(),
        };
        assert!(!decoding.is_size_error());
    }

    #[test]
    fn test_base64_error_conversion() {
        use base64::Engine;

        let err = base64::engine::general_purpose::STANDARD
            .decode("***")
            .unwrap_err();
        let common: CommonError = err.into();
        assert!(matches!(common, CommonError::Decoding { .. }));
    }
}
