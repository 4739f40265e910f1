// ============================================
// File: crates/tunwire-core/src/error.rs
// ============================================
//! # Core Error Types
//!
//! ## Creation Reason
//! Defines error types for handshake encoding/decoding, packet checksum
//! helpers and capability configuration in the tunwire core crate.
//!
//! ## Main Functionality
//! - `CoreError`: Primary error enum for core operations
//!
//! ## Error Categories
//! 1. **Size Errors**: Buffer shorter than the structure requires, or an
//!    encode target without enough capacity
//! 2. **Protocol Errors**: Structurally invalid packet headers
//! 3. **Configuration Errors**: Unreadable or invalid capability config
//!
//! ## ⚠️ Important Note for Next Developer
//! - Unknown algorithm identifiers are NOT errors at this layer
//! - Keep buffer contents out of error messages
//!
//! ## Last Modified
//! v0.1.0 - Initial error definitions

use thiserror::Error;

use tunwire_common::error::CommonError;

// ============================================
// Result Type Alias
// ============================================

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

// ============================================
// CoreError
// ============================================

/// Core error types for the wire codec and checksum helpers.
#[derive(Error, Debug)]
pub enum CoreError {
    // ========================================
    // Size Errors
    // ========================================

    /// Message is too short for the structure it claims to hold.
    #[error("Message too short at {checkpoint}: expected at least {expected} bytes, got {actual}")]
    MessageTooShort {
        /// Which validation step failed
        checkpoint: &'static str,
        /// Minimum expected length
        expected: usize,
        /// Actual length received
        actual: usize,
    },

    /// Output buffer cannot hold the encoded message.
    #[error("Buffer too small: need {required} bytes, capacity is {capacity}")]
    BufferTooSmall {
        /// Bytes the encoded message needs
        required: usize,
        /// Bytes the caller provided
        capacity: usize,
    },

    /// A capability list does not fit in its 16-bit count field.
    #[error("Capability list too long: {list} has {len} entries, max {max}")]
    CapabilityListTooLong {
        /// Which list overflowed
        list: &'static str,
        /// Number of entries supplied
        len: usize,
        /// Largest representable count
        max: usize,
    },

    // ========================================
    // Protocol Errors
    // ========================================

    /// Packet header is structurally invalid.
    #[error("Malformed packet: {reason}")]
    MalformedPacket {
        /// What's wrong with the packet
        reason: String,
    },

    // ========================================
    // Configuration Errors
    // ========================================

    /// Configuration could not be read or parsed.
    #[error("Failed to load configuration from '{source_name}': {reason}")]
    ConfigLoad {
        /// File path or other source description
        source_name: String,
        /// Why loading failed
        reason: String,
    },

    /// Configuration parsed but failed validation.
    #[error("Invalid configuration for '{field}': {reason}")]
    ConfigInvalid {
        /// Offending field
        field: String,
        /// What's wrong with it
        reason: String,
    },

    // ========================================
    // Wrapped Errors
    // ========================================

    /// Error from common crate.
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl CoreError {
    // ========================================
    // Convenience Constructors
    // ========================================

    /// Creates a `MessageTooShort` error.
    pub const fn too_short(checkpoint: &'static str, expected: usize, actual: usize) -> Self {
        Self::MessageTooShort {
            checkpoint,
            expected,
            actual,
        }
    }

    /// Creates a `BufferTooSmall` error.
    pub const fn buffer_too_small(required: usize, capacity: usize) -> Self {
        Self::BufferTooSmall { required, capacity }
    }

    /// Creates a `MalformedPacket` error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPacket {
            reason: reason.into(),
        }
    }

    /// Creates a `ConfigLoad` error.
    pub fn config_load(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `ConfigInvalid` error.
    pub fn config_invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            reason: reason.into(),
        }
    }

    // ========================================
    // Error Classification
    // ========================================

    /// Returns `true` if this is a size or bounds error.
    ///
    /// Size errors are permanent for the given input; retrying with the
    /// same bytes fails the same way.
    #[must_use]
    pub const fn is_size_error(&self) -> bool {
        match self {
            Self::MessageTooShort { .. }
            | Self::BufferTooSmall { .. }
            | Self::CapabilityListTooLong { .. } => true,
            Self::Common(common) => common.is_size_error(),
            _ => false,
        }
    }

    /// Returns `true` if the error was caused by bytes from the peer.
    #[must_use]
    pub const fn is_protocol_error(&self) -> bool {
        matches!(
            self,
            Self::MessageTooShort { .. } | Self::MalformedPacket { .. }
        )
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
        let err = CoreError::too_short("cipher capabilities", 45, 44);
        let text = err.to_string();
        assert!(text.contains("cipher capabilities"));
        assert!(text.contains("45"));
        assert!(text.contains("44"));
    }

    #[test]
    fn test_error_classification() {
        assert!(CoreError::too_short("header", 40, 39).is_size_error());
        assert!(CoreError::too_short("header", 40, 39).is_protocol_error());

        let encode = CoreError::buffer_too_small(42, 41);
        assert!(encode.is_size_error());
        assert!(!encode.is_protocol_error());

        assert!(CoreError::malformed("bad IHL").is_protocol_error());
        assert!(!CoreError::config_invalid("ciphers", "empty").is_size_error());
    }

    #[test]
    fn test_common_error_conversion() {
        let common = CommonError::too_short(2, 1);
        let core: CoreError = common.into();
        assert!(matches!(core, CoreError::Common(_)));
        assert!(core.is_size_error());
    }
}
