// ============================================
// File: crates/tunwire-common/src/types.rs
// ============================================
//! # Core Type Definitions
//!
//! ## Creation Reason
//! Centralizes the fixed-size values carried by handshake messages so
//! that every crate agrees on their sizes and representations.
//!
//! ## Main Functionality
//! - `SessionNumber`: Numeric identifier of a session establishment attempt
//! - `Challenge`: Fixed-size random value exchanged during the handshake
//!
//! ## ⚠️ Important Note for Next Developer
//! - `CHALLENGE_SIZE` is part of the wire format - changing it breaks peers
//! - Challenges must come from a cryptographically secure source; this
//!   crate never picks one on its own
//! - `Challenge` zeroes its bytes on drop
//!
//! ## Last Modified
//! v0.1.0 - Initial type definitions

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{CommonError, Result};

// ============================================
// Constants
// ============================================

/// Size of a handshake challenge in bytes.
pub const CHALLENGE_SIZE: usize = 32;

/// Size of a session number on the wire.
pub const SESSION_NUMBER_SIZE: usize = 4;

// ============================================
// SessionNumber
// ============================================

/// Identifier distinguishing successive session establishment attempts.
///
/// # Wire Format
/// 4 bytes, big-endian unsigned.
///
/// # Example
/// ```
/// use tunwire_common::types::SessionNumber;
///
/// let number = SessionNumber::new(0x0102_0304);
/// assert_eq!(number.to_be_bytes(), [1, 2, 3, 4]);
/// assert_eq!(SessionNumber::from_be_bytes([1, 2, 3, 4]), number);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionNumber(u32);

impl SessionNumber {
    /// Creates a session number from its host-order value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the host-order value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Decodes a session number from network byte order.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; SESSION_NUMBER_SIZE]) -> Self {
        Self(u32::from_be_bytes(bytes))
    }

    /// Encodes the session number in network byte order.
    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; SESSION_NUMBER_SIZE] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for SessionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SessionNumber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<SessionNumber> for u32 {
    fn from(number: SessionNumber) -> Self {
        number.0
    }
}

// ============================================
// Challenge
// ============================================

/// Random value binding later handshake proofs to one exchange.
///
/// # Security Properties
/// - Fixed 32-byte size
/// - Filled only from a caller-supplied CSPRNG
/// - Zeroed on drop, so it does not implement `Copy`
///
/// # Example
/// ```
/// use tunwire_common::types::{Challenge, CHALLENGE_SIZE};
///
/// let challenge = Challenge::generate(&mut rand::rngs::OsRng);
/// let restored = Challenge::try_from_slice(challenge.as_bytes()).unwrap();
/// assert_eq!(challenge, restored);
/// assert_eq!(restored.as_bytes().len(), CHALLENGE_SIZE);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Challenge([u8; CHALLENGE_SIZE]);

impl Drop for Challenge {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Challenge {
    /// Wraps raw challenge bytes.
    #[must_use]
    pub const fn new(bytes: [u8; CHALLENGE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copies a challenge out of a slice of exactly `CHALLENGE_SIZE` bytes.
    ///
    /// # Errors
    /// Returns `InvalidLength` if the slice has any other length.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self> {
        let array: [u8; CHALLENGE_SIZE] = bytes
            .try_into()
            .map_err(|_| CommonError::invalid_length(CHALLENGE_SIZE, bytes.len()))?;
        Ok(Self(array))
    }

    /// Fills a new challenge from the given secure random source.
    #[must_use]
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; CHALLENGE_SIZE];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Returns the raw challenge bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CHALLENGE_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only the first 4 bytes, enough to correlate log lines
        write!(
            f,
            "Challenge({:02x}{:02x}{:02x}{:02x}...)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BASE64.encode(self.0))
    }
}

impl FromStr for Challenge {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = BASE64.decode(s)?;
        Self::try_from_slice(&bytes)
    }
}

impl From<[u8; CHALLENGE_SIZE]> for Challenge {
    fn from(bytes: [u8; CHALLENGE_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Challenge {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Challenge {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&BASE64.encode(self.0))
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Challenge {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            Self::try_from_slice(&bytes).map_err(|_| {
                serde::de::Error::invalid_length(bytes.len(), &"32 bytes")
            })
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
    fn test_session_number_byte_order() {
        let number = SessionNumber::new(0xDEAD_BEEF);
        assert_eq!(number.to_be_bytes(), [0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(SessionNumber::from_be_bytes([0xDE, 0xAD, 0xBE, 0xEF]), number);
        assert_eq!(u32::from(number), 0xDEAD_BEEF);
    }

    #[test]
    fn test_challenge_generation() {
        let a = Challenge::generate(&mut rand::rngs::OsRng);
        let b = Challenge::generate(&mut rand::rngs::OsRng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_challenge_invalid_length() {
        assert_eq!(
            Challenge::try_from_slice(&[0u8; 31]),
            Err(CommonError::invalid_length(CHALLENGE_SIZE, 31))
        );
        assert!(Challenge::try_from_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn test_challenge_string_roundtrip() {
        let original = Challenge::new([0x5Au8; CHALLENGE_SIZE]);
        let parsed: Challenge = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        assert!("not base64!".parse::<Challenge>().is_err());
    }

    #[test]
    fn test_challenge_debug_is_truncated() {
        let challenge = Challenge::new([0xABu8; CHALLENGE_SIZE]);
        assert_eq!(format!("{challenge:?}"), "Challenge(abababab...)");
    }

    #[test]
    fn test_challenge_json_serialization() {
        let original = Challenge::generate(&mut rand::rngs::OsRng);
        let json = serde_json::to_string(&original).unwrap();
        let restored: Challenge = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
