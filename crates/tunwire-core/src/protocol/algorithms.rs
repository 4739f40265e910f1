// ============================================
// File: crates/tunwire-core/src/protocol/algorithms.rs
// ============================================
//! # Algorithm Identifiers
//!
//! ## Creation Reason
//! Capability lists in the handshake carry one byte per algorithm. The
//! set of known identifiers is versioned with the protocol, and a peer
//! running a newer version may advertise values we have never heard of.
//!
//! ## Main Functionality
//! - `CipherAlgorithm`: Cipher identifier (opaque byte + known names)
//! - `DigestAlgorithm`: Message digest identifier (same contract)
//! - `select_preferred`: First local preference the peer also supports
//!
//! ## Known Identifiers
//! | Byte | Cipher | Digest |
//! |------|--------|--------|
//! | 0x01 | aes256-cbc | sha256 |
//! | 0x02 | aes256-gcm | sha384 |
//! | 0x03 | chacha20-poly1305 | sha512 |
//!
//! ## ⚠️ Important Note for Next Developer
//! - Decoding NEVER rejects an unknown identifier; it is carried as-is
//!   and `is_known()` tells the consumer whether it can act on it
//! - Add new identifiers at the end; never renumber
//!
//! ## Last Modified
//! v0.1.0 - Initial identifier tables

use std::fmt;

use serde::{Deserialize, Serialize};

/// Serde form of an identifier: its name when known, else the raw byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlgorithmRepr {
    /// Canonical lowercase name, e.g. `"aes256-gcm"`.
    Name(String),
    /// Raw wire identifier.
    Id(u8),
}

macro_rules! algorithm_identifier {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "AlgorithmRepr", into = "AlgorithmRepr")]
        pub struct $name(u8);

        impl $name {
            $( $(#[$vmeta])* pub const $variant: Self = Self($value); )+

            /// Every identifier this build understands, in table order.
            pub const KNOWN: &'static [Self] = &[$(Self::$variant),+];

            /// Wraps a raw wire byte; unknown values are preserved.
            #[must_use]
            pub const fn from_byte(byte: u8) -> Self {
                Self(byte)
            }

            /// Returns the raw wire byte.
            #[must_use]
            pub const fn as_byte(&self) -> u8 {
                self.0
            }

            /// Canonical name, if the identifier is known.
            #[must_use]
            pub const fn name(&self) -> Option<&'static str> {
                match self.0 {
                    $( $value => Some($text), )+
                    _ => None,
                }
            }

            /// Returns `true` if this build understands the identifier.
            #[must_use]
            pub const fn is_known(&self) -> bool {
                self.name().is_some()
            }

            /// Looks up an identifier by canonical name (case-insensitive).
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                Self::KNOWN
                    .iter()
                    .copied()
                    .find(|known| known.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.name() {
                    Some(name) => f.write_str(name),
                    None => write!(f, "unknown-{}(0x{:02x})", $kind, self.0),
                }
            }
        }

        impl From<u8> for $name {
            fn from(byte: u8) -> Self {
                Self(byte)
            }
        }

        impl From<$name> for u8 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl TryFrom<AlgorithmRepr> for $name {
            type Error = String;

            fn try_from(repr: AlgorithmRepr) -> Result<Self, Self::Error> {
                match repr {
                    AlgorithmRepr::Id(byte) => Ok(Self(byte)),
                    AlgorithmRepr::Name(name) => Self::from_name(&name)
                        .ok_or_else(|| format!("unknown {} algorithm '{}'", $kind, name)),
                }
            }
        }

        impl From<$name> for AlgorithmRepr {
            fn from(id: $name) -> Self {
                match id.name() {
                    Some(name) => Self::Name(name.to_owned()),
                    None => Self::Id(id.0),
                }
            }
        }
    };
}

algorithm_identifier! {
    /// Cipher algorithm identifier carried in capability lists.
    ///
    /// # Example
    /// ```
    /// use tunwire_core::protocol::CipherAlgorithm;
    ///
    /// assert_eq!(CipherAlgorithm::from_byte(0x02), CipherAlgorithm::AES256_GCM);
    /// assert!(!CipherAlgorithm::from_byte(0x7F).is_known());
    /// assert_eq!(CipherAlgorithm::from_byte(0x7F).as_byte(), 0x7F);
    /// ```
    CipherAlgorithm, "cipher" {
        /// AES-256 in CBC mode.
        AES256_CBC = 0x01 => "aes256-cbc",
        /// AES-256 in GCM mode.
        AES256_GCM = 0x02 => "aes256-gcm",
        /// ChaCha20 with Poly1305.
        CHACHA20_POLY1305 = 0x03 => "chacha20-poly1305",
    }
}

algorithm_identifier! {
    /// Message digest algorithm identifier carried in capability lists.
    DigestAlgorithm, "digest" {
        /// SHA-256.
        SHA256 = 0x01 => "sha256",
        /// SHA-384.
        SHA384 = 0x02 => "sha384",
        /// SHA-512.
        SHA512 = 0x03 => "sha512",
    }
}

// ============================================
// Selection
// ============================================

/// Returns the first entry of `preferences` that `offered` also contains.
///
/// Preference order belongs to the caller; the order of `offered` is
/// irrelevant here.
///
/// # Example
/// ```
/// use tunwire_core::protocol::algorithms::{select_preferred, DigestAlgorithm};
///
/// let ours = [DigestAlgorithm::SHA512, DigestAlgorithm::SHA256];
/// let theirs = [DigestAlgorithm::SHA256, DigestAlgorithm::SHA384];
/// assert_eq!(select_preferred(&ours, &theirs), Some(DigestAlgorithm::SHA256));
/// ```
#[must_use]
pub fn select_preferred<T: Copy + PartialEq>(preferences: &[T], offered: &[T]) -> Option<T> {
    preferences
        .iter()
        .copied()
        .find(|candidate| offered.contains(candidate))
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_identifiers() {
        for cipher in CipherAlgorithm::KNOWN {
            assert!(cipher.is_known());
            let name = cipher.name().unwrap();
            assert_eq!(CipherAlgorithm::from_name(name), Some(*cipher));
        }
        assert_eq!(DigestAlgorithm::KNOWN.len(), 3);
        assert_eq!(DigestAlgorithm::from_name("SHA384"), Some(DigestAlgorithm::SHA384));
    }

    #[test]
    fn test_unknown_identifiers_pass_through() {
        let unknown = CipherAlgorithm::from_byte(0xEE);
        assert!(!unknown.is_known());
        assert_eq!(u8::from(unknown), 0xEE);
        assert_eq!(unknown.to_string(), "unknown-cipher(0xee)");
        assert_eq!(DigestAlgorithm::from_byte(0).name(), None);
    }

    #[test]
    fn test_serde_names_and_numbers() {
        let ids = [CipherAlgorithm::AES256_GCM, CipherAlgorithm::from(0x42)];
        let json = serde_json::to_string(&ids).unwrap();
        assert_eq!(json, r#"["aes256-gcm",66]"#);

        let parsed: Vec<CipherAlgorithm> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![CipherAlgorithm::AES256_GCM, CipherAlgorithm::from(0x42)]);

        assert!(serde_json::from_str::<DigestAlgorithm>(r#""md5""#).is_err());
    }

    #[test]
    fn test_select_preferred() {
        let ours = [CipherAlgorithm::AES256_GCM, CipherAlgorithm::CHACHA20_POLY1305];
        let theirs = [CipherAlgorithm::CHACHA20_POLY1305, CipherAlgorithm::AES256_GCM];
        assert_eq!(select_preferred(&ours, &theirs), Some(CipherAlgorithm::AES256_GCM));

        let disjoint = [CipherAlgorithm::AES256_CBC];
        assert_eq!(select_preferred(&ours, &disjoint), None);
        assert_eq!(select_preferred::<CipherAlgorithm>(&[], &theirs), None);
    }
}
