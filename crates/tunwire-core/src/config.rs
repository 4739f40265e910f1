// ============================================
// File: crates/tunwire-core/src/config.rs
// ============================================
//! # Capability Configuration
//!
//! ## Creation Reason
//! Operators choose which ciphers and digests a node advertises, and in
//! which order. This module loads that choice from TOML and turns it
//! into outgoing handshakes and negotiation decisions.
//!
//! ## Main Functionality
//! - `CapabilityConfig`: Ordered local cipher/digest preferences
//! - TOML loading and validation
//! - Negotiation against a received `CapabilityHandshake`
//!
//! ## Example Configuration
//! ```toml
//! # Most preferred first
//! ciphers = ["aes256-gcm", "chacha20-poly1305"]
//! digests = ["sha384", "sha256"]
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Local preferences must only name algorithms this build knows;
//!   unknown identifiers are accepted from peers, never from config
//! - Validate before use; `load` and `from_toml_str` already do
//!
//! ## Last Modified
//! v0.1.0 - Initial configuration implementation

use std::collections::HashSet;
use std::hash::Hash;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use tunwire_common::types::{Challenge, SessionNumber};

use crate::error::{CoreError, Result};
use crate::protocol::algorithms::{select_preferred, CipherAlgorithm, DigestAlgorithm};
use crate::protocol::handshake::{CapabilityHandshake, OwnedCapabilityHandshake, MAX_CAPABILITIES};

// ============================================
// CapabilityConfig
// ============================================

/// Locally advertised algorithm preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityConfig {
    /// Ciphers, most preferred first.
    #[serde(default = "default_ciphers")]
    pub ciphers: Vec<CipherAlgorithm>,

    /// Digests, most preferred first.
    #[serde(default = "default_digests")]
    pub digests: Vec<DigestAlgorithm>,
}

fn default_ciphers() -> Vec<CipherAlgorithm> {
    vec![
        CipherAlgorithm::AES256_GCM,
        CipherAlgorithm::CHACHA20_POLY1305,
        CipherAlgorithm::AES256_CBC,
    ]
}

fn default_digests() -> Vec<DigestAlgorithm> {
    vec![
        DigestAlgorithm::SHA512,
        DigestAlgorithm::SHA384,
        DigestAlgorithm::SHA256,
    ]
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            ciphers: default_ciphers(),
            digests: default_digests(),
        }
    }
}

/// Outcome of a successful negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegotiatedAlgorithms {
    /// Agreed cipher.
    pub cipher: CipherAlgorithm,
    /// Agreed digest.
    pub digest: DigestAlgorithm,
}

impl CapabilityConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        info!("Loading capability configuration from: {}", path_str);

        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::config_load(&path_str, e.to_string()))?;

        Self::parse(&content, &path_str)
    }

    /// Loads configuration from a string (useful for testing).
    ///
    /// # Errors
    /// Returns error if the string cannot be parsed or validated.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, "<string>")
    }

    fn parse(content: &str, source_name: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CoreError::config_load(source_name, e.to_string()))?;
        config.validate()?;

        debug!(
            ciphers = config.ciphers.len(),
            digests = config.digests.len(),
            "Capability configuration loaded"
        );
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns `ConfigInvalid` for empty, oversized or duplicated lists,
    /// or for identifiers this build does not know.
    pub fn validate(&self) -> Result<()> {
        validate_list("ciphers", &self.ciphers, CipherAlgorithm::is_known)?;
        validate_list("digests", &self.digests, DigestAlgorithm::is_known)?;
        Ok(())
    }

    /// Serializes configuration to a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigInvalid` if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CoreError::config_invalid("<root>", e.to_string()))
    }

    /// Builds the outgoing handshake advertising these preferences.
    #[must_use]
    pub fn handshake(
        &self,
        session_number: SessionNumber,
        challenge: Challenge,
    ) -> OwnedCapabilityHandshake {
        OwnedCapabilityHandshake {
            session_number,
            challenge,
            cipher_capabilities: self.ciphers.clone(),
            digest_capabilities: self.digests.clone(),
        }
    }

    /// Picks, for each list, our most preferred algorithm the peer offers.
    ///
    /// Returns `None` if either list has no overlap.
    #[must_use]
    pub fn negotiate(&self, peer: &CapabilityHandshake<'_>) -> Option<NegotiatedAlgorithms> {
        let cipher = select_preferred(&self.ciphers, &peer.cipher_capabilities());
        let digest = select_preferred(&self.digests, &peer.digest_capabilities());

        match (cipher, digest) {
            (Some(cipher), Some(digest)) => Some(NegotiatedAlgorithms { cipher, digest }),
            _ => {
                debug!(
                    session_number = %peer.session_number(),
                    cipher_overlap = cipher.is_some(),
                    digest_overlap = digest.is_some(),
                    "No common algorithms with peer"
                );
                None
            }
        }
    }
}

fn validate_list<T>(field: &str, list: &[T], is_known: fn(&T) -> bool) -> Result<()>
where
    T: Copy + Eq + Hash + std::fmt::Display,
{
    if list.is_empty() {
        return Err(CoreError::config_invalid(field, "must not be empty"));
    }
    if list.len() > MAX_CAPABILITIES {
        return Err(CoreError::config_invalid(
            field,
            format!("at most {MAX_CAPABILITIES} entries, got {}", list.len()),
        ));
    }

    let mut seen = HashSet::with_capacity(list.len());
    for item in list {
        if !is_known(item) {
            return Err(CoreError::config_invalid(field, format!("{item} is not supported")));
        }
        if !seen.insert(*item) {
            return Err(CoreError::config_invalid(field, format!("duplicate entry {item}")));
        }
    }
    Ok(())
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use tunwire_common::CHALLENGE_SIZE;

    #[test]
    fn test_default_config_is_valid() {
        let config = CapabilityConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ciphers[0], CipherAlgorithm::AES256_GCM);
    }

    #[test]
    fn test_parse_names_and_ids() {
        let config = CapabilityConfig::from_toml_str(
            r#"
            ciphers = ["chacha20-poly1305", 2]
            digests = ["SHA256"]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.ciphers,
            vec![CipherAlgorithm::CHACHA20_POLY1305, CipherAlgorithm::AES256_GCM]
        );
        assert_eq!(config.digests, vec![DigestAlgorithm::SHA256]);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = CapabilityConfig::from_toml_str("digests = [\"sha384\"]").unwrap();
        assert_eq!(config.ciphers, default_ciphers());
        assert_eq!(config.digests, vec![DigestAlgorithm::SHA384]);
    }

    #[test]
    fn test_invalid_configs() {
        let cases = [
            "ciphers = []",
            "ciphers = [\"aes256-gcm\", \"aes256-gcm\"]",
            "ciphers = [200]",
            "digests = [\"md5\"]",
            "ciphers = 3",
        ];
        for case in cases {
            assert!(CapabilityConfig::from_toml_str(case).is_err(), "accepted: {case}");
        }

        let err = CapabilityConfig::from_toml_str("ciphers = []").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CapabilityConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("aes256-gcm"));
        assert_eq!(CapabilityConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CapabilityConfig::load("/nonexistent/tunwire/capabilities.toml").unwrap_err();
        assert!(matches!(err, CoreError::ConfigLoad { .. }));
    }

    #[test]
    fn test_negotiate_with_peer() {
        let ours = CapabilityConfig::default();
        let peer = OwnedCapabilityHandshake {
            session_number: SessionNumber::new(9),
            challenge: Challenge::new([1; CHALLENGE_SIZE]),
            cipher_capabilities: vec![
                CipherAlgorithm::from_byte(0x99),
                CipherAlgorithm::CHACHA20_POLY1305,
                CipherAlgorithm::AES256_GCM,
            ],
            digest_capabilities: vec![DigestAlgorithm::SHA256],
        };
        let bytes = peer.to_bytes().unwrap();
        let view = CapabilityHandshake::parse(&bytes).unwrap();

        assert_eq!(
            ours.negotiate(&view),
            Some(NegotiatedAlgorithms {
                cipher: CipherAlgorithm::AES256_GCM,
                digest: DigestAlgorithm::SHA256,
            })
        );
    }

    #[test]
    fn test_negotiate_without_overlap() {
        let ours = CapabilityConfig {
            ciphers: vec![CipherAlgorithm::AES256_CBC],
            digests: default_digests(),
        };
        let peer = ours
            .handshake(SessionNumber::new(1), Challenge::new([0; CHALLENGE_SIZE]))
            .to_bytes()
            .unwrap();
        let view = CapabilityHandshake::parse(&peer).unwrap();
        assert!(ours.negotiate(&view).is_some());

        let other = CapabilityConfig {
            ciphers: vec![CipherAlgorithm::AES256_GCM],
            digests: default_digests(),
        };
        assert!(other.negotiate(&view).is_none());
    }

    #[test]
    fn test_handshake_advertises_preferences() {
        let config = CapabilityConfig::default();
        let message = config.handshake(SessionNumber::new(3), Challenge::new([7; CHALLENGE_SIZE]));
        assert_eq!(message.cipher_capabilities, config.ciphers);
        assert_eq!(message.digest_capabilities, config.digests);
    }
}
