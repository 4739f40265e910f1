// ============================================
// File: crates/tunwire-core/src/lib.rs
// ============================================
//! # Tunwire Core - Packet Integrity & Handshake Codec
//!
//! ## Creation Reason
//! Holds the byte-level pieces of the tunnel that interpret untrusted
//! buffers: the Internet checksum used on tunneled packets, and the
//! capability handshake message exchanged when a session is set up.
//!
//! ## Main Functionality
//!
//! ### OSI Module ([`osi`])
//! - `ChecksumAccumulator`: streaming RFC 1071 checksum
//! - IPv4 header and UDP pseudo-header checksum helpers
//!
//! ### Protocol Module ([`protocol`])
//! - `CapabilityHandshake`: borrowed view + encoder
//! - `CipherAlgorithm` / `DigestAlgorithm` identifiers
//!
//! ### Config Module ([`config`])
//! - `CapabilityConfig`: locally advertised preferences from TOML
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │        session layer / transport (external)         │
//! │                       │                             │
//! │                       ▼                             │
//! │                 tunwire-core  ◄── You are here      │
//! │                       │                             │
//! │                       ▼                             │
//! │                tunwire-common                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Nothing here performs I/O on the network or generates entropy
//! - Every failure is returned to the caller; nothing is swallowed
//! - Protocol changes MUST keep the wire layout byte-compatible
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod osi;
pub mod protocol;

// Re-export commonly used items
pub use config::CapabilityConfig;
pub use error::{CoreError, Result};
pub use osi::ChecksumAccumulator;
pub use protocol::{
    CapabilityHandshake, CipherAlgorithm, DigestAlgorithm, OwnedCapabilityHandshake,
    MIN_BODY_LENGTH,
};
