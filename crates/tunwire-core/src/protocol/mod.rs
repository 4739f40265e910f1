// ============================================
// File: crates/tunwire-core/src/protocol/mod.rs
// ============================================
//! # Protocol Module
//!
//! ## Creation Reason
//! Defines the session-establishment messages exchanged in clear before
//! any key material exists, and the algorithm identifiers they carry.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`algorithms`]: Cipher and digest identifiers, preference selection
//! - [`handshake`]: Capability handshake view, encoder and owned copy
//!
//! ## Protocol Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Session Establishment                      │
//! │                                                             │
//! │  Peer A ── CapabilityHandshake (40 + N + M bytes) ──► Peer B│
//! │           session number, challenge, ciphers, digests       │
//! │                                                             │
//! │  Peer B picks the first of its preferences Peer A offers    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format Principles
//! - Big-endian (network) byte order for multi-byte integers
//! - Variable lists are prefixed by a 16-bit count
//! - No padding or alignment requirements
//!
//! ## Last Modified
//! v0.1.0 - Initial protocol definitions

pub mod algorithms;
pub mod handshake;

// Re-export primary types
pub use algorithms::{CipherAlgorithm, DigestAlgorithm};
pub use handshake::{CapabilityHandshake, OwnedCapabilityHandshake, MIN_BODY_LENGTH};
