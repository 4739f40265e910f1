// ============================================
// File: crates/tunwire-common/src/lib.rs
// ============================================
//! # Tunwire Common - Shared Wire Primitives
//!
//! ## Creation Reason
//! Provides the leaf-level types every tunwire crate relies on when it
//! touches bytes that came from, or are going to, an untrusted peer.
//!
//! ## Main Functionality
//! - [`error`]: Common error types and result aliases
//! - [`types`]: Fixed-size protocol values (`SessionNumber`, `Challenge`)
//! - [`wire`]: Bounds-checked big-endian cursors over borrowed buffers
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                  tunwire-core                       │
//! │        (checksum, handshake codec, config)          │
//! │                       │                             │
//! │                       ▼                             │
//! │               tunwire-common  ◄── You are here      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - Every read or write of a caller buffer goes through [`wire`]
//! - All multi-byte integers on the wire are big-endian
//! - Keep dependencies minimal
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod types;
pub mod wire;

// Re-export commonly used items at crate root
pub use error::{CommonError, Result};
pub use types::{Challenge, SessionNumber, CHALLENGE_SIZE};
pub use wire::{WireReader, WireWriter};
