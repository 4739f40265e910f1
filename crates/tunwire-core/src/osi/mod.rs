// ============================================
// File: crates/tunwire-core/src/osi/mod.rs
// ============================================
//! # OSI Packet Integrity Module
//!
//! ## Creation Reason
//! Groups the network-layer integrity primitives applied to raw packets
//! read from, or written to, the tunnel device.
//!
//! ## Main Functionality
//!
//! ### Submodules
//! - [`checksum`]: Streaming RFC 1071 Internet checksum
//! - [`ipv4`]: IPv4 header and UDP pseudo-header checksum helpers
//!
//! ## ⚠️ Important Note for Next Developer
//! - Checksums are computed over big-endian words; store results with
//!   `to_be_bytes`
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

pub mod checksum;
pub mod ipv4;

// Re-export primary types at module level
pub use checksum::ChecksumAccumulator;
