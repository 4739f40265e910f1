// ============================================
// File: crates/tunwire-core/src/protocol/handshake.rs
// ============================================
//! # Capability Handshake Message
//!
//! ## Creation Reason
//! The first message of session establishment advertises which ciphers
//! and digests the sender supports, in preference order, together with
//! a session number and a fresh challenge. It arrives before any key
//! material exists, so every length in it is attacker-controlled.
//!
//! ## Main Functionality
//! - `CapabilityHandshake`: Borrowed, validated view over received bytes
//! - `CapabilityHandshake::encode`: Serializes into a caller buffer
//! - `OwnedCapabilityHandshake`: Owned copy that can outlive the buffer
//!
//! ## Wire Format (Big Endian)
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ session_number (4 bytes)       │ u32 BE      │  0
//! ├──────────────────────────────────────────────┤
//! │ challenge (32 bytes)           │ random      │  4
//! ├──────────────────────────────────────────────┤
//! │ cipher_count (2 bytes)         │ N, u16 BE   │  36
//! ├──────────────────────────────────────────────┤
//! │ cipher_capabilities (N bytes)  │ 1 byte each │  38
//! ├──────────────────────────────────────────────┤
//! │ digest_count (2 bytes)         │ M, u16 BE   │  38 + N
//! ├──────────────────────────────────────────────┤
//! │ digest_capabilities (M bytes)  │ 1 byte each │  40 + N
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Parsing Strategy
//! 1. Check the fixed part (`MIN_BODY_LENGTH`)
//! 2. Read `cipher_count`, check the buffer holds the cipher list
//! 3. Read `digest_count`, check the buffer holds the digest list
//!
//! Identifiers are not range-checked; unknown ones are surfaced as-is.
//!
//! ## ⚠️ Important Note for Next Developer
//! - Field order is critical - DO NOT reorder
//! - Encode validates everything before the first byte is written
//! - Bytes after the digest list belong to the caller's framing
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

use bytes::BytesMut;
use tracing::{debug, trace};

use tunwire_common::types::{Challenge, SessionNumber, CHALLENGE_SIZE, SESSION_NUMBER_SIZE};
use tunwire_common::wire::{WireReader, WireWriter};

use crate::error::{CoreError, Result};
use crate::protocol::algorithms::{CipherAlgorithm, DigestAlgorithm};

// ============================================
// Constants
// ============================================

/// Size of each capability count field.
const COUNT_FIELD_SIZE: usize = 2;

/// Size of a message with two empty capability lists.
pub const MIN_BODY_LENGTH: usize =
    SESSION_NUMBER_SIZE + CHALLENGE_SIZE + COUNT_FIELD_SIZE + COUNT_FIELD_SIZE;

/// Largest number of entries a capability list can hold.
pub const MAX_CAPABILITIES: usize = u16::MAX as usize;

/// Encoded size of a message with the given list lengths.
#[must_use]
pub const fn encoded_len(cipher_count: usize, digest_count: usize) -> usize {
    MIN_BODY_LENGTH + cipher_count + digest_count
}

// ============================================
// CapabilityHandshake
// ============================================

/// Read-only view over a received capability handshake.
///
/// The view borrows the caller's buffer for `'a`; it cannot outlive it,
/// and the buffer cannot be mutated while the view exists. Use
/// [`CapabilityHandshake::to_owned_message`] to keep the fields longer.
///
/// # Example
/// ```
/// use tunwire_common::{Challenge, SessionNumber};
/// use tunwire_core::protocol::{CapabilityHandshake, CipherAlgorithm, DigestAlgorithm};
///
/// let mut buf = [0u8; 64];
/// let len = CapabilityHandshake::encode(
///     &mut buf,
///     SessionNumber::new(7),
///     &Challenge::new([0xAA; 32]),
///     &[CipherAlgorithm::AES256_GCM],
///     &[DigestAlgorithm::SHA256],
/// )
/// .unwrap();
///
/// let message = CapabilityHandshake::parse(&buf[..len]).unwrap();
/// assert_eq!(message.session_number(), SessionNumber::new(7));
/// assert_eq!(message.cipher_capabilities(), vec![CipherAlgorithm::AES256_GCM]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CapabilityHandshake<'a> {
    /// Exactly the message bytes, without trailing data.
    raw: &'a [u8],
    session_number: SessionNumber,
    challenge: &'a [u8; CHALLENGE_SIZE],
    ciphers: &'a [u8],
    digests: &'a [u8],
}

impl<'a> CapabilityHandshake<'a> {
    /// Validates `buf` and builds a view over it.
    ///
    /// # Errors
    /// Returns `MessageTooShort`, naming the failed checkpoint, if the
    /// buffer cannot hold the fixed fields, the cipher list, or the
    /// digest list. Nothing past `buf.len()` is ever read.
    pub fn parse(buf: &'a [u8]) -> Result<Self> {
        let actual = buf.len();
        if actual < MIN_BODY_LENGTH {
            debug!(
                expected = MIN_BODY_LENGTH,
                actual,
                checkpoint = "header",
                "Rejected capability handshake"
            );
            return Err(CoreError::too_short("header", MIN_BODY_LENGTH, actual));
        }

        let mut reader = WireReader::new(buf);
        let session_number = SessionNumber::new(reader.read_u32_be()?);
        let challenge = reader.read_array_ref::<CHALLENGE_SIZE>()?;

        let cipher_count = usize::from(reader.read_u16_be()?);
        let with_ciphers = encoded_len(cipher_count, 0);
        if actual < with_ciphers {
            debug!(
                expected = with_ciphers,
                actual,
                checkpoint = "cipher capabilities",
                "Rejected capability handshake"
            );
            return Err(CoreError::too_short("cipher capabilities", with_ciphers, actual));
        }
        let ciphers = reader.read_bytes(cipher_count)?;

        let digest_count = usize::from(reader.read_u16_be()?);
        let total = encoded_len(cipher_count, digest_count);
        if actual < total {
            debug!(
                expected = total,
                actual,
                checkpoint = "digest capabilities",
                "Rejected capability handshake"
            );
            return Err(CoreError::too_short("digest capabilities", total, actual));
        }
        let digests = reader.read_bytes(digest_count)?;

        trace!(
            session_number = %session_number,
            ciphers = cipher_count,
            digests = digest_count,
            len = total,
            "Capability handshake parsed"
        );

        Ok(Self {
            raw: &buf[..total],
            session_number,
            challenge,
            ciphers,
            digests,
        })
    }

    /// Serializes a handshake into `buf`, returning the bytes written.
    ///
    /// Writes exactly [`encoded_len`] bytes at the start of `buf`; the
    /// rest of the buffer is untouched.
    ///
    /// # Errors
    /// - `CapabilityListTooLong` if a list exceeds [`MAX_CAPABILITIES`]
    /// - `BufferTooSmall` if `buf` cannot hold the message
    ///
    /// On error `buf` is left unmodified.
    pub fn encode(
        buf: &mut [u8],
        session_number: SessionNumber,
        challenge: &Challenge,
        cipher_capabilities: &[CipherAlgorithm],
        digest_capabilities: &[DigestAlgorithm],
    ) -> Result<usize> {
        let cipher_count = count_field("cipher capabilities", cipher_capabilities.len())?;
        let digest_count = count_field("digest capabilities", digest_capabilities.len())?;

        let required = encoded_len(cipher_capabilities.len(), digest_capabilities.len());
        if buf.len() < required {
            debug!(required, capacity = buf.len(), "Capability handshake does not fit");
            return Err(CoreError::buffer_too_small(required, buf.len()));
        }

        let mut writer = WireWriter::new(&mut buf[..required]);
        writer.put_u32_be(session_number.value())?;
        writer.put_slice(challenge.as_bytes())?;
        writer.put_u16_be(cipher_count)?;
        writer.put_bytes_from(cipher_capabilities.iter().map(CipherAlgorithm::as_byte))?;
        writer.put_u16_be(digest_count)?;
        writer.put_bytes_from(digest_capabilities.iter().map(DigestAlgorithm::as_byte))?;

        trace!(
            session_number = %session_number,
            ciphers = cipher_capabilities.len(),
            digests = digest_capabilities.len(),
            len = required,
            "Capability handshake encoded"
        );

        Ok(writer.written())
    }

    /// Session number, host order.
    #[must_use]
    pub const fn session_number(&self) -> SessionNumber {
        self.session_number
    }

    /// Copy of the challenge.
    #[must_use]
    pub fn challenge(&self) -> Challenge {
        Challenge::new(*self.challenge)
    }

    /// Cipher identifiers in the sender's preference order.
    #[must_use]
    pub fn cipher_capabilities(&self) -> Vec<CipherAlgorithm> {
        self.ciphers().collect()
    }

    /// Digest identifiers in the sender's preference order.
    #[must_use]
    pub fn digest_capabilities(&self) -> Vec<DigestAlgorithm> {
        self.digests().collect()
    }

    /// Iterates cipher identifiers without allocating.
    pub fn ciphers(&self) -> impl ExactSizeIterator<Item = CipherAlgorithm> + 'a {
        let ciphers = self.ciphers;
        ciphers.iter().copied().map(CipherAlgorithm::from_byte)
    }

    /// Iterates digest identifiers without allocating.
    pub fn digests(&self) -> impl ExactSizeIterator<Item = DigestAlgorithm> + 'a {
        let digests = self.digests;
        digests.iter().copied().map(DigestAlgorithm::from_byte)
    }

    /// Number of bytes the message occupies in the buffer.
    #[must_use]
    pub const fn wire_len(&self) -> usize {
        self.raw.len()
    }

    /// The message bytes, without any trailing data.
    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.raw
    }

    /// Copies every field out of the borrowed buffer.
    #[must_use]
    pub fn to_owned_message(&self) -> OwnedCapabilityHandshake {
        OwnedCapabilityHandshake {
            session_number: self.session_number,
            challenge: self.challenge(),
            cipher_capabilities: self.cipher_capabilities(),
            digest_capabilities: self.digest_capabilities(),
        }
    }
}

/// Converts a list length to its wire count.
fn count_field(list: &'static str, len: usize) -> Result<u16> {
    u16::try_from(len).map_err(|_| {
        debug!(list, len, "Capability list too long");
        CoreError::CapabilityListTooLong {
            list,
            len,
            max: MAX_CAPABILITIES,
        }
    })
}

// ============================================
// OwnedCapabilityHandshake
// ============================================

/// Owned capability handshake, detached from any buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedCapabilityHandshake {
    /// Session establishment attempt number.
    pub session_number: SessionNumber,
    /// Sender's challenge.
    pub challenge: Challenge,
    /// Ciphers in preference order.
    pub cipher_capabilities: Vec<CipherAlgorithm>,
    /// Digests in preference order.
    pub digest_capabilities: Vec<DigestAlgorithm>,
}

impl OwnedCapabilityHandshake {
    /// Returns the encoded size of this message.
    #[must_use]
    pub fn wire_size(&self) -> usize {
        encoded_len(self.cipher_capabilities.len(), self.digest_capabilities.len())
    }

    /// Encodes into `buf`; see [`CapabilityHandshake::encode`].
    ///
    /// # Errors
    /// Same as [`CapabilityHandshake::encode`].
    pub fn encode_into(&self, buf: &mut [u8]) -> Result<usize> {
        CapabilityHandshake::encode(
            buf,
            self.session_number,
            &self.challenge,
            &self.cipher_capabilities,
            &self.digest_capabilities,
        )
    }

    /// Encodes into a freshly allocated buffer of exactly `wire_size` bytes.
    ///
    /// # Errors
    /// Returns `CapabilityListTooLong` if a list exceeds [`MAX_CAPABILITIES`].
    pub fn to_bytes(&self) -> Result<BytesMut> {
        let mut buf = BytesMut::zeroed(self.wire_size());
        self.encode_into(&mut buf)?;
        Ok(buf)
    }
}

impl From<CapabilityHandshake<'_>> for OwnedCapabilityHandshake {
    fn from(view: CapabilityHandshake<'_>) -> Self {
        view.to_owned_message()
    }
}

// ============================================
// Tests
// ============================================
