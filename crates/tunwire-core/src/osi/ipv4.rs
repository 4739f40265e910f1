// ============================================
// File: crates/tunwire-core/src/osi/ipv4.rs
// ============================================
//! # IPv4 Checksum Helpers
//!
//! ## Creation Reason
//! The tunnel rewrites and synthesizes IPv4/UDP packets, which means
//! both the header checksum and the UDP checksum (over a pseudo-header
//! that is never on the wire) have to be computed and checked.
//!
//! ## Main Functionality
//! - `header_checksum`: Checksum of an IPv4 header, ignoring its
//!   current checksum field
//! - `verify_header`: Whether a received header sums to zero
//! - `write_header_checksum`: Recomputes and stores the header checksum
//! - `udp_checksum`: UDP checksum including the IPv4 pseudo-header
//!
//! ## IPv4 Header Layout (checksum-relevant fields)
//! ```text
//! ┌─────────┬─────────┬───────────────┬─────────────┐
//! │ ver|IHL │   TOS   │ total length  │     ...     │  0..8
//! ├─────────┴─────────┼───────────────┼─────────────┤
//! │  TTL    | proto   │   checksum    │  (10..12)   │  8..12
//! ├───────────────────┴───────────────┴─────────────┤
//! │ source address (12..16) │ dest address (16..20) │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

use std::net::Ipv4Addr;

use tracing::debug;
use tunwire_common::wire::{WireReader, WireWriter};

use crate::error::{CoreError, Result};
use crate::osi::checksum::ChecksumAccumulator;

// ============================================
// Constants
// ============================================

/// Minimum IPv4 header size.
pub const IPV4_HEADER_MIN_SIZE: usize = 20;

/// Offset of the header checksum field.
pub const IPV4_CHECKSUM_OFFSET: usize = 10;

/// UDP header size.
pub const UDP_HEADER_SIZE: usize = 8;

/// Offset of the checksum inside a UDP header.
pub const UDP_CHECKSUM_OFFSET: usize = 6;

/// IP protocol number for UDP.
pub const IPPROTO_UDP: u8 = 17;

// ============================================
// Header Checksum
// ============================================

/// Returns the option-inclusive header length declared by the IHL field.
///
/// # Errors
/// - `MalformedPacket` if the version is not 4 or IHL is below 5
/// - `MessageTooShort` if the buffer is shorter than the declared header
pub fn header_len(packet: &[u8]) -> Result<usize> {
    let first = WireReader::new(packet)
        .read_u8()
        .map_err(|_| CoreError::too_short("ipv4 header", IPV4_HEADER_MIN_SIZE, packet.len()))?;

    let version = first >> 4;
    if version != 4 {
        return Err(CoreError::malformed(format!("Expected IPv4, got version {version}")));
    }

    let len = usize::from(first & 0x0F) * 4;
    if len < IPV4_HEADER_MIN_SIZE {
        return Err(CoreError::malformed(format!("IHL too small: {len} bytes")));
    }
    if packet.len() < len {
        debug!(expected = len, actual = packet.len(), "Truncated IPv4 header");
        return Err(CoreError::too_short("ipv4 header", len, packet.len()));
    }
    Ok(len)
}

/// Computes the header checksum, treating the checksum field as zero.
///
/// # Errors
/// See [`header_len`].
pub fn header_checksum(packet: &[u8]) -> Result<u16> {
    let len = header_len(packet)?;
    let header = &packet[..len];

    let mut acc = ChecksumAccumulator::new();
    acc.update(&header[..IPV4_CHECKSUM_OFFSET]);
    acc.update(&header[IPV4_CHECKSUM_OFFSET + 2..]);
    Ok(acc.compute())
}

/// Checks that a received header, checksum field included, sums to zero.
///
/// # Errors
/// See [`header_len`].
pub fn verify_header(packet: &[u8]) -> Result<bool> {
    let len = header_len(packet)?;
    Ok(ChecksumAccumulator::checksum(&packet[..len]) == 0)
}

/// Recomputes the header checksum and stores it in place.
///
/// # Errors
/// See [`header_len`].
pub fn write_header_checksum(packet: &mut [u8]) -> Result<u16> {
    let checksum = header_checksum(packet)?;
    let mut writer = WireWriter::new(&mut packet[IPV4_CHECKSUM_OFFSET..]);
    writer.put_u16_be(checksum)?;
    Ok(checksum)
}

// ============================================
// UDP Checksum
// ============================================

/// Computes the UDP checksum of `segment` (UDP header + payload).
///
/// The pseudo-header and the segment are fed as separate chunks; the
/// segment's own checksum field is skipped. A zero result is returned
/// as `0xFFFF`, since zero on the wire means "no checksum".
///
/// # Errors
/// - `MessageTooShort` if `segment` is shorter than a UDP header
/// - `MalformedPacket` if the segment does not fit a 16-bit length
pub fn udp_checksum(source: Ipv4Addr, destination: Ipv4Addr, segment: &[u8]) -> Result<u16> {
    if segment.len() < UDP_HEADER_SIZE {
        return Err(CoreError::too_short("udp header", UDP_HEADER_SIZE, segment.len()));
    }
    let udp_len = u16::try_from(segment.len())
        .map_err(|_| CoreError::malformed(format!("UDP segment too long: {}", segment.len())))?;

    let mut pseudo = [0u8; 12];
    let mut writer = WireWriter::new(&mut pseudo);
    writer.put_slice(&source.octets())?;
    writer.put_slice(&destination.octets())?;
    writer.put_u8(0)?;
    writer.put_u8(IPPROTO_UDP)?;
    writer.put_u16_be(udp_len)?;

    let mut acc = ChecksumAccumulator::new();
    acc.update(&pseudo);
    acc.update(&segment[..UDP_CHECKSUM_OFFSET]);
    acc.update(&segment[UDP_CHECKSUM_OFFSET + 2..]);

    Ok(match acc.compute() {
        0 => 0xFFFF,
        sum => sum,
    })
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Vec<u8> {
        vec![
            0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0xB8, 0x61, 0xC0, 0xA8,
            0x00, 0x01, 0xC0, 0xA8, 0x00, 0xC7,
        ]
    }

    #[test]
    fn test_header_checksum_ignores_current_field() {
        let mut header = sample_header();
        assert_eq!(header_checksum(&header).unwrap(), 0xB861);

        header[10] = 0xDE;
        header[11] = 0xAD;
        assert_eq!(header_checksum(&header).unwrap(), 0xB861);
        assert!(!verify_header(&header).unwrap());
    }

    #[test]
    fn test_write_then_verify() {
        let mut header = sample_header();
        header[8] = 0x3F; // TTL decremented
        assert!(!verify_header(&header).unwrap());

        let written = write_header_checksum(&mut header).unwrap();
        assert_eq!(u16::from_be_bytes([header[10], header[11]]), written);
        assert!(verify_header(&header).unwrap());
    }

    #[test]
    fn test_header_with_options() {
        let mut packet = sample_header();
        packet[0] = 0x46; // IHL 6
        packet.extend_from_slice(&[0x01, 0x01, 0x01, 0x00]);
        packet.extend_from_slice(b"payload not in header");

        assert_eq!(header_len(&packet).unwrap(), 24);
        write_header_checksum(&mut packet).unwrap();
        assert!(verify_header(&packet).unwrap());
    }

    #[test]
    fn test_header_rejects_bad_input() {
        assert!(matches!(header_checksum(&[]), Err(CoreError::MessageTooShort { .. })));

        let mut v6 = sample_header();
        v6[0] = 0x60;
        assert!(matches!(
            header_checksum(&v6),
            Err(CoreError::MalformedPacket { .. })
        ));

        let mut tiny_ihl = sample_header();
        tiny_ihl[0] = 0x44;
        assert!(header_checksum(&tiny_ihl).is_err());

        let header = sample_header();
        assert!(matches!(
            verify_header(&header[..19]),
            Err(CoreError::MessageTooShort { expected: 20, actual: 19, .. })
        ));
    }

    #[test]
    fn test_udp_checksum_roundtrip() {
        let src = Ipv4Addr::new(192, 168, 0, 1);
        let dst = Ipv4Addr::new(192, 168, 0, 199);

        // src port 1234, dst port 53, length 13, checksum placeholder
        let mut segment = vec![0x04, 0xD2, 0x00, 0x35, 0x00, 0x0D, 0x00, 0x00];
        segment.extend_from_slice(b"hello");

        let checksum = udp_checksum(src, dst, &segment).unwrap();
        segment[6..8].copy_from_slice(&checksum.to_be_bytes());

        // Verifying over pseudo-header + full segment yields zero.
        let mut acc = ChecksumAccumulator::new();
        acc.update(&src.octets());
        acc.update(&dst.octets());
        acc.update(&[0, IPPROTO_UDP, 0x00, 0x0D]);
        acc.update(&segment);
        assert_eq!(acc.compute(), 0);

        // Placeholder value must not influence the result.
        assert_eq!(udp_checksum(src, dst, &segment).unwrap(), checksum);
    }

    #[test]
    fn test_udp_checksum_short_segment() {
        let addr = Ipv4Addr::LOCALHOST;
        assert!(matches!(
            udp_checksum(addr, addr, &[0u8; 7]),
            Err(CoreError::MessageTooShort { .. })
        ));
    }
}
