// ============================================
// File: crates/tunwire-core/src/osi/checksum.rs
// ============================================
//! # Internet Checksum
//!
//! ## Creation Reason
//! Packets coming off the tunnel device carry RFC 1071 checksums that
//! must be verified or recomputed, often over a pseudo-header and a
//! payload that live in different buffers.
//!
//! ## Main Functionality
//! - `ChecksumAccumulator`: Incremental one's-complement sum fed chunk
//!   by chunk, finalized once
//!
//! ## Algorithm
//! ```text
//! bytes:  b0 b1 | b2 b3 | ... | bn-1 [pad 00]
//! words:  (b0<<8|b1) + (b2<<8|b3) + ...        (32-bit accumulator)
//! fold:   sum = (sum & 0xFFFF) + (sum >> 16)    until sum <= 0xFFFF
//! result: !sum
//! ```
//! Words are read in network byte order, so the result is too: write it
//! back with `to_be_bytes`.
//!
//! ## ⚠️ Important Note for Next Developer
//! - A chunk ending on an odd byte leaves that byte pending; it pairs
//!   with the first byte of the next chunk, so chunk ORDER matters
//! - `compute` consumes the accumulator
//!
//! ## Last Modified
//! v0.1.0 - Initial implementation

// ============================================
// ChecksumAccumulator
// ============================================

/// Streaming RFC 1071 checksum.
///
/// One instance per computation; it is `Send` but not meant to be
/// shared, and `compute` takes it by value.
///
/// # Example
/// ```
/// use tunwire_core::osi::ChecksumAccumulator;
///
/// let mut split = ChecksumAccumulator::new();
/// split.update(&[0x12]);
/// split.update(&[0x34, 0x56]);
///
/// assert_eq!(split.compute(), ChecksumAccumulator::checksum(&[0x12, 0x34, 0x56]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ChecksumAccumulator {
    /// Running sum, folded to 16 bits after every update.
    accumulator: u32,
    /// Trailing byte of the previous chunk, waiting for its low half.
    pending_odd_byte: Option<u8>,
}

impl ChecksumAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accumulator: 0,
            pending_odd_byte: None,
        }
    }

    /// Checksums a single contiguous buffer.
    #[must_use]
    pub fn checksum(bytes: &[u8]) -> u16 {
        let mut acc = Self::new();
        acc.update(bytes);
        acc.compute()
    }

    /// Folds `chunk` into the running sum.
    ///
    /// Empty chunks are a no-op. An odd trailing byte is kept for the
    /// next call.
    pub fn update(&mut self, chunk: &[u8]) {
        let mut rest = chunk;

        if let Some(high) = self.pending_odd_byte {
            let Some((&low, tail)) = rest.split_first() else {
                return;
            };
            self.add_word(u16::from_be_bytes([high, low]));
            self.pending_odd_byte = None;
            rest = tail;
        }

        // Wide local sum: a chunk of up to 2^32 words cannot overflow it.
        let mut words = rest.chunks_exact(2);
        let sum: u64 = words
            .by_ref()
            .map(|pair| u64::from(u16::from_be_bytes([pair[0], pair[1]])))
            .sum();
        self.add_folded(sum);

        if let [last] = words.remainder() {
            self.pending_odd_byte = Some(*last);
        }
    }

    /// Finalizes the checksum.
    ///
    /// A pending odd byte is padded with a zero low byte. The folded sum
    /// is complemented and returned in network byte order.
    #[must_use]
    pub fn compute(mut self) -> u16 {
        if let Some(high) = self.pending_odd_byte.take() {
            self.add_word(u16::from_be_bytes([high, 0]));
        }
        !fold(u64::from(self.accumulator))
    }

    fn add_word(&mut self, word: u16) {
        self.add_folded(u64::from(word));
    }

    fn add_folded(&mut self, sum: u64) {
        self.accumulator = u32::from(fold(u64::from(self.accumulator) + sum));
    }
}

/// End-around carry folding down to 16 bits.
fn fold(mut sum: u64) -> u16 {
    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    // Loop exit guarantees the value fits.
    sum as u16
}

// ============================================
// Tests
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// IPv4 header from RFC 1071 discussions, checksum field = 0xB861.
    const SAMPLE_HEADER: [u8; 20] = [
        0x45, 0x00, 0x00, 0x73, 0x00, 0x00, 0x40, 0x00, 0x40, 0x11, 0xB8, 0x61, 0xC0, 0xA8,
        0x00, 0x01, 0xC0, 0xA8, 0x00, 0xC7,
    ];

    #[test]
    fn test_empty_input() {
        assert_eq!(ChecksumAccumulator::new().compute(), 0xFFFF);
    }

    #[test]
    fn test_all_zero_even_buffer() {
        assert_eq!(ChecksumAccumulator::checksum(&[0u8; 64]), 0xFFFF);
    }

    #[test]
    fn test_known_header_checksum() {
        let mut header = SAMPLE_HEADER;
        header[10] = 0;
        header[11] = 0;
        assert_eq!(ChecksumAccumulator::checksum(&header), 0xB861);
    }

    #[test]
    fn test_buffer_with_checksum_sums_to_zero() {
        assert_eq!(ChecksumAccumulator::checksum(&SAMPLE_HEADER), 0);
    }

    #[test]
    fn test_odd_split_matches_single_update() {
        let whole = ChecksumAccumulator::checksum(&[0x12, 0x34, 0x56]);

        let mut split = ChecksumAccumulator::new();
        split.update(&[0x12]);
        split.update(&[0x34, 0x56]);
        assert_eq!(split.compute(), whole);

        // 0x1234 + 0x5600 = 0x6834
        assert_eq!(whole, !0x6834);
    }

    #[test]
    fn test_pending_zero_byte_is_threaded() {
        let whole = ChecksumAccumulator::checksum(&[0x00, 0xAB, 0xCD]);

        let mut split = ChecksumAccumulator::new();
        split.update(&[0x00]);
        split.update(&[0xAB]);
        split.update(&[0xCD]);
        assert_eq!(split.compute(), whole);
    }

    #[test]
    fn test_empty_chunk_keeps_pending_byte() {
        let mut split = ChecksumAccumulator::new();
        split.update(&[0x12]);
        split.update(&[]);
        split.update(&[0x34]);
        assert_eq!(split.compute(), ChecksumAccumulator::checksum(&[0x12, 0x34]));
    }

    #[test]
    fn test_carry_folding() {
        // 0xFFFF * 3 = 0x2FFFD -> 0xFFFF -> complement 0
        assert_eq!(ChecksumAccumulator::checksum(&[0xFF; 6]), 0x0000);
        assert_eq!(ChecksumAccumulator::checksum(&[0x80, 0x00, 0x80, 0x00]), !0x0001);
    }

    proptest! {
        #[test]
        fn prop_split_point_does_not_matter(
            data in proptest::collection::vec(any::<u8>(), 0..512),
            cuts in proptest::collection::vec(any::<usize>(), 0..8),
        ) {
            let whole = ChecksumAccumulator::checksum(&data);

            let mut points: Vec<usize> = cuts.iter().map(|c| c % (data.len() + 1)).collect();
            points.sort_unstable();

            let mut acc = ChecksumAccumulator::new();
            let mut start = 0;
            for point in points {
                acc.update(&data[start..point]);
                start = point;
            }
            acc.update(&data[start..]);

            prop_assert_eq!(acc.compute(), whole);
        }

        #[test]
        fn prop_appending_checksum_verifies(
            data in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let mut even = data.clone();
            if even.len() % 2 == 1 {
                even.push(0);
            }
            let sum = ChecksumAccumulator::checksum(&even);
            even.extend_from_slice(&sum.to_be_bytes());
            prop_assert_eq!(ChecksumAccumulator::checksum(&even), 0);
        }
    }
}
