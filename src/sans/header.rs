//! Header accumulation and decoding.

use core::cmp::Ordering;

use tartan_bitfield::bitfield;
use thiserror::Error;

use super::check::{VOTE_BITS, voted_weight};

/// Number of bits in a header.
pub const HEADER_BITS: u8 = 32;

bitfield! {
    struct Layout(u32) {
        [0..12] low_length: u16,
        [12..16] low_offset: u8,
        [16..28] high_length: u16,
        [28..32] high_offset: u8,
    }
}

/// A 32-bit header, as received or as decoded.
///
/// A header holds two 16-bit shorts, each carrying a 12-bit payload length in
/// its low bits and a 4-bit whitener offset in its high bits. A transmitter
/// repeats the same short twice, and the redundancy is removed by a
/// [`HeaderDecoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderValue(pub u32);

impl HeaderValue {
    /// The header sent with request packets.
    pub const REQUEST: Self = Self(0x0000_0000);
    /// The header sent with data packets.
    pub const DATA: Self = Self(0xFFFF_FFFF);

    /// Build a header repeating a payload length and whitener offset in both
    /// shorts.
    ///
    /// The length is truncated to 12 bits, and the offset to 4 bits.
    pub fn repeated(length: u16, offset: u8) -> Self {
        let mut h = Layout(0);
        h.set_low_length(length & 0x0FFF);
        h.set_low_offset(offset & 0x0F);
        h.set_high_length(length & 0x0FFF);
        h.set_high_offset(offset & 0x0F);
        Self(h.0)
    }

    /// The high 16-bit short.
    pub fn high(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// The low 16-bit short.
    pub fn low(self) -> u16 {
        self.0 as u16
    }

    /// The payload length, in bytes, held in the low 12 bits.
    pub fn payload_length(self) -> u16 {
        Layout(self.0).low_length()
    }

    /// The whitener offset held in the top 4 bits.
    pub fn whitener_offset(self) -> u8 {
        Layout(self.0).high_offset()
    }
}

/// An error decoding a header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// The majority vote was tied.
    #[error("Tied majority vote.")]
    Ambiguous,
    /// The repeated shorts differ.
    #[error("Repeated shorts differ ({high:#06x} and {low:#06x}).")]
    Mismatch { high: u16, low: u16 },
}

/// A policy recovering a header from its redundant encoding.
pub trait HeaderDecoder {
    /// Decode a received header, returning the value to extract payload fields
    /// from.
    fn decode(&self, raw: HeaderValue) -> Result<HeaderValue, HeaderError>;
}

/// Majority vote over the two length fields.
///
/// Counts the set bits among the 24 length bits of a header. Fewer than half
/// decodes to a request header, and more than half to a data header. A tie
/// cannot be decided and is rejected.
///
/// The decoded header is not reconstructed from the received bits: its payload
/// length is always [`MajorityVote::REQUEST_LENGTH`] or
/// [`MajorityVote::DATA_LENGTH`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityVote;

impl MajorityVote {
    /// Payload length decoded from a mostly clear header.
    pub const REQUEST_LENGTH: u16 = 5;
    /// Payload length decoded from a mostly set header.
    pub const DATA_LENGTH: u16 = 260;
}

impl HeaderDecoder for MajorityVote {
    fn decode(&self, raw: HeaderValue) -> Result<HeaderValue, HeaderError> {
        match voted_weight(raw.0).cmp(&(VOTE_BITS / 2)) {
            Ordering::Less => Ok(HeaderValue(Self::REQUEST_LENGTH as u32)),
            Ordering::Greater => Ok(HeaderValue(Self::DATA_LENGTH as u32)),
            Ordering::Equal => Err(HeaderError::Ambiguous),
        }
    }
}

/// Exact comparison of the two shorts.
///
/// A header is accepted only if both shorts are identical, and is then used
/// as received.
#[derive(Debug, Clone, Copy, Default)]
pub struct Repetition;

impl HeaderDecoder for Repetition {
    fn decode(&self, raw: HeaderValue) -> Result<HeaderValue, HeaderError> {
        let (high, low) = (raw.high(), raw.low());

        if high != low {
            Err(HeaderError::Mismatch { high, low })?;
        }

        Ok(raw)
    }
}

/// Shift register collecting header bits.
///
/// The most recent bit occupies the low position, so the first bit received
/// ends up most significant.
#[derive(Debug, Clone, Default)]
pub struct HeaderAccumulator {
    value: u32,
    count: u8,
}

impl HeaderAccumulator {
    /// Discard all accumulated bits.
    pub fn clear(&mut self) {
        self.value = 0;
        self.count = 0;
    }

    /// Shift a bit into the register.
    ///
    /// Returns the header once [`HEADER_BITS`] bits have been accumulated.
    pub fn shift(&mut self, bit: bool) -> Option<HeaderValue> {
        debug_assert!(self.count < HEADER_BITS);

        self.value = (self.value << 1) | bit as u32;
        self.count += 1;

        (self.count == HEADER_BITS).then_some(HeaderValue(self.value))
    }
}
