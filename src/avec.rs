//! Convenience drivers for common deframing patterns.
//!
//! The functions in this module feed a [`Deframer`] from slices, iterators,
//! and readers, publishing completed packets to a [`Sink`]. Discarded frames
//! are logged and counted in the returned [`Summary`], and never interrupt
//! deframing.

pub mod encode;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

pub use encode::encode;
#[cfg(feature = "std")]
pub use reader::process as process_reader;
pub use slice::{process as process_slice, process_bits};

#[cfg(feature = "std")]
extern crate std;

use either::Either::{self, Left, Right};
use tracing::{debug, trace};

use crate::sans::{
    Deframer, Discard,
    bit::TaggedBit,
    header::{HeaderDecoder, HeaderError},
};

/// Receive completed packets.
///
/// Each packet is delivered exactly once, in completion order, as its payload
/// bytes alongside the declared length. The bytes are borrowed from the
/// deframer and must be copied to be kept.
///
/// Closures taking `(&[u8], usize)` implement this trait, as does
/// [`Either`] over two sinks.
pub trait Sink {
    /// Deliver a completed packet.
    fn deliver(&mut self, bytes: &[u8], length: usize);
}

impl<F: FnMut(&[u8], usize)> Sink for F {
    fn deliver(&mut self, bytes: &[u8], length: usize) {
        self(bytes, length)
    }
}

impl<L: Sink, R: Sink> Sink for Either<L, R> {
    fn deliver(&mut self, bytes: &[u8], length: usize) {
        match self {
            Left(o) => o.deliver(bytes, length),
            Right(o) => o.deliver(bytes, length),
        }
    }
}

#[cfg(feature = "std")]
impl Sink for std::vec::Vec<std::vec::Vec<u8>> {
    fn deliver(&mut self, bytes: &[u8], _: usize) {
        self.push(bytes.to_vec());
    }
}

/// Counts of packets delivered and frames discarded by a driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Packets delivered to the sink.
    pub packets: usize,
    /// Headers rejected on a tied majority vote.
    pub ambiguous: usize,
    /// Headers rejected on differing repeated shorts.
    pub mismatched: usize,
    /// Headers declaring a payload larger than the packet buffer.
    pub oversized: usize,
    /// Frames abandoned for a new frame start.
    pub preempted: usize,
}

impl Summary {
    /// Total number of frames discarded.
    pub fn discarded(&self) -> usize {
        self.ambiguous + self.mismatched + self.oversized + self.preempted
    }

    fn record(&mut self, discard: &Discard) {
        match discard {
            Discard::Header(HeaderError::Ambiguous) => self.ambiguous += 1,
            Discard::Header(HeaderError::Mismatch { .. }) => self.mismatched += 1,
            Discard::PacketTooLarge { .. } => self.oversized += 1,
            Discard::Preempted { .. } => self.preempted += 1,
        }
    }
}

impl core::ops::AddAssign for Summary {
    fn add_assign(&mut self, rhs: Self) {
        self.packets += rhs.packets;
        self.ambiguous += rhs.ambiguous;
        self.mismatched += rhs.mismatched;
        self.oversized += rhs.oversized;
        self.preempted += rhs.preempted;
    }
}

/// Advance a deframer by one bit, publishing to a sink and counting the
/// outcome.
fn step<D: HeaderDecoder, const N: usize>(
    deframer: &mut Deframer<D, N>,
    bit: TaggedBit,
    o: &mut impl Sink,
    s: &mut Summary,
) {
    match deframer.advance(bit) {
        Ok(Some(packet)) => {
            debug!(
                length = packet.len(),
                whitener_offset = packet.whitener_offset(),
                "delivering packet"
            );
            o.deliver(packet.payload(), packet.len());
            s.packets += 1;
        }
        Ok(None) => {}
        Err(discard @ Discard::Preempted { .. }) => {
            trace!(%discard, "discarded frame");
            s.record(&discard);
        }
        Err(discard) => {
            debug!(%discard, "discarded frame");
            s.record(&discard);
        }
    }
}
