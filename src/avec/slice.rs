//! Slice-based driver implementation.

use crate::sans::{Deframer, bit::TaggedBit, header::HeaderDecoder};

use super::{Sink, Summary, step};

/// Deframe a slice of transport bytes, publishing packets to a sink.
///
/// Each byte is one tagged bit: bit 0 holds the data bit and bit 1 the frame
/// start flag. Deframer state carries over between calls, so a stream may be
/// supplied in consecutive slices.
///
/// This method is also re-exported as `deframer::avec::process_slice`.
pub fn process<D: HeaderDecoder, const N: usize>(
    r: &[u8],
    deframer: &mut Deframer<D, N>,
    o: &mut impl Sink,
) -> Summary {
    process_bits(TaggedBit::slice_from_bytes(r).iter().copied(), deframer, o)
}

/// Deframe a sequence of tagged bits, publishing packets to a sink.
pub fn process_bits<D: HeaderDecoder, const N: usize>(
    bits: impl IntoIterator<Item = TaggedBit>,
    deframer: &mut Deframer<D, N>,
    o: &mut impl Sink,
) -> Summary {
    let mut s = Summary::default();

    for bit in bits {
        step(deframer, bit, o, &mut s);
    }

    s
}
