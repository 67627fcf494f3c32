//! Loopback encoder producing tagged bits for a packet.

use crate::sans::{
    bit::TaggedBit,
    header::{HEADER_BITS, HeaderValue},
};

/// Encode a header and payload as the tagged bits a deframer expects.
///
/// The frame start flag is set on the first header bit. Header and payload
/// bytes are sent most significant bit first.
///
/// The header is sent as given: use [`HeaderValue::repeated`] for a header
/// carrying the payload length, or one of the [`HeaderValue::REQUEST`] and
/// [`HeaderValue::DATA`] sentinels for a majority-vote receiver.
///
/// ```
/// let payload = b"hello";
/// let header = HeaderValue::repeated(payload.len() as u16, 0);
/// let bytes: Vec<u8> = encode(header, payload).map(u8::from).collect();
/// ```
pub fn encode(header: HeaderValue, payload: &[u8]) -> impl Iterator<Item = TaggedBit> + '_ {
    let header = (0..HEADER_BITS as u32)
        .rev()
        .map(move |i| (header.0 >> i) & 1 == 1);

    let payload = payload
        .iter()
        .flat_map(|b| (0..8).rev().map(move |i| (b >> i) & 1 == 1));

    header
        .chain(payload)
        .enumerate()
        .map(|(i, bit)| TaggedBit::new(bit, i == 0))
}
