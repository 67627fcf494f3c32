#![allow(dead_code)]

use deframer::{
    avec::{Sink, encode},
    sans::{
        Deframer, Discard,
        bit::TaggedBit,
        header::{HeaderDecoder, HeaderValue},
    },
};
use tinyvec::ArrayVec;

pub const CAPTURE: &str = "fixtures/capture.bin";
pub const CAPTURE_PACKETS: &str = "fixtures/capture.csv";

/// Tagged bits for a whole frame.
pub fn frame(header: u32, payload: &[u8]) -> Vec<TaggedBit> {
    encode(HeaderValue(header), payload).collect()
}

/// Deterministic bits without a frame start flag.
pub fn noise(n: usize) -> Vec<TaggedBit> {
    let mut x = 0x2545_f491_u32;
    (0..n)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 17;
            x ^= x << 5;
            TaggedBit::new(x & 1 == 1, false)
        })
        .collect()
}

/// Payload bytes following a simple pattern.
pub fn pattern(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i * 37 + 11) as u8).collect()
}

/// Feed bits one at a time, collecting packets and discards.
pub fn run<D: HeaderDecoder, const N: usize>(
    deframer: &mut Deframer<D, N>,
    bits: impl IntoIterator<Item = TaggedBit>,
) -> (Vec<Vec<u8>>, Vec<Discard>) {
    let mut packets = vec![];
    let mut discards = vec![];

    for bit in bits {
        match deframer.advance(bit) {
            Ok(Some(packet)) => packets.push(packet.payload().to_vec()),
            Ok(None) => {}
            Err(discard) => discards.push(discard),
        }
    }

    (packets, discards)
}

/// Expected packets of the capture fixture.
pub fn capture_packets() -> Vec<Vec<u8>> {
    let mut reader = csv::ReaderBuilder::new()
        .from_path(CAPTURE_PACKETS)
        .unwrap();

    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            let length: usize = r[0].parse().unwrap();
            let payload = unhex(&r[1]);
            assert_eq!(payload.len(), length);
            payload
        })
        .collect()
}

fn unhex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

/// Fixed-capacity sink storing packets back to back.
#[derive(Default)]
pub struct Recorder {
    pub lengths: ArrayVec<[usize; 16]>,
    pub bytes: ArrayVec<[u8; 2048]>,
}

impl Recorder {
    pub fn packet(&self, i: usize) -> &[u8] {
        let start: usize = self.lengths[..i].iter().sum();
        &self.bytes[start..start + self.lengths[i]]
    }
}

impl Sink for Recorder {
    fn deliver(&mut self, bytes: &[u8], length: usize) {
        assert_eq!(bytes.len(), length);
        self.lengths.push(length);
        self.bytes.extend_from_slice(bytes);
    }
}
