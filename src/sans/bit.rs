//! The tagged bit consumed by the deframer.

use tartan_bitfield::bitfield;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

bitfield! {
    struct Transport(u8) {
        [0] data_bit,
        [1] is_frame_start,
    }
}

/// One recovered data bit, with a flag marking the first bit after a
/// synchronization marker.
///
/// A tagged bit shares the byte layout produced by access-code correlators:
/// bit 0 holds the data bit and bit 1 the frame start flag. The remaining bits
/// are carried but ignored, so any byte converts into a tagged bit.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct TaggedBit(u8);

impl TaggedBit {
    /// Create a tagged bit from its data bit and frame start flag.
    pub fn new(data_bit: bool, is_frame_start: bool) -> Self {
        let mut t = Transport(0);
        t.set_data_bit(data_bit);
        t.set_is_frame_start(is_frame_start);
        Self(t.0)
    }

    /// The payload bit.
    pub fn data_bit(self) -> bool {
        Transport(self.0).data_bit()
    }

    /// Whether this is the first bit following a synchronization marker.
    pub fn is_frame_start(self) -> bool {
        Transport(self.0).is_frame_start()
    }

    /// View a slice of transport bytes as tagged bits, without copying.
    pub fn slice_from_bytes(r: &[u8]) -> &[TaggedBit] {
        match <[TaggedBit]>::ref_from_bytes(r) {
            Ok(bits) => bits,
            // A byte-sized, byte-aligned element accepts any slice.
            Err(_) => unreachable!(),
        }
    }
}

impl From<u8> for TaggedBit {
    fn from(b: u8) -> Self {
        Self(b)
    }
}

impl From<TaggedBit> for u8 {
    fn from(bit: TaggedBit) -> Self {
        bit.0
    }
}
