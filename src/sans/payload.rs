//! Payload accumulation.

/// Fixed-capacity buffer assembling payload bytes from bits.
///
/// Each byte is built most significant bit first, as `byte = (byte << 1) |
/// bit`, and stored once eight bits have been shifted in.
#[derive(Debug, Clone)]
pub struct PacketBuffer<const N: usize> {
    bytes: [u8; N],
    byte: u8,
    bit_index: u8,
    len: usize,
    declared: usize,
}

impl<const N: usize> PacketBuffer<N> {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            byte: 0,
            bit_index: 0,
            len: 0,
            declared: 0,
        }
    }

    /// Capacity of the buffer, in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Empty the buffer and expect a payload of `declared` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `declared` exceeds the capacity of the buffer.
    pub fn reset(&mut self, declared: usize) {
        assert!(declared <= N);

        self.byte = 0;
        self.bit_index = 0;
        self.len = 0;
        self.declared = declared;
    }

    /// Number of payload bits accumulated since the last reset.
    pub fn bits_written(&self) -> usize {
        self.len * 8 + self.bit_index as usize
    }

    /// Whether every declared byte has been assembled.
    pub fn is_complete(&self) -> bool {
        self.len == self.declared
    }

    /// Shift a payload bit into the buffer.
    ///
    /// Returns whether the payload is complete. Bits pushed once complete are
    /// ignored.
    pub fn push(&mut self, bit: bool) -> bool {
        if self.is_complete() {
            return true;
        }

        self.byte = (self.byte << 1) | bit as u8;
        self.bit_index += 1;

        if self.bit_index == 8 {
            self.bytes[self.len] = self.byte;
            self.len += 1;
            self.byte = 0;
            self.bit_index = 0;
        }

        self.is_complete()
    }

    /// The bytes assembled so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl<const N: usize> Default for PacketBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
