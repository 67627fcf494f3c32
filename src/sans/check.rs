//! Helper for computing the majority vote over a header.

/// Bits of a header counted by the vote: the two 12-bit length fields.
///
/// The 4-bit whitener offset fields (bits 12..16 and 28..32) are excluded.
pub const VOTE_MASK: u32 = 0x0FFF_0FFF;

/// Number of bits counted by the vote.
pub const VOTE_BITS: u32 = VOTE_MASK.count_ones();

/// Count the set bits of a header that take part in the vote.
pub fn voted_weight(raw: u32) -> u32 {
    (raw & VOTE_MASK).count_ones()
}
