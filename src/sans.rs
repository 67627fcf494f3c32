//! Internal finite-state machine for deframing a tagged bit stream.
//!
//! This module is intended for applications that need fine control over the
//! deframer, or that run without an allocator. See [`crate::avec`] for drivers
//! covering common patterns.
//!
//! # Architecture
//!
//! A [`Deframer`] owns every buffer it needs, and is advanced by exactly one
//! [`TaggedBit`](bit::TaggedBit) at a time. It is always in one of three
//! [`State`]s:
//!
//! - [`State::SyncSearch`]: waiting for a bit carrying the frame start flag.
//! - [`State::HaveSync`]: shifting 32 header bits into an accumulator. The bit
//! carrying the start flag is the first of these.
//! - [`State::HaveHeader`]: collecting payload bits into bytes, most
//! significant bit first, until the declared length is reached.
//!
//! A start flag observed in any state restarts synchronization at that bit.
//! Any frame in progress is abandoned and reported as
//! [`Discard::Preempted`].
//!
//! Headers are decoded by a [`HeaderDecoder`](header::HeaderDecoder), chosen
//! by type parameter. The default, [`MajorityVote`](header::MajorityVote),
//! takes a majority vote over the redundant length fields.
//!
//! Anomalies never stop the machine. Each one returns it to
//! [`State::SyncSearch`] and is reported as the `Err` side of that step, so
//! that the caller may count it or ignore it.

use thiserror::Error;

pub mod bit;
pub mod check;
pub mod deframer;
pub mod header;
pub mod payload;

pub use deframer::{Config, Deframer, Packet, WhitenerOffset};

/// Default capacity of the payload buffer, in bytes.
pub const MAX_PACKET_LEN: usize = 4096;

/// The state of a [`Deframer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    /// Waiting for a frame start flag.
    #[default]
    SyncSearch,
    /// Accumulating header bits.
    HaveSync,
    /// Accumulating payload bits.
    HaveHeader,
}

/// A frame abandoned by the deframer.
///
/// In every case, the deframer has already returned to
/// [`State::SyncSearch`] (or restarted synchronization, when preempted).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Discard {
    /// The header could not be decoded.
    #[error("Header rejected: {0}")]
    Header(#[from] header::HeaderError),
    /// The declared payload length does not fit the packet buffer.
    #[error("Declared length ({length}) exceeds packet capacity ({capacity}).")]
    PacketTooLarge { length: u16, capacity: usize },
    /// A new frame start arrived before the frame in progress completed.
    #[error("Frame start preempted a frame in state {state:?}.")]
    Preempted { state: State },
}
