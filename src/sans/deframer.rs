//! The deframer state machine.

use tracing::trace;

use super::{
    Discard, MAX_PACKET_LEN, State,
    bit::TaggedBit,
    header::{HeaderAccumulator, HeaderDecoder, HeaderValue, MajorityVote},
    payload::PacketBuffer,
};

/// Source of the whitener offset reported with each packet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WhitenerOffset {
    /// Always report an offset of zero.
    #[default]
    Disabled,
    /// Report the offset held in the top 4 bits of the decoded header.
    FromHeader,
}

/// Runtime configuration of a [`Deframer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Source of the whitener offset.
    pub whitener: WhitenerOffset,
}

/// A completed packet, borrowed from the deframer's buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<'a> {
    payload: &'a [u8],
    whitener_offset: u8,
}

impl<'a> Packet<'a> {
    /// The assembled payload bytes.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// The payload length declared by the header.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the header declared an empty payload.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Offset into the whitening sequence applied to the payload.
    pub fn whitener_offset(&self) -> u8 {
        self.whitener_offset
    }
}

/// Packet deframer for a single channel.
///
/// `D` decodes headers, and `N` bounds the payload length accepted, in bytes.
/// All buffers are held inline and reused between packets.
#[derive(Debug, Clone)]
pub struct Deframer<D = MajorityVote, const N: usize = MAX_PACKET_LEN> {
    decoder: D,
    config: Config,
    state: State,
    header: HeaderAccumulator,
    packet: PacketBuffer<N>,
    whitener_offset: u8,
}

impl Deframer {
    /// Create a deframer with the default header decoder, configuration, and
    /// capacity.
    pub fn new() -> Self {
        Self::with_decoder(MajorityVote, Config::default())
    }
}

impl Default for Deframer {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: HeaderDecoder> Deframer<D> {
    /// Create a deframer with a chosen header decoder and configuration.
    pub fn with_decoder(decoder: D, config: Config) -> Self {
        Self::bounded(decoder, config)
    }
}

impl<D: HeaderDecoder, const N: usize> Deframer<D, N> {
    /// Create a deframer with a chosen header decoder and configuration,
    /// accepting payloads of at most `N` bytes.
    ///
    /// Headers declaring a longer payload are discarded as
    /// [`Discard::PacketTooLarge`].
    pub fn bounded(decoder: D, config: Config) -> Self {
        Self {
            decoder,
            config,
            state: State::SyncSearch,
            header: HeaderAccumulator::default(),
            packet: PacketBuffer::new(),
            whitener_offset: 0,
        }
    }

    /// The current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Advance the state machine by one bit.
    ///
    /// Returns a packet if this bit completed one, or the frame abandoned by
    /// this bit, if any. After an `Err`, the deframer has already recovered
    /// and is ready for the next bit.
    pub fn advance(&mut self, bit: TaggedBit) -> Result<Option<Packet<'_>>, Discard> {
        if bit.is_frame_start() {
            let previous = self.state;
            self.enter_have_sync();
            self.header.shift(bit.data_bit());

            return match previous {
                State::SyncSearch => Ok(None),
                state => {
                    trace!(?state, "frame start preempted frame in progress");
                    Err(Discard::Preempted { state })
                }
            };
        }

        match self.state {
            State::SyncSearch => Ok(None),
            State::HaveSync => match self.header.shift(bit.data_bit()) {
                Some(raw) => self.complete_header(raw),
                None => Ok(None),
            },
            State::HaveHeader => {
                if self.packet.push(bit.data_bit()) {
                    self.enter_search();
                    Ok(Some(self.packet()))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Return to searching for a frame start, abandoning any frame in
    /// progress.
    pub fn reset(&mut self) {
        self.enter_search();
        self.header.clear();
        self.packet.reset(0);
    }

    fn complete_header(&mut self, raw: HeaderValue) -> Result<Option<Packet<'_>>, Discard> {
        let decoded = match self.decoder.decode(raw) {
            Ok(decoded) => decoded,
            Err(err) => {
                self.enter_search();
                Err(err)?
            }
        };

        let length = decoded.payload_length();
        let whitener_offset = match self.config.whitener {
            WhitenerOffset::Disabled => 0,
            WhitenerOffset::FromHeader => decoded.whitener_offset(),
        };

        if length as usize > N {
            self.enter_search();
            Err(Discard::PacketTooLarge {
                length,
                capacity: N,
            })?;
        }

        self.enter_have_header(length as usize, whitener_offset);

        if length == 0 {
            self.enter_search();
            return Ok(Some(self.packet()));
        }

        Ok(None)
    }

    fn packet(&self) -> Packet<'_> {
        Packet {
            payload: self.packet.as_slice(),
            whitener_offset: self.whitener_offset,
        }
    }

    fn enter_search(&mut self) {
        trace!("entering sync search");
        self.state = State::SyncSearch;
    }

    fn enter_have_sync(&mut self) {
        trace!("entering have sync");
        self.state = State::HaveSync;
        self.header.clear();
    }

    fn enter_have_header(&mut self, length: usize, whitener_offset: u8) {
        trace!(length, whitener_offset, "entering have header");
        self.state = State::HaveHeader;
        self.packet.reset(length);
        self.whitener_offset = whitener_offset;
    }
}
