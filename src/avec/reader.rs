//! Reader-based driver implementation.
//!
//! _Requires Cargo feature `std`._

use std::io::{ErrorKind, Read};

use thiserror::Error;
use zerocopy::IntoBytes;

use crate::sans::{Deframer, bit::TaggedBit, header::HeaderDecoder};

use super::{Sink, Summary, step};

extern crate std;

/// Number of tagged bits read from the source at once.
const CHUNK_LEN: usize = 1024;

/// Errors occurring while deframing from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Deframe transport bytes from a reader until it is exhausted, publishing
/// packets to a sink.
///
/// Bytes are read in chunks directly into a buffer of tagged bits. Packets
/// spanning chunk boundaries are reassembled as usual.
///
/// This method is also re-exported as `deframer::avec::process_reader`.
///
/// _Requires Cargo feature `std`._
pub fn process<D: HeaderDecoder, const N: usize>(
    r: &mut impl Read,
    deframer: &mut Deframer<D, N>,
    o: &mut impl Sink,
) -> Result<Summary, Error> {
    let mut buf = [TaggedBit::default(); CHUNK_LEN];
    let mut s = Summary::default();

    loop {
        let n = match r.read(buf.as_mut_bytes()) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => Err(err)?,
        };

        for &bit in &buf[..n] {
            step(deframer, bit, o, &mut s);
        }
    }

    Ok(s)
}
