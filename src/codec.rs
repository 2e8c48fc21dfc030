use std::io::{self, ErrorKind};

use thiserror::Error;

use crate::alphabet::{self, Nucleotide, BITS_PER_NUCLEOTIDE};
use crate::bitio::{BitReader, BitSink, BitSource, BitWriter};

/// Size of the length header, in bytes.
pub const HEADER_BYTES: usize = 4;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error(
        "invalid symbol {:?} (byte 0x{symbol:02X}) at position {position}: only A, C, T and G can be compressed",
        as_char(.symbol)
    )]
    InvalidSymbol { symbol: u8, position: usize },

    #[error("{}", truncated_message(.expected, .decoded))]
    TruncatedStream {
        /// The symbol count from the header, or `None` if the header itself was cut short
        expected: Option<u32>,
        decoded: usize,
    },

    #[error("sequence of {len} symbols is too long: at most {} can be stored", u32::MAX)]
    SequenceTooLong { len: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn as_char(b: &u8) -> char {
    char::from(*b)
}

fn truncated_message(expected: &Option<u32>, decoded: &usize) -> String {
    match expected {
        Some(n) => format!(
            "truncated stream: header declares {n} symbols but only {decoded} could be read"
        ),
        None => format!("truncated stream: expected a {HEADER_BYTES}-byte length header"),
    }
}

/// The number of bytes produced by encoding a sequence of `len` symbols.
pub fn encoded_len(len: usize) -> usize {
    HEADER_BYTES + (len * BITS_PER_NUCLEOTIDE as usize).div_ceil(8)
}

/// Writes `seq` as a length header followed by its packed 2-bit codes, then
/// finishes the sink.
///
/// # Errors
///
/// * [`CodecError::SequenceTooLong`] if the length does not fit in the header.
///   Nothing is written in that case.
/// * [`CodecError::Io`] if the sink fails.
pub fn encode(seq: &[Nucleotide], sink: &mut impl BitSink) -> Result<(), CodecError> {
    let len = u32::try_from(seq.len())
        .map_err(|_| CodecError::SequenceTooLong { len: seq.len() })?;

    sink.write_u32(len)?;
    for n in seq {
        sink.write_bits(n.code(), BITS_PER_NUCLEOTIDE)?;
    }
    sink.finish()?;

    Ok(())
}

/// Validates raw ASCII `input` and encodes it. The whole input is checked before
/// anything is written, so invalid input never produces partial output.
pub fn encode_bytes(input: &[u8], sink: &mut impl BitSink) -> Result<(), CodecError> {
    let seq = alphabet::parse_sequence(input)?;
    encode(&seq, sink)
}

/// Encodes raw ASCII `input` into a freshly allocated buffer.
pub fn encode_to_vec(input: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::with_capacity(encoded_len(input.len()));
    encode_bytes(input, &mut BitWriter::new(&mut out))?;
    Ok(out)
}

fn truncated(expected: Option<u32>, decoded: usize) -> impl Fn(io::Error) -> CodecError {
    move |e| match e.kind() {
        ErrorKind::UnexpectedEof => CodecError::TruncatedStream { expected, decoded },
        _ => CodecError::Io(e),
    }
}

/// Reads a length header and exactly that many 2-bit codes. Anything after
/// the last code, padding included, is left unread.
///
/// # Errors
///
/// * [`CodecError::TruncatedStream`] if the source ends before the header or
///   before all of the declared symbols have been read.
/// * [`CodecError::Io`] for any other read failure.
pub fn decode(source: &mut impl BitSource) -> Result<Vec<Nucleotide>, CodecError> {
    let len = source.read_u32().map_err(truncated(None, 0))?;

    // don't trust the header for the allocation size: a corrupt header on a
    // small stream would otherwise request up to 4 billion symbols up front
    let mut seq = Vec::with_capacity((len as usize).min(1 << 20));
    for decoded in 0..len as usize {
        let code = source
            .read_bits(BITS_PER_NUCLEOTIDE)
            .map_err(truncated(Some(len), decoded))?;
        seq.push(Nucleotide::from_code(code));
    }

    Ok(seq)
}

/// Decodes and renders the result as ASCII.
pub fn decode_to_bytes(source: &mut impl BitSource) -> Result<Vec<u8>, CodecError> {
    decode(source).map(|seq| alphabet::to_ascii(&seq))
}

/// Decodes an in-memory encoded stream.
pub fn decode_from_slice(data: &[u8]) -> Result<Vec<Nucleotide>, CodecError> {
    decode(&mut BitReader::new(data))
}
