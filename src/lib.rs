//! Lossless 2-bit packing of genomic sequences over the alphabet {A, C, T, G}.
//!
//! An encoded stream is a 4-byte big-endian symbol count followed by one 2-bit
//! code per symbol, most significant bit first, zero-padded to a whole byte.

pub mod alphabet;
pub mod bitio;
pub mod codec;

pub use alphabet::Nucleotide;
pub use bitio::{BitReader, BitSink, BitSource, BitWriter};
pub use codec::{
    decode, decode_from_slice, decode_to_bytes, encode, encode_bytes, encode_to_vec, encoded_len,
    CodecError,
};
