use std::fmt;

use crate::codec::CodecError;

/// Number of bits used to store a single nucleotide.
pub const BITS_PER_NUCLEOTIDE: u8 = 2;

/// A single base of a genomic sequence.
///
/// The discriminants are the 2-bit codes written to the packed stream, so the
/// ordering here is part of the on-disk format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Nucleotide {
    A = 0b00,
    T = 0b01,
    C = 0b10,
    G = 0b11,
}

// indexed by code
const BY_CODE: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::T, Nucleotide::C, Nucleotide::G];

impl Nucleotide {
    /// The 2-bit code for this base.
    #[inline(always)]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Nucleotide::code`]. Only the low two bits of `code` are used,
    /// which makes the mapping total.
    #[inline(always)]
    pub fn from_code(code: u8) -> Self {
        BY_CODE[(code & 0b11) as usize]
    }

    #[inline(always)]
    pub fn to_ascii(self) -> u8 {
        match self {
            Nucleotide::A => b'A',
            Nucleotide::T => b'T',
            Nucleotide::C => b'C',
            Nucleotide::G => b'G',
        }
    }
}

impl TryFrom<u8> for Nucleotide {
    type Error = u8;

    /// Converts an upper-case ASCII base. The offending byte is returned on failure.
    fn try_from(b: u8) -> Result<Self, Self::Error> {
        match b {
            b'A' => Ok(Nucleotide::A),
            b'T' => Ok(Nucleotide::T),
            b'C' => Ok(Nucleotide::C),
            b'G' => Ok(Nucleotide::G),
            other => Err(other),
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_ascii() as char)
    }
}

/// Parses raw ASCII bytes into nucleotides.
///
/// # Errors
///
/// Returns [`CodecError::InvalidSymbol`] for the first byte which is not one of
/// `A`, `C`, `T` or `G`, along with its position in `input`.
pub fn parse_sequence(input: &[u8]) -> Result<Vec<Nucleotide>, CodecError> {
    input
        .iter()
        .enumerate()
        .map(|(position, &b)| {
            Nucleotide::try_from(b).map_err(|symbol| CodecError::InvalidSymbol { symbol, position })
        })
        .collect()
}

/// Renders nucleotides back to ASCII.
pub fn to_ascii(seq: &[Nucleotide]) -> Vec<u8> {
    seq.iter().map(|n| n.to_ascii()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_a_bijection() {
        for code in 0..4u8 {
            assert_eq!(Nucleotide::from_code(code).code(), code);
        }
        for n in BY_CODE {
            assert_eq!(Nucleotide::from_code(n.code()), n);
        }
    }

    #[test]
    fn format_codes() {
        assert_eq!(Nucleotide::A.code(), 0b00);
        assert_eq!(Nucleotide::T.code(), 0b01);
        assert_eq!(Nucleotide::C.code(), 0b10);
        assert_eq!(Nucleotide::G.code(), 0b11);
    }

    #[test]
    fn ascii_round_trip() {
        let seq = parse_sequence(b"GATTACA").unwrap();
        assert_eq!(seq.len(), 7);
        assert_eq!(to_ascii(&seq), b"GATTACA".to_vec());
        assert_eq!(seq[0].to_string(), "G");
    }

    #[test]
    fn rejects_lowercase() {
        match parse_sequence(b"ATcG") {
            Err(CodecError::InvalidSymbol { symbol, position }) => {
                assert_eq!(symbol, b'c');
                assert_eq!(position, 2);
            }
            other => panic!("expected InvalidSymbol, got {other:?}"),
        }
    }

    #[test]
    fn reports_first_invalid_byte() {
        let err = parse_sequence(b"AXTN").unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidSymbol {
                symbol: b'X',
                position: 1
            }
        ));
    }

    #[test]
    fn empty() {
        assert!(parse_sequence(b"").unwrap().is_empty());
    }
}
