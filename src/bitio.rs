//! Bit-level reading and writing on top of byte streams.
//!
//! Bits are packed most-significant-bit first. Integers written with
//! [`BitSink::write_u32`] are big-endian, so a header written before any
//! packed bits occupies exactly four whole bytes.

use std::io::{self, ErrorKind, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

/// Something that bits can be read from.
///
/// End of input is reported as [`ErrorKind::UnexpectedEof`].
pub trait BitSource {
    /// Reads a 32-bit big-endian unsigned integer.
    fn read_u32(&mut self) -> io::Result<u32>;

    /// Reads the next `n` bits (`1..=8`) as an unsigned integer.
    fn read_bits(&mut self, n: u8) -> io::Result<u8>;
}

/// Something that bits can be written to.
pub trait BitSink {
    /// Writes a 32-bit big-endian unsigned integer.
    fn write_u32(&mut self, value: u32) -> io::Result<()>;

    /// Writes the low `n` bits (`1..=8`) of `value`.
    fn write_bits(&mut self, value: u8, n: u8) -> io::Result<()>;

    /// Pads any partial byte with zeros, then flushes the underlying stream.
    fn finish(&mut self) -> io::Result<()>;
}

fn check_width(n: u8) -> io::Result<()> {
    if (1..=8).contains(&n) {
        Ok(())
    } else {
        Err(io::Error::new(
            ErrorKind::InvalidInput,
            format!("bit width must be between 1 and 8, got {n}"),
        ))
    }
}

/// MSB-first bit writer over any [`Write`].
///
/// Dropping the writer finishes it, so a partial trailing byte is never lost,
/// even when encoding bails out early. Call [`BitSink::finish`] to observe
/// errors from the final write.
pub struct BitWriter<W: Write> {
    inner: W,
    cur: u8,
    filled: u8,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            cur: 0,
            filled: 0,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    #[inline]
    fn write_bit(&mut self, bit: u8) -> io::Result<()> {
        self.cur = (self.cur << 1) | (bit & 1);
        self.filled += 1;
        if self.filled == 8 {
            self.inner.write_all(&[self.cur])?;
            self.cur = 0;
            self.filled = 0;
        }
        Ok(())
    }

    fn pad(&mut self) -> io::Result<()> {
        if self.filled > 0 {
            let byte = self.cur << (8 - self.filled);
            self.cur = 0;
            self.filled = 0;
            self.inner.write_all(&[byte])?;
        }
        Ok(())
    }
}

impl<W: Write> BitSink for BitWriter<W> {
    fn write_u32(&mut self, value: u32) -> io::Result<()> {
        if self.filled == 0 {
            return self.inner.write_u32::<BigEndian>(value);
        }
        for byte in value.to_be_bytes() {
            self.write_bits(byte, 8)?;
        }
        Ok(())
    }

    fn write_bits(&mut self, value: u8, n: u8) -> io::Result<()> {
        check_width(n)?;
        for i in (0..n).rev() {
            self.write_bit(value >> i)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.pad()?;
        self.inner.flush()
    }
}

impl<W: Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        let _ = self.finish();
    }
}

/// MSB-first bit reader over any [`Read`].
pub struct BitReader<R: Read> {
    inner: R,
    cur: u8,
    remaining: u8,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cur: 0,
            remaining: 0,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    #[inline]
    fn read_bit(&mut self) -> io::Result<u8> {
        if self.remaining == 0 {
            self.cur = self.inner.read_u8()?;
            self.remaining = 8;
        }
        self.remaining -= 1;
        Ok((self.cur >> self.remaining) & 1)
    }
}

impl<R: Read> BitSource for BitReader<R> {
    fn read_u32(&mut self) -> io::Result<u32> {
        if self.remaining == 0 {
            return self.inner.read_u32::<BigEndian>();
        }
        let mut bytes = [0u8; 4];
        for byte in bytes.iter_mut() {
            *byte = self.read_bits(8)?;
        }
        Ok(u32::from_be_bytes(bytes))
    }

    fn read_bits(&mut self, n: u8) -> io::Result<u8> {
        check_width(n)?;
        let mut value = 0u8;
        for _ in 0..n {
            value = (value << 1) | self.read_bit()?;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msb_first_packing() {
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            for code in [0b00, 0b01, 0b10, 0b11] {
                w.write_bits(code, 2).unwrap();
            }
            w.finish().unwrap();
        }
        assert_eq!(buf, vec![0x1B]);
    }

    #[test]
    fn partial_byte_is_zero_padded() {
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            w.write_bits(0b11, 2).unwrap();
            w.write_bits(0b1, 1).unwrap();
            w.finish().unwrap();
        }
        assert_eq!(buf, vec![0b1110_0000]);
    }

    #[test]
    fn drop_flushes_partial_byte() {
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            w.write_bits(0b10, 2).unwrap();
        }
        assert_eq!(buf, vec![0b1000_0000]);
    }

    #[test]
    fn finish_twice_writes_once() {
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            w.write_bits(0b1, 1).unwrap();
            w.finish().unwrap();
            w.finish().unwrap();
        }
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn aligned_u32_is_big_endian() {
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            w.write_u32(0x0102_0304).unwrap();
        }
        assert_eq!(buf, vec![1, 2, 3, 4]);

        let mut r = BitReader::new(buf.as_slice());
        assert_eq!(r.read_u32().unwrap(), 0x0102_0304);
    }

    #[test]
    fn unaligned_u32() {
        let mut buf = Vec::new();
        {
            let mut w = BitWriter::new(&mut buf);
            w.write_bits(0b101, 3).unwrap();
            w.write_u32(0xDEAD_BEEF).unwrap();
            w.write_bits(0b1, 1).unwrap();
        }
        assert_eq!(buf.len(), 5);

        let mut r = BitReader::new(buf.as_slice());
        assert_eq!(r.read_bits(3).unwrap(), 0b101);
        assert_eq!(r.read_u32().unwrap(), 0xDEAD_BEEF);
        assert_eq!(r.read_bits(1).unwrap(), 0b1);
        // padding
        assert_eq!(r.read_bits(4).unwrap(), 0);
        assert_eq!(
            r.read_bits(1).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn read_past_end() {
        let mut r = BitReader::new(&[0xFFu8][..]);
        assert_eq!(r.read_bits(8).unwrap(), 0xFF);
        assert_eq!(
            r.read_bits(2).unwrap_err().kind(),
            ErrorKind::UnexpectedEof
        );
    }

    #[test]
    fn short_header() {
        let mut r = BitReader::new(&[0u8, 0, 1][..]);
        assert_eq!(r.read_u32().unwrap_err().kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn invalid_width() {
        let mut buf = Vec::new();
        let mut w = BitWriter::new(&mut buf);
        assert_eq!(
            w.write_bits(0, 9).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            w.write_bits(0, 0).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );

        let mut r = BitReader::new(&[0u8][..]);
        assert_eq!(r.read_bits(0).unwrap_err().kind(), ErrorKind::InvalidInput);
    }
}
