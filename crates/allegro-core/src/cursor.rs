//! Sequential byte reader.
//!
//! All multi-byte integers are little-endian. Bit fields are the exception:
//! [`Cursor::read_bits`] consumes bits most-significant first, keeping any
//! unread bits of the last byte until [`Cursor::align_to_byte`] or the next
//! byte-level read discards them.

use crate::error::{Error, Result};

/// Forward-only read cursor over a byte slice.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    bits: u128,
    bits_left: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            bits: 0,
            bits_left: 0,
        }
    }

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of underlying data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether every byte has been consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Remaining bytes from current position.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Read a slice of `n` bytes without copying.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.align_to_byte();
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read a little-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `u32`.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `i32`.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Read an `n`-bit big-endian bit field.
    ///
    /// # Panics
    ///
    /// Panics if `n` is greater than 64.
    pub fn read_bits(&mut self, n: u32) -> Result<u64> {
        assert!(n <= 64, "bit field of {} bits is wider than 64", n);
        if n > self.bits_left {
            let needed = ((n - self.bits_left) as usize).div_ceil(8);
            self.ensure(needed)?;
            for &byte in &self.data[self.pos..self.pos + needed] {
                self.bits = (self.bits << 8) | u128::from(byte);
                self.bits_left += 8;
            }
            self.pos += needed;
        }
        let shift = self.bits_left - n;
        let mask = (1u128 << n) - 1;
        let value = (self.bits >> shift) & mask;
        self.bits_left = shift;
        self.bits &= (1u128 << shift) - 1;
        Ok(value as u64)
    }

    /// Read a single-bit flag.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    /// Discard bits left over from the last bit-field read.
    pub fn align_to_byte(&mut self) {
        self.bits = 0;
        self.bits_left = 0;
    }

    /// Skip forward to the next multiple of `alignment`.
    ///
    /// # Panics
    ///
    /// Panics if `alignment` is zero.
    pub fn align_to(&mut self, alignment: usize) -> Result<()> {
        assert!(alignment != 0, "alignment must be non-zero");
        let pad = (alignment - self.pos % alignment) % alignment;
        self.read_bytes(pad).map(|_| ())
    }

    /// Read `n` bytes of ASCII text, cut at the first NUL.
    pub fn read_fixed_ascii(&mut self, n: usize) -> Result<String> {
        let bytes = self.read_bytes(n)?;
        Ok(trim_nul(bytes))
    }

    /// Read a string terminated by NUL or by the end of the data.
    ///
    /// The terminator is consumed but not returned.
    pub fn read_strz(&mut self) -> Result<String> {
        self.align_to_byte();
        let rest = &self.data[self.pos.min(self.data.len())..];
        let (len, consumed) = match rest.iter().position(|&b| b == 0) {
            Some(nul) => (nul, nul + 1),
            None => (rest.len(), rest.len()),
        };
        let value = String::from_utf8_lossy(&rest[..len]).into_owned();
        self.pos += consumed;
        Ok(value)
    }

    /// Read `n` bytes of text, then skip to the next 4-byte boundary.
    ///
    /// No padding is consumed when the text already ends on a boundary.
    pub fn read_string_aligned(&mut self, n: usize) -> Result<String> {
        let value = self.read_fixed_ascii(n)?;
        while self.pos % 4 != 0 {
            self.read_u8()?;
        }
        Ok(value)
    }

    /// Read raw bytes until the position equals `target`.
    ///
    /// Fails with [`Error::MalformedPredicateLoop`] when `target` is behind the
    /// cursor or beyond the end of the data.
    pub fn read_bytes_until(&mut self, target: usize) -> Result<Vec<u8>> {
        if target < self.pos {
            return Err(Error::malformed_predicate_loop(self.pos, target));
        }
        if target > self.data.len() {
            return Err(Error::malformed_predicate_loop(self.data.len(), target));
        }
        Ok(self.read_bytes(target - self.pos)?.to_vec())
    }

    /// Read little-endian `u32`s until the position equals `target`.
    ///
    /// The target must be reachable in whole words.
    pub fn read_u32s_until(&mut self, target: usize) -> Result<Vec<u32>> {
        let mut words = Vec::new();
        while self.pos != target {
            if self.pos > target || self.remaining() < 4 {
                return Err(Error::malformed_predicate_loop(self.pos, target));
            }
            words.push(self.read_u32()?);
        }
        Ok(words)
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(Error::unexpected_eof(self.pos, n, self.remaining()));
        }
        Ok(())
    }
}

/// Converts fixed-width text to a `String`, dropping everything from the first NUL.
pub(crate) fn trim_nul(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_scalars() {
        let data = [0x01, 0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xfe, 0xff, 0xff, 0xff];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_u8().unwrap(), 0x01);
        assert_eq!(cur.read_u16().unwrap(), 0x1234);
        assert_eq!(cur.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(cur.read_i32().unwrap(), -2);
        assert!(cur.is_eof());
    }

    #[test]
    fn test_eof_reports_offset() {
        let data = [0u8; 6];
        let mut cur = Cursor::new(&data);
        cur.read_u32().unwrap();
        match cur.read_u32() {
            Err(Error::UnexpectedEof {
                offset, need, have, ..
            }) => {
                assert_eq!(offset, 4);
                assert_eq!(need, 4);
                assert_eq!(have, 2);
            }
            other => panic!("expected UnexpectedEof, got {:?}", other),
        }
        // A failed read does not move the cursor
        assert_eq!(cur.position(), 4);
    }

    #[test]
    fn test_bit_fields_are_big_endian() {
        let data = [0b1011_0010, 0b0100_0000, 0xAA];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_bits(1).unwrap(), 1);
        assert_eq!(cur.read_bits(3).unwrap(), 0b011);
        assert_eq!(cur.read_bits(6).unwrap(), 0b0010_01);
        assert_eq!(cur.position(), 2);
        cur.align_to_byte();
        assert_eq!(cur.read_u8().unwrap(), 0xAA);
    }

    #[test]
    fn test_byte_read_drops_pending_bits() {
        let data = [0xF0, 0x55];
        let mut cur = Cursor::new(&data);
        assert!(cur.read_bit().unwrap());
        assert_eq!(cur.read_u8().unwrap(), 0x55);
    }

    #[test]
    fn test_wide_bit_field() {
        let data = [0xFF; 9];
        let mut cur = Cursor::new(&data);
        assert_eq!(cur.read_bits(4).unwrap(), 0xF);
        assert_eq!(cur.read_bits(64).unwrap(), u64::MAX);
        assert_eq!(cur.position(), 9);
    }

    #[test]
    fn test_string_aligned_lands_on_boundary() {
        // Every length from every starting offset ends 4-byte aligned
        let data = [b'a'; 64];
        for start in 0..4 {
            for len in 0..16 {
                let mut cur = Cursor::new(&data);
                cur.read_bytes(start).unwrap();
                let s = cur.read_string_aligned(len).unwrap();
                assert_eq!(s.len(), len);
                assert_eq!(cur.position() % 4, 0, "start {} len {}", start, len);
                assert!(cur.position() - start - len < 4);
            }
        }
    }

    #[test]
    fn test_string_aligned_no_padding_when_aligned() {
        let data = b"ABCD\0\0\0\0";
        let mut cur = Cursor::new(data);
        assert_eq!(cur.read_string_aligned(4).unwrap(), "ABCD");
        assert_eq!(cur.position(), 4);
    }

    #[test]
    fn test_strz_terminators() {
        let data = b"VCC\0GND";
        let mut cur = Cursor::new(data);
        assert_eq!(cur.read_strz().unwrap(), "VCC");
        assert_eq!(cur.position(), 4);
        assert_eq!(cur.read_strz().unwrap(), "GND");
        assert!(cur.is_eof());
    }

    #[test]
    fn test_fixed_ascii_trims_nul() {
        let data = b"U1\0\0junk";
        let mut cur = Cursor::new(data);
        assert_eq!(cur.read_fixed_ascii(8).unwrap(), "U1");
        assert_eq!(cur.position(), 8);
    }

    #[test]
    fn test_align_to() {
        let data = [0u8; 8];
        let mut cur = Cursor::new(&data);
        cur.align_to(4).unwrap();
        assert_eq!(cur.position(), 0);
        cur.read_u8().unwrap();
        cur.align_to(4).unwrap();
        assert_eq!(cur.position(), 4);
    }

    #[test]
    #[should_panic(expected = "alignment must be non-zero")]
    fn test_align_to_zero_panics() {
        let data = [0u8; 4];
        Cursor::new(&data).align_to(0).unwrap();
    }

    #[test]
    #[should_panic(expected = "wider than 64")]
    fn test_bit_field_over_64_panics() {
        let data = [0u8; 16];
        Cursor::new(&data).read_bits(65).unwrap();
    }

    #[test]
    fn test_u32s_until_target() {
        let data = [0u8; 16];
        let mut cur = Cursor::new(&data);
        let words = cur.read_u32s_until(12).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(cur.position(), 12);
    }

    #[test]
    fn test_u32s_until_unreachable_target() {
        let data = [0u8; 16];
        let mut cur = Cursor::new(&data);
        assert!(matches!(
            cur.read_u32s_until(6),
            Err(Error::MalformedPredicateLoop { target: 6, .. })
        ));

        let mut cur = Cursor::new(&data);
        assert!(matches!(
            cur.read_u32s_until(32),
            Err(Error::MalformedPredicateLoop { target: 32, .. })
        ));
    }

    #[test]
    fn test_bytes_until() {
        let data = [7u8; 10];
        let mut cur = Cursor::new(&data);
        cur.read_u8().unwrap();
        assert_eq!(cur.read_bytes_until(5).unwrap(), vec![7; 4]);
        assert!(cur.read_bytes_until(3).is_err());
        assert!(cur.read_bytes_until(11).is_err());
        assert_eq!(cur.read_bytes_until(5).unwrap(), Vec::<u8>::new());
    }
}
