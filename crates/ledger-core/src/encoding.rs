//! # Canonical Encoding: Varints and Length-Prefixed Byte Strings
//!
//! The byte layout produced here is hashed into every asset identity, so it
//! is a frozen wire contract:
//!
//! - **varint**: unsigned LEB128. Seven data bits per byte, least
//!   significant group first; the high bit of each byte marks continuation.
//! - **varint31 / varint63**: a varint whose value must not exceed
//!   `2^31 - 1` / `2^63 - 1`.
//! - **varstr31**: a varint31 byte count followed by the bytes themselves.
//!
//! ## Typed inputs
//!
//! [`Varint31`], [`Varint63`] and [`Varstr31`] check the range once, at
//! construction. Writing a typed value cannot fail, which keeps identity
//! derivation free of error branches. The untyped `write_*` functions
//! perform the same checks and report [`EncodingError::Range`].

use crate::error::EncodingError;

/// Largest value a varint31 may carry.
pub const MAX_VARINT31: u64 = i32::MAX as u64;

/// Largest value a varint63 may carry.
pub const MAX_VARINT63: u64 = i64::MAX as u64;

/// Destination for encoded bytes.
///
/// Implemented for `Vec<u8>` here and for the pooled hasher in
/// `ledger-crypto`, so the same encoder feeds both buffers and digests.
pub trait ByteSink {
    /// Append `bytes` to the sink.
    fn put(&mut self, bytes: &[u8]);
}

impl ByteSink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// A value known to fit in a varint31.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Varint31(u64);

impl Varint31 {
    /// Range-check `value`.
    pub fn new(value: u64) -> Result<Self, EncodingError> {
        if value > MAX_VARINT31 {
            return Err(EncodingError::Range {
                value,
                max: MAX_VARINT31,
            });
        }
        Ok(Self(value))
    }

    /// The wrapped value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Write the encoded value, returning the number of bytes written.
    pub fn write_to(self, sink: &mut impl ByteSink) -> usize {
        put_uvarint(sink, self.0)
    }
}

/// A value known to fit in a varint63.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Varint63(u64);

impl Varint63 {
    /// Range-check `value`.
    pub fn new(value: u64) -> Result<Self, EncodingError> {
        if value > MAX_VARINT63 {
            return Err(EncodingError::Range {
                value,
                max: MAX_VARINT63,
            });
        }
        Ok(Self(value))
    }

    /// Any `u32` fits without a check.
    pub const fn from_u32(value: u32) -> Self {
        Self(value as u64)
    }

    /// The wrapped value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// Write the encoded value, returning the number of bytes written.
    pub fn write_to(self, sink: &mut impl ByteSink) -> usize {
        put_uvarint(sink, self.0)
    }
}

/// A byte string whose length fits in a varint31.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Varstr31<'a>(pub(crate) &'a [u8]);

impl<'a> Varstr31<'a> {
    /// Range-check the length of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Result<Self, EncodingError> {
        Varint31::new(bytes.len() as u64)?;
        Ok(Self(bytes))
    }

    /// The wrapped bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Write the length prefix and the bytes, returning the number of bytes written.
    pub fn write_to(self, sink: &mut impl ByteSink) -> usize {
        let n = put_uvarint(sink, self.0.len() as u64);
        sink.put(self.0);
        n + self.0.len()
    }
}

/// Write `value` as a varint31.
pub fn write_varint31(sink: &mut impl ByteSink, value: u64) -> Result<usize, EncodingError> {
    Ok(Varint31::new(value)?.write_to(sink))
}

/// Write `value` as a varint63.
pub fn write_varint63(sink: &mut impl ByteSink, value: u64) -> Result<usize, EncodingError> {
    Ok(Varint63::new(value)?.write_to(sink))
}

/// Write `bytes` as a varstr31.
pub fn write_varstr31(sink: &mut impl ByteSink, bytes: &[u8]) -> Result<usize, EncodingError> {
    Ok(Varstr31::new(bytes)?.write_to(sink))
}

fn put_uvarint(sink: &mut impl ByteSink, mut value: u64) -> usize {
    let mut buf = [0u8; 10];
    let mut i = 0;
    while value >= 0x80 {
        buf[i] = (value as u8) | 0x80;
        value >>= 7;
        i += 1;
    }
    buf[i] = value as u8;
    sink.put(&buf[..=i]);
    i + 1
}

/// Cursor over an encoded byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Start reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Read a varint31.
    pub fn read_varint31(&mut self) -> Result<u64, EncodingError> {
        let value = self.read_uvarint()?;
        Varint31::new(value).map(Varint31::get)
    }

    /// Read a varint63.
    pub fn read_varint63(&mut self) -> Result<u64, EncodingError> {
        let value = self.read_uvarint()?;
        Varint63::new(value).map(Varint63::get)
    }

    /// Read a varstr31, borrowing the bytes from the underlying slice.
    pub fn read_varstr31(&mut self) -> Result<&'a [u8], EncodingError> {
        let len = self.read_varint31()? as usize;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or(EncodingError::UnexpectedEof(self.buf.len()))?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }

    fn read_uvarint(&mut self) -> Result<u64, EncodingError> {
        let start = self.pos;
        let mut value: u64 = 0;
        let mut shift = 0u32;
        loop {
            let byte = *self
                .buf
                .get(self.pos)
                .ok_or(EncodingError::UnexpectedEof(self.pos))?;
            self.pos += 1;
            if shift == 63 && byte > 1 {
                return Err(EncodingError::Overflow(start));
            }
            value |= u64::from(byte & 0x7f) << shift;
            if byte < 0x80 {
                return Ok(value);
            }
            shift += 7;
            if shift > 63 {
                return Err(EncodingError::Overflow(start));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_varint63(v: u64) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint63(&mut out, v).unwrap();
        out
    }

    #[test]
    fn test_varint_known_layouts() {
        assert_eq!(encode_varint63(0), vec![0x00]);
        assert_eq!(encode_varint63(1), vec![0x01]);
        assert_eq!(encode_varint63(127), vec![0x7f]);
        assert_eq!(encode_varint63(128), vec![0x80, 0x01]);
        assert_eq!(encode_varint63(200), vec![0xc8, 0x01]);
        assert_eq!(encode_varint63(300), vec![0xac, 0x02]);
    }

    #[test]
    fn test_varint63_max_is_nine_bytes() {
        let out = encode_varint63(MAX_VARINT63);
        assert_eq!(out.len(), 9);
        assert_eq!(out[8], 0x7f);
    }

    #[test]
    fn test_varint63_rejects_out_of_range() {
        let mut out = Vec::new();
        let err = write_varint63(&mut out, MAX_VARINT63 + 1).unwrap_err();
        assert_eq!(
            err,
            EncodingError::Range {
                value: MAX_VARINT63 + 1,
                max: MAX_VARINT63
            }
        );
        assert!(out.is_empty(), "nothing may be written on a range error");
    }

    #[test]
    fn test_varint31_rejects_out_of_range() {
        let mut out = Vec::new();
        assert!(write_varint31(&mut out, MAX_VARINT31).is_ok());
        assert!(write_varint31(&mut out, MAX_VARINT31 + 1).is_err());
    }

    #[test]
    fn test_varstr_layout() {
        let mut out = Vec::new();
        let n = write_varstr31(&mut out, &[0xae, 0x51]).unwrap();
        assert_eq!(n, 3);
        assert_eq!(out, vec![0x02, 0xae, 0x51]);
    }

    #[test]
    fn test_varstr_empty() {
        let mut out = Vec::new();
        write_varstr31(&mut out, &[]).unwrap();
        assert_eq!(out, vec![0x00]);
    }

    #[test]
    fn test_varstr_long_length_prefix() {
        let body = vec![7u8; 200];
        let mut out = Vec::new();
        write_varstr31(&mut out, &body).unwrap();
        assert_eq!(&out[..2], &[0xc8, 0x01]);
        assert_eq!(out.len(), 202);
    }

    #[test]
    fn test_reader_decodes_sequence() {
        let mut out = Vec::new();
        write_varint63(&mut out, 1).unwrap();
        write_varint63(&mut out, 300).unwrap();
        write_varstr31(&mut out, b"program").unwrap();

        let mut r = Reader::new(&out);
        assert_eq!(r.read_varint63().unwrap(), 1);
        assert_eq!(r.read_varint63().unwrap(), 300);
        assert_eq!(r.read_varstr31().unwrap(), b"program");
        assert!(r.remaining().is_empty());
        assert_eq!(r.position(), out.len());
    }

    #[test]
    fn test_reader_truncated_varint() {
        let mut r = Reader::new(&[0x80]);
        assert_eq!(r.read_varint63().unwrap_err(), EncodingError::UnexpectedEof(1));
    }

    #[test]
    fn test_reader_truncated_varstr() {
        let mut r = Reader::new(&[0x05, 0x01, 0x02]);
        assert!(matches!(
            r.read_varstr31().unwrap_err(),
            EncodingError::UnexpectedEof(_)
        ));
    }

    #[test]
    fn test_reader_rejects_overlong_varint() {
        let bytes = [0xff; 11];
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_varint63().unwrap_err(), EncodingError::Overflow(0));
    }

    #[test]
    fn test_reader_enforces_varint31_range() {
        let mut out = Vec::new();
        write_varint63(&mut out, MAX_VARINT31 + 1).unwrap();
        let mut r = Reader::new(&out);
        assert!(matches!(
            r.read_varint31().unwrap_err(),
            EncodingError::Range { .. }
        ));
    }
}
