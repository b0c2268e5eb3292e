//! Fixed-width field extraction from byte-addressable sources.

use crate::Error;

/// How a field's bytes are ordered when hex-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
    /// Bytes encoded in the order they appear. Used for opaque blobs
    /// such as hashes and content ids.
    Preserve,
    /// Bytes encoded back to front, so a little-endian integer reads as
    /// a conventional numeral.
    Reverse,
}

/// A byte-addressable source of field data.
///
/// Implementations may buffer the whole source or seek-and-read; only
/// the byte semantics are fixed. In-memory sources are covered here,
/// file-backed sources live with the I/O layer.
pub trait FieldSource {
    type Err: From<Error>;

    /// Total length of the source in bytes.
    fn len(&mut self) -> Result<u64, Self::Err>;

    /// Fill `buf` with the bytes starting at `offset`.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Self::Err>;
}

fn slice_read_at(data: &[u8], offset: u64, buf: &mut [u8]) -> Result<(), Error> {
    let start = offset as usize;
    let end = start
        .checked_add(buf.len())
        .filter(|end| *end <= data.len())
        .ok_or(Error::Truncated {
            offset,
            need: buf.len(),
            have: data.len() as u64,
        })?;
    buf.copy_from_slice(&data[start..end]);
    Ok(())
}

impl FieldSource for &[u8] {
    type Err = Error;

    fn len(&mut self) -> Result<u64, Error> {
        Ok(<[u8]>::len(*self) as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Error> {
        slice_read_at(*self, offset, buf)
    }
}

impl FieldSource for Vec<u8> {
    type Err = Error;

    fn len(&mut self) -> Result<u64, Error> {
        Ok(Vec::len(self) as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), Error> {
        slice_read_at(self.as_slice(), offset, buf)
    }
}

/// Read a `len`-byte field at `offset` and return it hex-encoded.
///
/// A negative `offset` is measured backward from the end of the source,
/// which is how trailer fields are addressed.
pub fn read_hex<S: FieldSource>(
    src: &mut S,
    offset: i64,
    len: usize,
    order: FieldOrder,
) -> Result<String, S::Err> {
    let total = src.len()?;
    let start = if offset < 0 {
        total
            .checked_sub(offset.unsigned_abs())
            .ok_or(Error::InvalidOffset(offset))?
    } else {
        offset as u64
    };

    if start.checked_add(len as u64).is_none_or(|end| end > total) {
        return Err(Error::Truncated {
            offset: start,
            need: len,
            have: total,
        }
        .into());
    }

    let mut buf = vec![0; len];
    src.read_at(start, &mut buf)?;
    if order == FieldOrder::Reverse {
        buf.reverse();
    }
    Ok(hex::encode(buf))
}

/// Read a single byte at `offset`, for small integer fields.
pub fn read_u8<S: FieldSource>(src: &mut S, offset: i64) -> Result<u8, S::Err> {
    let total = src.len()?;
    let start = if offset < 0 {
        total
            .checked_sub(offset.unsigned_abs())
            .ok_or(Error::InvalidOffset(offset))?
    } else {
        offset as u64
    };

    let mut buf = [0];
    src.read_at(start, &mut buf)?;
    Ok(buf[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserve_and_reverse_are_byte_mirrors() {
        let data = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(
            read_hex(&mut &data[..], 0, 4, FieldOrder::Preserve).unwrap(),
            "01020304"
        );
        assert_eq!(
            read_hex(&mut &data[..], 0, 4, FieldOrder::Reverse).unwrap(),
            "04030201"
        );
    }

    #[test]
    fn negative_offset_is_end_relative() {
        let mut data = vec![0u8; 100];
        for (i, b) in data.iter_mut().enumerate() {
            *b = i as u8;
        }
        let field = read_hex(&mut data, -0x20, 0x20, FieldOrder::Preserve).unwrap();
        // Bytes [68, 100)
        assert_eq!(&field[..2], "44");
        assert_eq!(&field[62..], "63");
        assert_eq!(field.len(), 0x40);
    }

    #[test]
    fn read_past_end_is_truncated() {
        let data = [0u8; 8];
        match read_hex(&mut &data[..], 4, 8, FieldOrder::Preserve) {
            Err(Error::Truncated { offset: 4, need: 8, have: 8 }) => {}
            other => panic!("expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn negative_offset_past_start_is_invalid() {
        let data = [0u8; 8];
        match read_hex(&mut &data[..], -0x10, 1, FieldOrder::Preserve) {
            Err(Error::InvalidOffset(-0x10)) => {}
            other => panic!("expected InvalidOffset, got {:?}", other),
        }
    }
}
