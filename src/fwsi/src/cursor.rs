use byteorder::{ByteOrder, LittleEndian};
use uuid::Uuid;

use crate::error::Error;

/// A bounds-checked little-endian view over a borrowed byte slice.
///
/// Every read either succeeds or returns [`Error::Truncated`] — there is no
/// panicking path, since shell items are decoded from arbitrary forensic
/// input. No raw pointer arithmetic is exposed to callers outside this
/// module.
pub struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Cursor { bytes, offset: 0 }
    }

    pub fn at(bytes: &'a [u8], offset: usize) -> Self {
        Cursor { bytes, offset }
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    pub fn advance(&mut self, count: usize, context: &'static str) -> Result<(), Error> {
        self.require(count, context)?;
        self.offset += count;
        Ok(())
    }

    fn require(&self, count: usize, context: &'static str) -> Result<(), Error> {
        if self.remaining() < count {
            return Err(Error::Truncated {
                needed: count,
                available: self.remaining(),
                context,
            });
        }
        Ok(())
    }

    /// Returns the next `count` bytes without advancing the cursor.
    pub fn peek(&self, count: usize, context: &'static str) -> Result<&'a [u8], Error> {
        self.require(count, context)?;
        Ok(&self.bytes[self.offset..self.offset + count])
    }

    /// Returns the next `count` bytes and advances the cursor.
    pub fn slice(&mut self, count: usize, context: &'static str) -> Result<&'a [u8], Error> {
        let data = self.peek(count, context)?;
        self.offset += count;
        Ok(data)
    }

    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, Error> {
        let data = self.slice(1, context)?;
        Ok(data[0])
    }

    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, Error> {
        let data = self.slice(2, context)?;
        Ok(LittleEndian::read_u16(data))
    }

    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, Error> {
        let data = self.slice(4, context)?;
        Ok(LittleEndian::read_u32(data))
    }

    pub fn read_u64(&mut self, context: &'static str) -> Result<u64, Error> {
        let data = self.slice(8, context)?;
        Ok(LittleEndian::read_u64(data))
    }

    /// Reads a 16-byte little-endian Microsoft-style GUID (see §6 of the
    /// shell item wire-level invariants: time_low/time_mid/time_hi_version
    /// little-endian, remaining 8 bytes stored verbatim).
    pub fn read_guid(&mut self, context: &'static str) -> Result<Uuid, Error> {
        let data = self.slice(16, context)?;
        let bytes: [u8; 16] = data.try_into().expect("slice length checked above");
        Ok(Uuid::from_bytes_le(bytes))
    }
}

/// Reads a GUID directly out of a byte slice at a fixed offset, without a
/// cursor. Several variant decoders need a GUID at a `data_size`-relative
/// offset that doesn't line up with otherwise-sequential reads.
pub fn guid_at(bytes: &[u8], offset: usize, context: &'static str) -> Result<Uuid, Error> {
    if offset + 16 > bytes.len() {
        return Err(Error::Truncated {
            needed: offset + 16,
            available: bytes.len(),
            context,
        });
    }
    let array: [u8; 16] = bytes[offset..offset + 16]
        .try_into()
        .expect("length checked above");
    Ok(Uuid::from_bytes_le(array))
}

/// Scans a single-byte-encoded (extended ASCII / code-page) run starting at
/// `offset`, up to and including its NUL terminator. Returns the raw bytes
/// (terminator included) and the number of bytes consumed. Fails if no NUL
/// is found before `bytes` ends.
pub fn scan_single_byte_string<'a>(
    bytes: &'a [u8],
    offset: usize,
    context: &'static str,
) -> Result<(&'a [u8], usize), Error> {
    if offset > bytes.len() {
        return Err(Error::Malformed { context, offset });
    }
    let search = &bytes[offset..];
    match search.iter().position(|&b| b == 0) {
        Some(nul) => Ok((&search[..=nul], nul + 1)),
        None => Err(Error::Malformed { context, offset }),
    }
}

/// Scans a UTF-16LE run starting at `offset`, up to and including its
/// double-NUL (U+0000 code unit) terminator. Returns the raw `u16` code
/// units (terminator included) and the number of *bytes* consumed.
pub fn scan_utf16le_string(
    bytes: &[u8],
    offset: usize,
    context: &'static str,
) -> Result<(Vec<u16>, usize), Error> {
    let mut units = Vec::new();
    let mut position = offset;
    loop {
        if position + 2 > bytes.len() {
            return Err(Error::Malformed {
                context,
                offset: position,
            });
        }
        let unit = LittleEndian::read_u16(&bytes[position..position + 2]);
        units.push(unit);
        position += 2;
        if unit == 0 {
            break;
        }
    }
    Ok((units, position - offset))
}
