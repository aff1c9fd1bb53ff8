//! Low-level primitives shared by the decoder and encoder: a bounds-checked cursor over a
//! borrowed buffer, a fallible binary-safe copy, and the little-endian/cstring writers.

use crate::error::{Error, Result};

pub(crate) const MIN_BSON_STRING_SIZE: i32 = 4 + 1; // 4 bytes for length, one byte for null terminator
pub(crate) const MIN_BSON_DOCUMENT_SIZE: i32 = 4 + 1; // 4 bytes for length, one byte for null terminator
pub(crate) const MIN_CODE_WITH_SCOPE_SIZE: i32 = 4 + MIN_BSON_STRING_SIZE + MIN_BSON_DOCUMENT_SIZE;

/// A forward-only reader over a borrowed slice. Every read checks the remaining length first
/// and reports truncation as [`ErrorKind::BadInput`](crate::error::ErrorKind::BadInput).
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.offset >= self.buf.len()
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = checked_add(self.offset, len)?;
        let bytes = self.buf.get(self.offset..end).ok_or_else(|| {
            Error::bad_input(format!(
                "length exceeds remaining length of buffer: {} vs {}",
                len,
                self.remaining()
            ))
        })?;
        self.offset = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        // the slice has exactly N bytes
        let mut out = [0; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub(crate) fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub(crate) fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    pub(crate) fn read_u64_bytes(&mut self) -> Result<[u8; 8]> {
        self.read_array()
    }

    pub(crate) fn read_object_id_bytes(&mut self) -> Result<[u8; 12]> {
        self.read_array()
    }

    pub(crate) fn read_bool(&mut self) -> Result<bool> {
        let val = self.read_u8()?;
        if val > 1 {
            return Err(Error::bad_input(format!(
                "boolean must be stored as 0 or 1, got {}",
                val
            )));
        }
        Ok(val != 0)
    }

    /// Reads a length prefix, failing if it is below `min`.
    pub(crate) fn read_len(&mut self, min: i32) -> Result<usize> {
        let length = self.read_i32()?;
        if length < min {
            return Err(Error::bad_input(format!(
                "length prefix must be at least {}, got {}",
                min, length
            )));
        }
        usize_try_from_i32(length)
    }

    /// Reads a NUL-terminated string, returning the bytes before the terminator.
    pub(crate) fn read_cstring(&mut self) -> Result<&'a [u8]> {
        let rest = &self.buf[self.offset..];
        let len = rest
            .iter()
            .position(|b| *b == 0)
            .ok_or_else(|| Error::bad_input("expected string to be null-terminated"))?;
        let s = &rest[..len];
        self.offset += len + 1;
        Ok(s)
    }

    /// Reads an int32-length-prefixed string whose declared length includes the trailing NUL,
    /// returning the bytes before the terminator. The payload itself may contain NUL bytes.
    pub(crate) fn read_string(&mut self) -> Result<&'a [u8]> {
        // the declared length covers the terminator but not the prefix
        let length = self.read_len(MIN_BSON_STRING_SIZE - 4)?;
        let bytes = self.read_bytes(length)?;
        match bytes.split_last() {
            Some((0, s)) => Ok(s),
            _ => Err(Error::bad_input("expected string to be null-terminated")),
        }
    }

    /// Reads an embedded document or array, returning its complete bytes (length prefix and
    /// trailing NUL included).
    pub(crate) fn read_document_bytes(&mut self) -> Result<&'a [u8]> {
        let start = self.offset;
        let length = self.read_len(MIN_BSON_DOCUMENT_SIZE)?;
        // the prefix counts itself
        self.read_bytes(length - 4)?;
        Ok(&self.buf[start..self.offset])
    }
}

/// Splits a complete document into the bytes between its length prefix and its trailing NUL,
/// after checking that the declared length matches the slice exactly.
pub(crate) fn document_body(bytes: &[u8]) -> Result<&[u8]> {
    if bytes.len() < MIN_BSON_DOCUMENT_SIZE as usize {
        return Err(Error::bad_input(format!(
            "document too small: {} bytes",
            bytes.len()
        )));
    }
    let declared = Cursor::new(bytes).read_i32()?;
    if usize::try_from(declared).ok() != Some(bytes.len()) {
        return Err(Error::bad_input(format!(
            "declared document length {} does not match buffer length {}",
            declared,
            bytes.len()
        )));
    }
    match bytes[4..].split_last() {
        Some((0, body)) => Ok(body),
        _ => Err(Error::bad_input("document not null terminated")),
    }
}

/// Copies a borrowed payload into an owned buffer, surfacing allocation failure as an error
/// rather than aborting.
pub(crate) fn copy_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.try_reserve_exact(bytes.len())
        .map_err(|e| Error::internal(format!("failed to allocate {} bytes: {}", bytes.len(), e)))?;
    out.extend_from_slice(bytes);
    Ok(out)
}

fn usize_try_from_i32(i: i32) -> Result<usize> {
    usize::try_from(i).map_err(Error::bad_input)
}

fn checked_add(lhs: usize, rhs: usize) -> Result<usize> {
    lhs.checked_add(rhs)
        .ok_or_else(|| Error::bad_input("attempted to add with overflow"))
}

/// Converts a length to an int32 length prefix, failing if it does not fit.
pub(crate) fn length_prefix(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| {
        Error::internal(format!("length {} exceeds the maximum BSON size", len))
    })
}

pub(crate) fn write_cstring(buf: &mut Vec<u8>, s: &[u8]) -> Result<()> {
    if s.contains(&0) {
        return Err(Error::type_mismatch(format!(
            "cstring with interior null: {:?}",
            String::from_utf8_lossy(s)
        )));
    }
    buf.extend_from_slice(s);
    buf.push(0);
    Ok(())
}

pub(crate) fn write_string(buf: &mut Vec<u8>, s: &[u8]) -> Result<()> {
    let len = length_prefix(s.len() + 1)?;
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(s);
    buf.push(0);
    Ok(())
}

/// Frames a finished element list as a document: length prefix, elements, trailing NUL.
pub(crate) fn write_document(buf: &mut Vec<u8>, elements: &[u8]) -> Result<()> {
    let len = length_prefix(elements.len() + MIN_BSON_DOCUMENT_SIZE as usize)?;
    buf.extend_from_slice(&len.to_le_bytes());
    buf.extend_from_slice(elements);
    buf.push(0);
    Ok(())
}
