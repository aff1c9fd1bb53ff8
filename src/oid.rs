//! ObjectId

use std::{
    convert::TryFrom,
    fmt,
    str::FromStr,
};

use crate::error::{Error, Result};

const OBJECT_ID_LEN: usize = 12;

/// A wrapper around a raw 12-byte ObjectId.
///
/// The codec never generates ids, it only carries them: the bytes are copied verbatim from
/// the wire on decode and written verbatim on encode.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    id: [u8; OBJECT_ID_LEN],
}

impl ObjectId {
    /// Constructs a new ObjectId wrapper around the raw byte representation.
    pub const fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> ObjectId {
        ObjectId { id: bytes }
    }

    /// Creates an ObjectId using a 12-byte (24-char) hexadecimal string.
    pub fn parse_str(s: impl AsRef<str>) -> Result<ObjectId> {
        let s = s.as_ref();
        let bytes = hex::decode(s.as_bytes())
            .map_err(|e| Error::type_mismatch(format!("invalid ObjectId hex {s:?}: {e}")))?;
        ObjectId::try_from(bytes.as_slice())
    }

    /// Returns the raw byte representation of an ObjectId.
    pub const fn bytes(&self) -> [u8; OBJECT_ID_LEN] {
        self.id
    }

    /// Convert this [`ObjectId`] to its hex string representation.
    pub fn to_hex(self) -> String {
        hex::encode(self.id)
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<ObjectId> {
        let id: [u8; OBJECT_ID_LEN] = bytes.try_into().map_err(|_| {
            Error::type_mismatch(format!(
                "ObjectId must be exactly {} bytes, got {}",
                OBJECT_ID_LEN,
                bytes.len()
            ))
        })?;
        Ok(ObjectId::from_bytes(id))
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl From<[u8; OBJECT_ID_LEN]> for ObjectId {
    fn from(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("ObjectId").field(&self.to_hex()).finish()
    }
}
