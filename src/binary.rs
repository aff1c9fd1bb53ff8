use std::fmt::{self, Display};

use crate::{base64, spec::BinarySubtype};

/// Represents a BSON binary value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binary {
    /// The subtype of the bytes.
    pub subtype: BinarySubtype,

    /// The binary bytes. For [`BinarySubtype::BinaryOld`] these exclude the inner length
    /// prefix the wire format carries.
    pub bytes: Vec<u8>,
}

impl Binary {
    /// Creates a [`Binary`] of the given subtype.
    pub fn new(subtype: BinarySubtype, bytes: impl Into<Vec<u8>>) -> Self {
        Binary {
            subtype,
            bytes: bytes.into(),
        }
    }

    /// The number of payload bytes this value occupies on the wire, including the inner
    /// length prefix of the old binary subtype.
    pub(crate) fn wire_len(&self) -> usize {
        match self.subtype {
            BinarySubtype::BinaryOld => self.bytes.len() + 4,
            _ => self.bytes.len(),
        }
    }
}

impl Display for Binary {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "Binary({:#x}, {})",
            u8::from(self.subtype),
            base64::encode(&self.bytes)
        )
    }
}
