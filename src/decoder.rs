// The MIT License (MIT)

// Copyright (c) 2015 Y. T. Chung <zonyitoo@gmail.com>

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Decoder

use tracing::trace;

use crate::{
    MAX_DEPTH,
    binary::Binary,
    bson::{Array, Bson, DbPointer, Document, JavaScriptCodeWithScope, Regex, Timestamp},
    datetime::DateTime,
    error::{Error, Result, try_with_key},
    oid::ObjectId,
    raw::{self, Cursor, MIN_CODE_WITH_SCOPE_SIZE},
    spec::{BinarySubtype, ElementType},
};

/// Decode a complete BSON document from `bytes`.
///
/// The declared length of the document must match `bytes.len()` exactly. String payloads are
/// copied verbatim and never validated, repeated keys are preserved in input order, and
/// nesting deeper than [`MAX_DEPTH`] fails with
/// [`ErrorKind::TooDeep`](crate::error::ErrorKind::TooDeep).
///
/// ```rust
/// use cabala::{Bson, decode_document};
///
/// let bytes = b"\x13\x00\x00\x00\x02hi\x00\x06\x00\x00\x00y'all\x00\x00";
/// let doc = decode_document(bytes)?;
/// assert_eq!(doc.get("hi").and_then(Bson::as_str), Some("y'all"));
/// # Ok::<(), cabala::error::Error>(())
/// ```
pub fn decode_document(bytes: &[u8]) -> Result<Document> {
    let mut doc = Document::new();
    Decoder::new(0).decode_elements(bytes, &mut doc)?;
    Ok(doc)
}

/// Receives the decoded elements of one container. Documents keep keys, arrays keep only
/// the values in positional order.
trait Accumulator {
    fn append(&mut self, key: &[u8], value: Bson) -> Result<()>;
}

impl Accumulator for Document {
    fn append(&mut self, key: &[u8], value: Bson) -> Result<()> {
        self.push(raw::copy_bytes(key)?, value);
        Ok(())
    }
}

impl Accumulator for Array {
    fn append(&mut self, _key: &[u8], value: Bson) -> Result<()> {
        self.push(value);
        Ok(())
    }
}

/// Depth-limited recursive descent over a document's bytes.
struct Decoder {
    depth: usize,
}

impl Decoder {
    fn new(depth: usize) -> Self {
        Self { depth }
    }

    /// Returns a decoder for a container nested inside the current one.
    fn child(&self) -> Result<Decoder> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::too_deep());
        }
        Ok(Decoder::new(self.depth + 1))
    }

    fn decode_elements<A: Accumulator>(&self, bytes: &[u8], out: &mut A) -> Result<()> {
        let mut cursor = Cursor::new(raw::document_body(bytes)?);

        while !cursor.is_empty() {
            let tag = cursor.read_u8()?;
            let key = cursor.read_cstring()?;
            let value = try_with_key(key, || self.decode_bson(tag, &mut cursor))?;
            out.append(key, value)?;
        }

        Ok(())
    }

    fn decode_document(&self, cursor: &mut Cursor<'_>) -> Result<Document> {
        let bytes = cursor.read_document_bytes()?;
        let child = self.child()?;
        trace!(depth = child.depth, len = bytes.len(), "decoding embedded document");

        let mut doc = Document::new();
        child.decode_elements(bytes, &mut doc)?;
        Ok(doc)
    }

    fn decode_array(&self, cursor: &mut Cursor<'_>) -> Result<Array> {
        let bytes = cursor.read_document_bytes()?;
        let child = self.child()?;
        trace!(depth = child.depth, len = bytes.len(), "decoding array");

        let mut arr = Array::new();
        child.decode_elements(bytes, &mut arr)?;
        Ok(arr)
    }

    fn decode_binary(&self, cursor: &mut Cursor<'_>) -> Result<Binary> {
        let len = cursor.read_len(0)?;
        let subtype = BinarySubtype::from(cursor.read_u8()?);
        let data = cursor.read_bytes(len)?;

        let bytes = match subtype {
            BinarySubtype::BinaryOld => {
                let mut inner = Cursor::new(data);
                let old_len = inner.read_len(0).map_err(|_| {
                    Error::bad_input("old binary subtype has no inner declared length")
                })?;
                if old_len + 4 != len {
                    return Err(Error::bad_input(
                        "old binary subtype has wrong inner declared length",
                    ));
                }
                &data[4..]
            }
            _ => data,
        };

        Ok(Binary {
            subtype,
            bytes: raw::copy_bytes(bytes)?,
        })
    }

    fn decode_code_with_scope(&self, cursor: &mut Cursor<'_>) -> Result<JavaScriptCodeWithScope> {
        let total = cursor.read_len(MIN_CODE_WITH_SCOPE_SIZE)?;
        // the total length counts its own prefix
        let mut inner = Cursor::new(cursor.read_bytes(total - 4)?);

        let code = raw::copy_bytes(inner.read_string()?)?;
        let scope = self.decode_document(&mut inner)?;
        if !inner.is_empty() {
            return Err(Error::bad_input(
                "code with scope length does not match its contents",
            ));
        }

        Ok(JavaScriptCodeWithScope { code, scope })
    }

    fn decode_bson(&self, tag: u8, cursor: &mut Cursor<'_>) -> Result<Bson> {
        let element_type = ElementType::from(tag)
            .ok_or_else(|| Error::bad_input(format!("invalid tag: {}", tag)))?;

        let value = match element_type {
            ElementType::Double => Bson::Double(cursor.read_f64()?),
            ElementType::String => Bson::String(raw::copy_bytes(cursor.read_string()?)?),
            ElementType::EmbeddedDocument => Bson::Document(self.decode_document(cursor)?),
            ElementType::Array => Bson::Array(self.decode_array(cursor)?),
            ElementType::Binary => Bson::Binary(self.decode_binary(cursor)?),
            ElementType::Undefined => Bson::Undefined,
            ElementType::ObjectId => {
                Bson::ObjectId(ObjectId::from_bytes(cursor.read_object_id_bytes()?))
            }
            ElementType::Boolean => Bson::Boolean(cursor.read_bool()?),
            ElementType::DateTime => Bson::DateTime(DateTime::from_millis(cursor.read_i64()?)),
            ElementType::Null => Bson::Null,
            ElementType::RegularExpression => {
                let pattern = raw::copy_bytes(cursor.read_cstring()?)?;
                let options = raw::copy_bytes(cursor.read_cstring()?)?;
                Bson::RegularExpression(Regex { pattern, options })
            }
            ElementType::DbPointer => {
                let namespace = raw::copy_bytes(cursor.read_string()?)?;
                let id = ObjectId::from_bytes(cursor.read_object_id_bytes()?);
                Bson::DbPointer(DbPointer {
                    namespace,
                    id: Some(id),
                })
            }
            ElementType::JavaScriptCode => {
                Bson::JavaScriptCode(raw::copy_bytes(cursor.read_string()?)?)
            }
            ElementType::Symbol => Bson::Symbol(raw::copy_bytes(cursor.read_string()?)?),
            ElementType::JavaScriptCodeWithScope => {
                Bson::JavaScriptCodeWithScope(self.decode_code_with_scope(cursor)?)
            }
            ElementType::Int32 => Bson::Int32(cursor.read_i32()?),
            ElementType::Timestamp => {
                Bson::Timestamp(Timestamp::from_le_bytes(cursor.read_u64_bytes()?))
            }
            ElementType::Int64 => Bson::Int64(cursor.read_i64()?),
            ElementType::MaxKey => Bson::MaxKey,
            ElementType::MinKey => Bson::MinKey,
        };

        Ok(value)
    }
}
