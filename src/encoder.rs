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

//! Encoder

use tracing::trace;

use crate::{
    MAX_DEPTH,
    binary::Binary,
    bson::{Array, Bson, DbPointer, Document, JavaScriptCodeWithScope, Regex},
    error::{Error, Result, try_with_key},
    raw::{self, length_prefix},
    spec::BinarySubtype,
};

/// Encode a [`Document`] into a freshly allocated BSON buffer.
///
/// Each embedded document or array is built in its own buffer and only copied into its
/// parent once it is complete, so a failure anywhere discards all partial output.
///
/// ```rust
/// use cabala::{Document, encode_document};
///
/// let mut doc = Document::new();
/// doc.push("hi", "y'all");
/// assert_eq!(
///     encode_document(&doc)?,
///     b"\x13\x00\x00\x00\x02hi\x00\x06\x00\x00\x00y'all\x00\x00".to_vec(),
/// );
/// # Ok::<(), cabala::error::Error>(())
/// ```
pub fn encode_document(doc: &Document) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    Encoder::new(&mut buf, 0).encode_document(doc)?;
    Ok(buf)
}

struct Encoder<'a> {
    writer: &'a mut Vec<u8>,
    depth: usize,
}

impl<'a> Encoder<'a> {
    fn new(writer: &'a mut Vec<u8>, depth: usize) -> Encoder<'a> {
        Encoder { writer, depth }
    }

    fn child_depth(&self) -> Result<usize> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::too_deep());
        }
        Ok(self.depth + 1)
    }

    fn encode_document(&mut self, doc: &Document) -> Result<()> {
        let mut buf = Vec::new();
        {
            let mut enc = Encoder::new(&mut buf, self.depth);
            for (key, val) in doc {
                try_with_key(key, || enc.encode_bson(key, val))?;
            }
        }

        raw::write_document(self.writer, &buf)
    }

    fn encode_array(&mut self, arr: &Array) -> Result<()> {
        let mut buf = Vec::new();
        {
            let mut enc = Encoder::new(&mut buf, self.depth);
            for (index, val) in arr.iter().enumerate() {
                let key = index.to_string();
                try_with_key(key.as_bytes(), || enc.encode_bson(key.as_bytes(), val))?;
            }
        }

        raw::write_document(self.writer, &buf)
    }

    fn encode_embedded_document(&mut self, doc: &Document) -> Result<()> {
        let depth = self.child_depth()?;
        trace!(depth, entries = doc.len(), "encoding embedded document");
        Encoder::new(&mut *self.writer, depth).encode_document(doc)
    }

    fn encode_embedded_array(&mut self, arr: &Array) -> Result<()> {
        let depth = self.child_depth()?;
        trace!(depth, entries = arr.len(), "encoding array");
        Encoder::new(&mut *self.writer, depth).encode_array(arr)
    }

    fn encode_binary(&mut self, binary: &Binary) -> Result<()> {
        let len = length_prefix(binary.wire_len())?;
        self.writer.extend_from_slice(&len.to_le_bytes());
        self.writer.push(binary.subtype.into());

        if let BinarySubtype::BinaryOld = binary.subtype {
            let old_len = length_prefix(binary.bytes.len())?;
            self.writer.extend_from_slice(&old_len.to_le_bytes());
        }

        self.writer.extend_from_slice(&binary.bytes);
        Ok(())
    }

    fn encode_code_with_scope(&mut self, code_w_scope: &JavaScriptCodeWithScope) -> Result<()> {
        let depth = self.child_depth()?;
        let mut buf = Vec::new();
        raw::write_string(&mut buf, &code_w_scope.code)?;
        Encoder::new(&mut buf, depth).encode_document(&code_w_scope.scope)?;

        let len = length_prefix(buf.len() + 4)?;
        self.writer.extend_from_slice(&len.to_le_bytes());
        self.writer.extend_from_slice(&buf);
        Ok(())
    }

    fn encode_db_pointer(&mut self, pointer: &DbPointer) -> Result<()> {
        let id = pointer
            .id
            .ok_or_else(|| Error::type_mismatch("DBPointer requires a 12-byte id"))?;
        raw::write_string(self.writer, &pointer.namespace)?;
        self.writer.extend_from_slice(&id.bytes());
        Ok(())
    }

    fn encode_bson(&mut self, key: &[u8], val: &Bson) -> Result<()> {
        self.writer.push(val.element_type() as u8);
        raw::write_cstring(self.writer, key)?;

        match *val {
            Bson::Double(v) => self.writer.extend_from_slice(&v.to_le_bytes()),
            Bson::String(ref v) | Bson::JavaScriptCode(ref v) | Bson::Symbol(ref v) => {
                raw::write_string(self.writer, v)?
            }
            Bson::Array(ref v) => self.encode_embedded_array(v)?,
            Bson::Document(ref v) => self.encode_embedded_document(v)?,
            Bson::Boolean(v) => self.writer.push(v as u8),
            Bson::RegularExpression(Regex {
                ref pattern,
                ref options,
            }) => {
                raw::write_cstring(self.writer, pattern)?;
                raw::write_cstring(self.writer, options)?;
            }
            Bson::JavaScriptCodeWithScope(ref v) => self.encode_code_with_scope(v)?,
            Bson::Int32(v) => self.writer.extend_from_slice(&v.to_le_bytes()),
            Bson::Int64(v) => self.writer.extend_from_slice(&v.to_le_bytes()),
            Bson::Timestamp(ts) => self.writer.extend_from_slice(&ts.to_le_bytes()),
            Bson::Binary(ref v) => self.encode_binary(v)?,
            Bson::ObjectId(ref id) => self.writer.extend_from_slice(&id.bytes()),
            Bson::DateTime(dt) => self
                .writer
                .extend_from_slice(&dt.timestamp_millis().to_le_bytes()),
            Bson::DbPointer(ref v) => self.encode_db_pointer(v)?,
            Bson::Null | Bson::Undefined | Bson::MinKey | Bson::MaxKey => {}
        }

        Ok(())
    }
}
