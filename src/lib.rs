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

//! BSON is a binary format in which zero or more key/value pairs are stored as a single entity.
//! We call this entity a document.
//!
//! This library converts between BSON bytes and two value models:
//!
//! * the typed model ([`Bson`], [`Document`]), via [`decode_document`] and
//!   [`encode_document`], which round-trips every element type byte for byte;
//! * the host model ([`Term`]), via [`decode`] and [`encode`], where extended types are
//!   represented by tuples tagged with the [`marker`] atoms and the wire type is chosen from
//!   the shape of the term.
//!
//! Both directions bound nesting at [`MAX_DEPTH`] levels of documents and arrays.
//!
//! ## Basic usage
//!
//! ```rust
//! use cabala::{DecodeOptions, EncodeOptions, Term, decode, encode};
//!
//! let term = Term::document([
//!     ("name", Term::binary("cabala")),
//!     ("stars", Term::Integer(42)),
//!     ("tags", Term::List(vec![Term::binary("bson")])),
//! ]);
//!
//! let bytes = encode(&term, &EncodeOptions::new())?;
//! assert_eq!(decode(&bytes, &DecodeOptions::new())?, term);
//! # Ok::<(), cabala::error::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

use tracing::{debug, trace};

pub use self::{
    binary::Binary,
    bson::{Array, Bson, DbPointer, Document, JavaScriptCodeWithScope, Regex, Timestamp},
    datetime::DateTime,
    decoder::decode_document,
    encoder::encode_document,
    oid::ObjectId,
    spec::{BinarySubtype, ElementType},
    term::{Atom, DecodeOptions, EncodeOptions, Map, Term},
};

#[macro_use]
mod macros;
mod base64;
mod binary;
mod bson;
mod datetime;
mod decoder;
pub mod document;
mod encoder;
pub mod error;
pub mod marker;
pub mod oid;
mod raw;
pub mod spec;
mod term;


/// The maximum nesting of documents and arrays, counted from the top-level document at depth
/// zero. A code-with-scope scope counts as one level.
pub const MAX_DEPTH: usize = 100;

/// Decode a BSON buffer into a host [`Term`].
///
/// Documents decode to flat `key, value, ...` tuples in input order, or to [`Term::Map`] when
/// [`DecodeOptions::map_documents`] is set. The buffer must hold exactly one document.
///
/// ```rust
/// use cabala::{DecodeOptions, Term, decode};
///
/// let empty = decode(b"\x05\x00\x00\x00\x00", &DecodeOptions::new())?;
/// assert_eq!(empty, Term::Tuple(vec![]));
/// # Ok::<(), cabala::error::Error>(())
/// ```
pub fn decode(bytes: &[u8], options: &DecodeOptions) -> error::Result<Term> {
    trace!(len = bytes.len(), map_documents = options.map_documents, "decode");

    let result = decode_inner(bytes, options);
    if let Err(ref e) = result {
        debug!(error = %e, "decode failed");
    }
    result
}

fn decode_inner(bytes: &[u8], options: &DecodeOptions) -> error::Result<Term> {
    if bytes.len() == raw::MIN_BSON_DOCUMENT_SIZE as usize {
        // the only well-formed five byte document is the empty one
        raw::document_body(bytes)?;
        return Ok(if options.map_documents {
            Term::Map(Map::default())
        } else {
            Term::Tuple(Vec::new())
        });
    }

    let doc = decode_document(bytes)?;
    term::document_to_term(doc, options)
}

/// Encode a host [`Term`] into a BSON buffer.
///
/// The term must be a [`Term::Map`] or a flat key/value [`Term::Tuple`]; any other top-level
/// shape fails with [`ErrorKind::InvalidArgument`](error::ErrorKind::InvalidArgument).
///
/// ```rust
/// use cabala::{EncodeOptions, Term, encode};
///
/// let bytes = encode(&Term::document([("n", Term::Integer(1))]), &EncodeOptions::new())?;
/// assert_eq!(bytes, b"\x0c\x00\x00\x00\x10n\x00\x01\x00\x00\x00\x00".to_vec());
/// # Ok::<(), cabala::error::Error>(())
/// ```
pub fn encode(term: &Term, options: &EncodeOptions) -> error::Result<Vec<u8>> {
    trace!(?options, "encode");

    let result = term::term_to_document(term).and_then(|doc| encode_document(&doc));
    if let Err(ref e) = result {
        debug!(error = %e, "encode failed");
    }
    result
}
