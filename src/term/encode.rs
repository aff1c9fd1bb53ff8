//! Host terms to typed values.
//!
//! Classification follows a fixed order, the first match winning: binaries become strings,
//! maps become documents, tuples are checked for marker tags before being read as flat
//! key/value documents, atoms are matched against the constants before falling back to
//! strings, lists become arrays, and numbers take the narrowest wire type that holds them.

use tracing::trace;

use crate::{
    MAX_DEPTH,
    binary::Binary,
    bson::{Array, Bson, DbPointer, Document, JavaScriptCodeWithScope, Regex, Timestamp},
    datetime::DateTime,
    error::{Error, Result, try_with_key},
    marker,
    oid::ObjectId,
    raw,
    spec::BinarySubtype,
    term::{Atom, Map, Term},
};

/// Converts a top-level term into a document. The top level must be a map or a flat
/// key/value tuple, and a top-level tuple is never read as a marker-tagged value.
pub(crate) fn term_to_document(term: &Term) -> Result<Document> {
    let classifier = Classifier::new(0);
    match *term {
        Term::Map(ref map) => classifier.document_from_map(map),
        Term::Tuple(ref items) => classifier.document_from_pairs(items),
        ref other => Err(Error::invalid_argument(format!(
            "top-level value must be a map or a tuple, got {}",
            other
        ))),
    }
}

/// The bytes of a string-like term: a binary as is, or the name of an atom.
fn term_bytes<'a>(term: &'a Term, what: &str) -> Result<&'a [u8]> {
    match *term {
        Term::Binary(ref b) => Ok(b),
        Term::Atom(ref a) => Ok(a.as_str().as_bytes()),
        ref other => Err(Error::type_mismatch(format!(
            "{} must be a binary or an atom, got {}",
            what, other
        ))),
    }
}

fn owned_bytes(term: &Term, what: &str) -> Result<Vec<u8>> {
    raw::copy_bytes(term_bytes(term, what)?)
}

fn object_id(term: &Term) -> Result<ObjectId> {
    ObjectId::try_from(term_bytes(term, "ObjectId")?)
}

fn integer<T: TryFrom<i128>>(term: &Term, what: &str) -> Result<T> {
    match *term {
        Term::Integer(i) => T::try_from(i)
            .map_err(|_| Error::type_mismatch(format!("{} out of range: {}", what, i))),
        ref other => Err(Error::type_mismatch(format!(
            "{} must be an integer, got {}",
            what, other
        ))),
    }
}

fn classify_atom(atom: &Atom) -> Result<Bson> {
    let value = if *atom == marker::NULL || *atom == marker::UNDEFINED {
        Bson::Null
    } else if *atom == marker::TRUE {
        Bson::Boolean(true)
    } else if *atom == marker::FALSE {
        Bson::Boolean(false)
    } else if *atom == marker::MIN_KEY {
        Bson::MinKey
    } else if *atom == marker::MAX_KEY {
        Bson::MaxKey
    } else {
        Bson::String(raw::copy_bytes(atom.as_str().as_bytes())?)
    };
    Ok(value)
}

fn classify_integer(i: i128) -> Result<Bson> {
    if let Ok(v) = i32::try_from(i) {
        Ok(Bson::Int32(v))
    } else if let Ok(v) = i64::try_from(i) {
        Ok(Bson::Int64(v))
    } else {
        Err(Error::type_mismatch(format!(
            "integer does not fit in 64 bits: {}",
            i
        )))
    }
}

/// Depth-limited walk over a term tree, mirroring the wire decoder's nesting rules.
struct Classifier {
    depth: usize,
}

impl Classifier {
    fn new(depth: usize) -> Self {
        Self { depth }
    }

    fn child(&self) -> Result<Classifier> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::too_deep());
        }
        Ok(Classifier::new(self.depth + 1))
    }

    fn document_from_map(&self, map: &Map) -> Result<Document> {
        let mut doc = Document::with_capacity(map.len());
        for (key, value) in map {
            let value = try_with_key(key, || self.classify(value))?;
            doc.push(raw::copy_bytes(key)?, value);
        }
        Ok(doc)
    }

    fn document_from_pairs(&self, items: &[Term]) -> Result<Document> {
        if items.len() % 2 != 0 {
            return Err(Error::structural(format!(
                "key/value tuple has odd arity {}",
                items.len()
            )));
        }

        let mut doc = Document::with_capacity(items.len() / 2);
        for pair in items.chunks_exact(2) {
            let key = term_bytes(&pair[0], "document key")?;
            let value = try_with_key(key, || self.classify(&pair[1]))?;
            doc.push(raw::copy_bytes(key)?, value);
        }
        Ok(doc)
    }

    fn array_from_list(&self, items: &[Term]) -> Result<Array> {
        let mut arr = Array::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let key = index.to_string();
            arr.push(try_with_key(key.as_bytes(), || self.classify(item))?);
        }
        Ok(arr)
    }

    /// A document given either as a map or as a flat key/value tuple.
    fn scope_document(&self, scope: &Term) -> Result<Document> {
        let child = self.child()?;
        match *scope {
            Term::Map(ref map) => child.document_from_map(map),
            Term::Tuple(ref items) => child.document_from_pairs(items),
            ref other => Err(Error::type_mismatch(format!(
                "scope must be a map or a tuple, got {}",
                other
            ))),
        }
    }

    fn classify(&self, term: &Term) -> Result<Bson> {
        match *term {
            Term::Binary(ref b) => Ok(Bson::String(raw::copy_bytes(b)?)),
            Term::Map(ref map) => {
                let child = self.child()?;
                trace!(depth = child.depth, entries = map.len(), "classifying map");
                Ok(Bson::Document(child.document_from_map(map)?))
            }
            Term::Tuple(ref items) => self.classify_tuple(items),
            Term::Atom(ref atom) => classify_atom(atom),
            Term::List(ref items) => {
                let child = self.child()?;
                trace!(depth = child.depth, entries = items.len(), "classifying list");
                Ok(Bson::Array(child.array_from_list(items)?))
            }
            Term::Integer(i) => classify_integer(i),
            Term::Float(f) => Ok(Bson::Double(f)),
        }
    }

    fn classify_tuple(&self, items: &[Term]) -> Result<Bson> {
        let value = match items {
            [tag, id] if tag.is_atom(&marker::OID) => Bson::ObjectId(object_id(id)?),
            [tag, millis] if tag.is_atom(&marker::DATE) => {
                Bson::DateTime(DateTime::from_millis(integer(millis, "date")?))
            }
            [tag, code] if tag.is_atom(&marker::JAVASCRIPT) => {
                Bson::JavaScriptCode(owned_bytes(code, "JavaScript code")?)
            }
            [tag, subtype, label, bytes]
                if tag.is_atom(&marker::TYPE) && label.is_atom(&marker::BINARY) =>
            {
                let code: u8 = integer(subtype, "binary subtype")?;
                let subtype = BinarySubtype::from_encodable(code).ok_or_else(|| {
                    Error::type_mismatch(format!("unrecognized binary subtype: {:#04x}", code))
                })?;
                Bson::Binary(Binary::new(subtype, owned_bytes(bytes, "binary data")?))
            }
            [tag, pattern, label, options]
                if tag.is_atom(&marker::REGEX) && label.is_atom(&marker::OPTIONS) =>
            {
                Bson::RegularExpression(Regex::new(
                    owned_bytes(pattern, "regex pattern")?,
                    owned_bytes(options, "regex options")?,
                ))
            }
            [tag, code, label, scope]
                if tag.is_atom(&marker::JAVASCRIPT) && label.is_atom(&marker::SCOPE) =>
            {
                Bson::JavaScriptCodeWithScope(JavaScriptCodeWithScope {
                    code: owned_bytes(code, "JavaScript code")?,
                    scope: self.scope_document(scope)?,
                })
            }
            [tag, time, label, increment]
                if tag.is_atom(&marker::TIMESTAMP) && label.is_atom(&marker::INCREMENT) =>
            {
                Bson::Timestamp(Timestamp {
                    time: integer(time, "timestamp time")?,
                    increment: integer(increment, "timestamp increment")?,
                })
            }
            [tag, namespace, label, id]
                if tag.is_atom(&marker::REF) && label.is_atom(&marker::OID) =>
            {
                Bson::DbPointer(DbPointer {
                    namespace: owned_bytes(namespace, "DBPointer namespace")?,
                    id: Some(object_id(id)?),
                })
            }
            _ => {
                let child = self.child()?;
                trace!(depth = child.depth, arity = items.len(), "classifying tuple document");
                Bson::Document(child.document_from_pairs(items)?)
            }
        };
        Ok(value)
    }
}
