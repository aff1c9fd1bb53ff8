//! Typed values to host terms.

use tracing::trace;

use crate::{
    binary::Binary,
    bson::{Array, Bson, DbPointer, Document, JavaScriptCodeWithScope, Regex, Timestamp},
    error::{Error, Result, try_with_key},
    marker,
    term::{DecodeOptions, Map, Term},
};

/// Converts a decoded document into its host shape. Nesting was already bounded by the
/// wire decoder, so the recursion here is too.
pub(crate) fn document_to_term(doc: Document, options: &DecodeOptions) -> Result<Term> {
    let mut acc = accumulator(doc.len() * 2)?;
    for (key, value) in doc {
        let value = try_with_key(&key, || bson_to_term(value, options))?;
        acc.push(Term::Binary(key));
        acc.push(value);
    }
    make_document(acc, options)
}

fn accumulator(capacity: usize) -> Result<Vec<Term>> {
    let mut acc = Vec::new();
    acc.try_reserve_exact(capacity).map_err(|e| {
        Error::internal(format!("failed to allocate {} entries: {}", capacity, e))
    })?;
    Ok(acc)
}

/// Finishes a flat `key, value, ...` accumulator as either a tuple or a map.
fn make_document(acc: Vec<Term>, options: &DecodeOptions) -> Result<Term> {
    if acc.len() % 2 != 0 {
        return Err(Error::structural(format!(
            "document has an odd number of key/value entries: {}",
            acc.len()
        )));
    }
    if !options.map_documents {
        return Ok(Term::Tuple(acc));
    }

    let mut map = Map::with_capacity_and_hasher(acc.len() / 2, Default::default());
    let mut entries = acc.into_iter();
    while let (Some(key), Some(value)) = (entries.next(), entries.next()) {
        match key {
            Term::Binary(key) => {
                map.insert(key, value);
            }
            other => {
                return Err(Error::structural(format!(
                    "document key is not binary: {}",
                    other
                )));
            }
        }
    }
    Ok(Term::Map(map))
}

fn array_to_term(arr: Array, options: &DecodeOptions) -> Result<Term> {
    let mut items = accumulator(arr.len())?;
    for (index, value) in arr.into_iter().enumerate() {
        let key = index.to_string();
        items.push(try_with_key(key.as_bytes(), || bson_to_term(value, options))?);
    }
    Ok(Term::List(items))
}

fn bson_to_term(value: Bson, options: &DecodeOptions) -> Result<Term> {
    let term = match value {
        Bson::Double(f) => Term::Float(f),
        Bson::String(s) | Bson::Symbol(s) => Term::Binary(s),
        Bson::Document(doc) => {
            trace!(entries = doc.len(), "mapping embedded document");
            document_to_term(doc, options)?
        }
        Bson::Array(arr) => array_to_term(arr, options)?,
        Bson::Binary(Binary { subtype, bytes }) => Term::Tuple(vec![
            Term::Atom(marker::TYPE),
            Term::Integer(u8::from(subtype).into()),
            Term::Atom(marker::BINARY),
            Term::Binary(bytes),
        ]),
        Bson::Undefined => Term::Atom(marker::UNDEFINED),
        Bson::ObjectId(id) => Term::object_id(id),
        Bson::Boolean(b) => Term::from(b),
        Bson::DateTime(dt) => Term::date(dt.timestamp_millis()),
        Bson::Null => Term::Atom(marker::NULL),
        Bson::RegularExpression(Regex { pattern, options: flags }) => Term::regex(pattern, flags),
        Bson::DbPointer(DbPointer { namespace, id }) => Term::db_pointer(namespace, id),
        Bson::JavaScriptCode(code) => Term::javascript(code),
        Bson::JavaScriptCodeWithScope(JavaScriptCodeWithScope { code, scope }) => {
            Term::javascript_with_scope(code, document_to_term(scope, options)?)
        }
        Bson::Int32(i) => Term::Integer(i.into()),
        Bson::Int64(i) => Term::Integer(i.into()),
        Bson::Timestamp(Timestamp { time, increment }) => Term::timestamp(time, increment),
        Bson::MinKey => Term::Atom(marker::MIN_KEY),
        Bson::MaxKey => Term::Atom(marker::MAX_KEY),
    };
    Ok(term)
}
