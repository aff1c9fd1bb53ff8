//! The dynamically shaped host value model.
//!
//! A [`Term`] carries no BSON type information of its own: [`encode`](crate::encode) chooses
//! a wire type from the term's shape alone, consulting the [`marker`](crate::marker) atoms for
//! fixed-arity tuples, and [`decode`](crate::decode) produces exactly those shapes back.

mod decode;
mod encode;
mod options;

use std::{
    borrow::Cow,
    fmt::{self, Display},
};

use indexmap::IndexMap;

pub(crate) use self::{decode::document_to_term, encode::term_to_document};
pub use self::options::{DecodeOptions, EncodeOptions};
use crate::{marker, oid::ObjectId, spec::BinarySubtype};

/// A key-unique document representation. Duplicate keys collapse with the last write winning.
pub type Map = IndexMap<Vec<u8>, Term, ahash::RandomState>;

/// A symbolic constant, compared by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(Cow<'static, str>);

impl Atom {
    /// Creates an atom from a static name. Usable in `const` position.
    pub const fn from_static(name: &'static str) -> Atom {
        Atom(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Atom {
        Atom(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Atom {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let plain = self
            .0
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase())
            && self.0.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if plain {
            fmt.write_str(&self.0)
        } else {
            write!(fmt, "'{}'", self.0)
        }
    }
}

impl From<&'static str> for Atom {
    fn from(name: &'static str) -> Atom {
        Atom::from_static(name)
    }
}

/// A host value.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    /// Raw bytes. Encodes as a BSON string.
    Binary(Vec<u8>),
    /// A symbolic constant.
    Atom(Atom),
    /// An integer of any size the host can hold. Only values within `i64` have a wire type.
    Integer(i128),
    Float(f64),
    /// A fixed-arity tuple: either a marker-tagged extended value or a flat
    /// `key, value, key, value, ...` document.
    Tuple(Vec<Term>),
    List(Vec<Term>),
    Map(Map),
}

impl Default for Term {
    fn default() -> Self {
        Term::Atom(marker::NULL)
    }
}

impl Term {
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Term {
        Term::Binary(bytes.into())
    }

    pub fn atom(name: &'static str) -> Term {
        Term::Atom(Atom::from_static(name))
    }

    /// A flat key/value tuple document.
    pub fn document<K, I>(pairs: I) -> Term
    where
        K: Into<Vec<u8>>,
        I: IntoIterator<Item = (K, Term)>,
    {
        let mut items = Vec::new();
        for (k, v) in pairs {
            items.push(Term::Binary(k.into()));
            items.push(v);
        }
        Term::Tuple(items)
    }

    /// A map document. Later pairs overwrite earlier ones with the same key.
    pub fn map<K, I>(pairs: I) -> Term
    where
        K: Into<Vec<u8>>,
        I: IntoIterator<Item = (K, Term)>,
    {
        Term::Map(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn object_id(id: ObjectId) -> Term {
        Term::Tuple(vec![Term::Atom(marker::OID), Term::Binary(id.bytes().to_vec())])
    }

    /// A UTC datetime in milliseconds since the Unix epoch.
    pub fn date(millis: i64) -> Term {
        Term::Tuple(vec![Term::Atom(marker::DATE), Term::Integer(millis.into())])
    }

    pub fn regex(pattern: impl Into<Vec<u8>>, options: impl Into<Vec<u8>>) -> Term {
        Term::Tuple(vec![
            Term::Atom(marker::REGEX),
            Term::Binary(pattern.into()),
            Term::Atom(marker::OPTIONS),
            Term::Binary(options.into()),
        ])
    }

    pub fn timestamp(time: u32, increment: u32) -> Term {
        Term::Tuple(vec![
            Term::Atom(marker::TIMESTAMP),
            Term::Integer(time.into()),
            Term::Atom(marker::INCREMENT),
            Term::Integer(increment.into()),
        ])
    }

    /// Binary data with an explicit subtype.
    pub fn binary_with_subtype(subtype: BinarySubtype, bytes: impl Into<Vec<u8>>) -> Term {
        Term::Tuple(vec![
            Term::Atom(marker::TYPE),
            Term::Integer(u8::from(subtype).into()),
            Term::Atom(marker::BINARY),
            Term::Binary(bytes.into()),
        ])
    }

    pub fn javascript(code: impl Into<Vec<u8>>) -> Term {
        Term::Tuple(vec![Term::Atom(marker::JAVASCRIPT), Term::Binary(code.into())])
    }

    /// JavaScript code with a scope document, given as a map or a flat tuple.
    pub fn javascript_with_scope(code: impl Into<Vec<u8>>, scope: Term) -> Term {
        Term::Tuple(vec![
            Term::Atom(marker::JAVASCRIPT),
            Term::Binary(code.into()),
            Term::Atom(marker::SCOPE),
            scope,
        ])
    }

    /// A DBPointer to `id` in `namespace`. A missing id is written as `null`.
    pub fn db_pointer(namespace: impl Into<Vec<u8>>, id: Option<ObjectId>) -> Term {
        let id = match id {
            Some(id) => Term::Binary(id.bytes().to_vec()),
            None => Term::Atom(marker::NULL),
        };
        Term::Tuple(vec![
            Term::Atom(marker::REF),
            Term::Binary(namespace.into()),
            Term::Atom(marker::OID),
            id,
        ])
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match *self {
            Term::Binary(ref b) => Some(b),
            _ => None,
        }
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match *self {
            Term::Atom(ref a) => Some(a),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Term::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// Whether this term is the atom `atom`.
    pub fn is_atom(&self, atom: &Atom) -> bool {
        matches!(self, Term::Atom(a) if a == atom)
    }
}

impl From<Atom> for Term {
    fn from(a: Atom) -> Term {
        Term::Atom(a)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Term {
        Term::Binary(s.as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for Term {
    fn from(b: Vec<u8>) -> Term {
        Term::Binary(b)
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Term {
        Term::Atom(if b { marker::TRUE } else { marker::FALSE })
    }
}

impl From<i32> for Term {
    fn from(i: i32) -> Term {
        Term::Integer(i.into())
    }
}

impl From<i64> for Term {
    fn from(i: i64) -> Term {
        Term::Integer(i.into())
    }
}

impl From<f64> for Term {
    fn from(f: f64) -> Term {
        Term::Float(f)
    }
}

impl From<Map> for Term {
    fn from(m: Map) -> Term {
        Term::Map(m)
    }
}

impl From<ObjectId> for Term {
    fn from(id: ObjectId) -> Term {
        Term::object_id(id)
    }
}

fn write_seq(fmt: &mut fmt::Formatter, open: &str, items: &[Term], close: &str) -> fmt::Result {
    fmt.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            fmt.write_str(", ")?;
        }
        write!(fmt, "{}", item)?;
    }
    fmt.write_str(close)
}

fn write_bytes(fmt: &mut fmt::Formatter, bytes: &[u8]) -> fmt::Result {
    write!(fmt, "<<{:?}>>", String::from_utf8_lossy(bytes))
}

impl Display for Term {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Term::Binary(ref b) => write_bytes(fmt, b),
            Term::Atom(ref a) => write!(fmt, "{}", a),
            Term::Integer(i) => write!(fmt, "{}", i),
            Term::Float(f) => write!(fmt, "{:?}", f),
            Term::Tuple(ref items) => write_seq(fmt, "{", items, "}"),
            Term::List(ref items) => write_seq(fmt, "[", items, "]"),
            Term::Map(ref map) => {
                fmt.write_str("#{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        fmt.write_str(", ")?;
                    }
                    write_bytes(fmt, k)?;
                    write!(fmt, " => {}", v)?;
                }
                fmt.write_str("}")
            }
        }
    }
}
