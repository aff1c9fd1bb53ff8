//! A BSON document represented as an ordered sequence of key/value pairs.

use std::{
    fmt::{self, Debug, Display, Formatter},
    iter::{Extend, FromIterator, IntoIterator},
};

use crate::bson::Bson;

/// A BSON document represented as an ordered sequence of key/value pairs.
///
/// Unlike a map, a [`Document`] keeps keys exactly as they appear in the input, including
/// repeated keys, so decoding and re-encoding a buffer preserves it byte for byte. Lookups
/// resolve repeated keys to the last occurrence.
#[derive(Clone, PartialEq, Default)]
pub struct Document {
    inner: Vec<(Vec<u8>, Bson)>,
}

impl Display for Document {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        fmt.write_str("{")?;

        let mut first = true;
        for (k, v) in self {
            if first {
                first = false;
                fmt.write_str(" ")?;
            } else {
                fmt.write_str(", ")?;
            }

            write!(fmt, "\"{}\": {}", String::from_utf8_lossy(k), v)?;
        }

        write!(fmt, "{}}}", if !first { " " } else { "" })
    }
}

impl Debug for Document {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "Document(")?;
        fmt.debug_map()
            .entries(self.inner.iter().map(|(k, v)| (String::from_utf8_lossy(k), v)))
            .finish()?;
        write!(fmt, ")")
    }
}

/// An owning iterator over Document entries.
pub struct IntoIter {
    inner: std::vec::IntoIter<(Vec<u8>, Bson)>,
}

/// An iterator over Document entries.
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, (Vec<u8>, Bson)>,
}

impl IntoIterator for Document {
    type Item = (Vec<u8>, Bson);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.inner.into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a [u8], &'a Bson);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.inner.iter(),
        }
    }
}

impl Iterator for IntoIter {
    type Item = (Vec<u8>, Bson);

    fn next(&mut self) -> Option<(Vec<u8>, Bson)> {
        self.inner.next()
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a [u8], &'a Bson);

    fn next(&mut self) -> Option<(&'a [u8], &'a Bson)> {
        self.inner.next().map(|(k, v)| (k.as_slice(), v))
    }
}

impl<K: Into<Vec<u8>>> FromIterator<(K, Bson)> for Document {
    fn from_iter<T: IntoIterator<Item = (K, Bson)>>(iter: T) -> Self {
        let mut doc = Document::new();
        doc.extend(iter);
        doc
    }
}

impl<K: Into<Vec<u8>>> Extend<(K, Bson)> for Document {
    fn extend<T: IntoIterator<Item = (K, Bson)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.push(k, v);
        }
    }
}

impl Document {
    /// Creates a new empty Document.
    pub fn new() -> Document {
        Document { inner: Vec::new() }
    }

    /// Creates a new empty Document with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Document {
        Document {
            inner: Vec::with_capacity(capacity),
        }
    }

    /// Gets an iterator over the entries in input order, repeated keys included.
    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Gets an iterator over the keys in input order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.inner.iter().map(|(k, _)| k.as_slice())
    }

    /// Gets an iterator over the values in input order.
    pub fn values(&self) -> impl Iterator<Item = &Bson> {
        self.inner.iter().map(|(_, v)| v)
    }

    /// Returns the number of entries, counting each occurrence of a repeated key.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the document contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns a reference to the value of the last entry with this key.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Bson> {
        let key = key.as_ref();
        self.inner.iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value of the last entry with this key.
    pub fn get_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut Bson> {
        let key = key.as_ref();
        self.inner
            .iter_mut()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns true if the document contains at least one entry with this key.
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.get(key).is_some()
    }

    /// Appends an entry, keeping any existing entries with the same key.
    pub fn push(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Bson>) {
        self.inner.push((key.into(), value.into()));
    }

    /// Sets the value of the last entry with this key, returning the old value, or appends a
    /// new entry if the key is absent.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Bson>) -> Option<Bson> {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.inner.push((key, value));
                None
            }
        }
    }

    /// Clears the document, removing all entries.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
