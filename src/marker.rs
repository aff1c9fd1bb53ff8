//! The fixed vocabulary of symbolic constants shared by [`decode`](crate::decode) and
//! [`encode`](crate::encode).
//!
//! Marker atoms tag fixed-arity tuples so that extended BSON types without a unique host shape
//! can be told apart from ordinary documents. Their spellings are wrapped in `$` so they do
//! not collide with atoms a caller would normally use as data.

use crate::term::Atom;

/// Decodes from, and encodes to, BSON null.
pub const NULL: Atom = Atom::from_static("null");
/// Decodes from BSON undefined. Encodes to BSON null.
pub const UNDEFINED: Atom = Atom::from_static("undefined");
pub const TRUE: Atom = Atom::from_static("true");
pub const FALSE: Atom = Atom::from_static("false");
pub const MIN_KEY: Atom = Atom::from_static("MIN_KEY");
pub const MAX_KEY: Atom = Atom::from_static("MAX_KEY");

/// `{$oid$, <<12 bytes>>}`
pub const OID: Atom = Atom::from_static("$oid$");
/// `{$type$, Subtype, $binary$, <<bytes>>}`
pub const TYPE: Atom = Atom::from_static("$type$");
pub const BINARY: Atom = Atom::from_static("$binary$");
/// `{$javascript$, <<code>>}` or `{$javascript$, <<code>>, $scope$, Document}`
pub const JAVASCRIPT: Atom = Atom::from_static("$javascript$");
pub const SCOPE: Atom = Atom::from_static("$scope$");
/// `{$ref$, <<collection>>, $oid$, <<12 bytes>> | null}`
pub const REF: Atom = Atom::from_static("$ref$");
/// `{$date$, Millis}`
pub const DATE: Atom = Atom::from_static("$date$");
/// `{$regex$, <<pattern>>, $options$, <<options>>}`
pub const REGEX: Atom = Atom::from_static("$regex$");
pub const OPTIONS: Atom = Atom::from_static("$options$");
/// `{$timestamp$, Time, $increment$, Increment}`
pub const TIMESTAMP: Atom = Atom::from_static("$timestamp$");
pub const INCREMENT: Atom = Atom::from_static("$increment$");

/// The decode option flag requesting map-shaped documents.
pub const RETURN_MAPS: Atom = Atom::from_static("return_maps");
