use thiserror::Error;

use crate::MAX_DEPTH;

pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur in the `cabala` crate.
///
/// Every error is terminal for the call that raised it: no partially decoded value or
/// partially encoded buffer is ever returned alongside one.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,

    /// The document key associated with the error, if any.
    pub key: Option<String>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(key) = self.key.as_deref() {
            write!(f, "Error at key \"{key}\": ")?;
        }

        write!(f, "{}", self.kind)
    }
}

/// The types of errors that can occur in the `cabala` crate.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Malformed BSON bytes were encountered: a truncated length prefix, an unknown element
    /// type, a missing terminator, or a declared length that disagrees with the buffer.
    #[error("Malformed BSON: {message}")]
    #[non_exhaustive]
    BadInput { message: String },

    /// Documents and arrays were nested deeper than the depth ceiling.
    #[error("Nesting exceeds the maximum depth of {limit}")]
    #[non_exhaustive]
    TooDeep { limit: usize },

    /// A value had a shape that cannot be encoded where it appeared.
    #[error("Type mismatch: {message}")]
    #[non_exhaustive]
    TypeMismatch { message: String },

    /// A flat key/value sequence could not be read pairwise.
    #[error("Invalid document structure: {message}")]
    #[non_exhaustive]
    StructuralInvalid { message: String },

    /// A call precondition was violated, such as an unknown option flag.
    #[error("Invalid argument: {message}")]
    #[non_exhaustive]
    InvalidArgument { message: String },

    /// A resource failure unrelated to the shape of the input.
    #[error("Internal error: {message}")]
    #[non_exhaustive]
    Internal { message: String },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, key: None }
    }
}

impl Error {
    /// Records the key the error happened under. The innermost key is kept.
    pub(crate) fn with_key(mut self, key: &[u8]) -> Self {
        if self.key.is_none() {
            self.key = Some(String::from_utf8_lossy(key).into_owned());
        }
        self
    }

    pub(crate) fn bad_input(message: impl ToString) -> Self {
        ErrorKind::BadInput {
            message: message.to_string(),
        }
        .into()
    }

    pub(crate) fn too_deep() -> Self {
        ErrorKind::TooDeep { limit: MAX_DEPTH }.into()
    }

    pub(crate) fn type_mismatch(message: impl ToString) -> Self {
        ErrorKind::TypeMismatch {
            message: message.to_string(),
        }
        .into()
    }

    pub(crate) fn structural(message: impl ToString) -> Self {
        ErrorKind::StructuralInvalid {
            message: message.to_string(),
        }
        .into()
    }

    pub(crate) fn invalid_argument(message: impl ToString) -> Self {
        ErrorKind::InvalidArgument {
            message: message.to_string(),
        }
        .into()
    }

    pub(crate) fn internal(message: impl ToString) -> Self {
        ErrorKind::Internal {
            message: message.to_string(),
        }
        .into()
    }

    /// Whether this error was caused by malformed input bytes.
    pub fn is_bad_input(&self) -> bool {
        matches!(self.kind, ErrorKind::BadInput { .. })
    }

    /// Whether this error was caused by exceeding the nesting depth ceiling.
    pub fn is_too_deep(&self) -> bool {
        matches!(self.kind, ErrorKind::TooDeep { .. })
    }

    /// Whether this error was caused by a value of the wrong shape.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, ErrorKind::TypeMismatch { .. })
    }

    /// Whether this error was caused by an odd-length key/value sequence.
    pub fn is_structural_invalid(&self) -> bool {
        matches!(self.kind, ErrorKind::StructuralInvalid { .. })
    }
}

/// Executes the provided closure, attaching the provided key to any returned error.
pub(crate) fn try_with_key<G, F: FnOnce() -> Result<G>>(key: &[u8], f: F) -> Result<G> {
    f().map_err(|e| e.with_key(key))
}
