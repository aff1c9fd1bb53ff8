use crate::{
    error::{Error, Result},
    marker,
    term::Term,
};

/// Options for [`decode`](crate::decode).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct DecodeOptions {
    /// Decode documents to [`Term::Map`] instead of flat key/value tuples. Repeated keys
    /// collapse, the last occurrence winning.
    pub map_documents: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map_documents(mut self, map_documents: bool) -> Self {
        self.map_documents = map_documents;
        self
    }

    /// Parses a host option list. The only recognized flag is the atom
    /// [`return_maps`](marker::RETURN_MAPS); anything else fails with
    /// [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument).
    ///
    /// ```rust
    /// use cabala::{DecodeOptions, Term, marker};
    ///
    /// let options = DecodeOptions::from_terms(&[Term::Atom(marker::RETURN_MAPS)])?;
    /// assert!(options.map_documents);
    /// assert!(DecodeOptions::from_terms(&[Term::atom("strict")]).is_err());
    /// # Ok::<(), cabala::error::Error>(())
    /// ```
    pub fn from_terms(flags: &[Term]) -> Result<Self> {
        let mut options = Self::new();
        for flag in flags {
            if flag.is_atom(&marker::RETURN_MAPS) {
                options.map_documents = true;
            } else {
                return Err(Error::invalid_argument(format!(
                    "unrecognized decode option: {}",
                    flag
                )));
            }
        }
        Ok(options)
    }
}

/// Options for [`encode`](crate::encode). Reserved; no options are currently recognized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct EncodeOptions {}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }
}
