//! The [`ProteoformError`] which makes it easy for downstream users of the error type to match on the exact error.

use context_error::{BoxedError, ErrorKind};
use serde::{Deserialize, Serialize};

/// The kind of error that occurred while handling formulas, lookups, or proteoform groups.
///
/// When an error is raised while building a [`crate::ProteoformGroup`] the returned error is a
/// wrapping error that shows the offending tag or site and holds the original error as underlying
/// error. The wrapping error keeps the kind of the original error, so matching on
/// [`context_error::FullErrorContent::get_kind`] always gives the root cause.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ProteoformError {
    /// A molecular formula could not be parsed or contains invalid isotopes
    #[default]
    InvalidFormula,
    /// A residue code that is not known or has no defined composition
    UnknownResidue,
    /// A tag or group member points outside of the sequence
    InvalidIndex,
    /// A lookup recognised a descriptor as its own but could not resolve it
    LookupError,
    /// No lookup claimed the descriptor (or no lookup was supplied at all)
    NoApplicableLookup,
    /// Multiple descriptors on the same site resolve to different formulas
    Conflict,
    /// A vocabulary could not be constructed
    InvalidVocabulary,
}

impl ErrorKind for ProteoformError {
    type Settings = ();
    fn descriptor(&self) -> &'static str {
        "error"
    }
    fn ignored(&self, _settings: Self::Settings) -> bool {
        false
    }
    fn is_error(&self, _settings: Self::Settings) -> bool {
        true
    }
}

/// The result type used throughout the crate
pub type ProteoformResult<T> = Result<T, BoxedError<'static, ProteoformError>>;
