use thiserror::Error;

use crate::{arena::ValueId, kind::Kind};

/// Errors reported by checked accessors, mutations, conversions and the flatten pass.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A checked operation was invoked against the wrong kind of value.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind the operation requires.
        expected: Kind,
        /// Kind the value actually holds.
        found: Kind,
    },
    /// Checked object lookup or removal of an absent key.
    #[error("key not found: {0}")]
    KeyNotFound(String),
    /// A bulk insertion hit a key that is already present.
    #[error("duplicate key detected: {0}")]
    DuplicateKey(String),
    /// NaN and the infinities have no JSON representation.
    #[error("non-finite double value invalid for json: {0}")]
    NonFiniteNumber(f64),
    /// Checked array access past the end.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// An integer does not fit into the 64-bit signed payload.
    #[error("integer out of range for a 64-bit signed payload")]
    IntegerOutOfRange,
    /// Flattening reached a reference that is already being expanded.
    #[error("reference cycle detected at {0}")]
    ReferenceCycle(ValueId),
}

impl Error {
    pub(crate) fn type_mismatch(expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch { expected, found }
    }

    /// Check if this error reports a kind mismatch.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }

    /// Check if this error reports a missing key or an out-of-range index.
    #[must_use]
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, Error::KeyNotFound(_) | Error::IndexOutOfRange { .. })
    }

    /// Check if this error was produced while converting an external value.
    #[must_use]
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, Error::NonFiniteNumber(_) | Error::IntegerOutOfRange)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Error::type_mismatch(Kind::Array, Kind::Bool), "type mismatch: expected array, found boolean")]
    #[test_case(Error::KeyNotFound("z".into()), "key not found: z")]
    #[test_case(Error::DuplicateKey("a".into()), "duplicate key detected: a")]
    #[test_case(Error::NonFiniteNumber(f64::INFINITY), "non-finite double value invalid for json: inf")]
    #[test_case(Error::IndexOutOfRange { index: 2, len: 2 }, "index 2 out of range for array of length 2")]
    fn display(error: Error, expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn classification() {
        assert!(Error::type_mismatch(Kind::Null, Kind::Integer).is_type_mismatch());
        assert!(Error::KeyNotFound("k".into()).is_lookup_error());
        assert!(Error::IndexOutOfRange { index: 0, len: 0 }.is_lookup_error());
        assert!(Error::NonFiniteNumber(f64::NAN).is_conversion_error());
        assert!(!Error::DuplicateKey("k".into()).is_conversion_error());
    }
}
