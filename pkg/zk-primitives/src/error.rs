use crate::Field;

/// An error produced while parsing or validating a primitive value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The value was not a canonical member of the field
    ///
    /// This covers both syntax errors (e.g. non-decimal characters) and values greater than or
    /// equal to the modulus
    #[error("invalid {field} element: {value:?}")]
    InvalidFieldElement {
        /// The rejected input, as it was given
        value: String,
        /// The field the value was checked against
        field: Field,
    },

    /// The coordinates were in range, but didn't describe a point in the prime-order group
    #[error("invalid curve point: {0}")]
    InvalidPoint(&'static str),

    /// The textual representation of a point had the wrong shape
    #[error("malformed point: {0}")]
    MalformedPoint(String),
}

/// Shorthand for a [`Result`](std::result::Result) with this crate's [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;
