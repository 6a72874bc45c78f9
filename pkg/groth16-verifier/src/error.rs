/// An error that stops a proof from being checked at all
///
/// A proof that is well-formed but doesn't satisfy the pairing equation is not an error, see
/// [`verify`](crate::verify)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The proof couldn't be parsed, or contains a point that isn't on the curve
    #[error("malformed proof: {0}")]
    MalformedProof(String),

    /// The verification key couldn't be parsed, or is internally inconsistent
    #[error("malformed verification key: {0}")]
    MalformedVerificationKey(String),

    /// The number of public inputs doesn't match the verification key
    #[error("expected {expected} public inputs, got {actual}")]
    PublicInputCountMismatch {
        /// `len(IC) - 1`
        expected: usize,
        /// The number of inputs that were given
        actual: usize,
    },

    /// A public signal was not a canonical scalar field element
    #[error("public signal {index} is invalid: {source}")]
    InvalidFieldElement {
        /// The position of the signal
        index: usize,
        /// Why it was rejected
        #[source]
        source: zk_primitives::Error,
    },
}

/// Shorthand for a [`Result`](std::result::Result) with this crate's [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn proof(what: &str, err: impl std::fmt::Display) -> Self {
        Self::MalformedProof(format!("{what}: {err}"))
    }

    pub(crate) fn key(what: &str, err: impl std::fmt::Display) -> Self {
        Self::MalformedVerificationKey(format!("{what}: {err}"))
    }
}
