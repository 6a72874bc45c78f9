use std::time::Duration;

use crate::{witness::CircuitKind, Element};

/// An error produced by the note ledger or one of its boundaries
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A note's commitment doesn't match its fields
    #[error("note commitment is {actual}, but its fields hash to {expected}")]
    InvalidCommitment {
        /// `hash4(nullifier, secret, amount, asset_id)`
        expected: Element,
        /// The commitment stored on the note
        actual: Element,
    },

    /// The note hasn't been seen in the commitment tree yet, so it has no leaf index
    #[error("note {commitment} has not been observed on-chain")]
    NotObserved {
        /// The commitment of the note
        commitment: Element,
    },

    /// A sum of note amounts doesn't fit in a `u128`
    #[error("note amounts overflow")]
    AmountOverflow,

    /// A witness failed validation, so it was never sent to the prover
    #[error("invalid {circuit} witness: {reason}")]
    InvalidWitness {
        /// The circuit the witness was for
        circuit: CircuitKind,
        /// What was wrong with it
        reason: String,
    },

    /// The prover's public signals don't start with the values the witness commits to
    #[error("public signals {actual:?} don't start with {expected:?}")]
    PublicSignalMismatch {
        /// The values derived from the witness
        expected: Vec<Element>,
        /// The signals returned by the prover
        actual: Vec<Element>,
    },

    /// The prover returned a proof that doesn't verify
    #[error("the prover returned a proof that doesn't verify")]
    ProofRejected,

    /// The prover didn't finish in time
    #[error("the prover didn't respond within {timeout:?}")]
    ProverTimeout {
        /// The time limit that was exceeded
        timeout: Duration,
    },

    /// The prover reported an error
    #[error("prover error: {0}")]
    Prover(String),

    /// The ledger-of-record reported an error
    #[error("ledger-of-record error: {0}")]
    Remote(String),

    /// The storage backend reported an error
    #[error("storage error: {0}")]
    Storage(String),

    /// The local tree doesn't match the authoritative root
    #[error("local root {local} doesn't match remote root {remote}")]
    StaleMerkleRoot {
        /// The root of the local tree
        local: Element,
        /// The authoritative root
        remote: Element,
    },

    /// The local tree has more leaves than the authoritative log
    #[error("local tree has {local} leaves, but the ledger-of-record only has {remote}")]
    LocalTreeAhead {
        /// The number of local leaves
        local: u64,
        /// The number of remote commitments
        remote: u64,
    },

    /// The nullifier hash has already been revealed on the ledger-of-record
    #[error("nullifier hash {0} has already been used")]
    NullifierAlreadyUsed(Element),

    /// A configuration value is out of range
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The configuration couldn't be loaded
    #[error(transparent)]
    Config(#[from] Box<figment::Error>),

    /// An error from the commitment tree
    #[error(transparent)]
    Tree(#[from] merkle_tree::Error),

    /// An error from the proof verifier
    #[error(transparent)]
    Verifier(#[from] groth16_verifier::Error),

    /// An error from the field primitives
    #[error(transparent)]
    Primitives(#[from] zk_primitives::Error),
}

/// Shorthand for a [`Result`](std::result::Result) with this crate's [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;
