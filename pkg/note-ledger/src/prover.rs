//! The boundary to an external Groth16 prover
//!
//! Proving is slow and happens outside this crate, typically in a snarkjs process. This module
//! only defines the interface, and wraps it with the checks that should surround every proof:
//! validating the witness first, bounding the time spent waiting, and checking that the proof
//! commits to the values the witness was built from.

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use groth16_verifier::{parse_public_signals, Proof, ProofJson, Verifier};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    witness::{CircuitKind, Witness, WitnessMap},
    Config, Element, Error, Result,
};

/// The compiled circuit files a prover needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitArtifact {
    /// Which circuit these files are for
    pub kind: CircuitKind,
    /// The witness generator
    pub wasm: PathBuf,
    /// The proving key
    pub zkey: PathBuf,
}

/// What a prover returns, in the shape of snarkjs' `fullProve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProverOutput {
    /// The proof
    pub proof: ProofJson,
    /// Every public signal of the circuit, as decimal strings
    pub public_signals: Vec<String>,
}

/// Something that can turn a witness into a proof
#[async_trait]
pub trait Prover: Send + Sync {
    /// Prove `artifact`'s circuit with the inputs in `witness`
    async fn generate_proof(
        &self,
        witness: &WitnessMap,
        artifact: &CircuitArtifact,
    ) -> Result<ProverOutput>;
}

/// How [`prove_with_timeout`] checks a proof
#[derive(Debug, Clone)]
pub struct ProveOptions {
    /// How long to wait for the prover
    pub timeout: Duration,
    /// The depth of the commitment tree the circuits were compiled for
    pub depth: usize,
    /// If set, the returned proof is verified against this key
    pub verifier: Option<Verifier>,
}

impl ProveOptions {
    /// Options from `config`, without proof verification
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            timeout: config.prover_timeout(),
            depth: config.tree_depth,
            verifier: None,
        }
    }

    /// Also verify the returned proof
    #[must_use]
    pub fn with_verifier(self, verifier: Verifier) -> Self {
        Self {
            verifier: Some(verifier),
            ..self
        }
    }
}

/// A proof whose public signals match its witness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvedWitness {
    /// The proof
    pub proof: Proof,
    /// Every public signal, starting with [`Witness::expected_public_signals`]
    pub public_signals: Vec<Element>,
}

/// Prove `witness`, giving up after `options.timeout`
///
/// The witness is validated before the prover is called. After proving, the public signals must
/// start with [`Witness::expected_public_signals`], or this fails with
/// [`Error::PublicSignalMismatch`]. If `options` has a verifier, the proof must also verify, or
/// this fails with [`Error::ProofRejected`].
pub async fn prove_with_timeout<P: Prover + ?Sized>(
    prover: &P,
    witness: &Witness,
    artifact: &CircuitArtifact,
    options: &ProveOptions,
) -> Result<ProvedWitness> {
    let circuit = witness.kind();

    if artifact.kind != circuit {
        return Err(Error::InvalidWitness {
            circuit,
            reason: format!("artifact is for the {} circuit", artifact.kind),
        });
    }

    witness.validate(options.depth)?;
    let signals = witness.signals(options.depth)?;
    let expected = witness.expected_public_signals()?;

    debug!(%circuit, "generating proof");

    let output = tokio::time::timeout(options.timeout, prover.generate_proof(&signals, artifact))
        .await
        .map_err(|_| {
            warn!(%circuit, timeout = ?options.timeout, "prover timed out");
            Error::ProverTimeout {
                timeout: options.timeout,
            }
        })??;

    let proof = Proof::from_json(&output.proof)?;
    let public_signals = parse_public_signals(&output.public_signals)?;

    if !public_signals.starts_with(&expected) {
        warn!(%circuit, "prover returned unexpected public signals");
        return Err(Error::PublicSignalMismatch {
            expected,
            actual: public_signals,
        });
    }

    if let Some(verifier) = &options.verifier {
        if !verifier.verify(&proof, &public_signals)? {
            warn!(%circuit, "prover returned a proof that doesn't verify");
            return Err(Error::ProofRejected);
        }
    }

    debug!(%circuit, "proof generated");

    Ok(ProvedWitness {
        proof,
        public_signals,
    })
}
