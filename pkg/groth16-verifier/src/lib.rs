#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! A Groth16 verifier for BN254 proofs produced by snarkjs
//!
//! The verifier checks the pairing equation
//!
//! ```text
//! e(-A, B) · e(alpha1, beta2) · e(vk_x, gamma2) · e(C, delta2) == 1
//! ```
//!
//! where `vk_x = IC[0] + Σ input[i] · IC[i + 1]`.
//!
//! Keys and proofs can be loaded from the JSON that snarkjs writes:
//! ```rust,no_run
//! # use groth16_verifier::*;
//! # fn main() -> Result<()> {
//! let vk: VerificationKeyJson = std::fs::read_to_string("verification_key.json")
//!     .unwrap()
//!     .parse()?;
//! let proof: ProofJson = std::fs::read_to_string("proof.json").unwrap().parse()?;
//! let signals: Vec<String> =
//!     serde_json::from_str(&std::fs::read_to_string("public.json").unwrap()).unwrap();
//!
//! let verified = verify_json(&vk, &proof, &signals)?;
//! # Ok(())
//! # }
//! ```
//!
//! A proof that fails the pairing check is not an error: [`verify`] returns `Ok(false)`. Errors
//! are reserved for inputs that could never verify, such as malformed points or the wrong number
//! of public inputs.
//!
//! Chains with alt_bn128 precompiles can use [`multiexp_input`] and [`pairing_input`] to build
//! the exact byte strings the precompiles consume.

mod error;
mod key;
mod precompile;
mod proof;
mod verify;

#[cfg(test)]
mod fixtures;

pub use error::{Error, Result};
pub use key::{VerificationKey, VerificationKeyJson};
pub use precompile::{multiexp_input, pairing_input, MULTIEXP_CHUNK, PAIRING_CHUNK};
pub use proof::{Proof, ProofJson};
pub use verify::{parse_public_signals, verify, verify_json, Verifier};

#[doc(inline)]
pub use zk_primitives::{Element, G1Point, G2Point};

/// The `protocol` tag snarkjs writes for Groth16 keys and proofs
pub const PROTOCOL: &str = "groth16";

/// The `curve` tag snarkjs writes for BN254
pub const CURVE: &str = "bn128";
