#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::explicit_deref_methods)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! Core primitives for the shielded pool: BN254 field elements, curve points and the
//! circom-compatible Poseidon hash
//!
//! Every value in this crate is validated on construction. An [`Element`] is always strictly less
//! than the scalar field modulus `r`, and a [`BaseElement`] is always strictly less than the base
//! field modulus `q`. Values outside the field are rejected with
//! [`Error::InvalidFieldElement`], never reduced:
//! ```rust
//! # use zk_primitives::*;
//! let r = "21888242871839275222246405745257275088548364400416034343698204186575808495617";
//! assert!(Element::from_dec_str(r).is_err());
//!
//! let r_minus_one = "21888242871839275222246405745257275088548364400416034343698204186575808495616";
//! assert!(Element::from_dec_str(r_minus_one).is_ok());
//! ```

mod base;
mod curve;
mod element;
mod error;
mod field;
mod hash;
mod path;

pub use base::BaseElement;
pub use curve::{G1Point, G2Point};
pub use element::Element;
pub use error::{Error, Result};
pub use field::{Field, BASE_MODULUS, SCALAR_MODULUS};
pub use hash::{hash2, hash4};
pub use path::compute_merkle_root;

/// The scalar field that Poseidon and the proof system operate over
///
/// This is an integer modulo `r` where `r` is [`Element::MODULUS`]
pub type Scalar = ark_bn254::Fr;
