//! Byte encodings for alt_bn128 style precompiles
//!
//! Points are big-endian (`x || y` for G1, `x1 || x0 || y1 || y0` for G2), but multiexp scalars
//! are little-endian. Mixing these up produces inputs that the precompile accepts but that
//! describe different points.

use crate::{Element, Error, G1Point, G2Point, Proof, Result, VerificationKey};

/// The size of one `(scalar, point)` entry in [`multiexp_input`]
pub const MULTIEXP_CHUNK: usize = 32 + G1Point::BYTES;

/// The size of one `(G1, G2)` entry in [`pairing_input`]
pub const PAIRING_CHUNK: usize = G1Point::BYTES + G2Point::BYTES;

/// The multiexp input for `Σ inputs[i] · ic[i + 1]`
///
/// Each entry is a 32-byte little-endian scalar followed by a 64-byte big-endian point. Zero
/// inputs contribute nothing to the sum, so they are skipped, which means the output can be
/// empty. `ic[0]` is not part of the multiexp and has to be added to the result separately.
///
/// ```rust
/// # use groth16_verifier::*;
/// let ic = [G1Point::IDENTITY; 3];
/// let inputs = [Element::new(0), Element::new(7)];
///
/// let bytes = multiexp_input(&ic, &inputs).unwrap();
/// assert_eq!(bytes.len(), MULTIEXP_CHUNK);
/// assert_eq!(bytes[0], 7);
/// ```
pub fn multiexp_input(ic: &[G1Point], inputs: &[Element]) -> Result<Vec<u8>> {
    let Some((_, bases)) = ic.split_first() else {
        return Err(Error::MalformedVerificationKey("IC is empty".into()));
    };

    if bases.len() != inputs.len() {
        return Err(Error::PublicInputCountMismatch {
            expected: bases.len(),
            actual: inputs.len(),
        });
    }

    let mut bytes = Vec::with_capacity(inputs.len() * MULTIEXP_CHUNK);

    for (input, base) in inputs.iter().zip(bases) {
        if input.is_zero() {
            continue;
        }

        bytes.extend_from_slice(&input.to_le_bytes());
        bytes.extend_from_slice(&base.to_bytes());
    }

    Ok(bytes)
}

/// The pairing check input for `e(-A, B) · e(alpha1, beta2) · e(vk_x, gamma2) · e(C, delta2)`
///
/// `vk_x` is the public input commitment, see [`Verifier::prepare_inputs`]
///
/// [`Verifier::prepare_inputs`]: crate::Verifier::prepare_inputs
#[must_use]
pub fn pairing_input(vk: &VerificationKey, proof: &Proof, vk_x: &G1Point) -> Vec<u8> {
    let pairs = [
        (-proof.a, proof.b),
        (vk.alpha1, vk.beta2),
        (*vk_x, vk.gamma2),
        (proof.c, vk.delta2),
    ];

    let mut bytes = Vec::with_capacity(pairs.len() * PAIRING_CHUNK);
    for (g1, g2) in pairs {
        bytes.extend_from_slice(&g1.to_bytes());
        bytes.extend_from_slice(&g2.to_bytes());
    }

    bytes
}
