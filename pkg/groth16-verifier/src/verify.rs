use ark_bn254::{Bn254, Fr, G1Affine, G1Projective, G2Affine};
use ark_ec::{pairing::Pairing, CurveGroup, VariableBaseMSM};
use ark_ff::One;
use tracing::debug;

use crate::{
    Element, Error, G1Point, Proof, ProofJson, Result, VerificationKey, VerificationKeyJson,
};

/// A verification key whose points have been checked and converted for curve arithmetic
///
/// Building a [`Verifier`] validates every point of the key once, so it's worth keeping one
/// around when many proofs are checked against the same circuit:
///
/// ```rust,ignore
/// let verifier = Verifier::new(&vk)?;
///
/// for (proof, inputs) in proofs {
///     if !verifier.verify(&proof, &inputs)? {
///         return Err(...);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verifier {
    alpha1: G1Affine,
    beta2: G2Affine,
    gamma2: G2Affine,
    delta2: G2Affine,
    ic: Vec<G1Affine>,
}

impl Verifier {
    /// Check every point of `vk`
    ///
    /// Fails with [`Error::MalformedVerificationKey`] if `ic` is empty, or if any point is not in
    /// the prime-order subgroup of its curve
    pub fn new(vk: &VerificationKey) -> Result<Self> {
        if vk.ic.is_empty() {
            return Err(Error::MalformedVerificationKey("IC is empty".into()));
        }

        let ic = vk
            .ic
            .iter()
            .enumerate()
            .map(|(i, point)| {
                point
                    .to_affine()
                    .map_err(|err| Error::key(&format!("IC[{i}]"), err))
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            alpha1: vk.alpha1.to_affine().map_err(|err| Error::key("alpha1", err))?,
            beta2: vk.beta2.to_affine().map_err(|err| Error::key("beta2", err))?,
            gamma2: vk.gamma2.to_affine().map_err(|err| Error::key("gamma2", err))?,
            delta2: vk.delta2.to_affine().map_err(|err| Error::key("delta2", err))?,
            ic,
        })
    }

    /// The number of public inputs a proof must have
    #[inline]
    #[must_use]
    pub fn num_public_inputs(&self) -> usize {
        self.ic.len() - 1
    }

    /// `vk_x = IC[0] + Σ inputs[i] · IC[i + 1]`
    pub fn prepare_inputs(&self, inputs: &[Element]) -> Result<G1Point> {
        self.vk_x(inputs).map(G1Point::from)
    }

    fn vk_x(&self, inputs: &[Element]) -> Result<G1Affine> {
        let expected = self.num_public_inputs();
        if inputs.len() != expected {
            return Err(Error::PublicInputCountMismatch {
                expected,
                actual: inputs.len(),
            });
        }

        let scalars: Vec<Fr> = inputs.iter().map(|input| input.to_scalar()).collect();
        let sum = G1Projective::msm(&self.ic[1..], &scalars).map_err(|actual| {
            Error::PublicInputCountMismatch { expected, actual }
        })?;

        Ok((sum + self.ic[0]).into_affine())
    }

    /// Check `proof` against `inputs`
    ///
    /// Returns `Ok(false)` if the pairing equation doesn't hold, including when a point of the
    /// proof is not on the curve. The input count is checked before anything else, and a
    /// mismatch is an error.
    pub fn verify(&self, proof: &Proof, inputs: &[Element]) -> Result<bool> {
        let vk_x = self.vk_x(inputs)?;

        let (a, b, c) = match (proof.a.to_affine(), proof.b.to_affine(), proof.c.to_affine()) {
            (Ok(a), Ok(b), Ok(c)) => (a, b, c),
            (a, b, c) => {
                let err = [a.err(), b.err(), c.err()].into_iter().flatten().next();
                debug!(?err, "proof point is not in the group");
                return Ok(false);
            }
        };

        let product = Bn254::multi_pairing(
            [-a, self.alpha1, vk_x, c],
            [b, self.beta2, self.gamma2, self.delta2],
        );

        let verified = product.0.is_one();
        debug!(inputs = inputs.len(), verified, "checked groth16 proof");

        Ok(verified)
    }
}

/// Check a proof against a verification key
///
/// ```text
/// e(-A, B) · e(alpha1, beta2) · e(vk_x, gamma2) · e(C, delta2) == 1
/// ```
///
/// Fails with [`Error::PublicInputCountMismatch`] before doing any curve arithmetic if
/// `inputs.len() != vk.ic.len() - 1`. A proof that doesn't verify is `Ok(false)`.
///
/// To check several proofs against the same key, build a [`Verifier`] once instead.
pub fn verify(vk: &VerificationKey, proof: &Proof, inputs: &[Element]) -> Result<bool> {
    let expected = vk.num_public_inputs();
    if inputs.len() != expected {
        return Err(Error::PublicInputCountMismatch {
            expected,
            actual: inputs.len(),
        });
    }

    Verifier::new(vk)?.verify(proof, inputs)
}

/// [`verify`], with everything in snarkjs format
///
/// `public_signals` is the contents of snarkjs's `public.json`: decimal strings, each of which
/// must be less than the scalar field modulus
pub fn verify_json<S: AsRef<str>>(
    vk: &VerificationKeyJson,
    proof: &ProofJson,
    public_signals: &[S],
) -> Result<bool> {
    let vk = VerificationKey::from_json(vk)?;
    let proof = Proof::from_json(proof)?;

    let expected = vk.num_public_inputs();
    if public_signals.len() != expected {
        return Err(Error::PublicInputCountMismatch {
            expected,
            actual: public_signals.len(),
        });
    }

    let inputs = parse_public_signals(public_signals)?;

    verify(&vk, &proof, &inputs)
}

/// Parse snarkjs public signals into scalar field elements
///
/// ```rust
/// # use groth16_verifier::*;
/// let signals = parse_public_signals(&["1", "2"]).unwrap();
/// assert_eq!(signals, [Element::new(1), Element::new(2)]);
///
/// let error = parse_public_signals(&["1", "-2"]).unwrap_err();
/// assert!(matches!(error, Error::InvalidFieldElement { index: 1, .. }));
/// ```
pub fn parse_public_signals<S: AsRef<str>>(signals: &[S]) -> Result<Vec<Element>> {
    signals
        .iter()
        .enumerate()
        .map(|(index, signal)| {
            Element::from_dec_str(signal.as_ref())
                .map_err(|source| Error::InvalidFieldElement { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ark_ec::{AffineRepr, Group};
    use proptest::prelude::*;
    use test_strategy::proptest;
    use zk_primitives::BaseElement;

    use super::*;
    use crate::fixtures::Fixture;

    #[test]
    fn valid_proof_verifies() {
        let Fixture { vk, proof, inputs } = Fixture::new(3);

        assert_eq!(inputs, [Element::new(9), Element::new(27)]);
        assert!(verify(&vk, &proof, &inputs).unwrap());
    }

    #[test]
    fn valid_proof_verifies_from_json() {
        let Fixture { vk, proof, inputs } = Fixture::new(11);

        let vk: VerificationKeyJson = serde_json::to_string(&vk.to_json())
            .unwrap()
            .parse()
            .unwrap();
        let proof: ProofJson = serde_json::to_string(&proof.to_json())
            .unwrap()
            .parse()
            .unwrap();
        let signals: Vec<String> = inputs.iter().map(ToString::to_string).collect();

        assert!(verify_json(&vk, &proof, &signals).unwrap());
    }

    #[test]
    fn proof_for_other_inputs_fails() {
        let Fixture { vk, proof, .. } = Fixture::new(3);
        let Fixture { inputs, .. } = Fixture::new(4);

        assert!(!verify(&vk, &proof, &inputs).unwrap());
    }

    #[proptest(cases = 8)]
    fn incremented_input_fails(#[strategy(2u64..100)] x: u64, #[strategy(0usize..2)] index: usize) {
        let Fixture {
            vk,
            proof,
            mut inputs,
        } = Fixture::new(x);

        inputs[index] = inputs[index] + Element::ONE;

        prop_assert!(!verify(&vk, &proof, &inputs).unwrap());
    }

    #[test]
    fn toggled_c_coordinate_fails() {
        let Fixture { vk, proof, inputs } = Fixture::new(5);
        let verifier = Verifier::new(&vk).unwrap();

        let toggle = |value: BaseElement| {
            BaseElement::from_u256(value.to_u256() ^ ethnum::U256::ONE).unwrap()
        };

        let mut tampered = proof;
        tampered.c.x = toggle(tampered.c.x);
        assert!(!verifier.verify(&tampered, &inputs).unwrap());

        let mut tampered = proof;
        tampered.c.y = toggle(tampered.c.y);
        assert!(!verifier.verify(&tampered, &inputs).unwrap());
    }

    #[test]
    fn other_curve_points_fail() {
        let Fixture { vk, proof, inputs } = Fixture::new(5);
        let verifier = Verifier::new(&vk).unwrap();

        let mut negated = proof;
        negated.c = -proof.c;
        assert!(!verifier.verify(&negated, &inputs).unwrap());

        let mut shifted = proof;
        let c = proof.c.to_affine().unwrap().into_group() + G1Projective::generator();
        shifted.c = G1Point::from(c.into_affine());
        assert!(!verifier.verify(&shifted, &inputs).unwrap());

        let mut negated_a = proof;
        negated_a.a = -proof.a;
        assert!(!verifier.verify(&negated_a, &inputs).unwrap());

        assert!(verifier.verify(&proof, &inputs).unwrap());
    }

    #[test]
    fn identity_proof_fails() {
        let Fixture { vk, inputs, .. } = Fixture::new(5);
        let proof = Proof {
            a: G1Point::IDENTITY,
            b: zk_primitives::G2Point::IDENTITY,
            c: G1Point::IDENTITY,
        };

        assert!(!verify(&vk, &proof, &inputs).unwrap());
    }

    #[test]
    fn input_count_is_checked_first() {
        let Fixture { vk, inputs, .. } = Fixture::new(3);

        // not on the curve, so any attempt at curve arithmetic would fail differently
        let garbage = Proof {
            a: G1Point {
                x: BaseElement::new(1),
                y: BaseElement::new(1),
            },
            b: zk_primitives::G2Point::IDENTITY,
            c: G1Point::IDENTITY,
        };

        assert_eq!(
            verify(&vk, &garbage, &inputs[..1]),
            Err(Error::PublicInputCountMismatch {
                expected: 2,
                actual: 1
            })
        );

        let mut too_many = inputs.clone();
        too_many.push(Element::ONE);
        assert_eq!(
            verify(&vk, &garbage, &too_many),
            Err(Error::PublicInputCountMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn invalid_key_point_is_rejected() {
        let Fixture { mut vk, .. } = Fixture::new(3);
        vk.alpha1 = G1Point {
            x: BaseElement::new(1),
            y: BaseElement::new(1),
        };

        assert!(matches!(
            Verifier::new(&vk),
            Err(Error::MalformedVerificationKey(_))
        ));
    }

    #[test]
    fn out_of_field_signal_is_rejected() {
        let Fixture { vk, proof, .. } = Fixture::new(3);
        let signals = ["9".to_string(), Element::MODULUS.to_string()];

        let error = verify_json(&vk.to_json(), &proof.to_json(), &signals).unwrap_err();
        assert!(matches!(error, Error::InvalidFieldElement { index: 1, .. }));
    }

    #[test]
    fn json_count_mismatch_is_reported() {
        let Fixture { vk, proof, .. } = Fixture::new(3);

        assert_eq!(
            verify_json(&vk.to_json(), &proof.to_json(), &["9"]),
            Err(Error::PublicInputCountMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn prepared_inputs_match_manual_sum() {
        let Fixture { vk, inputs, .. } = Fixture::new(6);
        let verifier = Verifier::new(&vk).unwrap();

        let ic: Vec<G1Affine> = vk.ic.iter().map(|p| p.to_affine().unwrap()).collect();
        let expected =
            ic[0].into_group() + ic[1] * inputs[0].to_scalar() + ic[2] * inputs[1].to_scalar();

        assert_eq!(
            verifier.prepare_inputs(&inputs).unwrap(),
            G1Point::from(expected.into_affine())
        );
        assert_eq!(verifier.num_public_inputs(), 2);
    }

    #[test]
    fn zero_inputs_prepare_to_the_constant_term() {
        let Fixture { vk, .. } = Fixture::new(2);
        let verifier = Verifier::new(&vk).unwrap();

        assert_eq!(
            verifier.prepare_inputs(&[Element::ZERO, Element::ZERO]).unwrap(),
            vk.ic[0]
        );

        let one = verifier.prepare_inputs(&[Element::ONE, Element::ZERO]).unwrap();
        let ic0 = vk.ic[0].to_affine().unwrap();
        let expected = ic0.into_group() + vk.ic[1].to_affine().unwrap();
        assert_eq!(one, G1Point::from(expected.into_affine()));
    }
}
