//! Real proofs for a tiny circuit, generated with arkworks
//!
//! The circuit proves knowledge of `x` such that `y = x^2` and `w = x^3`, with `y` and `w`
//! public.

use ark_bn254::{Bn254, Fr};
use ark_groth16::Groth16;
use ark_relations::{
    lc,
    r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError},
};
use ark_snark::{CircuitSpecificSetupSNARK, SNARK};
use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

use crate::{Element, G1Point, Proof, VerificationKey};

struct Cube {
    x: Option<Fr>,
}

impl ConstraintSynthesizer<Fr> for Cube {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let square = self.x.map(|x| x * x);
        let cube = self.x.zip(square).map(|(x, square)| x * square);

        let x = cs.new_witness_variable(|| self.x.ok_or(SynthesisError::AssignmentMissing))?;
        let y = cs.new_input_variable(|| square.ok_or(SynthesisError::AssignmentMissing))?;
        let w = cs.new_input_variable(|| cube.ok_or(SynthesisError::AssignmentMissing))?;

        cs.enforce_constraint(lc!() + x, lc!() + x, lc!() + y)?;
        cs.enforce_constraint(lc!() + y, lc!() + x, lc!() + w)?;

        Ok(())
    }
}

/// A verification key, a valid proof for `x`, and the matching public inputs `[x^2, x^3]`
///
/// Every fixture shares the same key
pub(crate) struct Fixture {
    pub vk: VerificationKey,
    pub proof: Proof,
    pub inputs: Vec<Element>,
}

impl Fixture {
    pub fn new(x: u64) -> Self {
        let mut setup_rng = ChaChaRng::from_seed([0; 32]);
        let (pk, vk) =
            Groth16::<Bn254>::circuit_specific_setup(Cube { x: None }, &mut setup_rng).unwrap();

        let mut seed = [1; 32];
        seed[..8].copy_from_slice(&x.to_le_bytes());
        let mut rng = ChaChaRng::from_seed(seed);

        let x = Fr::from(x);
        let proof = Groth16::<Bn254>::prove(&pk, Cube { x: Some(x) }, &mut rng).unwrap();

        Self {
            vk: VerificationKey {
                alpha1: vk.alpha_g1.into(),
                beta2: vk.beta_g2.into(),
                gamma2: vk.gamma_g2.into(),
                delta2: vk.delta_g2.into(),
                ic: vk.gamma_abc_g1.iter().copied().map(G1Point::from).collect(),
            },
            proof: Proof {
                a: proof.a.into(),
                b: proof.b.into(),
                c: proof.c.into(),
            },
            inputs: vec![Element::from(x * x), Element::from(x * x * x)],
        }
    }
}
