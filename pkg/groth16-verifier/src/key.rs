use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{proof::check_tag, Error, G1Point, G2Point, Result, CURVE, PROTOCOL};

/// A Groth16 verification key for a single circuit
///
/// `ic` has one more entry than the circuit has public inputs: `ic[0]` is the constant term of
/// `vk_x` and `ic[i + 1]` is multiplied by public input `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKey {
    /// `alpha` in G1
    pub alpha1: G1Point,
    /// `beta` in G2
    pub beta2: G2Point,
    /// `gamma` in G2
    pub gamma2: G2Point,
    /// `delta` in G2
    pub delta2: G2Point,
    /// The public input commitment bases
    pub ic: Vec<G1Point>,
}

/// A verification key as written by `snarkjs zkey export verificationkey`
///
/// Unknown fields (e.g. `vk_alphabeta_12`) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationKeyJson {
    /// Should be `"groth16"` if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Should be `"bn128"` if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
    /// The number of public inputs, must be `IC.len() - 1` if present
    #[serde(rename = "nPublic", default, skip_serializing_if = "Option::is_none")]
    pub n_public: Option<usize>,
    /// `alpha` in G1
    pub vk_alpha_1: Vec<String>,
    /// `beta` in G2
    pub vk_beta_2: Vec<Vec<String>>,
    /// `gamma` in G2
    pub vk_gamma_2: Vec<Vec<String>>,
    /// `delta` in G2
    pub vk_delta_2: Vec<Vec<String>>,
    /// The public input commitment bases
    #[serde(rename = "IC")]
    pub ic: Vec<Vec<String>>,
}

impl FromStr for VerificationKeyJson {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|err| Error::key("invalid json", err))
    }
}

impl VerificationKey {
    /// The number of public inputs a proof against this key must have
    ///
    /// A key with an empty `ic` is malformed, and is rejected by [`Verifier::new`]
    ///
    /// [`Verifier::new`]: crate::Verifier::new
    #[inline]
    #[must_use]
    pub fn num_public_inputs(&self) -> usize {
        self.ic.len().saturating_sub(1)
    }

    /// Parse a snarkjs verification key
    ///
    /// The points are parsed, but not checked to be on the curve. That happens when the key is
    /// turned into a [`Verifier`](crate::Verifier)
    pub fn from_json(json: &VerificationKeyJson) -> Result<Self> {
        check_tag("protocol", json.protocol.as_deref(), PROTOCOL)
            .map_err(Error::MalformedVerificationKey)?;
        check_tag("curve", json.curve.as_deref(), CURVE)
            .map_err(Error::MalformedVerificationKey)?;

        if json.ic.is_empty() {
            return Err(Error::MalformedVerificationKey("IC is empty".into()));
        }

        if let Some(n_public) = json.n_public {
            if n_public + 1 != json.ic.len() {
                return Err(Error::MalformedVerificationKey(format!(
                    "nPublic is {n_public}, but IC has {} entries",
                    json.ic.len()
                )));
            }
        }

        let g2 = |what: &str, coords: &[Vec<String>]| {
            G2Point::from_snarkjs(coords).map_err(|err| Error::key(what, err))
        };

        let ic = json
            .ic
            .iter()
            .enumerate()
            .map(|(i, point)| {
                G1Point::from_snarkjs(point.as_slice())
                    .map_err(|err| Error::key(&format!("IC[{i}]"), err))
            })
            .collect::<Result<_>>()?;

        Ok(Self {
            alpha1: G1Point::from_snarkjs(json.vk_alpha_1.as_slice())
                .map_err(|err| Error::key("vk_alpha_1", err))?,
            beta2: g2("vk_beta_2", &json.vk_beta_2)?,
            gamma2: g2("vk_gamma_2", &json.vk_gamma_2)?,
            delta2: g2("vk_delta_2", &json.vk_delta_2)?,
            ic,
        })
    }

    /// The snarkjs representation of this key
    #[must_use]
    pub fn to_json(&self) -> VerificationKeyJson {
        VerificationKeyJson {
            protocol: Some(PROTOCOL.to_string()),
            curve: Some(CURVE.to_string()),
            n_public: Some(self.num_public_inputs()),
            vk_alpha_1: self.alpha1.to_snarkjs(),
            vk_beta_2: self.beta2.to_snarkjs(),
            vk_gamma_2: self.gamma2.to_snarkjs(),
            vk_delta_2: self.delta2.to_snarkjs(),
            ic: self.ic.iter().map(G1Point::to_snarkjs).collect(),
        }
    }
}
