use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, G1Point, G2Point, Result, CURVE, PROTOCOL};

/// A Groth16 proof
///
/// The points are only checked to be in the base field when the proof is constructed. Whether
/// they are on the curve is checked when the proof is verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// `A`, negated during verification
    pub a: G1Point,
    /// `B`
    pub b: G2Point,
    /// `C`
    pub c: G1Point,
}

/// A proof as written by `snarkjs groth16 prove`
///
/// ```rust
/// # use groth16_verifier::*;
/// let json = r#"{
///     "pi_a": ["1", "2", "1"],
///     "pi_b": [["0", "0"], ["1", "0"], ["0", "0"]],
///     "pi_c": ["0", "1", "0"],
///     "protocol": "groth16",
///     "curve": "bn128"
/// }"#;
///
/// let proof = Proof::from_json(&json.parse().unwrap()).unwrap();
/// assert!(proof.b.is_identity());
/// assert!(proof.c.is_identity());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofJson {
    /// `A` as `[x, y, z]`
    pub pi_a: Vec<String>,
    /// `B` as `[[x0, x1], [y0, y1], [z0, z1]]`
    pub pi_b: Vec<Vec<String>>,
    /// `C` as `[x, y, z]`
    pub pi_c: Vec<String>,
    /// Should be `"groth16"` if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Should be `"bn128"` if present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<String>,
}

impl FromStr for ProofJson {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|err| Error::proof("invalid json", err))
    }
}

impl Proof {
    /// The size of [`Proof::to_bytes`]
    pub const BYTES: usize = G1Point::BYTES * 2 + G2Point::BYTES;

    /// Parse a snarkjs proof
    pub fn from_json(json: &ProofJson) -> Result<Self> {
        check_tag("protocol", json.protocol.as_deref(), PROTOCOL)
            .map_err(Error::MalformedProof)?;
        check_tag("curve", json.curve.as_deref(), CURVE).map_err(Error::MalformedProof)?;

        Ok(Self {
            a: G1Point::from_snarkjs(json.pi_a.as_slice())
                .map_err(|err| Error::proof("pi_a", err))?,
            b: G2Point::from_snarkjs(json.pi_b.as_slice())
                .map_err(|err| Error::proof("pi_b", err))?,
            c: G1Point::from_snarkjs(json.pi_c.as_slice())
                .map_err(|err| Error::proof("pi_c", err))?,
        })
    }

    /// The snarkjs representation of this proof
    #[must_use]
    pub fn to_json(&self) -> ProofJson {
        ProofJson {
            pi_a: self.a.to_snarkjs(),
            pi_b: self.b.to_snarkjs(),
            pi_c: self.c.to_snarkjs(),
            protocol: Some(PROTOCOL.to_string()),
            curve: Some(CURVE.to_string()),
        }
    }

    /// `A || B || C` in precompile encoding
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::BYTES] {
        let mut bytes = [0; Self::BYTES];
        let (a, rest) = bytes.split_at_mut(G1Point::BYTES);
        let (b, c) = rest.split_at_mut(G2Point::BYTES);

        a.copy_from_slice(&self.a.to_bytes());
        b.copy_from_slice(&self.b.to_bytes());
        c.copy_from_slice(&self.c.to_bytes());

        bytes
    }

    /// Parse the output of [`Proof::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::BYTES {
            return Err(Error::MalformedProof(format!(
                "expected {} bytes, got {}",
                Self::BYTES,
                bytes.len()
            )));
        }

        let (a, rest) = bytes.split_at(G1Point::BYTES);
        let (b, c) = rest.split_at(G2Point::BYTES);

        Ok(Self {
            a: G1Point::from_bytes(a).map_err(|err| Error::proof("A", err))?,
            b: G2Point::from_bytes(b).map_err(|err| Error::proof("B", err))?,
            c: G1Point::from_bytes(c).map_err(|err| Error::proof("C", err))?,
        })
    }
}

/// Reject a snarkjs `protocol`/`curve` tag that is present but unexpected
pub(crate) fn check_tag(
    name: &str,
    value: Option<&str>,
    expected: &str,
) -> std::result::Result<(), String> {
    match value {
        None => Ok(()),
        Some(value) if value == expected => Ok(()),
        Some(value) => Err(format!("expected {name} {expected:?}, got {value:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Fixture;

    #[test]
    fn json_round_trip() {
        let Fixture { proof, .. } = Fixture::new(3);

        let text = serde_json::to_string(&proof.to_json()).unwrap();
        let parsed: ProofJson = text.parse().unwrap();

        assert_eq!(parsed.protocol.as_deref(), Some("groth16"));
        assert_eq!(Proof::from_json(&parsed).unwrap(), proof);
    }

    #[test]
    fn bytes_round_trip() {
        let Fixture { proof, .. } = Fixture::new(5);
        let bytes = proof.to_bytes();

        assert_eq!(&bytes[..64], &proof.a.to_bytes());
        assert_eq!(&bytes[64..192], &proof.b.to_bytes());
        assert_eq!(&bytes[192..], &proof.c.to_bytes());
        assert_eq!(Proof::from_bytes(&bytes).unwrap(), proof);

        assert!(matches!(
            Proof::from_bytes(&bytes[1..]),
            Err(Error::MalformedProof(_))
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let Fixture { proof, .. } = Fixture::new(3);

        assert!(matches!(
            "not json".parse::<ProofJson>(),
            Err(Error::MalformedProof(_))
        ));

        let mut json = proof.to_json();
        json.pi_a[0] = "twelve".into();
        assert!(matches!(
            Proof::from_json(&json),
            Err(Error::MalformedProof(_))
        ));

        let mut json = proof.to_json();
        json.pi_b.pop();
        assert!(matches!(
            Proof::from_json(&json),
            Err(Error::MalformedProof(_))
        ));

        let mut json = proof.to_json();
        json.protocol = Some("plonk".into());
        assert!(matches!(
            Proof::from_json(&json),
            Err(Error::MalformedProof(_))
        ));
    }

    #[test]
    fn coordinates_outside_the_base_field_are_rejected() {
        let Fixture { proof, .. } = Fixture::new(3);

        let mut json = proof.to_json();
        json.pi_c[1] = zk_primitives::BASE_MODULUS.to_string();

        assert!(matches!(
            Proof::from_json(&json),
            Err(Error::MalformedProof(_))
        ));
    }
}
