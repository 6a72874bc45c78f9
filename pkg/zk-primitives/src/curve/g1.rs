use ark_bn254::G1Affine;
use ark_ec::AffineRepr;

use super::{coordinates, expect_len};
use crate::{BaseElement, Error, Result};

/// A point on the BN254 base curve, in affine coordinates
///
/// The point at infinity is represented as `x = y = 0`, which is what the precompiles expect.
///
/// Constructing a [`G1Point`] only checks that each coordinate is in the base field. Whether the
/// point is actually on the curve is checked by [`G1Point::to_affine`], right before it is used
/// in any curve arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct G1Point {
    /// The x coordinate
    pub x: BaseElement,
    /// The y coordinate
    pub y: BaseElement,
}

impl G1Point {
    /// The point at infinity
    pub const IDENTITY: Self = Self {
        x: BaseElement::ZERO,
        y: BaseElement::ZERO,
    };

    /// The size of a serialized [`G1Point`]
    pub const BYTES: usize = 64;

    /// Whether this is the point at infinity
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `x || y`, both big-endian
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let point = G1Point { x: BaseElement::new(1), y: BaseElement::new(2) };
    /// let bytes = point.to_bytes();
    ///
    /// assert_eq!(bytes[31], 1);
    /// assert_eq!(bytes[63], 2);
    /// assert_eq!(G1Point::from_bytes(&bytes).unwrap(), point);
    /// ```
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0; 64];
        bytes[..32].copy_from_slice(&self.x.to_be_bytes());
        bytes[32..].copy_from_slice(&self.y.to_be_bytes());
        bytes
    }

    /// Parse the output of [`G1Point::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [x, y] = coordinates::<2>(bytes)?;
        Ok(Self { x, y })
    }

    /// Parse a snarkjs point: `[x, y]` or `[x, y, z]` as decimal strings
    ///
    /// `z` must be `"1"` for an affine point, or `"0"` for the point at infinity
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let point = G1Point::from_snarkjs(&["1", "2", "1"]).unwrap();
    /// assert_eq!(point, G1Point { x: BaseElement::new(1), y: BaseElement::new(2) });
    ///
    /// let infinity = G1Point::from_snarkjs(&["0", "1", "0"]).unwrap();
    /// assert!(infinity.is_identity());
    /// ```
    pub fn from_snarkjs<S: AsRef<str>>(coords: &[S]) -> Result<Self> {
        if coords.len() == 2 {
            return Self::parse_xy(&coords[0], &coords[1]);
        }

        expect_len("G1 point", coords, 3)?;

        match coords[2].as_ref() {
            "1" => Self::parse_xy(&coords[0], &coords[1]),
            "0" => Ok(Self::IDENTITY),
            z => Err(Error::MalformedPoint(format!(
                "G1 point has non-normalized z coordinate {z:?}"
            ))),
        }
    }

    fn parse_xy<S: AsRef<str>>(x: &S, y: &S) -> Result<Self> {
        Ok(Self {
            x: BaseElement::from_dec_str(x.as_ref())?,
            y: BaseElement::from_dec_str(y.as_ref())?,
        })
    }

    /// The snarkjs representation of this point
    #[must_use]
    pub fn to_snarkjs(&self) -> Vec<String> {
        match self.is_identity() {
            true => vec!["0".into(), "1".into(), "0".into()],
            false => vec![self.x.to_string(), self.y.to_string(), "1".into()],
        }
    }

    /// Convert to an arkworks point, checking that it is on the curve and in the prime-order
    /// subgroup
    pub fn to_affine(&self) -> Result<G1Affine> {
        if self.is_identity() {
            return Ok(G1Affine::zero());
        }

        let point = G1Affine::new_unchecked(self.x.to_fq(), self.y.to_fq());

        if !point.is_on_curve() {
            return Err(Error::InvalidPoint("G1 point is not on the curve"));
        }

        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(Error::InvalidPoint("G1 point is not in the prime-order subgroup"));
        }

        Ok(point)
    }
}

/// Negate a point: `(x, q - y)`
///
/// The point at infinity is its own negation
impl core::ops::Neg for G1Point {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: self.x,
            y: -self.y,
        }
    }
}

impl From<G1Affine> for G1Point {
    fn from(point: G1Affine) -> Self {
        match point.xy() {
            Some((x, y)) => Self {
                x: BaseElement::from_fq(*x),
                y: BaseElement::from_fq(*y),
            },
            None => Self::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use ark_bn254::{Fr, G1Projective};
    use ark_ec::{CurveGroup, Group};

    use super::*;

    fn multiple_of_generator(k: u64) -> G1Point {
        (G1Projective::generator() * Fr::from(k)).into_affine().into()
    }

    #[test]
    fn generator_is_one_two() {
        let generator = G1Point::from(G1Affine::generator());
        assert_eq!(generator.x, BaseElement::new(1));
        assert_eq!(generator.y, BaseElement::new(2));
    }

    #[test]
    fn negation_matches_group_negation() {
        let point = multiple_of_generator(7);
        let negated = G1Point::from(-point.to_affine().unwrap());

        assert_eq!(-point, negated);
        assert_eq!(-(-point), point);
        assert_eq!(-G1Point::IDENTITY, G1Point::IDENTITY);
    }

    #[test]
    fn affine_round_trip() {
        for k in [1, 2, 3, 1000] {
            let point = multiple_of_generator(k);
            assert_eq!(G1Point::from(point.to_affine().unwrap()), point);
        }

        assert!(G1Point::IDENTITY.to_affine().unwrap().is_zero());
    }

    #[test]
    fn rejects_points_off_the_curve() {
        let point = G1Point {
            x: BaseElement::new(1),
            y: BaseElement::new(3),
        };

        assert!(matches!(point.to_affine(), Err(Error::InvalidPoint(_))));
    }

    #[test]
    fn snarkjs_parsing() {
        let point = multiple_of_generator(5);
        let json = point.to_snarkjs();
        assert_eq!(G1Point::from_snarkjs(json.as_slice()).unwrap(), point);
        assert_eq!(
            G1Point::IDENTITY.to_snarkjs(),
            vec!["0".to_string(), "1".into(), "0".into()]
        );

        assert!(matches!(
            G1Point::from_snarkjs(&["1", "2", "2"]),
            Err(Error::MalformedPoint(_))
        ));
        assert!(matches!(
            G1Point::from_snarkjs(&["1"]),
            Err(Error::MalformedPoint(_))
        ));
        assert!(matches!(
            G1Point::from_snarkjs(&["1", "x", "1"]),
            Err(Error::InvalidFieldElement { .. })
        ));
    }

    #[test]
    fn from_bytes_rejects_wrong_length_and_out_of_field() {
        assert!(G1Point::from_bytes(&[0; 63]).is_err());
        assert!(matches!(
            G1Point::from_bytes(&[0xff; 64]),
            Err(Error::InvalidFieldElement { .. })
        ));
    }
}
