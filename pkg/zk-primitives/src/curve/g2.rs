use ark_bn254::{Fq2, G2Affine};
use ark_ec::AffineRepr;

use super::{coordinates, expect_len};
use crate::{BaseElement, Error, Result};

/// A point on the BN254 twist curve, with coordinates in the quadratic extension field
///
/// Each coordinate is stored as `[c0, c1]` (real component first), which is how snarkjs writes
/// them. The byte encoding however puts the imaginary component first, see
/// [`G2Point::to_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct G2Point {
    /// The x coordinate, `[c0, c1]`
    pub x: [BaseElement; 2],
    /// The y coordinate, `[c0, c1]`
    pub y: [BaseElement; 2],
}

impl G2Point {
    /// The point at infinity
    pub const IDENTITY: Self = Self {
        x: [BaseElement::ZERO; 2],
        y: [BaseElement::ZERO; 2],
    };

    /// The size of a serialized [`G2Point`]
    pub const BYTES: usize = 128;

    /// Whether this is the point at infinity
    #[inline]
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `x1 || x0 || y1 || y0`, each big-endian
    ///
    /// The imaginary component comes first. This is the layout the alt_bn128 pairing precompile
    /// reads, so it must not be changed.
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let point = G2Point {
    ///     x: [BaseElement::new(1), BaseElement::new(2)],
    ///     y: [BaseElement::new(3), BaseElement::new(4)],
    /// };
    /// let bytes = point.to_bytes();
    ///
    /// assert_eq!(bytes[31], 2);
    /// assert_eq!(bytes[63], 1);
    /// assert_eq!(bytes[95], 4);
    /// assert_eq!(bytes[127], 3);
    /// ```
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 128] {
        let words = [self.x[1], self.x[0], self.y[1], self.y[0]];

        let mut bytes = [0; 128];
        for (chunk, word) in bytes.chunks_exact_mut(32).zip(words) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }

    /// Parse the output of [`G2Point::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [x1, x0, y1, y0] = coordinates::<4>(bytes)?;
        Ok(Self {
            x: [x0, x1],
            y: [y0, y1],
        })
    }

    /// Parse a snarkjs point: `[[x0, x1], [y0, y1]]` or `[[x0, x1], [y0, y1], [z0, z1]]`
    ///
    /// `z` must be `["1", "0"]` for an affine point, or `["0", "0"]` for the point at infinity
    pub fn from_snarkjs<S: AsRef<str>, C: AsRef<[S]>>(coords: &[C]) -> Result<Self> {
        if coords.len() != 2 {
            expect_len("G2 point", coords, 3)?;

            let z = coords[2].as_ref();
            expect_len("G2 z coordinate", z, 2)?;

            match (z[0].as_ref(), z[1].as_ref()) {
                ("1", "0") => {}
                ("0", "0") => return Ok(Self::IDENTITY),
                (z0, z1) => {
                    return Err(Error::MalformedPoint(format!(
                        "G2 point has non-normalized z coordinate [{z0:?}, {z1:?}]"
                    )))
                }
            }
        }

        Ok(Self {
            x: Self::parse_fq2("G2 x coordinate", coords[0].as_ref())?,
            y: Self::parse_fq2("G2 y coordinate", coords[1].as_ref())?,
        })
    }

    fn parse_fq2<S: AsRef<str>>(what: &str, pair: &[S]) -> Result<[BaseElement; 2]> {
        expect_len(what, pair, 2)?;
        Ok([
            BaseElement::from_dec_str(pair[0].as_ref())?,
            BaseElement::from_dec_str(pair[1].as_ref())?,
        ])
    }

    /// The snarkjs representation of this point
    #[must_use]
    pub fn to_snarkjs(&self) -> Vec<Vec<String>> {
        let pair = |[c0, c1]: [BaseElement; 2]| vec![c0.to_string(), c1.to_string()];

        match self.is_identity() {
            true => vec![
                vec!["0".into(), "0".into()],
                vec!["1".into(), "0".into()],
                vec!["0".into(), "0".into()],
            ],
            false => vec![pair(self.x), pair(self.y), vec!["1".into(), "0".into()]],
        }
    }

    /// Convert to an arkworks point, checking that it is on the curve and in the prime-order
    /// subgroup
    ///
    /// Unlike G1, the G2 curve has a large cofactor, so the subgroup check is not redundant
    pub fn to_affine(&self) -> Result<G2Affine> {
        if self.is_identity() {
            return Ok(G2Affine::zero());
        }

        let fq2 = |[c0, c1]: [BaseElement; 2]| Fq2::new(c0.to_fq(), c1.to_fq());
        let point = G2Affine::new_unchecked(fq2(self.x), fq2(self.y));

        if !point.is_on_curve() {
            return Err(Error::InvalidPoint("G2 point is not on the curve"));
        }

        if !point.is_in_correct_subgroup_assuming_on_curve() {
            return Err(Error::InvalidPoint("G2 point is not in the prime-order subgroup"));
        }

        Ok(point)
    }
}

impl From<G2Affine> for G2Point {
    fn from(point: G2Affine) -> Self {
        let pair = |fq2: &Fq2| [BaseElement::from_fq(fq2.c0), BaseElement::from_fq(fq2.c1)];

        match point.xy() {
            Some((x, y)) => Self {
                x: pair(x),
                y: pair(y),
            },
            None => Self::IDENTITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use ark_bn254::{Fr, G2Projective};
    use ark_ec::{CurveGroup, Group};

    use super::*;

    fn multiple_of_generator(k: u64) -> G2Point {
        (G2Projective::generator() * Fr::from(k)).into_affine().into()
    }

    #[test]
    fn byte_round_trip_swaps_components() {
        let point = multiple_of_generator(3);
        let bytes = point.to_bytes();

        assert_eq!(&bytes[..32], &point.x[1].to_be_bytes());
        assert_eq!(&bytes[32..64], &point.x[0].to_be_bytes());
        assert_eq!(&bytes[64..96], &point.y[1].to_be_bytes());
        assert_eq!(&bytes[96..], &point.y[0].to_be_bytes());

        assert_eq!(G2Point::from_bytes(&bytes).unwrap(), point);
    }

    #[test]
    fn affine_round_trip() {
        for k in [1, 2, 99] {
            let point = multiple_of_generator(k);
            assert_eq!(G2Point::from(point.to_affine().unwrap()), point);
        }

        assert!(G2Point::IDENTITY.to_affine().unwrap().is_zero());
    }

    #[test]
    fn rejects_points_outside_the_subgroup() {
        // points on the twist with small x are overwhelmingly unlikely to be in the subgroup
        let point = (1u64..)
            .find_map(|i| G2Affine::get_point_from_x_unchecked(Fq2::from(i), false))
            .unwrap();
        assert!(point.is_on_curve());

        let point = G2Point::from(point);
        assert!(matches!(point.to_affine(), Err(Error::InvalidPoint(_))));
    }

    #[test]
    fn rejects_points_off_the_curve() {
        let mut point = multiple_of_generator(2);
        point.y[0] = -point.y[0];

        assert!(matches!(point.to_affine(), Err(Error::InvalidPoint(_))));
    }

    #[test]
    fn snarkjs_parsing() {
        let point = multiple_of_generator(11);
        let json = point.to_snarkjs();
        assert_eq!(G2Point::from_snarkjs(json.as_slice()).unwrap(), point);

        let infinity = G2Point::IDENTITY.to_snarkjs();
        assert_eq!(G2Point::from_snarkjs(infinity.as_slice()).unwrap(), G2Point::IDENTITY);

        let bad_z = [["1", "2"], ["3", "4"], ["2", "0"]];
        assert!(matches!(
            G2Point::from_snarkjs(&bad_z),
            Err(Error::MalformedPoint(_))
        ));

        let short: [Vec<&str>; 2] = [vec!["1"], vec!["3", "4"]];
        assert!(matches!(
            G2Point::from_snarkjs(&short),
            Err(Error::MalformedPoint(_))
        ));
    }
}
