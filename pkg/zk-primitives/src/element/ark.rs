use ark_ff::{BigInteger, PrimeField};
use ethnum::U256;

use crate::{Element, Scalar};

impl Element {
    /// Convert this [`Element`] to its equivalent [`Scalar`] representation
    #[inline]
    #[must_use]
    pub fn to_scalar(self) -> Scalar {
        // canonical by construction, so this never reduces
        Scalar::from_le_bytes_mod_order(&self.0.to_le_bytes())
    }

    /// Create an [`Element`] from a [`Scalar`]
    #[inline]
    #[must_use]
    pub fn from_scalar(scalar: Scalar) -> Element {
        Self(limbs_to_u256(scalar.into_bigint()))
    }
}

/// Pack little-endian 64-bit limbs into a [`U256`]
pub(crate) fn limbs_to_u256<B: BigInteger + AsRef<[u64]>>(bigint: B) -> U256 {
    let limbs = bigint.as_ref();
    let word = |i: usize| u128::from(limbs[i]) | (u128::from(limbs[i + 1]) << 64);
    U256::from_words(word(2), word(0))
}

impl From<Scalar> for Element {
    fn from(value: Scalar) -> Self {
        Element::from_scalar(value)
    }
}

impl From<Element> for Scalar {
    fn from(value: Element) -> Self {
        value.to_scalar()
    }
}

#[cfg(test)]
mod tests {
    use ark_ff::{One, Zero};
    use test_strategy::proptest;

    use super::*;

    #[proptest]
    fn to_from_scalar_biject(element: Element) {
        let scalar = element.to_scalar();
        let element_again = Element::from_scalar(scalar);

        assert_eq!(element, element_again);
    }

    #[test]
    fn identities_map_to_identities() {
        assert!(Element::ZERO.to_scalar().is_zero());
        assert!(Element::ONE.to_scalar().is_one());
        assert_eq!(Element::from_scalar(-Scalar::one()), Element::MAX);
    }
}
