use core::fmt::{Debug, Display};
use std::str::FromStr;

use ark_ff::PrimeField;
use ethnum::U256;

use crate::{element::limbs_to_u256, field::neg_mod, Error, Field, Result};

/// An element of the BN254 base field
///
/// Curve point coordinates are [`BaseElement`]s. Like [`Element`](crate::Element), values are
/// always strictly less than the modulus, in this case `q`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct BaseElement(U256);

impl BaseElement {
    /// Zero
    pub const ZERO: Self = Self(U256::ZERO);

    /// One
    pub const ONE: Self = Self(U256::ONE);

    /// The modulus of the base field, `q`
    pub const MODULUS: U256 = crate::BASE_MODULUS;

    /// Create a new [`BaseElement`] from a u64
    #[inline]
    #[must_use]
    pub fn new(i: u64) -> Self {
        Self(U256::from(i))
    }

    /// Parse a [`BaseElement`] from a base-10 string
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let q = "21888242871839275222246405745257275088696311157297823662689037894645226208583";
    /// assert!(BaseElement::from_dec_str(q).is_err());
    /// assert_eq!(BaseElement::from_dec_str("7").unwrap(), BaseElement::new(7));
    /// ```
    pub fn from_dec_str(s: &str) -> Result<Self> {
        Field::Base.parse_dec(s).map(Self)
    }

    /// Create a [`BaseElement`] from a [`U256`], failing if it is not less than the modulus
    pub fn from_u256(value: U256) -> Result<Self> {
        Field::Base.check(value, value).map(Self)
    }

    /// Convert big-endian bytes into a [`BaseElement`]
    pub fn from_be_bytes(bytes: [u8; 32]) -> Result<Self> {
        Self::from_u256(U256::from_be_bytes(bytes))
    }

    /// The big-endian bytes of this [`BaseElement`]
    #[inline]
    #[must_use]
    pub fn to_be_bytes(self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    /// Convert this [`BaseElement`] to a U256
    #[inline]
    #[must_use]
    pub fn to_u256(self) -> U256 {
        self.0
    }

    /// If this element is zero, returns true
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Convert to the arkworks representation
    #[inline]
    #[must_use]
    pub fn to_fq(self) -> ark_bn254::Fq {
        ark_bn254::Fq::from_le_bytes_mod_order(&self.0.to_le_bytes())
    }

    /// Convert from the arkworks representation
    #[inline]
    #[must_use]
    pub fn from_fq(fq: ark_bn254::Fq) -> Self {
        Self(limbs_to_u256(fq.into_bigint()))
    }
}

/// `q - y`, with zero mapping to zero
///
/// ```rust
/// # use zk_primitives::*;
/// let y = BaseElement::new(5);
/// assert_eq!((-y).to_u256(), BaseElement::MODULUS - ethnum::U256::new(5));
/// assert_eq!(-BaseElement::ZERO, BaseElement::ZERO);
/// ```
impl core::ops::Neg for BaseElement {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        Self(neg_mod(self.0, Self::MODULUS))
    }
}

impl FromStr for BaseElement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_dec_str(s)
    }
}

impl Display for BaseElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Debug for BaseElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BaseElement {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BaseElement {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_dec_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(any(test, feature = "proptest"))]
impl ::proptest::arbitrary::Arbitrary for BaseElement {
    type Parameters = ();
    type Strategy = ::proptest::strategy::Map<
        ::proptest::arbitrary::StrategyFor<[u8; 32]>,
        fn([u8; 32]) -> Self,
    >;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        use ::proptest::prelude::*;
        any::<[u8; 32]>().prop_map(|array| Self(U256::from_be_bytes(array) % Self::MODULUS))
    }
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;

    #[proptest]
    fn double_negation_is_identity(y: BaseElement) {
        assert_eq!(-(-y), y);
    }

    #[proptest]
    fn negation_matches_arkworks(y: BaseElement) {
        assert_eq!(-y, BaseElement::from_fq(-y.to_fq()));
    }

    #[test]
    fn base_field_is_wider_than_scalar_field() {
        let r = crate::SCALAR_MODULUS.to_string();
        assert!(BaseElement::from_dec_str(&r).is_ok());
        assert!(crate::Element::from_dec_str(&r).is_err());
    }
}
