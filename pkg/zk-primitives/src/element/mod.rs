use ethnum::{uint, U256};

use crate::{Field, Result};

mod arith;
mod ark;
mod convert;
mod fmt;

pub(crate) use ark::limbs_to_u256;

#[cfg(feature = "rand")]
mod rand_impls;

#[cfg(feature = "serde")]
mod serde;

/// An element of the BN254 scalar field
///
/// This type is a wrapper around a [`U256`], but unlike a [`U256`] it can only hold values in the
/// range `0..r`, where `r` is [`Element::MODULUS`]. Every constructor that accepts external input
/// checks this, and fails with [`Error::InvalidFieldElement`] rather than reducing the value.
///
/// Commitments, nullifiers, Merkle nodes and Groth16 public inputs are all [`Element`]s.
///
/// [`Error::InvalidFieldElement`]: crate::Error::InvalidFieldElement
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Element(pub(crate) U256);

impl Element {
    /// The zero element of the field (the additive identity)
    pub const ZERO: Self = Self(U256::ZERO);

    /// The one element of the field (the multiplicative identity)
    pub const ONE: Self = Self(U256::ONE);

    /// The largest canonical element, `r - 1`
    pub const MAX: Self = Self(uint!(
        "0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000000"
    ));

    /// The modulus of the scalar field, `r`
    pub const MODULUS: U256 = crate::SCALAR_MODULUS;

    /// Create a new [`Element`] from a u64
    ///
    /// This is largely provided to help type inference in simple cases
    #[inline]
    #[must_use]
    pub fn new(i: u64) -> Self {
        Self(U256::from(i))
    }

    /// Parse an [`Element`] from a base-10 string
    ///
    /// This is the format used by the proving toolchain for public signals, witness values and
    /// curve coordinates.
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// assert_eq!(Element::from_dec_str("123").unwrap(), Element::new(123));
    /// assert!(Element::from_dec_str("-1").is_err());
    /// assert!(Element::from_dec_str("").is_err());
    /// ```
    pub fn from_dec_str(s: &str) -> Result<Self> {
        Field::Scalar.parse_dec(s).map(Self)
    }

    /// Create an [`Element`] from a [`U256`], failing if it is not less than the modulus
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// # use ethnum::U256;
    /// assert!(Element::from_u256(U256::new(5)).is_ok());
    /// assert!(Element::from_u256(Element::MODULUS).is_err());
    /// ```
    pub fn from_u256(value: U256) -> Result<Self> {
        Field::Scalar.check(value, value).map(Self)
    }

    /// Convert this [`Element`] to a U256
    #[inline]
    #[must_use]
    pub fn to_u256(self) -> U256 {
        self.0
    }

    /// Convert this [`Element`] to a hex string
    #[inline]
    #[must_use]
    pub fn to_hex(self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// If this element is zero, returns true
    #[inline]
    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

macro_rules! partial_eq_impl {
    ($int:ty) => {
        impl PartialEq<$int> for Element {
            fn eq(&self, other: &$int) -> bool {
                *self == Element::from(*other)
            }
        }
    };
}

partial_eq_impl!(bool);
partial_eq_impl!(u8);
partial_eq_impl!(u16);
partial_eq_impl!(u32);
partial_eq_impl!(u64);
partial_eq_impl!(u128);

#[cfg(any(test, feature = "proptest"))]
pub mod proptest {
    use super::Element;
    use ::proptest::{arbitrary::StrategyFor, prelude::*, strategy::Map};
    use ethnum::U256;

    impl Arbitrary for Element {
        type Strategy = Map<StrategyFor<[u8; 32]>, fn([u8; 32]) -> Self>;
        type Parameters = ();

        fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
            any::<[u8; 32]>().prop_map(|array| Self(U256::from_be_bytes(array) % Element::MODULUS))
        }
    }
}
