use crate::{Element, Error, Field, Result};
use core::num::TryFromIntError;
use ethnum::U256;
use std::str::FromStr;

macro_rules! from_int_impls {
    ($t:ty) => {
        impl From<$t> for Element {
            #[inline]
            fn from(value: $t) -> Self {
                // every primitive integer type is narrower than the modulus
                Element(U256::from(value))
            }
        }

        impl TryFrom<Element> for $t {
            type Error = TryFromIntError;

            #[inline]
            fn try_from(value: Element) -> Result<Self, Self::Error> {
                <$t>::try_from(value.0)
            }
        }
    };
}

from_int_impls!(u8);
from_int_impls!(u16);
from_int_impls!(u32);
from_int_impls!(u64);
from_int_impls!(u128);

impl From<bool> for Element {
    #[inline]
    fn from(value: bool) -> Self {
        match value {
            false => Self::ZERO,
            true => Self::ONE,
        }
    }
}

/// Parses decimal, or hex with a `0x` prefix
impl FromStr for Element {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("0x") {
            Some(hex) => {
                let value = U256::from_str_radix(hex, 16).map_err(|_| Field::Scalar.invalid(s))?;
                Self::from_u256(value)
            }
            None => Self::from_dec_str(s),
        }
    }
}

impl TryFrom<U256> for Element {
    type Error = Error;

    fn try_from(value: U256) -> Result<Self> {
        Self::from_u256(value)
    }
}

impl From<Element> for U256 {
    fn from(value: Element) -> Self {
        value.0
    }
}

impl Element {
    /// Convert the [`Element`] to its bytes in big-endian format
    ///
    /// Every canonical element fits, and the top byte is never above `0x30`
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let bytes = Element::MAX.to_be_bytes();
    /// assert_eq!(bytes[..4], [0x30, 0x64, 0x4e, 0x72]);
    /// assert_eq!(bytes[31], 0x00);
    /// assert_eq!(Element::from_be_bytes(bytes).unwrap(), Element::MAX);
    /// ```
    #[inline]
    #[must_use]
    pub fn to_be_bytes(self) -> [u8; 32] {
        self.0.to_be_bytes()
    }

    /// Convert the [`Element`] to its bytes in little-endian format
    ///
    /// This is the layout of scalar operands to the alt_bn128 multiexp precompile
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let bytes = Element::MAX.to_le_bytes();
    /// assert_eq!(bytes[28..], [0x72, 0x4e, 0x64, 0x30]);
    /// assert_eq!(Element::from_le_bytes(bytes).unwrap(), Element::MAX);
    /// ```
    #[inline]
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; 32] {
        self.0.to_le_bytes()
    }

    /// Convert big-endian bytes into an [`Element`], failing unless they encode a value below
    /// the modulus
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// // 2^256 - 1 is far larger than the modulus
    /// assert!(matches!(
    ///     Element::from_be_bytes([0xff; 32]),
    ///     Err(Error::InvalidFieldElement { field: Field::Scalar, .. })
    /// ));
    ///
    /// // so is r itself
    /// assert!(Element::from_be_bytes(Element::MODULUS.to_be_bytes()).is_err());
    /// ```
    #[inline]
    pub fn from_be_bytes(bytes: [u8; 32]) -> Result<Self> {
        Self::from_u256(U256::from_be_bytes(bytes))
    }

    /// Convert little-endian bytes into an [`Element`], with the same range check as
    /// [`Element::from_be_bytes`]
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// assert!(Element::from_le_bytes([0xff; 32]).is_err());
    /// assert!(Element::from_le_bytes(Element::MODULUS.to_le_bytes()).is_err());
    /// ```
    #[inline]
    pub fn from_le_bytes(bytes: [u8; 32]) -> Result<Self> {
        Self::from_u256(U256::from_le_bytes(bytes))
    }
}
