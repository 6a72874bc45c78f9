use core::fmt::Display;

use ethnum::{uint, U256};

use crate::{Error, Result};

/// The order of the BN254 scalar field, `r`
pub const SCALAR_MODULUS: U256 =
    uint!("0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001");

/// The order of the BN254 base field, `q`
pub const BASE_MODULUS: U256 =
    uint!("0x30644e72e131a029b85045b68181585d97816a916871ca8d3c208c16d87cfd47");

/// One of the two prime fields of BN254
///
/// Curve coordinates live in the [`Field::Base`] field, everything else (hashes, commitments,
/// public inputs) lives in the [`Field::Scalar`] field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Integers modulo `r`
    Scalar,
    /// Integers modulo `q`
    Base,
}

impl Field {
    /// The modulus of this field
    #[inline]
    #[must_use]
    pub const fn modulus(self) -> U256 {
        match self {
            Self::Scalar => SCALAR_MODULUS,
            Self::Base => BASE_MODULUS,
        }
    }

    /// Check that `value` is a canonical member of this field
    ///
    /// `raw` is only used to build the error
    pub(crate) fn check(self, value: U256, raw: impl Display) -> Result<U256> {
        match value < self.modulus() {
            true => Ok(value),
            false => Err(self.invalid(raw)),
        }
    }

    /// Parse a decimal string into a canonical member of this field
    pub(crate) fn parse_dec(self, s: &str) -> Result<U256> {
        // `from_str_radix` tolerates a leading `+`, the proving tool never emits one
        if s.starts_with('+') {
            return Err(self.invalid(s));
        }

        let value = U256::from_str_radix(s, 10).map_err(|_| self.invalid(s))?;
        self.check(value, s)
    }

    pub(crate) fn invalid(self, raw: impl Display) -> Error {
        Error::InvalidFieldElement {
            value: raw.to_string(),
            field: self,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Scalar => f.write_str("scalar field"),
            Self::Base => f.write_str("base field"),
        }
    }
}

/// `(a + b) mod m`
///
/// # Panics
///
/// Panics if either operand is not already reduced
pub(crate) fn add_mod(a: U256, b: U256, m: U256) -> U256 {
    assert!(a < m && b < m, "operands must be reduced");

    // both operands are < 2^254, so this can't overflow
    let sum = a + b;
    match sum >= m {
        true => sum - m,
        false => sum,
    }
}

/// `(a - b) mod m`
///
/// # Panics
///
/// Panics if either operand is not already reduced
pub(crate) fn sub_mod(a: U256, b: U256, m: U256) -> U256 {
    assert!(a < m && b < m, "operands must be reduced");

    match a >= b {
        true => a - b,
        false => m - (b - a),
    }
}

/// `-a mod m`, which keeps zero at zero
pub(crate) fn neg_mod(a: U256, m: U256) -> U256 {
    sub_mod(U256::ZERO, a, m)
}
