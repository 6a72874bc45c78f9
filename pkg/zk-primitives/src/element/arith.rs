use crate::{
    field::{add_mod, neg_mod, sub_mod},
    Element,
};

/// Implement a binary operation for [`Element`] and every unsigned integer that converts into one
macro_rules! binop {
    ($trait:ident, $f:ident, |$a:ident, $b:ident| $body:expr) => {
        impl core::ops::$trait<Element> for Element {
            type Output = Element;

            #[inline]
            fn $f(self, rhs: Element) -> Self::Output {
                let ($a, $b) = (self, rhs);
                $body
            }
        }

        binop!(@int $trait, $f, u8);
        binop!(@int $trait, $f, u16);
        binop!(@int $trait, $f, u32);
        binop!(@int $trait, $f, u64);
        binop!(@int $trait, $f, u128);
    };
    (@int $trait:ident, $f:ident, $int:ty) => {
        impl core::ops::$trait<$int> for Element {
            type Output = Element;

            #[inline]
            fn $f(self, rhs: $int) -> Self::Output {
                core::ops::$trait::$f(self, Element::from(rhs))
            }
        }
    };
}

binop!(Add, add, |a, b| Element(add_mod(a.0, b.0, Element::MODULUS)));
binop!(Sub, sub, |a, b| Element(sub_mod(a.0, b.0, Element::MODULUS)));
binop!(Mul, mul, |a, b| Element::from_scalar(a.to_scalar() * b.to_scalar()));

impl core::ops::Neg for Element {
    type Output = Element;

    #[inline]
    fn neg(self) -> Self::Output {
        Element(neg_mod(self.0, Element::MODULUS))
    }
}

impl core::ops::AddAssign for Element {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl core::iter::Sum<Element> for Element {
    fn sum<I: Iterator<Item = Element>>(iter: I) -> Self {
        iter.fold(Element::ZERO, |a, b| a + b)
    }
}

impl core::iter::Product<Element> for Element {
    fn product<I: Iterator<Item = Element>>(iter: I) -> Self {
        iter.fold(Element::ONE, |a, b| a * b)
    }
}

#[cfg(test)]
mod tests {
    use test_strategy::proptest;

    use super::*;

    #[proptest]
    fn add_then_sub_is_identity(a: Element, b: Element) {
        assert_eq!(a + b - b, a);
    }

    #[proptest]
    fn negation_sums_to_zero(a: Element) {
        assert_eq!(a + (-a), Element::ZERO);
    }

    #[test]
    fn arithmetic_wraps_at_the_modulus() {
        assert_eq!(Element::ZERO - Element::ONE, Element::MAX);
        assert_eq!(-Element::ONE, Element::MAX);
        assert_eq!(-Element::ZERO, Element::ZERO);
        assert_eq!(Element::MAX * Element::MAX, Element::ONE);
    }
}
