use ethnum::U256;
use rand::Rng;

use crate::Element;

impl Element {
    /// Generate a uniformly random [`Element`]
    ///
    /// This is suitable for note secrets and nullifiers as long as `rng` is a cryptographically
    /// secure generator
    ///
    /// ```rust
    /// # use zk_primitives::*;
    /// let element = Element::random(&mut rand::thread_rng());
    /// assert!(element.to_u256() < Element::MODULUS);
    /// ```
    #[must_use]
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // the modulus is just above 2^253, so keeping 254 bits accepts ~3/4 of candidates
        loop {
            let candidate = U256::from_be_bytes(rng.gen()) >> 2u32;
            if candidate < Element::MODULUS {
                return Self(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use super::*;

    #[test]
    fn random_elements_are_canonical_and_distinct() {
        let mut rng = ChaChaRng::from_seed([0; 32]);

        let elements: Vec<_> = (0..100).map(|_| Element::random(&mut rng)).collect();

        for (i, element) in elements.iter().enumerate() {
            assert!(element.to_u256() < Element::MODULUS);
            assert!(!elements[i + 1..].contains(element));
        }
    }
}
