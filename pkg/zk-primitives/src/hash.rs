use std::cell::RefCell;

use light_poseidon::{Poseidon, PoseidonHasher};

use crate::{Element, Scalar};

thread_local! {
    // building the round constants and MDS matrix is far more expensive than a single hash
    static HASHER: RefCell<Poseidon<Scalar>> = RefCell::new(
        Poseidon::<Scalar>::new_circom(2).expect("circom parameters exist for 2 inputs"),
    );
}

/// Hash two elements together with Poseidon
///
/// The parameters are those of circomlib's `Poseidon(2)` template: width 3, 8 full rounds, 57
/// partial rounds and an `x^5` S-box. The output is bit-for-bit identical to the circuit and to
/// the on-chain hash, so this is the only hash used for commitments, nullifiers and Merkle
/// nodes.
///
/// ```rust
/// # use zk_primitives::*;
/// let a = hash2(Element::new(1), Element::new(2));
/// assert_eq!(
///     a.to_string(),
///     "7853200120776062878684798364095072458815029376092732009249414926327459813530",
/// );
/// ```
/// This operation is not symmetric:
/// ```rust
/// # use zk_primitives::*;
/// let a = Element::new(1);
/// let b = Element::new(2);
///
/// assert_ne!(hash2(a, b), hash2(b, a));
/// ```
#[inline]
#[must_use]
pub fn hash2(left: Element, right: Element) -> Element {
    let inputs = [left.to_scalar(), right.to_scalar()];

    let hash = HASHER.with(|hasher| {
        hasher
            .borrow_mut()
            .hash(&inputs)
            .expect("hasher was built for exactly 2 inputs")
    });

    Element::from_scalar(hash)
}

/// Hash four elements as a tree of [`hash2`] calls: `hash2(hash2(a, b), hash2(c, d))`
///
/// This is not the same as a width-5 Poseidon. The on-chain verifier only has a 2-input hash,
/// so every wider hash in the protocol is composed this way.
///
/// ```rust
/// # use zk_primitives::*;
/// let [a, b, c, d] = [1, 2, 3, 4].map(Element::new);
/// assert_eq!(hash4(a, b, c, d), hash2(hash2(a, b), hash2(c, d)));
/// ```
#[inline]
#[must_use]
pub fn hash4(a: Element, b: Element, c: Element, d: Element) -> Element {
    hash2(hash2(a, b), hash2(c, d))
}
