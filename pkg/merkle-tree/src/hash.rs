use std::sync::OnceLock;

use crate::{hash2, Element, Error, Result, MAX_DEPTH};

/// The root hash of an empty tree of the given depth, with a zero leaf of [`Element::ZERO`]
///
/// This function can be defined recursively:
///  - `empty_root(0) = Element::ZERO`
///  - `empty_root(n) = hash2(empty_root(n - 1), empty_root(n - 1))`
///
/// The values for every supported depth are computed once and cached, so calls are essentially
/// free after the first one.
///
/// ```rust
/// # use merkle_tree::*;
/// assert_eq!(empty_root(0).unwrap(), Element::ZERO);
/// assert_eq!(empty_root(1).unwrap(), hash2(Element::ZERO, Element::ZERO));
///
/// assert!(matches!(empty_root(33), Err(Error::InvalidDepth { depth: 33 })));
/// ```
///
/// Fails with [`Error::InvalidDepth`] if `depth` is greater than [`MAX_DEPTH`]
#[inline]
pub fn empty_root(depth: usize) -> Result<Element> {
    get_cache()
        .get(depth)
        .copied()
        .ok_or(Error::InvalidDepth { depth })
}

/// The hashes of empty subtrees of height `0..=depth`, where a height-0 subtree is a single
/// `zero_leaf`
///
/// ```rust
/// # use merkle_tree::*;
/// let zeros = zero_hashes(Element::new(5), 2);
///
/// assert_eq!(zeros.len(), 3);
/// assert_eq!(zeros[0], Element::new(5));
/// assert_eq!(zeros[2], hash2(zeros[1], zeros[1]));
/// ```
#[must_use]
pub fn zero_hashes(zero_leaf: Element, depth: usize) -> Vec<Element> {
    if zero_leaf == Element::ZERO && depth <= MAX_DEPTH {
        return get_cache()[..=depth].to_vec();
    }

    compute(zero_leaf, depth)
}

fn compute(zero_leaf: Element, depth: usize) -> Vec<Element> {
    let mut zeros = Vec::with_capacity(depth + 1);
    let mut zero = zero_leaf;
    zeros.push(zero);

    for _ in 0..depth {
        zero = hash2(zero, zero);
        zeros.push(zero);
    }

    zeros
}

fn get_cache() -> &'static [Element] {
    static CACHE: OnceLock<Vec<Element>> = OnceLock::new();

    CACHE.get_or_init(|| compute(Element::ZERO, MAX_DEPTH))
}
