use crate::{hash2, Element};

/// Compute the root hash of a merkle tree
///
/// `siblings` is an [`Iterator`] that yields tuples containing the sibling, and a boolean value
/// that indicates whether the sibling in question was on the left or right (`false` means that the
/// sibling is on the right, `true` means that the sibling is on the left).
///
/// The elements of `siblings` are in "deepest-first" order, so a tree of depth `N` (with `2^N`
/// leaves) has `N` siblings.
///
/// For example, consider the following tree:
/// ```text
///            C
///          /   \
///        A       B
///       / \     / \
///      0   1   2   3
/// ```
/// Here:
///  - `A` is [`hash2(0, 1)`][crate::hash2]
///  - `B` is [`hash2(2, 3)`][crate::hash2]
///  - `C` is [`hash2(hash2(0, 1), hash2(2, 3))`][crate::hash2] (i.e. the root hash of the tree)
///
/// If you wanted to prove that `2` was in the tree with this function, you would do the
/// following:
/// ```rust
/// # use zk_primitives::*;
/// let a = hash2(Element::new(0), Element::new(1));
/// let b = hash2(Element::new(2), Element::new(3));
/// let c = hash2(a, b);
///
/// let siblings = [
///   (
///     Element::new(3),
///     false,  // the sibling is on the right, so this value is false
///   ),
///   (
///     a,
///     true,  // the sibling is on the left, so this value is true
///   ),
/// ];
///
/// let root_hash = compute_merkle_root(Element::new(2), siblings);
/// assert_eq!(root_hash, c);  // the hashes match, proving that `2` is in the tree
///
/// let root_hash_if_zero = compute_merkle_root(Element::ZERO, siblings);
/// assert_ne!(root_hash_if_zero, c);
/// ```
pub fn compute_merkle_root<I: IntoIterator<Item = (Element, bool)>>(
    mut leaf: Element,
    siblings: I,
) -> Element {
    for (sibling, bit) in siblings {
        match bit {
            // bit is 0, this element is on the left
            false => leaf = hash2(leaf, sibling),

            // bit is 1, this element is on the right
            true => leaf = hash2(sibling, leaf),
        }
    }

    leaf
}
