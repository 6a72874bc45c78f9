/// Helper macro to create an [`IncrementalMerkleTree`]
///
/// ```rust
/// # use merkle_tree::*;
/// // the depth comes first, then the leaves, which are converted using Element::from
/// let tree = tree! { 4; 1u64, 2u64, Element::new(3) };
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.leaf(2), Some(Element::new(3)));
///
/// // omit the leaves to create an empty tree
/// let tree = tree! { 4 };
/// assert!(tree.is_empty());
/// ```
///
/// # Panics
///
/// Panics if the depth is invalid, or if there are more leaves than the tree can hold
///
/// [`IncrementalMerkleTree`]: crate::IncrementalMerkleTree
#[macro_export]
macro_rules! tree {
    { $depth:expr $(;)? } => {{
        $crate::IncrementalMerkleTree::new($depth).unwrap()
    }};
    { $depth:expr; $($leaf:expr),* $(,)? } => {{
        let mut tree = $crate::IncrementalMerkleTree::new($depth).unwrap();
        $(
            tree.insert($crate::Element::from($leaf)).unwrap();
        )*
        tree
    }};
}
