use ::proptest::{collection::vec, prelude::*};

use crate::{Element, IncrementalMerkleTree};

/// Small trees (depth `1..=6`), filled with between zero leaves and their full capacity
impl Arbitrary for IncrementalMerkleTree {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with((): Self::Parameters) -> Self::Strategy {
        (1usize..=6)
            .prop_flat_map(|depth| (Just(depth), vec(any::<Element>(), 0..=(1 << depth))))
            .prop_map(|(depth, leaves)| {
                IncrementalMerkleTree::from_commitments(leaves, depth).unwrap()
            })
            .boxed()
    }
}
