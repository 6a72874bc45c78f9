//! The boundary to the ledger-of-record
//!
//! The ledger-of-record is the authoritative, append-only log of commitments and the set of
//! revealed nullifier hashes, usually a contract. The local [`IncrementalMerkleTree`] is only a
//! mirror of that log: it's rebuilt by paging through the commitments with [`sync_tree`], and its
//! root should be compared with the authoritative root with [`ensure_fresh`] before proving.

use std::ops::Range;

use async_trait::async_trait;
use merkle_tree::IncrementalMerkleTree;
use tracing::{debug, info, warn};

use crate::{Element, Error, NoteLedger, NoteStore, OwnerKey, Result};

/// Read access to the authoritative commitment log and nullifier set
#[async_trait]
pub trait LedgerOfRecord: Send + Sync {
    /// The number of commitments in the log
    async fn commitment_count(&self) -> Result<u64>;

    /// Up to `limit` commitments, starting at index `from`
    async fn commitments_range(&self, from: u64, limit: u64) -> Result<Vec<Element>>;

    /// Whether `nullifier_hash` has been revealed by a spend
    async fn is_nullifier_used(&self, nullifier_hash: Element) -> Result<bool>;
}

/// Append every commitment `tree` doesn't have yet, `page_size` at a time
///
/// Returns the range of leaf indices that were added. Fails with [`Error::LocalTreeAhead`] if
/// the tree has more leaves than the log, since it can't be a mirror of it.
pub async fn sync_tree<L: LedgerOfRecord + ?Sized>(
    remote: &L,
    tree: &mut IncrementalMerkleTree,
    page_size: u64,
) -> Result<Range<u64>> {
    let start = tree.len();
    let remote_count = remote.commitment_count().await?;

    if start > remote_count {
        warn!(local = start, remote = remote_count, "local tree is ahead of the ledger-of-record");
        return Err(Error::LocalTreeAhead {
            local: start,
            remote: remote_count,
        });
    }

    let page_size = page_size.max(1);

    while tree.len() < remote_count {
        let from = tree.len();
        let limit = page_size.min(remote_count - from);

        let page = remote.commitments_range(from, limit).await?;
        if page.is_empty() {
            return Err(Error::Remote(format!(
                "no commitments from index {from}, but the log has {remote_count}"
            )));
        }

        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        tree.extend(page.into_iter().take(take))?;

        info!(synced = tree.len(), total = remote_count, "syncing commitments");
    }

    debug!(leaves = tree.len(), root = %tree.root(), "commitment tree synced");

    Ok(start..tree.len())
}

/// Check that `tree` has the authoritative root
pub fn ensure_fresh(tree: &IncrementalMerkleTree, remote_root: Element) -> Result<()> {
    let local = tree.root();

    if local != remote_root {
        warn!(local = %local, remote = %remote_root, "stale merkle root");
        return Err(Error::StaleMerkleRoot {
            local,
            remote: remote_root,
        });
    }

    Ok(())
}

/// Check that `nullifier_hash` hasn't been revealed yet
pub async fn ensure_unspent<L: LedgerOfRecord + ?Sized>(
    remote: &L,
    nullifier_hash: Element,
) -> Result<()> {
    if remote.is_nullifier_used(nullifier_hash).await? {
        warn!(nullifier_hash = %nullifier_hash, "nullifier hash already used");
        return Err(Error::NullifierAlreadyUsed(nullifier_hash));
    }

    Ok(())
}

/// Record the leaf index of every note of `owner` whose commitment is in `tree`
///
/// Returns how many notes changed
pub fn scan_owned<S: NoteStore>(
    ledger: &NoteLedger<S>,
    tree: &IncrementalMerkleTree,
    owner: &OwnerKey,
) -> Result<usize> {
    let mut recorded = 0;

    for note in ledger.notes(owner)? {
        let Some(leaf_index) = tree.position(note.commitment) else {
            continue;
        };

        if ledger.record_leaf_index(owner, note.commitment, leaf_index)? {
            debug!(%owner, commitment = %note.commitment, leaf_index, "observed note");
            recorded += 1;
        }
    }

    Ok(recorded)
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use merkle_tree::tree;
    use parking_lot::Mutex;
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use super::*;
    use crate::{MemoryStore, Note, SourceType};

    /// An in-memory ledger-of-record
    #[derive(Default)]
    struct MemoryRemote {
        commitments: Mutex<Vec<Element>>,
        nullifiers: Mutex<HashSet<Element>>,
        pages: AtomicUsize,
    }

    impl MemoryRemote {
        fn with_commitments(commitments: impl IntoIterator<Item = Element>) -> Self {
            Self {
                commitments: Mutex::new(commitments.into_iter().collect()),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl LedgerOfRecord for MemoryRemote {
        async fn commitment_count(&self) -> Result<u64> {
            Ok(self.commitments.lock().len() as u64)
        }

        async fn commitments_range(&self, from: u64, limit: u64) -> Result<Vec<Element>> {
            self.pages.fetch_add(1, Ordering::Relaxed);

            let commitments = self.commitments.lock();
            Ok(commitments
                .iter()
                .skip(from as usize)
                .take(limit as usize)
                .copied()
                .collect())
        }

        async fn is_nullifier_used(&self, nullifier_hash: Element) -> Result<bool> {
            Ok(self.nullifiers.lock().contains(&nullifier_hash))
        }
    }

    /// Claims three commitments but never returns any, and can't answer nullifier queries
    struct Broken;

    #[async_trait]
    impl LedgerOfRecord for Broken {
        async fn commitment_count(&self) -> Result<u64> {
            Ok(3)
        }

        async fn commitments_range(&self, _from: u64, _limit: u64) -> Result<Vec<Element>> {
            Ok(Vec::new())
        }

        async fn is_nullifier_used(&self, _nullifier_hash: Element) -> Result<bool> {
            Err(Error::Remote("unavailable".into()))
        }
    }

    #[tokio::test]
    async fn sync_pages_through_the_log() {
        let remote = MemoryRemote::with_commitments((1..=25).map(Element::new));
        let mut tree = IncrementalMerkleTree::new(8).unwrap();

        let added = sync_tree(&remote, &mut tree, 10).await.unwrap();

        assert_eq!(added, 0..25);
        assert_eq!(remote.pages.load(Ordering::Relaxed), 3);
        assert_eq!(
            tree.root(),
            IncrementalMerkleTree::from_commitments((1..=25).map(Element::new), 8)
                .unwrap()
                .root()
        );

        // only new commitments are fetched
        remote.commitments.lock().push(Element::new(26));
        let added = sync_tree(&remote, &mut tree, 10).await.unwrap();
        assert_eq!(added, 25..26);
        assert_eq!(remote.pages.load(Ordering::Relaxed), 4);
    }

    #[tokio::test]
    async fn zero_page_size_still_makes_progress() {
        let remote = MemoryRemote::with_commitments((1..=3).map(Element::new));
        let mut tree = IncrementalMerkleTree::new(4).unwrap();

        sync_tree(&remote, &mut tree, 0).await.unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(remote.pages.load(Ordering::Relaxed), 3);
    }

    #[tokio::test]
    async fn local_tree_ahead_is_an_error() {
        let remote = MemoryRemote::with_commitments([Element::new(1)]);
        let mut tree = tree! { 4; 1u64, 2u64 };

        let error = sync_tree(&remote, &mut tree, 10).await.unwrap_err();

        assert!(matches!(
            error,
            Error::LocalTreeAhead {
                local: 2,
                remote: 1
            }
        ));
    }

    #[tokio::test]
    async fn empty_page_is_an_error() {
        let mut tree = IncrementalMerkleTree::new(4).unwrap();

        let error = sync_tree(&Broken, &mut tree, 10).await.unwrap_err();

        assert!(matches!(error, Error::Remote(_)));
        assert!(tree.is_empty());
    }

    #[test]
    fn stale_root_is_detected() {
        let tree = tree! { 4; 1u64, 2u64 };
        let newer = tree! { 4; 1u64, 2u64, 3u64 };

        assert!(ensure_fresh(&tree, tree.root()).is_ok());
        assert!(matches!(
            ensure_fresh(&tree, newer.root()),
            Err(Error::StaleMerkleRoot { local, remote })
                if local == tree.root() && remote == newer.root()
        ));
    }

    #[tokio::test]
    async fn used_nullifiers_are_rejected() {
        let remote = MemoryRemote::default();
        remote.nullifiers.lock().insert(Element::new(7));

        assert!(ensure_unspent(&remote, Element::new(8)).await.is_ok());
        assert!(matches!(
            ensure_unspent(&remote, Element::new(7)).await,
            Err(Error::NullifierAlreadyUsed(hash)) if hash == Element::new(7)
        ));
        assert!(matches!(
            ensure_unspent(&Broken, Element::new(8)).await,
            Err(Error::Remote(_))
        ));
    }

    #[tokio::test]
    async fn scan_records_observed_notes() {
        let ledger = NoteLedger::new(MemoryStore::default());
        let owner = OwnerKey::from("alice");
        let mut rng = ChaChaRng::from_seed([5; 32]);

        let seen = Note::random(&mut rng, 10, Element::ZERO, SourceType::Deposit);
        let unseen = Note::random(&mut rng, 20, Element::ZERO, SourceType::Deposit);
        ledger.save(&owner, seen.clone()).unwrap();
        ledger.save(&owner, unseen.clone()).unwrap();

        let remote = MemoryRemote::with_commitments([Element::new(1), seen.commitment]);
        let mut tree = IncrementalMerkleTree::new(4).unwrap();
        sync_tree(&remote, &mut tree, 10).await.unwrap();

        assert_eq!(scan_owned(&ledger, &tree, &owner).unwrap(), 1);
        assert_eq!(scan_owned(&ledger, &tree, &owner).unwrap(), 0);

        let notes = ledger.notes(&owner).unwrap();
        assert_eq!(notes[0].leaf_index, Some(1));
        assert_eq!(notes[1].leaf_index, None);
    }
}
