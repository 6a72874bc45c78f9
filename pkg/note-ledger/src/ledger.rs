use parking_lot::Mutex;
use tracing::debug;

use crate::{
    select::{select_largest_first, total},
    Element, Note, NoteStore, OwnerKey, PartialNote, Result,
};

/// The notes owned by each shielded key
///
/// Reads go straight to the store. Writes are read-modify-write cycles over an owner's full note
/// list, and are serialized by an internal lock so that two writers sharing a [`NoteLedger`]
/// can't lose each other's updates. Writers using separate ledgers over the same store are not
/// coordinated.
#[derive(Debug)]
pub struct NoteLedger<S> {
    store: S,
    write: Mutex<()>,
}

impl<S: NoteStore> NoteLedger<S> {
    /// Create a ledger backed by `store`
    pub fn new(store: S) -> Self {
        Self {
            store,
            write: Mutex::new(()),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every note owned by `owner`, in insertion order
    pub fn notes(&self, owner: &OwnerKey) -> Result<Vec<Note>> {
        self.store.get(owner)
    }

    /// Add a note, unless `owner` already has a note with the same commitment
    ///
    /// Returns whether the note was added. Saving a duplicate is not an error, and leaves the
    /// existing note untouched.
    ///
    /// Fails with [`Error::InvalidCommitment`] if the note's commitment doesn't match its fields.
    ///
    /// [`Error::InvalidCommitment`]: crate::Error::InvalidCommitment
    pub fn save(&self, owner: &OwnerKey, note: Note) -> Result<bool> {
        note.validate()?;

        let _guard = self.write.lock();
        let mut notes = self.store.get(owner)?;

        if notes.iter().any(|n| n.commitment == note.commitment) {
            debug!(%owner, commitment = %note.commitment, "ignoring duplicate note");
            return Ok(false);
        }

        debug!(%owner, commitment = %note.commitment, amount = note.amount, "saving note");
        notes.push(note);
        self.store.put(owner, notes)?;

        Ok(true)
    }

    /// Mark the note with `commitment` as spent
    ///
    /// Returns whether a note changed. A missing or already spent note is not an error.
    pub fn mark_spent(&self, owner: &OwnerKey, commitment: Element) -> Result<bool> {
        self.update(owner, commitment, |note| match note.spent {
            true => false,
            false => {
                note.spent = true;
                true
            }
        })
    }

    /// Record the position of a note's commitment in the tree
    ///
    /// Returns whether a note changed
    pub fn record_leaf_index(
        &self,
        owner: &OwnerKey,
        commitment: Element,
        leaf_index: u64,
    ) -> Result<bool> {
        self.update(owner, commitment, |note| {
            let changed = note.leaf_index != Some(leaf_index);
            note.leaf_index = Some(leaf_index);
            changed
        })
    }

    fn update(
        &self,
        owner: &OwnerKey,
        commitment: Element,
        f: impl FnOnce(&mut Note) -> bool,
    ) -> Result<bool> {
        let _guard = self.write.lock();
        let mut notes = self.store.get(owner)?;

        let Some(note) = notes.iter_mut().find(|n| n.commitment == commitment) else {
            return Ok(false);
        };

        if !f(note) {
            return Ok(false);
        }

        self.store.put(owner, notes)?;
        Ok(true)
    }

    /// Unspent `asset_id` notes to cover `target`, largest first
    ///
    /// See [`select_largest_first`] for the exact policy. Insufficient funds are not an error:
    /// compare the total of the result against `target`.
    pub fn list_spendable(
        &self,
        owner: &OwnerKey,
        asset_id: Element,
        target: u128,
    ) -> Result<Vec<Note>> {
        let notes = self.store.get(owner)?;
        Ok(select_largest_first(notes, asset_id, target))
    }

    /// The total amount of `owner`'s `asset_id` notes
    pub fn total_balance(
        &self,
        owner: &OwnerKey,
        asset_id: Element,
        include_spent: bool,
    ) -> Result<u128> {
        let notes = self.store.get(owner)?;

        total(
            notes
                .iter()
                .filter(|n| n.asset_id == asset_id && (include_spent || !n.spent)),
        )
    }

    /// A zero-amount placeholder input, see [`PartialNote::dummy`]
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn build_dummy_note(&self, asset_id: Element) -> PartialNote {
        PartialNote::dummy(asset_id)
    }
}
