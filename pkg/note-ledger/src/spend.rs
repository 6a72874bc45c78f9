//! Turning a balance into circuit inputs
//!
//! [`plan_spend`] selects notes to cover an amount, attaches their inclusion proofs and pads the
//! inputs with dummy notes up to the circuit's fixed arity. Once the resulting transaction has
//! been accepted, [`complete_spend`] updates the ledger.

use merkle_tree::IncrementalMerkleTree;
use tracing::debug;

use crate::{
    select::total,
    witness::{InputNote, TransferWitness},
    Element, Note, NoteLedger, NoteStore, OwnerKey, PartialNote, Result,
};

/// The outcome of [`plan_spend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Planned {
    /// The inputs are ready to prove
    Ready(SpendPlan),
    /// Every spendable note together is less than the target
    Insufficient {
        /// The total of every spendable note
        available: u128,
        /// The amount that was asked for
        target: u128,
    },
    /// The target needs more notes than the circuit takes
    ExceedsArity {
        /// The number of notes largest-first selection picked
        needed: usize,
        /// The number of inputs the circuit takes
        arity: usize,
    },
    /// A selected note isn't in the local tree, so it can't be proven yet
    NotObserved {
        /// The commitment of the note
        commitment: Element,
    },
}

/// Inputs for a spend, padded to the circuit's arity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendPlan {
    /// Real notes first, then dummies
    pub inputs: Vec<InputNote>,
    /// The total of the real inputs
    pub total: u128,
    /// The amount being spent
    pub target: u128,
    /// The root every inclusion proof is against
    pub root: Element,
}

impl SpendPlan {
    /// What's left over after the target is paid
    #[must_use]
    pub fn change(&self) -> u128 {
        self.total.saturating_sub(self.target)
    }

    /// The notes this plan spends
    pub fn spent_notes(&self) -> impl Iterator<Item = &Note> {
        self.inputs.iter().filter_map(|input| match input {
            InputNote::Real { note, .. } => Some(note),
            InputNote::Dummy(_) => None,
        })
    }

    /// A transfer of the target to `output`, with the rest going to `change`
    ///
    /// The amounts of `output` and `change` aren't adjusted: they should be
    /// [`SpendPlan::target`] and [`SpendPlan::change`]
    #[must_use]
    pub fn into_transfer(self, output: PartialNote, change: PartialNote) -> TransferWitness {
        TransferWitness {
            inputs: self.inputs,
            output,
            change,
            root: self.root,
        }
    }
}

/// Plan a spend of `target` units of `asset_id` from `owner`'s notes
///
/// Notes are picked with [`select_largest_first`](crate::select_largest_first), so a target
/// that could be covered by many small notes may still exceed `arity`. Every selected note must
/// already be in `tree` at its recorded leaf index.
///
/// A zero target selects nothing, and plans a spend of dummy inputs only. Circuits that require
/// a real first input will reject it when the witness is validated.
pub fn plan_spend<S: NoteStore>(
    ledger: &NoteLedger<S>,
    tree: &IncrementalMerkleTree,
    owner: &OwnerKey,
    asset_id: Element,
    target: u128,
    arity: usize,
) -> Result<Planned> {
    let selected = ledger.list_spendable(owner, asset_id, target)?;
    let available = total(&selected)?;

    if available < target {
        debug!(%owner, available, target, "insufficient balance");
        return Ok(Planned::Insufficient { available, target });
    }

    if selected.len() > arity {
        debug!(%owner, needed = selected.len(), arity, "too many notes for one spend");
        return Ok(Planned::ExceedsArity {
            needed: selected.len(),
            arity,
        });
    }

    let mut inputs = Vec::with_capacity(arity);

    for note in selected {
        let observed = note
            .leaf_index
            .filter(|index| tree.leaf(*index) == Some(note.commitment));

        let Some(leaf_index) = observed else {
            return Ok(Planned::NotObserved {
                commitment: note.commitment,
            });
        };

        let proof = tree.proof(leaf_index)?;
        inputs.push(InputNote::Real { note, proof });
    }

    inputs.resize(arity, InputNote::Dummy(PartialNote::dummy(asset_id)));

    debug!(%owner, total = available, target, root = %tree.root(), "planned spend");

    Ok(Planned::Ready(SpendPlan {
        inputs,
        total: available,
        target,
        root: tree.root(),
    }))
}

/// Update the ledger once `plan` has been accepted by the ledger-of-record
///
/// Every real input is marked spent for `owner`, then each output note is saved for its owner.
/// This is idempotent, so it can be retried after a partial failure.
pub fn complete_spend<S: NoteStore>(
    ledger: &NoteLedger<S>,
    owner: &OwnerKey,
    plan: &SpendPlan,
    outputs: &[(OwnerKey, Note)],
) -> Result<()> {
    for note in plan.spent_notes() {
        ledger.mark_spent(owner, note.commitment)?;
    }

    for (recipient, note) in outputs {
        ledger.save(recipient, note.clone())?;
    }

    debug!(%owner, inputs = plan.spent_notes().count(), outputs = outputs.len(), "completed spend");

    Ok(())
}
