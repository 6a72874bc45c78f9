//! Typed circuit inputs
//!
//! Each circuit gets its own witness type. A witness is validated before it's rendered into the
//! string map the prover consumes, so mistakes like a stale inclusion proof or unbalanced
//! amounts are caught before any proving time is spent.
//!
//! Every witness also knows which public signals the proof must start with. After proving,
//! [`prove_with_timeout`](crate::prover::prove_with_timeout) checks the prover's output against
//! them.

use std::{collections::BTreeMap, fmt::Display};

use merkle_tree::MerkleProof;
use serde::{Deserialize, Serialize};
use zk_primitives::hash2;

use crate::{Element, Error, Note, PartialNote, Result};

/// The circuits a witness can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitKind {
    /// Creates a note from public funds
    Deposit,
    /// Spends a note to a public recipient
    Withdraw,
    /// Spends notes into new notes
    Transfer,
}

impl Display for CircuitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::Transfer => "transfer",
        })
    }
}

/// A single circuit input, or an array of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    /// A single decimal value
    Single(String),
    /// An array of decimal values
    List(Vec<String>),
}

impl From<Element> for SignalValue {
    fn from(value: Element) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<u128> for SignalValue {
    fn from(value: u128) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<u64> for SignalValue {
    fn from(value: u64) -> Self {
        Self::Single(value.to_string())
    }
}

impl<T: Display> FromIterator<T> for SignalValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(|v| v.to_string()).collect())
    }
}

/// The input map sent to the prover, keyed by signal name
pub type WitnessMap = BTreeMap<String, SignalValue>;

/// An input to a transfer: either a real note with its inclusion proof, or padding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputNote {
    /// A note from the tree
    Real {
        /// The note being spent
        note: Note,
        /// Its inclusion proof
        proof: MerkleProof,
    },
    /// A zero-amount placeholder, which has no position in the tree
    Dummy(PartialNote),
}

impl InputNote {
    /// The committed fields of this input
    #[must_use]
    pub fn partial(&self) -> PartialNote {
        match self {
            Self::Real { note, .. } => note.to_partial(),
            Self::Dummy(partial) => *partial,
        }
    }

    /// The nullifier hash revealed for this input
    ///
    /// Dummy inputs use leaf index `0`
    pub fn nullifier_hash(&self) -> Result<Element> {
        match self {
            Self::Real { note, .. } => note.nullifier_hash(),
            Self::Dummy(partial) => Ok(hash2(partial.nullifier, Element::ZERO)),
        }
    }

    fn leaf_index(&self) -> u64 {
        match self {
            Self::Real { proof, .. } => proof.leaf_index,
            Self::Dummy(_) => 0,
        }
    }

    fn path(&self, depth: usize) -> (Vec<Element>, Vec<bool>) {
        match self {
            Self::Real { proof, .. } => (proof.path_elements.clone(), proof.path_indices.clone()),
            Self::Dummy(_) => (vec![Element::ZERO; depth], vec![false; depth]),
        }
    }
}

/// Inputs for the deposit circuit, which proves `commitment` is well formed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositWitness {
    /// The note being created
    pub note: PartialNote,
}

/// Inputs for the withdraw circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawWitness {
    /// The note being spent
    pub note: Note,
    /// Its inclusion proof
    pub proof: MerkleProof,
    /// The amount paid out publicly
    pub amount: u128,
    /// The public recipient, as a field element
    pub recipient: Element,
    /// A new note holding whatever isn't withdrawn
    pub change: Option<PartialNote>,
}

/// Inputs for the transfer circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferWitness {
    /// The notes being spent, padded with dummies to the circuit's arity
    ///
    /// The first input must be real
    pub inputs: Vec<InputNote>,
    /// The note created for the recipient
    pub output: PartialNote,
    /// The note returned to the sender
    pub change: PartialNote,
    /// The root every input proof is against
    pub root: Element,
}

/// A validated set of circuit inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Witness {
    /// See [`DepositWitness`]
    Deposit(DepositWitness),
    /// See [`WithdrawWitness`]
    Withdraw(WithdrawWitness),
    /// See [`TransferWitness`]
    Transfer(TransferWitness),
}

impl From<DepositWitness> for Witness {
    fn from(witness: DepositWitness) -> Self {
        Self::Deposit(witness)
    }
}

impl From<WithdrawWitness> for Witness {
    fn from(witness: WithdrawWitness) -> Self {
        Self::Withdraw(witness)
    }
}

impl From<TransferWitness> for Witness {
    fn from(witness: TransferWitness) -> Self {
        Self::Transfer(witness)
    }
}

fn invalid(circuit: CircuitKind, reason: impl Into<String>) -> Error {
    Error::InvalidWitness {
        circuit,
        reason: reason.into(),
    }
}

fn ensure(circuit: CircuitKind, condition: bool, reason: impl FnOnce() -> String) -> Result<()> {
    match condition {
        true => Ok(()),
        false => Err(invalid(circuit, reason())),
    }
}

/// Check that `proof` is a current inclusion proof for `note` in a tree of `depth`
fn check_spend(circuit: CircuitKind, note: &Note, proof: &MerkleProof, depth: usize) -> Result<()> {
    ensure(circuit, note.amount > 0, || {
        format!("note {} is a dummy and has no inclusion proof", note.commitment)
    })?;

    note.validate()?;

    let leaf_index = note.leaf_index.ok_or(Error::NotObserved {
        commitment: note.commitment,
    })?;

    ensure(circuit, proof.leaf == note.commitment, || {
        format!("proof is for leaf {}, not {}", proof.leaf, note.commitment)
    })?;
    ensure(circuit, proof.leaf_index == leaf_index, || {
        format!(
            "proof is for index {}, but the note is at {leaf_index}",
            proof.leaf_index
        )
    })?;
    ensure(circuit, proof.path_elements.len() == depth, || {
        format!(
            "proof has {} levels, the tree has {depth}",
            proof.path_elements.len()
        )
    })?;
    ensure(circuit, proof.verify(), || {
        format!("inclusion proof for {} doesn't verify", note.commitment)
    })?;

    Ok(())
}

fn add(circuit: CircuitKind, a: u128, b: u128) -> Result<u128> {
    a.checked_add(b)
        .ok_or_else(|| invalid(circuit, "amounts overflow"))
}

impl DepositWitness {
    fn validate(&self) -> Result<()> {
        ensure(CircuitKind::Deposit, !self.note.is_dummy(), || {
            "deposit amount must be positive".into()
        })
    }

    fn signals(&self) -> WitnessMap {
        let mut map = WitnessMap::new();
        insert_note(&mut map, "", &self.note);
        map.insert("commitment".into(), self.note.commitment().into());
        map
    }

    fn expected_public_signals(&self) -> Vec<Element> {
        vec![self.note.commitment()]
    }
}

impl WithdrawWitness {
    fn change(&self) -> PartialNote {
        self.change
            .unwrap_or_else(|| PartialNote::dummy(self.note.asset_id))
    }

    fn validate(&self, depth: usize) -> Result<()> {
        let circuit = CircuitKind::Withdraw;
        check_spend(circuit, &self.note, &self.proof, depth)?;

        ensure(circuit, self.amount > 0, || {
            "withdraw amount must be positive".into()
        })?;

        let change = self.change();
        ensure(circuit, change.asset_id == self.note.asset_id, || {
            "change must be in the same asset as the note".into()
        })?;

        let out = add(circuit, self.amount, change.amount)?;
        ensure(circuit, out == self.note.amount, || {
            format!(
                "withdrawing {} with {} change doesn't balance a note of {}",
                self.amount, change.amount, self.note.amount
            )
        })
    }

    fn signals(&self) -> Result<WitnessMap> {
        let mut map = WitnessMap::new();
        let change = self.change();

        insert_note(&mut map, "", &self.note.to_partial());
        map.insert("leafIndex".into(), self.proof.leaf_index.into());
        insert_path(
            &mut map,
            &self.proof.path_elements,
            &self.proof.path_indices,
        );
        map.insert("root".into(), self.proof.root.into());
        map.insert("nullifierHash".into(), self.note.nullifier_hash()?.into());
        map.insert("withdrawAmount".into(), self.amount.into());
        map.insert("recipient".into(), self.recipient.into());
        insert_note(&mut map, "change", &change);
        map.insert("changeCommitment".into(), change.commitment().into());

        Ok(map)
    }

    fn expected_public_signals(&self) -> Result<Vec<Element>> {
        Ok(vec![
            self.note.nullifier_hash()?,
            self.note.asset_id,
            Element::from(self.amount),
        ])
    }
}

impl TransferWitness {
    fn asset_id(&self) -> Element {
        self.output.asset_id
    }

    fn validate(&self, depth: usize) -> Result<()> {
        let circuit = CircuitKind::Transfer;

        ensure(
            circuit,
            matches!(self.inputs.first(), Some(InputNote::Real { .. })),
            || "the first input must be a real note".into(),
        )?;
        ensure(circuit, !self.output.is_dummy(), || {
            "transfer amount must be positive".into()
        })?;

        let asset_id = self.asset_id();
        ensure(circuit, self.change.asset_id == asset_id, || {
            "change must be in the same asset as the output".into()
        })?;

        let mut total_in = 0u128;

        for (i, input) in self.inputs.iter().enumerate() {
            let partial = input.partial();
            ensure(circuit, partial.asset_id == asset_id, || {
                format!("input {i} is in a different asset")
            })?;

            match input {
                InputNote::Real { note, proof } => {
                    check_spend(circuit, note, proof, depth)?;
                    ensure(circuit, proof.root == self.root, || {
                        format!("input {i} is proven against a different root")
                    })?;
                }
                InputNote::Dummy(dummy) => {
                    ensure(circuit, dummy.is_dummy(), || {
                        format!("dummy input {i} has a non-zero amount")
                    })?;
                }
            }

            total_in = add(circuit, total_in, partial.amount)?;
        }

        let total_out = add(circuit, self.output.amount, self.change.amount)?;
        ensure(circuit, total_in == total_out, || {
            format!("inputs total {total_in}, but outputs total {total_out}")
        })
    }

    fn signals(&self, depth: usize) -> Result<WitnessMap> {
        let mut map = WitnessMap::new();

        let partials: Vec<_> = self.inputs.iter().map(InputNote::partial).collect();
        let nullifier_hashes = self
            .inputs
            .iter()
            .map(InputNote::nullifier_hash)
            .collect::<Result<Vec<_>>>()?;

        let mut path_elements = Vec::with_capacity(self.inputs.len() * depth);
        let mut path_indices = Vec::with_capacity(self.inputs.len() * depth);
        for input in &self.inputs {
            let (elements, indices) = input.path(depth);
            path_elements.extend(elements);
            path_indices.extend(indices);
        }

        map.insert("root".into(), self.root.into());
        map.insert("assetId".into(), self.asset_id().into());
        map.insert(
            "inNullifier".into(),
            partials.iter().map(|n| n.nullifier).collect(),
        );
        map.insert("inSecret".into(), partials.iter().map(|n| n.secret).collect());
        map.insert("inAmount".into(), partials.iter().map(|n| n.amount).collect());
        map.insert(
            "inLeafIndex".into(),
            self.inputs.iter().map(InputNote::leaf_index).collect(),
        );
        insert_path(&mut map, &path_elements, &path_indices);
        map.insert("nullifierHashes".into(), nullifier_hashes.into_iter().collect());

        insert_note(&mut map, "out", &self.output);
        map.insert("outCommitment".into(), self.output.commitment().into());
        insert_note(&mut map, "change", &self.change);
        map.insert("changeCommitment".into(), self.change.commitment().into());

        Ok(map)
    }

    fn expected_public_signals(&self) -> Result<Vec<Element>> {
        let first = self
            .inputs
            .first()
            .ok_or_else(|| invalid(CircuitKind::Transfer, "no inputs"))?;

        Ok(vec![
            first.nullifier_hash()?,
            self.output.commitment(),
            self.asset_id(),
        ])
    }
}

/// Insert the committed fields of `note`, with signal names prefixed by `prefix`
fn insert_note(map: &mut WitnessMap, prefix: &str, note: &PartialNote) {
    let name = |field: &str| match prefix {
        "" => field.to_string(),
        _ => {
            let mut chars = field.chars();
            let first = chars.next().map(|c| c.to_ascii_uppercase());
            format!("{prefix}{}{}", first.unwrap_or_default(), chars.as_str())
        }
    };

    map.insert(name("nullifier"), note.nullifier.into());
    map.insert(name("secret"), note.secret.into());
    map.insert(name("amount"), note.amount.into());
    map.insert(name("assetId"), note.asset_id.into());
}

fn insert_path(map: &mut WitnessMap, elements: &[Element], indices: &[bool]) {
    map.insert("pathElements".into(), elements.iter().collect());
    map.insert(
        "pathIndices".into(),
        indices.iter().map(|bit| u8::from(*bit)).collect(),
    );
}

impl Witness {
    /// The circuit this witness is for
    #[must_use]
    pub fn kind(&self) -> CircuitKind {
        match self {
            Self::Deposit(_) => CircuitKind::Deposit,
            Self::Withdraw(_) => CircuitKind::Withdraw,
            Self::Transfer(_) => CircuitKind::Transfer,
        }
    }

    /// Check everything the circuit will check, for a tree of `depth`
    ///
    /// This catches unbalanced amounts, proofs against the wrong leaf or root, and dummy notes
    /// where a real one is needed
    pub fn validate(&self, depth: usize) -> Result<()> {
        match self {
            Self::Deposit(w) => w.validate(),
            Self::Withdraw(w) => w.validate(depth),
            Self::Transfer(w) => w.validate(depth),
        }
    }

    /// The input map for the prover
    ///
    /// Call [`Witness::validate`] first: this only fails if a value can't be computed at all
    pub fn signals(&self, depth: usize) -> Result<WitnessMap> {
        match self {
            Self::Deposit(w) => Ok(w.signals()),
            Self::Withdraw(w) => w.signals(),
            Self::Transfer(w) => w.signals(depth),
        }
    }

    /// The values the proof's public signals must start with
    ///
    /// - deposit: `[commitment]`
    /// - withdraw: `[nullifierHash, assetId, withdrawAmount]`
    /// - transfer: `[nullifierHash, outCommitment, assetId]`, with the first input's nullifier hash
    pub fn expected_public_signals(&self) -> Result<Vec<Element>> {
        match self {
            Self::Deposit(w) => Ok(w.expected_public_signals()),
            Self::Withdraw(w) => w.expected_public_signals(),
            Self::Transfer(w) => w.expected_public_signals(),
        }
    }
}
