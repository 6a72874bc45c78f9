use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use zk_primitives::{hash2, hash4};

use crate::{Element, Error, Result};

/// How a note came into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Created by depositing public funds into the pool
    Deposit,
    /// Received from another shielded transfer
    Transfer,
    /// Change returned to the sender of a transfer or withdrawal
    Change,
}

/// A private UTXO
///
/// Notes are created with [`Note::new`] or [`Note::random`], which compute the commitment. A note
/// read from elsewhere can be checked with [`Note::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Revealed (hashed with the leaf index) when the note is spent
    pub nullifier: Element,
    /// Blinds the commitment
    pub secret: Element,
    /// The value of the note
    #[serde(with = "amount_string")]
    pub amount: u128,
    /// The asset the value is denominated in
    pub asset_id: Element,
    /// `hash4(nullifier, secret, amount, asset_id)`
    pub commitment: Element,
    /// The position of the commitment in the tree, once it has been observed on-chain
    ///
    /// Serialized as `-1` while the note is unobserved. A missing or `null` field also reads as
    /// unobserved.
    #[serde(default, with = "leaf_index")]
    pub leaf_index: Option<u64>,
    /// Set once the note has been spent, and never cleared
    #[serde(default)]
    pub spent: bool,
    /// When this note was created locally
    pub created_at: DateTime<Utc>,
    /// How the note was created
    pub source_type: SourceType,
}

/// `hash2(hash2(nullifier, secret), hash2(amount, asset_id))`
fn commitment(nullifier: Element, secret: Element, amount: u128, asset_id: Element) -> Element {
    hash4(nullifier, secret, Element::from(amount), asset_id)
}

impl Note {
    /// Create an unspent, unobserved note
    #[must_use]
    pub fn new(
        nullifier: Element,
        secret: Element,
        amount: u128,
        asset_id: Element,
        source_type: SourceType,
    ) -> Self {
        Self {
            nullifier,
            secret,
            amount,
            asset_id,
            commitment: commitment(nullifier, secret, amount, asset_id),
            leaf_index: None,
            spent: false,
            created_at: Utc::now(),
            source_type,
        }
    }

    /// Create a note with a random nullifier and secret
    #[must_use]
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        amount: u128,
        asset_id: Element,
        source_type: SourceType,
    ) -> Self {
        let nullifier = Element::random(rng);
        let secret = Element::random(rng);
        Self::new(nullifier, secret, amount, asset_id, source_type)
    }

    /// Check that the stored commitment matches the note's fields
    pub fn validate(&self) -> Result<()> {
        let expected = commitment(self.nullifier, self.secret, self.amount, self.asset_id);

        match expected == self.commitment {
            true => Ok(()),
            false => Err(Error::InvalidCommitment {
                expected,
                actual: self.commitment,
            }),
        }
    }

    /// The value revealed when this note is spent: `hash2(nullifier, leaf_index)`
    ///
    /// Fails with [`Error::NotObserved`] if the note has no leaf index yet
    pub fn nullifier_hash(&self) -> Result<Element> {
        let leaf_index = self.leaf_index.ok_or(Error::NotObserved {
            commitment: self.commitment,
        })?;

        Ok(hash2(self.nullifier, Element::from(leaf_index)))
    }

    /// The fields that go into the commitment
    #[must_use]
    pub fn to_partial(&self) -> PartialNote {
        PartialNote {
            nullifier: self.nullifier,
            secret: self.secret,
            amount: self.amount,
            asset_id: self.asset_id,
        }
    }
}

/// The committed fields of a note, without any ledger state
///
/// This is what a circuit sees. It's also how dummy notes are represented: they pad a
/// fixed-arity circuit, are never inserted into the tree, and are recognised by their zero
/// amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialNote {
    /// See [`Note::nullifier`]
    pub nullifier: Element,
    /// See [`Note::secret`]
    pub secret: Element,
    /// See [`Note::amount`]
    #[serde(with = "amount_string")]
    pub amount: u128,
    /// See [`Note::asset_id`]
    pub asset_id: Element,
}

impl PartialNote {
    /// A zero-amount placeholder with a zero nullifier and secret
    ///
    /// ```rust
    /// # use note_ledger::*;
    /// let dummy = PartialNote::dummy(Element::new(3));
    ///
    /// assert!(dummy.is_dummy());
    /// assert_eq!(dummy.nullifier, Element::ZERO);
    /// assert_eq!(dummy.asset_id, Element::new(3));
    /// ```
    #[must_use]
    pub fn dummy(asset_id: Element) -> Self {
        Self {
            nullifier: Element::ZERO,
            secret: Element::ZERO,
            amount: 0,
            asset_id,
        }
    }

    /// Whether this note is a placeholder
    #[inline]
    #[must_use]
    pub fn is_dummy(&self) -> bool {
        self.amount == 0
    }

    /// `hash4(nullifier, secret, amount, asset_id)`
    #[must_use]
    pub fn commitment(&self) -> Element {
        commitment(self.nullifier, self.secret, self.amount, self.asset_id)
    }

    /// Turn this into a full note, e.g. for a transfer output
    #[must_use]
    pub fn into_note(self, source_type: SourceType) -> Note {
        Note::new(
            self.nullifier,
            self.secret,
            self.amount,
            self.asset_id,
            source_type,
        )
    }
}

/// Amounts are decimal strings, like every other field value
mod amount_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(amount)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

mod leaf_index {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const UNOBSERVED: i64 = -1;

    pub fn serialize<S: Serializer>(index: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match index {
            Some(index) => serializer.serialize_u64(*index),
            None => serializer.serialize_i64(UNOBSERVED),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        match Option::<i64>::deserialize(deserializer)? {
            None | Some(UNOBSERVED) => Ok(None),
            Some(index) => u64::try_from(index)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid leaf index {index}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::{rand_core::SeedableRng, ChaChaRng};

    use super::*;

    #[test]
    fn commitment_is_tree_style_hash() {
        let note = Note::new(
            Element::new(1),
            Element::new(2),
            3,
            Element::new(4),
            SourceType::Deposit,
        );

        let expected = hash2(
            hash2(Element::new(1), Element::new(2)),
            hash2(Element::new(3), Element::new(4)),
        );

        assert_eq!(note.commitment, expected);
        assert_eq!(note.to_partial().commitment(), expected);
        assert!(note.validate().is_ok());
    }

    #[test]
    fn tampered_note_fails_validation() {
        let mut rng = ChaChaRng::from_seed([0; 32]);
        let mut note = Note::random(&mut rng, 10, Element::ZERO, SourceType::Transfer);
        let original = note.commitment;

        note.amount = 11;

        assert!(matches!(
            note.validate(),
            Err(Error::InvalidCommitment { actual, .. }) if actual == original
        ));
    }

    #[test]
    fn nullifier_hash_needs_leaf_index() {
        let mut rng = ChaChaRng::from_seed([1; 32]);
        let mut note = Note::random(&mut rng, 10, Element::ZERO, SourceType::Deposit);

        assert!(matches!(
            note.nullifier_hash(),
            Err(Error::NotObserved { .. })
        ));

        note.leaf_index = Some(5);
        assert_eq!(
            note.nullifier_hash().unwrap(),
            hash2(note.nullifier, Element::new(5))
        );
    }

    #[test]
    fn serializes_amounts_and_source_as_strings() {
        let note = Note::new(
            Element::new(1),
            Element::new(2),
            1_000_000_000_000_000_000_000_000,
            Element::ZERO,
            SourceType::Change,
        );

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["amount"], "1000000000000000000000000");
        assert_eq!(json["assetId"], "0");
        assert_eq!(json["sourceType"], "change");
        assert_eq!(json["leafIndex"], -1);

        let back: Note = serde_json::from_value(json).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn unobserved_leaf_index_is_minus_one() {
        let mut note = Note::new(
            Element::new(1),
            Element::new(2),
            3,
            Element::ZERO,
            SourceType::Deposit,
        );

        let mut json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["leafIndex"], -1);
        assert_eq!(serde_json::from_value::<Note>(json.clone()).unwrap().leaf_index, None);

        json["leafIndex"] = serde_json::Value::Null;
        assert_eq!(serde_json::from_value::<Note>(json.clone()).unwrap().leaf_index, None);

        json.as_object_mut().unwrap().remove("leafIndex");
        assert_eq!(serde_json::from_value::<Note>(json.clone()).unwrap().leaf_index, None);

        json["leafIndex"] = serde_json::json!(-2);
        assert!(serde_json::from_value::<Note>(json).is_err());

        note.leaf_index = Some(7);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["leafIndex"], 7);
        assert_eq!(serde_json::from_value::<Note>(json).unwrap(), note);
    }

    #[test]
    fn dummy_has_stable_commitment() {
        let a = PartialNote::dummy(Element::ZERO);
        let b = PartialNote::dummy(Element::ZERO);

        assert_eq!(a.commitment(), b.commitment());
        assert_ne!(a.commitment(), PartialNote::dummy(Element::ONE).commitment());
    }
}
