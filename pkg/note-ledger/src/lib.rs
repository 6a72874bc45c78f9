#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::match_bool)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![deny(missing_docs)]

//! Client-side bookkeeping for shielded notes
//!
//! A [`Note`] is a private UTXO. Its commitment, `hash4(nullifier, secret, amount, asset_id)`, is
//! appended to the pool's Merkle tree when the note is created, and its nullifier hash is
//! revealed when it is spent.
//!
//! [`NoteLedger`] tracks the notes owned by each shielded key, through a pluggable [`NoteStore`]:
//! ```rust
//! # use note_ledger::*;
//! # fn main() -> Result<()> {
//! let ledger = NoteLedger::new(MemoryStore::default());
//! let owner = OwnerKey::from("alice");
//! let asset = Element::ZERO;
//!
//! let mut rng = rand::thread_rng();
//! ledger.save(&owner, Note::random(&mut rng, 30, asset, SourceType::Deposit))?;
//! ledger.save(&owner, Note::random(&mut rng, 50, asset, SourceType::Deposit))?;
//!
//! let selected = ledger.list_spendable(&owner, asset, 40)?;
//! assert_eq!(selected.len(), 1);
//! assert_eq!(selected[0].amount, 50);
//!
//! assert_eq!(ledger.total_balance(&owner, asset, false)?, 80);
//! # Ok(())
//! # }
//! ```
//!
//! The rest of the crate connects the ledger to the outside world:
//!  - [`chain`] mirrors the authoritative commitment log into a local tree, and checks nullifiers
//!  - [`witness`] builds validated circuit inputs from notes and inclusion proofs
//!  - [`prover`] wraps an external prover with a timeout and checks what it returns
//!  - [`spend`] ties selection, padding and inclusion proofs together

pub mod chain;
mod config;
mod error;
mod ledger;
mod note;
pub mod prover;
mod select;
pub mod spend;
mod store;
pub mod witness;

pub use config::Config;
pub use error::{Error, Result};
pub use ledger::NoteLedger;
pub use note::{Note, PartialNote, SourceType};
pub use select::select_largest_first;
pub use store::{MemoryStore, NoteStore, OwnerKey};

#[doc(inline)]
pub use zk_primitives::Element;
