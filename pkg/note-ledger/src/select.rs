use crate::{Element, Error, Note, Result};

/// Pick unspent `asset_id` notes, largest first, until their total reaches `target`
///
/// Notes of equal amount keep their relative order from `notes`, so the result is deterministic.
/// If every candidate together is still short of `target`, all of them are returned: the caller
/// compares the total against the target to detect insufficient funds. A `target` of zero
/// selects nothing.
///
/// ```rust
/// # use note_ledger::*;
/// let asset = Element::ZERO;
/// let note = |amount: u128| {
///     let nullifier = Element::from(amount);
///     Note::new(nullifier, Element::ONE, amount, asset, SourceType::Deposit)
/// };
///
/// let notes = vec![note(10), note(40), note(25)];
///
/// let selected = select_largest_first(notes.clone(), asset, 50);
/// assert_eq!(selected.iter().map(|n| n.amount).collect::<Vec<_>>(), [40, 25]);
///
/// // not enough: everything is returned
/// let selected = select_largest_first(notes, asset, 1000);
/// assert_eq!(selected.len(), 3);
/// ```
#[must_use]
pub fn select_largest_first<I>(notes: I, asset_id: Element, target: u128) -> Vec<Note>
where
    I: IntoIterator<Item = Note>,
{
    if target == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<Note> = notes
        .into_iter()
        .filter(|note| !note.spent && note.asset_id == asset_id)
        .collect();

    // stable, so ties stay in insertion order
    candidates.sort_by(|a, b| b.amount.cmp(&a.amount));

    let mut total: u128 = 0;
    let mut selected = Vec::new();

    for note in candidates {
        if total >= target {
            break;
        }

        total = total.saturating_add(note.amount);
        selected.push(note);
    }

    selected
}

/// The sum of `notes`' amounts, failing instead of overflowing
pub(crate) fn total<'a, I>(notes: I) -> Result<u128>
where
    I: IntoIterator<Item = &'a Note>,
{
    notes
        .into_iter()
        .try_fold(0u128, |acc, note| acc.checked_add(note.amount))
        .ok_or(Error::AmountOverflow)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::SourceType;

    fn note(id: u64, amount: u128, asset: u64) -> Note {
        Note::new(
            Element::new(id),
            Element::ONE,
            amount,
            Element::new(asset),
            SourceType::Deposit,
        )
    }

    #[test]
    fn ties_keep_insertion_order() {
        let notes = vec![note(1, 5, 0), note(2, 9, 0), note(3, 5, 0), note(4, 5, 0)];

        let selected = select_largest_first(notes, Element::ZERO, 19);
        let ids: Vec<_> = selected.iter().map(|n| n.nullifier).collect();

        assert_eq!(ids, [2, 1, 3].map(Element::new));
    }

    #[test]
    fn skips_spent_and_other_assets() {
        let mut spent = note(1, 100, 0);
        spent.spent = true;

        let notes = vec![spent, note(2, 50, 1), note(3, 10, 0)];
        let selected = select_largest_first(notes, Element::ZERO, 60);

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].nullifier, Element::new(3));
    }

    #[test]
    fn zero_target_selects_nothing() {
        let notes = vec![note(1, 5, 0)];
        assert!(select_largest_first(notes, Element::ZERO, 0).is_empty());
    }

    #[test]
    fn overflowing_total_is_an_error() {
        let notes = [note(1, u128::MAX, 0), note(2, 1, 0)];
        assert!(matches!(total(&notes), Err(Error::AmountOverflow)));
        assert_eq!(total(&notes[..1]).unwrap(), u128::MAX);
    }

    #[proptest]
    fn selection_is_a_minimal_largest_first_prefix(
        #[strategy(prop::collection::vec(1u128..1_000, 0..20))] amounts: Vec<u128>,
        #[strategy(1u128..20_000)] target: u128,
    ) {
        let notes: Vec<_> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| note(i as u64, *amount, 0))
            .collect();

        let selected = select_largest_first(notes.clone(), Element::ZERO, target);
        let selected_total = total(&selected).unwrap();
        let available = total(&notes).unwrap();

        // deterministic
        prop_assert_eq!(&selected, &select_largest_first(notes, Element::ZERO, target));

        // non-increasing amounts
        prop_assert!(selected.windows(2).all(|w| w[0].amount >= w[1].amount));

        if available < target {
            prop_assert_eq!(selected.len(), amounts.len());
        } else {
            prop_assert!(selected_total >= target);

            // dropping the last note would fall short
            let without_last = selected_total - selected.last().unwrap().amount;
            prop_assert!(without_last < target);
        }
    }
}
