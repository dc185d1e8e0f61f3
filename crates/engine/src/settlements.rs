//! Settlement primitives and the transfer suggestion algorithm.
//!
//! A `Settlement` is a transfer from one participant to another that reduces
//! the group's imbalance. `suggest_settlements` turns a balance map into a
//! deterministic list of transfers that zeroes every balance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, participants::ParticipantId};

/// Caller-supplied identifier of a settlement, unique within one group.
pub type SettlementId = String;

/// A proposed or recorded transfer between two participants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub id: SettlementId,
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
    #[serde(default)]
    pub settled: bool,
}

impl Settlement {
    pub fn new(
        id: impl Into<SettlementId>,
        from: impl Into<ParticipantId>,
        to: impl Into<ParticipantId>,
        amount: Money,
    ) -> ResultEngine<Self> {
        let from = from.into();
        let to = to.into();
        if from == to {
            return Err(EngineError::InvalidSettlement(format!(
                "\"{from}\" cannot settle with themselves"
            )));
        }
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "settlement amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: id.into(),
            from,
            to,
            amount,
            settled: false,
        })
    }
}

/// Suggests transfers that bring every balance in the map to zero.
///
/// Strategy: repeatedly let the largest debtor pay the largest creditor the
/// smaller of the two residuals. Ties are broken by ascending participant id,
/// so the output is fully determined by the input map. Each round retires at
/// least one participant, which bounds the list at `n - 1` transfers.
///
/// The input is expected to sum to zero (balances from `compute_balances`
/// always do). Any surplus that cannot be paired is left unsettled rather
/// than invented, so the function never fabricates a transfer.
#[must_use]
pub fn suggest_settlements(balances: &BTreeMap<ParticipantId, Money>) -> Vec<Settlement> {
    // BTreeMap iteration is id-ordered, so equal residuals keep a stable order.
    let mut creditors: Vec<(ParticipantId, Money)> = Vec::new();
    let mut debtors: Vec<(ParticipantId, Money)> = Vec::new();
    for (id, balance) in balances {
        if balance.is_positive() {
            creditors.push((id.clone(), *balance));
        } else if balance.is_negative() {
            debtors.push((id.clone(), balance.abs()));
        }
    }

    let mut settlements = Vec::new();
    while !creditors.is_empty() && !debtors.is_empty() {
        let creditor_idx = index_of_max(&creditors);
        let debtor_idx = index_of_max(&debtors);
        let transfer = creditors[creditor_idx].1.min(debtors[debtor_idx].1);

        settlements.push(Settlement {
            id: format!("suggested-{}", settlements.len() + 1),
            from: debtors[debtor_idx].0.clone(),
            to: creditors[creditor_idx].0.clone(),
            amount: transfer,
            settled: false,
        });

        creditors[creditor_idx].1 -= transfer;
        debtors[debtor_idx].1 -= transfer;
        if creditors[creditor_idx].1.is_zero() {
            creditors.remove(creditor_idx);
        }
        if debtors[debtor_idx].1.is_zero() {
            debtors.remove(debtor_idx);
        }
    }
    settlements
}

/// Index of the largest residual, earliest id winning ties.
fn index_of_max(entries: &[(ParticipantId, Money)]) -> usize {
    let mut best = 0;
    for (i, (_, amount)) in entries.iter().enumerate().skip(1) {
        if *amount > entries[best].1 {
            best = i;
        }
    }
    best
}

/// Checks that a settlement list resolves a balance map completely: adding
/// each transfer to its `from` side and subtracting it from its `to` side
/// must cancel every balance. Participants missing from the map count as
/// starting at zero.
#[must_use]
pub fn reconciles(
    balances: &BTreeMap<ParticipantId, Money>,
    settlements: &[Settlement],
) -> bool {
    let mut residual = balances.clone();
    for settlement in settlements {
        *residual.entry(settlement.from.clone()).or_insert(Money::ZERO) += settlement.amount;
        *residual.entry(settlement.to.clone()).or_insert(Money::ZERO) -= settlement.amount;
    }
    residual.values().all(|balance| balance.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(entries: &[(&str, i64)]) -> BTreeMap<ParticipantId, Money> {
        entries
            .iter()
            .map(|(id, amount)| (id.to_string(), Money::new(*amount)))
            .collect()
    }

    #[test]
    fn new_rejects_self_settlement_and_non_positive_amount() {
        assert_eq!(
            Settlement::new("s1", "p1", "p1", Money::new(100)).unwrap_err(),
            EngineError::InvalidSettlement("\"p1\" cannot settle with themselves".to_string())
        );
        assert!(Settlement::new("s1", "p1", "p2", Money::ZERO).is_err());
        assert!(Settlement::new("s1", "p1", "p2", Money::new(-5)).is_err());
    }

    #[test]
    fn suggestions_zero_out_the_balances() {
        let balances = balances(&[("alice", 700), ("bob", -300), ("carol", -400)]);
        let suggestions = suggest_settlements(&balances);
        assert!(reconciles(&balances, &suggestions));
        assert!(suggestions.len() <= 2);
    }

    #[test]
    fn largest_debtor_pays_largest_creditor_first() {
        let balances = balances(&[("alice", 700), ("bob", -300), ("carol", -400)]);
        let suggestions = suggest_settlements(&balances);
        assert_eq!(suggestions[0].from, "carol");
        assert_eq!(suggestions[0].to, "alice");
        assert_eq!(suggestions[0].amount, Money::new(400));
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let balances = balances(&[("bob", -100), ("ann", -100), ("zoe", 200)]);
        let suggestions = suggest_settlements(&balances);
        assert_eq!(suggestions[0].from, "ann");
        assert_eq!(suggestions[1].from, "bob");
        for suggestion in &suggestions {
            assert_eq!(suggestion.to, "zoe");
        }
    }

    #[test]
    fn settled_groups_need_no_transfers() {
        assert!(suggest_settlements(&balances(&[("alice", 0), ("bob", 0)])).is_empty());
        assert!(suggest_settlements(&BTreeMap::new()).is_empty());
    }
}
