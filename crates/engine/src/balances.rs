//! Balance derivation.
//!
//! Folds a group's expenses into per-participant signed balances. The sign
//! convention runs through the whole application: positive means the group
//! owes the participant, negative means the participant owes the group.

use std::collections::BTreeMap;

use crate::{Money, groups::Group, participants::ParticipantId};

/// Derives every participant's signed balance from the group's expenses.
///
/// Each expense credits its payers and debits each member's share; both sides
/// allocate the same amount in whole minor units, so the returned balances
/// always sum to zero. Every rostered participant appears in the map, zero
/// balances included. Ids referenced by an expense but missing from the
/// roster still accumulate under their own key; `Group::validate` is the
/// place that flags them.
#[must_use]
pub fn compute_balances(group: &Group) -> BTreeMap<ParticipantId, Money> {
    let mut balances: BTreeMap<ParticipantId, Money> = group
        .participants
        .iter()
        .map(|p| (p.id.clone(), Money::ZERO))
        .collect();

    for expense in &group.expenses {
        let credits = expense.payer_credits();
        if credits.is_empty() {
            // Nobody to credit; skipping the whole expense keeps the ledger
            // balanced and `validate` reports the broken record.
            continue;
        }
        for (id, amount) in credits {
            *balances.entry(id).or_insert(Money::ZERO) += amount;
        }
        for (id, amount) in expense.member_shares() {
            *balances.entry(id).or_insert(Money::ZERO) -= amount;
        }
    }

    balances
}

/// Balances left after subtracting settlements already marked `settled`.
#[must_use]
pub fn net_balances(group: &Group) -> BTreeMap<ParticipantId, Money> {
    let mut balances = compute_balances(group);
    for settlement in group.settlements.iter().filter(|s| s.settled) {
        *balances.entry(settlement.from.clone()).or_insert(Money::ZERO) += settlement.amount;
        *balances.entry(settlement.to.clone()).or_insert(Money::ZERO) -= settlement.amount;
    }
    balances
}

/// Balances ordered for display: largest creditor first, largest debtor
/// last, ascending id on equal balances. Deterministic and idempotent.
#[must_use]
pub fn ranked_balances(balances: &BTreeMap<ParticipantId, Money>) -> Vec<(ParticipantId, Money)> {
    let mut ranked: Vec<(ParticipantId, Money)> = balances
        .iter()
        .map(|(id, balance)| (id.clone(), *balance))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Sum of all balances. Zero for anything `compute_balances` produced.
#[must_use]
pub fn balance_total(balances: &BTreeMap<ParticipantId, Money>) -> Money {
    balances.values().copied().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Currency,
        expenses::{Expense, ExpenseCategory, PaidBy},
        groups::{GroupKind, GroupStatus},
        participants::Participant,
        settlements::Settlement,
    };

    fn group_with(expenses: Vec<Expense>) -> Group {
        Group {
            id: "g1".to_string(),
            name: "Flat".to_string(),
            kind: GroupKind::Group,
            description: None,
            date_range: None,
            currency: Currency::Eur,
            status: GroupStatus::Active,
            participants: vec![
                Participant::new("p1", "Alice"),
                Participant::new("p2", "Bob"),
                Participant::new("p3", "Carol"),
            ],
            expenses,
            settlements: Vec::new(),
        }
    }

    fn expense(id: &str, amount: i64, paid_by: &str, members: &[&str]) -> Expense {
        Expense::new(
            id,
            "Something",
            Money::new(amount),
            "2024-01-05",
            ExpenseCategory::Other,
            PaidBy::One(paid_by.to_string()),
            members.iter().map(|m| m.to_string()).collect(),
        )
        .unwrap()
    }

    #[test]
    fn balances_sum_to_zero() {
        let group = group_with(vec![
            expense("e1", 3000, "p1", &["p1", "p2", "p3"]),
            expense("e2", 1000, "p2", &["p2", "p3"]),
        ]);
        let balances = compute_balances(&group);
        assert_eq!(balance_total(&balances), Money::ZERO);
        assert_eq!(balances["p1"], Money::new(2000));
        assert_eq!(balances["p2"], Money::new(-500));
        assert_eq!(balances["p3"], Money::new(-1500));
    }

    #[test]
    fn everyone_appears_even_with_no_expenses() {
        let balances = compute_balances(&group_with(Vec::new()));
        assert_eq!(balances.len(), 3);
        assert!(balances.values().all(|b| b.is_zero()));
        assert_eq!(balance_total(&balances), Money::ZERO);
    }

    #[test]
    fn unknown_ids_keep_the_sum_at_zero() {
        let group = group_with(vec![expense("e1", 900, "ghost", &["p1", "p2", "p3"])]);
        let balances = compute_balances(&group);
        assert_eq!(balance_total(&balances), Money::ZERO);
        assert_eq!(balances["ghost"], Money::new(900));
    }

    #[test]
    fn ranking_is_descending_with_id_tie_break() {
        let group = group_with(vec![expense("e1", 3000, "p1", &["p2", "p3"])]);
        let balances = compute_balances(&group);
        let ranked = ranked_balances(&balances);
        assert_eq!(ranked[0], ("p1".to_string(), Money::new(3000)));
        assert_eq!(ranked[1], ("p2".to_string(), Money::new(-1500)));
        assert_eq!(ranked[2], ("p3".to_string(), Money::new(-1500)));
    }

    #[test]
    fn ranking_is_idempotent() {
        let group = group_with(vec![
            expense("e1", 3000, "p1", &["p1", "p2", "p3"]),
            expense("e2", 1000, "p2", &["p2", "p3"]),
        ]);
        let balances = compute_balances(&group);
        let once = ranked_balances(&balances);
        let again: BTreeMap<_, _> = once.iter().cloned().collect();
        assert_eq!(ranked_balances(&again), once);
    }

    #[test]
    fn settled_settlements_reduce_the_net_position() {
        let mut group = group_with(vec![expense("e1", 1000, "p1", &["p1", "p2"])]);
        group.settlements.push(Settlement {
            id: "s1".to_string(),
            from: "p2".to_string(),
            to: "p1".to_string(),
            amount: Money::new(500),
            settled: true,
        });
        let net = net_balances(&group);
        assert_eq!(net["p1"], Money::ZERO);
        assert_eq!(net["p2"], Money::ZERO);

        // A merely suggested settlement changes nothing.
        group.settlements[0].settled = false;
        let net = net_balances(&group);
        assert_eq!(net["p1"], Money::new(500));
        assert_eq!(net["p2"], Money::new(-500));
    }
}
