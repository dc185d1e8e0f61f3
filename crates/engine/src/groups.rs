//! Trip and group containers.
//!
//! A `Group` holds the roster, the expense list and any recorded settlements
//! for one trip or standing group. `validate` checks the referential and sum
//! invariants a well-formed container must satisfy; display-level concerns
//! (unknown names, malformed dates) deliberately stay out of it and degrade
//! at render time instead.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    Currency, EngineError, Money, ResultEngine,
    expenses::{Expense, PaidBy, SplitMethod},
    participants::{Participant, ParticipantId},
    settlements::Settlement,
    util,
};

/// Caller-supplied identifier of a group.
pub type GroupId = String;

/// Whether a container is a dated trip or a standing group.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    #[default]
    Trip,
    Group,
}

impl GroupKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Trip => "Trip",
            Self::Group => "Group",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    #[default]
    Active,
    Completed,
}

impl GroupStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }
}

/// Inclusive ISO-8601 date range of a trip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// A container of participants, expenses and settlements.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub kind: GroupKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub status: GroupStatus,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

impl Group {
    /// Sum of all expense amounts.
    #[must_use]
    pub fn total_spent(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Checks the container's structural invariants.
    ///
    /// Rejects duplicate ids, references to people outside the roster,
    /// non-positive amounts, share maps that do not sum to their expense
    /// amount, percentages not summing to 100 and inverted date ranges.
    pub fn validate(&self) -> ResultEngine<()> {
        if let Some(id) = util::find_duplicate(self.participants.iter().map(|p| p.id.as_str())) {
            return Err(EngineError::ExistingKey(format!("participant \"{id}\"")));
        }
        if let Some(id) = util::find_duplicate(self.expenses.iter().map(|e| e.id.as_str())) {
            return Err(EngineError::ExistingKey(format!("expense \"{id}\"")));
        }
        if let Some(id) = util::find_duplicate(self.settlements.iter().map(|s| s.id.as_str())) {
            return Err(EngineError::ExistingKey(format!("settlement \"{id}\"")));
        }

        let roster: HashSet<&str> = self.participants.iter().map(|p| p.id.as_str()).collect();

        for expense in &self.expenses {
            validate_expense(expense, &roster)?;
        }

        for settlement in &self.settlements {
            let ctx = format!("settlement \"{}\"", settlement.id);
            if settlement.from == settlement.to {
                return Err(EngineError::InvalidSettlement(format!(
                    "{ctx}: from and to are the same participant"
                )));
            }
            if !settlement.amount.is_positive() {
                return Err(EngineError::InvalidAmount(format!(
                    "{ctx}: amount must be > 0"
                )));
            }
            util::ensure_known(
                &roster,
                [settlement.from.as_str(), settlement.to.as_str()],
                &ctx,
            )?;
        }

        // Only comparable when both ends parse; malformed dates are a display
        // concern, not a structural one.
        if let Some(range) = &self.date_range
            && let (Ok(start), Ok(end)) = (parse_iso(&range.start), parse_iso(&range.end))
            && start > end
        {
            return Err(EngineError::InvalidGroup(format!(
                "date range ends before it starts ({} > {})",
                range.start, range.end
            )));
        }

        Ok(())
    }
}

fn validate_expense(expense: &Expense, roster: &HashSet<&str>) -> ResultEngine<()> {
    let ctx = format!("expense \"{}\"", expense.id);
    if !expense.amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "{ctx}: amount must be > 0"
        )));
    }
    if expense.split_between.is_empty() {
        return Err(EngineError::InvalidExpense(format!(
            "{ctx}: split_between must not be empty"
        )));
    }
    if expense.paid_by.ids().is_empty() {
        return Err(EngineError::InvalidExpense(format!("{ctx}: no payer")));
    }
    if let Some(id) = util::find_duplicate(expense.split_between.iter().map(String::as_str)) {
        return Err(EngineError::InvalidExpense(format!(
            "{ctx}: duplicate member \"{id}\""
        )));
    }

    util::ensure_known(roster, expense.paid_by.ids().iter().map(String::as_str), &ctx)?;
    util::ensure_known(roster, expense.split_between.iter().map(String::as_str), &ctx)?;

    if let PaidBy::Many(payers) = &expense.paid_by
        && let Some(amounts) = &expense.payer_amounts
    {
        let payer_set: HashSet<&str> = payers.iter().map(String::as_str).collect();
        util::ensure_known(&payer_set, amounts.keys().map(String::as_str), &ctx)?;
        if util::checked_total(amounts.values(), "payer amounts")? != expense.amount {
            return Err(EngineError::InvalidExpense(format!(
                "{ctx}: payer amounts must sum to the amount"
            )));
        }
    }

    let member_set: HashSet<&str> = expense.split_between.iter().map(String::as_str).collect();
    if expense.split_method == SplitMethod::Custom
        && let Some(amounts) = &expense.split_amounts
    {
        util::ensure_known(&member_set, amounts.keys().map(String::as_str), &ctx)?;
        if util::checked_total(amounts.values(), "split amounts")? != expense.amount {
            return Err(EngineError::InvalidExpense(format!(
                "{ctx}: split amounts must sum to the amount"
            )));
        }
    }
    if expense.split_method == SplitMethod::Percentage
        && let Some(percents) = &expense.split_percents
    {
        util::ensure_known(&member_set, percents.keys().map(String::as_str), &ctx)?;
        let total: u64 = percents.values().map(|p| u64::from(*p)).sum();
        if total != 100 {
            return Err(EngineError::InvalidExpense(format!(
                "{ctx}: split percentages must sum to 100, got {total}"
            )));
        }
    }

    Ok(())
}

fn parse_iso(value: &str) -> chrono::ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

/// Root of a data file: every trip and group the viewer can open.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Book {
    #[must_use]
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::expenses::ExpenseCategory;

    fn group() -> Group {
        Group {
            id: "trip-1".to_string(),
            name: "Alps 2024".to_string(),
            kind: GroupKind::Trip,
            description: None,
            date_range: Some(DateRange {
                start: "2024-01-02".to_string(),
                end: "2024-01-09".to_string(),
            }),
            currency: Currency::Eur,
            status: GroupStatus::Active,
            participants: vec![
                Participant::new("p1", "Alice"),
                Participant::new("p2", "Bob"),
            ],
            expenses: vec![
                Expense::new(
                    "e1",
                    "Cable car",
                    Money::new(5000),
                    "2024-01-03",
                    ExpenseCategory::Transport,
                    PaidBy::One("p1".to_string()),
                    vec!["p1".to_string(), "p2".to_string()],
                )
                .unwrap(),
            ],
            settlements: Vec::new(),
        }
    }

    #[test]
    fn a_well_formed_group_validates() {
        assert_eq!(group().validate(), Ok(()));
    }

    #[test]
    fn unknown_payer_is_rejected() {
        let mut g = group();
        g.expenses[0].paid_by = PaidBy::One("ghost".to_string());
        assert_eq!(
            g.validate(),
            Err(EngineError::KeyNotFound(
                "unknown participant \"ghost\" in expense \"e1\"".to_string()
            ))
        );
    }

    #[test]
    fn duplicate_participant_is_rejected() {
        let mut g = group();
        g.participants.push(Participant::new("p1", "Alice again"));
        assert_eq!(
            g.validate(),
            Err(EngineError::ExistingKey("participant \"p1\"".to_string()))
        );
    }

    #[test]
    fn custom_shares_must_sum_to_the_amount() {
        let mut g = group();
        g.expenses[0].split_method = SplitMethod::Custom;
        g.expenses[0].split_amounts = Some(BTreeMap::from([
            ("p1".to_string(), Money::new(100)),
            ("p2".to_string(), Money::new(100)),
        ]));
        assert!(matches!(
            g.validate(),
            Err(EngineError::InvalidExpense(_))
        ));
    }

    #[test]
    fn percentages_must_sum_to_one_hundred() {
        let mut g = group();
        g.expenses[0].split_method = SplitMethod::Percentage;
        g.expenses[0].split_percents = Some(BTreeMap::from([
            ("p1".to_string(), 60),
            ("p2".to_string(), 60),
        ]));
        assert!(matches!(
            g.validate(),
            Err(EngineError::InvalidExpense(_))
        ));
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let mut g = group();
        g.date_range = Some(DateRange {
            start: "2024-01-09".to_string(),
            end: "2024-01-02".to_string(),
        });
        assert!(matches!(g.validate(), Err(EngineError::InvalidGroup(_))));
    }

    #[test]
    fn malformed_range_dates_are_not_a_validation_error() {
        let mut g = group();
        g.date_range = Some(DateRange {
            start: "soon".to_string(),
            end: "later".to_string(),
        });
        assert_eq!(g.validate(), Ok(()));
    }

    #[test]
    fn settlement_to_self_is_rejected() {
        let mut g = group();
        g.settlements.push(Settlement {
            id: "s1".to_string(),
            from: "p1".to_string(),
            to: "p1".to_string(),
            amount: Money::new(100),
            settled: false,
        });
        assert!(matches!(g.validate(), Err(EngineError::InvalidSettlement(_))));
    }
}
