//! Expense primitives.
//!
//! An `Expense` is a single spend event: one or more payers advance the
//! amount, and the members listed in `split_between` owe their shares of it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, participants::ParticipantId};

/// Caller-supplied identifier of an expense, unique within one group.
pub type ExpenseId = String;

/// Who advanced the money for an expense.
///
/// The wire shape is duck-typed for compatibility with existing data files: a
/// bare string means a single payer, an array means several. In code the two
/// cases are distinct variants, so every consumer handles both explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PaidByRepr", into = "PaidByRepr")]
pub enum PaidBy {
    One(ParticipantId),
    Many(Vec<ParticipantId>),
}

impl PaidBy {
    /// The referenced payer ids, in input order.
    #[must_use]
    pub fn ids(&self) -> &[ParticipantId] {
        match self {
            PaidBy::One(id) => std::slice::from_ref(id),
            PaidBy::Many(ids) => ids,
        }
    }
}

/// Wire shape of [`PaidBy`]: `"p1"` or `["p1", "p2"]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum PaidByRepr {
    One(ParticipantId),
    Many(Vec<ParticipantId>),
}

impl From<PaidByRepr> for PaidBy {
    fn from(repr: PaidByRepr) -> Self {
        match repr {
            PaidByRepr::One(id) => PaidBy::One(id),
            PaidByRepr::Many(ids) => PaidBy::Many(ids),
        }
    }
}

impl From<PaidBy> for PaidByRepr {
    fn from(paid_by: PaidBy) -> Self {
        match paid_by {
            PaidBy::One(id) => PaidByRepr::One(id),
            PaidBy::Many(ids) => PaidByRepr::Many(ids),
        }
    }
}

/// Rule used to divide an expense among its members.
///
/// Deserialization goes through [`SplitMethod::from_tag`], so tags written by
/// newer versions read as `Equal` instead of failing the whole data file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SplitMethod {
    #[default]
    Equal,
    Custom,
    Percentage,
}

impl SplitMethod {
    /// Reads a raw method tag. The wildcard arm is the deliberate default:
    /// `"equal"` and every unrecognized tag both mean an equal split.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "custom" => Self::Custom,
            "percentage" => Self::Percentage,
            _ => Self::Equal,
        }
    }
}

impl From<String> for SplitMethod {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

/// Spending bucket an expense belongs to. Unknown buckets read as `Other`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Accommodation,
    Activities,
    Shopping,
    #[default]
    Other,
}

impl ExpenseCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Accommodation => "Accommodation",
            Self::Activities => "Activities",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    fn from_tag(tag: &str) -> Self {
        match tag {
            "food" => Self::Food,
            "transport" => Self::Transport,
            "accommodation" => Self::Accommodation,
            "activities" => Self::Activities,
            "shopping" => Self::Shopping,
            _ => Self::Other,
        }
    }
}

impl From<String> for ExpenseCategory {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

/// A file linked to an expense (receipt photo, invoice).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseAttachment {
    pub id: String,
    pub filename: String,
    pub file_type: String,
    pub file_size: u64,
    pub file_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub uploaded_at: String,
}

/// A single spend event inside a group.
///
/// `date` and `uploaded_at` stay ISO-8601 strings on the record; they are
/// parsed only at display time, so a malformed date in a data file never
/// blocks loading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Money,
    pub date: String,
    #[serde(default)]
    pub category: ExpenseCategory,
    pub paid_by: PaidBy,
    /// Per-payer contribution when `paid_by` lists several people. Must sum
    /// to `amount` (checked by `Group::validate`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_amounts: Option<BTreeMap<ParticipantId, Money>>,
    pub split_between: Vec<ParticipantId>,
    #[serde(default)]
    pub split_method: SplitMethod,
    /// Explicit per-member share for `custom` splits. Must sum to `amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_amounts: Option<BTreeMap<ParticipantId, Money>>,
    /// Per-member percentage for `percentage` splits. Must sum to 100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_percents: Option<BTreeMap<ParticipantId, u32>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<ExpenseAttachment>,
}

impl Expense {
    /// Creates an equally split expense.
    pub fn new(
        id: impl Into<ExpenseId>,
        description: impl Into<String>,
        amount: Money,
        date: impl Into<String>,
        category: ExpenseCategory,
        paid_by: PaidBy,
        split_between: Vec<ParticipantId>,
    ) -> ResultEngine<Self> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        if split_between.is_empty() {
            return Err(EngineError::InvalidExpense(
                "split_between must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: id.into(),
            description: description.into(),
            amount,
            date: date.into(),
            category,
            paid_by,
            payer_amounts: None,
            split_between,
            split_method: SplitMethod::Equal,
            split_amounts: None,
            split_percents: None,
            attachments: Vec::new(),
        })
    }

    /// What each payer advanced, in payer order. Sums to `amount`.
    ///
    /// With several payers and no `payer_amounts` map the amount is divided
    /// evenly. A `payer_amounts` map that does not cover the full amount is
    /// topped up share by share so the credits still cancel the debits. An
    /// empty payer list yields no credits; `Group::validate` reports it.
    #[must_use]
    pub fn payer_credits(&self) -> Vec<(ParticipantId, Money)> {
        match &self.paid_by {
            PaidBy::One(id) => vec![(id.clone(), self.amount)],
            PaidBy::Many(ids) => {
                if ids.is_empty() {
                    return Vec::new();
                }
                let mut credits: Vec<(ParticipantId, Money)> = match &self.payer_amounts {
                    Some(amounts) => ids
                        .iter()
                        .map(|id| (id.clone(), amounts.get(id).copied().unwrap_or(Money::ZERO)))
                        .collect(),
                    None => ids
                        .iter()
                        .cloned()
                        .zip(self.amount.split_even(ids.len()))
                        .collect(),
                };
                spread_residual(&mut credits, self.amount);
                credits
            }
        }
    }

    /// What each member of `split_between` owes, in member order. Sums to
    /// `amount` for every method, including incomplete share maps: leftover
    /// minor units are spread across members in order.
    ///
    /// A `custom` or `percentage` expense missing its share map divides
    /// evenly instead, same degrade-not-fail policy as unknown method tags.
    #[must_use]
    pub fn member_shares(&self) -> Vec<(ParticipantId, Money)> {
        let members = &self.split_between;
        if members.is_empty() {
            return Vec::new();
        }
        let even = |amount: Money| -> Vec<(ParticipantId, Money)> {
            members
                .iter()
                .cloned()
                .zip(amount.split_even(members.len()))
                .collect()
        };
        let mut shares = match self.split_method {
            SplitMethod::Equal => even(self.amount),
            SplitMethod::Custom => match &self.split_amounts {
                Some(amounts) => members
                    .iter()
                    .map(|id| (id.clone(), amounts.get(id).copied().unwrap_or(Money::ZERO)))
                    .collect(),
                None => even(self.amount),
            },
            SplitMethod::Percentage => match &self.split_percents {
                Some(percents) => members
                    .iter()
                    .map(|id| {
                        let pct = percents.get(id).copied().unwrap_or(0);
                        (id.clone(), self.amount.percent(pct))
                    })
                    .collect(),
                None => even(self.amount),
            },
        };
        spread_residual(&mut shares, self.amount);
        shares
    }
}

/// Tops shares up (or down) until they sum to `total`, one even pass via
/// `split_even` so the correction itself cannot leave a remainder.
fn spread_residual(shares: &mut [(ParticipantId, Money)], total: Money) {
    if shares.is_empty() {
        return;
    }
    let allocated: Money = shares.iter().map(|(_, share)| *share).sum();
    let residual = total - allocated;
    if residual.is_zero() {
        return;
    }
    let count = shares.len();
    for ((_, share), extra) in shares.iter_mut().zip(residual.split_even(count)) {
        *share += extra;
    }
}
