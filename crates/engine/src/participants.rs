use serde::{Deserialize, Serialize};

/// Caller-supplied identifier of a participant, unique within one group.
pub type ParticipantId = String;

/// A person taking part in a trip or group.
///
/// The record carries no balance: a participant's signed balance is derived
/// from the group's expenses (see `compute_balances`), which is what keeps the
/// per-group balances summing to zero.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Participant {
    #[must_use]
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            phone: None,
        }
    }
}
