pub use balances::{balance_total, compute_balances, net_balances, ranked_balances};
pub use currency::Currency;
pub use error::EngineError;
pub use expenses::{
    Expense, ExpenseAttachment, ExpenseCategory, ExpenseId, PaidBy, SplitMethod,
};
pub use groups::{Book, DateRange, Group, GroupId, GroupKind, GroupStatus};
pub use money::Money;
pub use participants::{Participant, ParticipantId};
pub use settlements::{Settlement, SettlementId, reconciles, suggest_settlements};

mod balances;
mod currency;
mod error;
mod expenses;
mod groups;
mod money;
mod participants;
mod settlements;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
