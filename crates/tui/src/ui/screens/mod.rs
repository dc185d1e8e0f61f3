pub mod balances;
pub mod expenses;
pub mod overview;
pub mod settlements;
pub mod start;
