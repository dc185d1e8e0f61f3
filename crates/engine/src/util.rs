//! Internal helpers for model validation.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation logic so the engine enforces consistent invariants.

use std::collections::HashSet;

use crate::{EngineError, Money, ResultEngine};

/// Sum amounts with overflow detection; `label` names the field in the error.
pub(crate) fn checked_total<'a>(
    amounts: impl IntoIterator<Item = &'a Money>,
    label: &str,
) -> ResultEngine<Money> {
    let mut total = Money::ZERO;
    for amount in amounts {
        total = total.checked_add(*amount).ok_or_else(|| {
            EngineError::InvalidAmount(format!("overflow while summing {label}"))
        })?;
    }
    Ok(total)
}

/// First id appearing twice, if any.
pub(crate) fn find_duplicate<'a>(ids: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}

/// Ensure every referenced id is part of the roster.
pub(crate) fn ensure_known<'a>(
    roster: &HashSet<&str>,
    ids: impl IntoIterator<Item = &'a str>,
    context: &str,
) -> ResultEngine<()> {
    for id in ids {
        if !roster.contains(id) {
            return Err(EngineError::KeyNotFound(format!(
                "unknown participant \"{id}\" in {context}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_total_reports_overflow() {
        let amounts = [Money::new(i64::MAX), Money::new(1)];
        assert!(checked_total(amounts.iter(), "payer amounts").is_err());
        assert_eq!(
            checked_total([Money::new(2), Money::new(3)].iter(), "shares").unwrap(),
            Money::new(5)
        );
    }

    #[test]
    fn find_duplicate_returns_the_first_repeat() {
        assert_eq!(find_duplicate(["a", "b", "a", "b"]), Some("a"));
        assert_eq!(find_duplicate(["a", "b"]), None);
    }
}
