use engine::{Currency, Money};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// Creates a styled span for a money amount with semantic coloring.
///
/// - Positive amounts: green with `+` prefix (owed to this person)
/// - Negative amounts: red (negative sign shown)
/// - Zero: neutral text color
#[must_use]
pub fn styled_amount(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    let formatted = amount.format(currency);

    let (color, prefix) = if amount.is_positive() {
        (theme.positive, "+")
    } else if amount.is_negative() {
        (theme.negative, "")
    } else {
        (theme.text, "")
    };

    Span::styled(format!("{prefix}{formatted}"), Style::default().fg(color))
}

/// Like `styled_amount` but unsigned, for contexts where the direction is
/// already spelled out (e.g. "owes Ada 12.50€").
#[must_use]
pub fn styled_amount_no_sign(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    let formatted = amount.abs().format(currency);

    let color = if amount.is_positive() {
        theme.positive
    } else if amount.is_negative() {
        theme.negative
    } else {
        theme.text
    };

    Span::styled(formatted, Style::default().fg(color))
}

/// Creates a styled span with bold modifier for emphasis (e.g., totals).
#[must_use]
pub fn styled_amount_bold(amount: Money, currency: Currency, theme: &Theme) -> Span<'static> {
    let formatted = amount.format(currency);

    let (color, prefix) = if amount.is_positive() {
        (theme.positive, "+")
    } else if amount.is_negative() {
        (theme.negative, "")
    } else {
        (theme.text, "")
    };

    Span::styled(
        format!("{prefix}{formatted}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
