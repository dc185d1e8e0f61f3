use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use engine::{Group, net_balances, suggest_settlements};

use crate::{
    app::AppState,
    ui::{components::card::Card, format, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let Some(group) = state.group() else {
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_recorded(frame, cols[0], group, theme);
    render_suggested(frame, cols[1], group, theme);
}

fn render_recorded(frame: &mut Frame<'_>, area: Rect, group: &Group, theme: &Theme) {
    let card = Card::new("Recorded", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if group.settlements.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "None recorded",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let items: Vec<ListItem> = group
        .settlements
        .iter()
        .take(inner.height as usize)
        .map(|settlement| {
            let from = format::participant_name(&group.participants, &settlement.from);
            let to = format::participant_name(&group.participants, &settlement.to);
            let amount = settlement.amount.format(group.currency);
            let (status, status_color) = if settlement.settled {
                ("settled", theme.positive)
            } else {
                ("pending", theme.warning)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{from} → {to}"), Style::default().fg(theme.text)),
                Span::styled(format!("  {amount}"), Style::default().fg(theme.text)),
                Span::styled(format!("  {status}"), Style::default().fg(status_color)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_suggested(frame: &mut Frame<'_>, area: Rect, group: &Group, theme: &Theme) {
    let card = Card::new("Suggested", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let suggestions = suggest_settlements(&net_balances(group));

    if suggestions.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("All square", Style::default().fg(theme.dim))),
            inner,
        );
        return;
    }

    let mut items: Vec<ListItem> = suggestions
        .iter()
        .take((inner.height as usize).saturating_sub(2))
        .map(|settlement| {
            let from = format::participant_name(&group.participants, &settlement.from);
            let to = format::participant_name(&group.participants, &settlement.to);
            let amount = settlement.amount.format(group.currency);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{from} → {to}"), Style::default().fg(theme.text)),
                Span::styled(format!("  {amount}"), Style::default().fg(theme.accent)),
            ]))
        })
        .collect();

    items.push(ListItem::new(Line::from("")));
    items.push(ListItem::new(Line::from(Span::styled(
        "Paying these clears every balance, largest debts first.",
        Style::default().fg(theme.dim),
    ))));

    frame.render_widget(List::new(items), inner);
}
