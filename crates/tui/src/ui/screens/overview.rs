use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use engine::{Group, net_balances, ranked_balances};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            money::styled_amount,
        },
        format, links,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let Some(group) = state.group() else {
        return;
    };

    // Main layout: quick stats, details/balances side by side, recent expenses
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Min(5),
        ])
        .split(area);

    render_quick_stats(frame, layout[0], group, theme);
    render_middle_row(frame, layout[1], state, group, theme);
    render_recent_expenses(frame, layout[2], group, theme);
}

fn render_quick_stats(frame: &mut Frame<'_>, area: Rect, group: &Group, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    StatCard::new(
        "Total Spent",
        group.total_spent().format(group.currency),
        theme,
    )
    .subtitle(group.currency.code())
    .render(frame, cols[0]);

    StatCard::new("Expenses", group.expenses.len().to_string(), theme)
        .subtitle("recorded")
        .render(frame, cols[1]);

    StatCard::new("Participants", group.participants.len().to_string(), theme)
        .subtitle(group.status.label())
        .render(frame, cols[2]);
}

fn render_middle_row(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    group: &Group,
    theme: &Theme,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_details_panel(frame, cols[0], state, group, theme);
    render_top_balances(frame, cols[1], group, theme);
}

fn render_details_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    group: &Group,
    theme: &Theme,
) {
    let card = Card::new("Details", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let dates = group
        .date_range
        .as_ref()
        .map(format::date_range_label)
        .unwrap_or_else(|| "-".to_string());
    let description = group.description.as_deref().unwrap_or("-");

    let lines = vec![
        Line::from(vec![
            Span::styled("Kind", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", group.kind.label())),
            Span::raw("   "),
            Span::styled("Status", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", group.status.label())),
        ]),
        Line::from(vec![
            Span::styled("Dates", Style::default().fg(theme.dim)),
            Span::raw(format!(": {dates}")),
        ]),
        Line::from(vec![
            Span::styled("Viewer", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", state.viewer)),
        ]),
        Line::from(vec![
            Span::styled("Web", Style::default().fg(theme.dim)),
            Span::raw(": "),
            Span::styled(links::path_for(group), Style::default().fg(theme.accent)),
        ]),
        Line::from(vec![
            Span::styled("About", Style::default().fg(theme.dim)),
            Span::raw(": "),
            Span::styled(
                description.to_string(),
                Style::default().fg(theme.text_muted),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_top_balances(frame: &mut Frame<'_>, area: Rect, group: &Group, theme: &Theme) {
    let card = Card::new("Balances", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let ranked = ranked_balances(&net_balances(group));
    let items: Vec<ListItem> = ranked
        .iter()
        .take(inner.height as usize)
        .map(|(id, balance)| {
            let name = format::participant_name(&group.participants, id).to_string();
            let amount = styled_amount(*balance, group.currency, theme);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{name:<20}"), Style::default().fg(theme.text)),
                amount,
            ]))
        })
        .collect();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No participants",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
    } else {
        frame.render_widget(List::new(items), inner);
    }
}

fn render_recent_expenses(frame: &mut Frame<'_>, area: Rect, group: &Group, theme: &Theme) {
    let card = Card::new("Recent Expenses", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let items: Vec<ListItem> = group
        .expenses
        .iter()
        .rev()
        .take(inner.height as usize)
        .map(|expense| {
            let date = format::short_date(&expense.date);
            let amount = expense.amount.format(group.currency);
            let payer = format::paid_by_names(&expense.paid_by, &group.participants);

            ListItem::new(Line::from(vec![
                Span::styled(format!("{date:<14}"), Style::default().fg(theme.dim)),
                Span::styled(
                    format!("{:<28}", expense.description),
                    Style::default().fg(theme.text),
                ),
                Span::styled(format!("{amount:>12}"), Style::default().fg(theme.text)),
                Span::raw("  "),
                Span::styled(payer, Style::default().fg(theme.text_muted)),
            ]))
        })
        .collect();

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No expenses yet",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
    } else {
        frame.render_widget(List::new(items), inner);
    }
}
