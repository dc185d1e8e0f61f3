use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
};

use engine::{Group, Money, net_balances, ranked_balances};

use crate::{
    app::AppState,
    ui::{
        components::{
            card::{Card, StatCard},
            money::styled_amount_bold,
        },
        format,
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let Some(group) = state.group() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let balances = net_balances(group);
    let ranked = ranked_balances(&balances);

    render_totals(frame, layout[0], group, &ranked, theme);
    render_ranking(frame, layout[1], group, &ranked, theme);
}

fn render_totals(
    frame: &mut Frame<'_>,
    area: Rect,
    group: &Group,
    ranked: &[(String, Money)],
    theme: &Theme,
) {
    let owed_to: Money = ranked
        .iter()
        .filter(|(_, balance)| balance.is_positive())
        .map(|(_, balance)| *balance)
        .sum();
    let owed_by: Money = ranked
        .iter()
        .filter(|(_, balance)| balance.is_negative())
        .map(|(_, balance)| balance.abs())
        .sum();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    StatCard::new("Owed To People", owed_to.format(group.currency), theme)
        .value_color(theme.positive)
        .subtitle("waiting to be paid back")
        .render(frame, cols[0]);

    StatCard::new("Owed By People", owed_by.format(group.currency), theme)
        .value_color(theme.negative)
        .subtitle("still to pay")
        .render(frame, cols[1]);
}

fn render_ranking(
    frame: &mut Frame<'_>,
    area: Rect,
    group: &Group,
    ranked: &[(String, Money)],
    theme: &Theme,
) {
    let card = Card::new("Who Owes Whom", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    if ranked.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No participants",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let mut items: Vec<ListItem> = ranked
        .iter()
        .take((inner.height as usize).saturating_sub(2))
        .map(|(id, balance)| {
            let name = format::participant_name(&group.participants, id).to_string();
            let verdict = if balance.is_positive() {
                "is owed"
            } else if balance.is_negative() {
                "owes"
            } else {
                "is square"
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{name:<20}"), Style::default().fg(theme.text)),
                Span::styled(format!("{verdict:<10}"), Style::default().fg(theme.dim)),
                styled_amount_bold(*balance, group.currency, theme),
            ]))
        })
        .collect();

    items.push(ListItem::new(Line::from("")));
    items.push(ListItem::new(Line::from(Span::styled(
        "Net of settled transfers. Credits and debts always cancel out.",
        Style::default().fg(theme.dim),
    ))));

    frame.render_widget(List::new(items), inner);
}
