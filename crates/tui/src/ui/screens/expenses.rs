use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use engine::{Expense, Group};

use crate::{
    app::{AppState, ExpensesMode},
    ui::{components::money::styled_amount_no_sign, format, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let Some(group) = state.group() else {
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], group, theme);
    match state.expenses.mode {
        ExpensesMode::List => render_list(frame, layout[1], state, group, theme),
        ExpensesMode::Detail => render_detail(frame, layout[1], state, group, theme),
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, group: &Group, theme: &Theme) {
    let line = vec![
        Span::styled("Count", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", group.expenses.len())),
        Span::styled("Total", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", group.total_spent().format(group.currency))),
    ];

    let block = Block::default().borders(Borders::ALL).title("Expenses");
    let content = Paragraph::new(Line::from(line)).block(block);
    frame.render_widget(content, area);
}

fn render_list(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    group: &Group,
    theme: &Theme,
) {
    let items = group
        .expenses
        .iter()
        .map(|expense| {
            let date = format::short_date(&expense.date);
            let amount = expense.amount.format(group.currency);
            let category = expense.category.label();
            let payer = format::paid_by_names(&expense.paid_by, &group.participants);

            let text = format!(
                "{date:<14} {:<28} {category:<14} {amount:>12}  {payer}",
                expense.description
            );
            ListItem::new(Line::from(text))
        })
        .collect::<Vec<_>>();

    if items.is_empty() {
        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No expenses yet",
                Style::default().fg(theme.dim),
            ))
            .block(block),
            area,
        );
        return;
    }

    let mut list_state = ListState::default();
    list_state.select(Some(state.expenses.selected.min(items.len() - 1)));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_detail(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    group: &Group,
    theme: &Theme,
) {
    let Some(expense) = group.expenses.get(state.expenses.selected) else {
        let block = Block::default()
            .title("Expense")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));
        frame.render_widget(
            Paragraph::new(Line::from("No expense selected."))
                .block(block)
                .alignment(ratatui::layout::Alignment::Center),
            area,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    render_detail_header(frame, layout[0], expense, group, theme);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    render_shares(frame, cols[0], expense, group, theme);
    render_attachments(frame, cols[1], expense, theme);
}

fn render_detail_header(
    frame: &mut Frame<'_>,
    area: Rect,
    expense: &Expense,
    group: &Group,
    theme: &Theme,
) {
    let date = format::short_date(&expense.date);
    let amount = expense.amount.format(group.currency);
    let payer = format::paid_by_names(&expense.paid_by, &group.participants);
    let split = format::split_method_label(expense.split_method);

    let lines = vec![
        Line::from(vec![
            Span::styled("What", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", expense.description)),
        ]),
        Line::from(vec![
            Span::styled("When", Style::default().fg(theme.dim)),
            Span::raw(format!(": {date}")),
            Span::raw("   "),
            Span::styled("Category", Style::default().fg(theme.dim)),
            Span::raw(format!(": {}", expense.category.label())),
        ]),
        Line::from(vec![
            Span::styled("Amount", Style::default().fg(theme.dim)),
            Span::raw(format!(": {amount}")),
        ]),
        Line::from(vec![
            Span::styled("Paid by", Style::default().fg(theme.dim)),
            Span::raw(format!(": {payer}")),
        ]),
        Line::from(vec![
            Span::styled("Split", Style::default().fg(theme.dim)),
            Span::raw(format!(": {split} between {}", expense.split_between.len())),
        ]),
    ];

    let block = Block::default()
        .title("Expense Detail")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_shares(
    frame: &mut Frame<'_>,
    area: Rect,
    expense: &Expense,
    group: &Group,
    theme: &Theme,
) {
    let items = expense
        .member_shares()
        .into_iter()
        .map(|(id, share)| {
            let name = format::participant_name(&group.participants, &id).to_string();
            let amount = styled_amount_no_sign(share, group.currency, theme);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{name:<20}"), Style::default().fg(theme.text)),
                amount,
            ]))
        })
        .collect::<Vec<_>>();

    let block = Block::default()
        .title("Shares")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(List::new(items).block(block), area);
}

fn render_attachments(frame: &mut Frame<'_>, area: Rect, expense: &Expense, theme: &Theme) {
    let block = Block::default()
        .title("Attachments")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));

    if expense.attachments.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("None", Style::default().fg(theme.dim))).block(block),
            area,
        );
        return;
    }

    let items = expense
        .attachments
        .iter()
        .map(|att| {
            let size = format::file_size_label(att.file_size);
            ListItem::new(Line::from(vec![
                Span::styled(att.filename.clone(), Style::default().fg(theme.text)),
                Span::styled(
                    format!("  {}  {size}", att.file_type),
                    Style::default().fg(theme.dim),
                ),
            ]))
        })
        .collect::<Vec<_>>();

    frame.render_widget(List::new(items).block(block), area);
}
