use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, ExpensesMode, Section},
    ui::{
        components::{centered_rect, tabs},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    if !state.help_open {
        return;
    }

    let theme = &state.theme;
    let popup = centered_rect(70, 70, area);
    frame.render_widget(Clear, popup);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(popup);

    let title = Line::from(vec![
        Span::styled("Help", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("Esc", Style::default().fg(theme.dim)),
        Span::raw(" close"),
    ]);

    frame.render_widget(
        Paragraph::new(title).block(
            Block::default()
                .title("Keybinds")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        ),
        layout[0],
    );

    let lines = help_lines(state, theme);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    frame.render_widget(Paragraph::new(lines).block(block), layout[1]);
}

fn help_lines(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("Ctrl+P", Style::default().fg(theme.accent)),
        Span::raw(" command palette  "),
        Span::styled("?", Style::default().fg(theme.accent)),
        Span::raw(" help"),
    ])];
    lines.push(Line::from(tabs::tab_shortcuts(theme)));
    lines.push(Line::from(vec![
        Span::styled("x", Style::default().fg(theme.accent)),
        Span::raw(" download report  "),
        Span::styled("g", Style::default().fg(theme.accent)),
        Span::raw(" switch trip/group  "),
        Span::styled("o", Style::default().fg(theme.accent)),
        Span::raw(" log out"),
    ]));

    match state.section {
        Section::Overview => {
            lines.push(Line::from("Overview: totals and recent activity."));
        }
        Section::Expenses => {
            lines.push(Line::from("Expenses:"));
            lines.push(Line::from(vec![
                Span::styled("↑/↓", Style::default().fg(theme.accent)),
                Span::raw(" select  "),
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" detail"),
            ]));
            if state.expenses.mode == ExpensesMode::Detail {
                lines.push(Line::from(vec![
                    Span::styled("Esc", Style::default().fg(theme.accent)),
                    Span::raw(" back to list"),
                ]));
            }
        }
        Section::Balances => {
            lines.push(Line::from(
                "Balances: positive is owed money, negative owes.",
            ));
        }
        Section::Settlements => {
            lines.push(Line::from(
                "Settlements: recorded transfers plus suggestions to zero out.",
            ));
        }
    }

    lines.push(Line::from(vec![
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" back/close"),
    ]));

    lines
}
