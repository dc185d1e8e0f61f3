use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::{app::AppState, ui::components::hints};

/// Calculates a centered rect for the picker box
fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// The trip and group picker shown before anything is open.
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = &state.theme;

    let box_width = 56u16.min(area.width.saturating_sub(2));
    let rows_needed = state.book.groups.len().max(1) as u16;
    let box_height = (rows_needed + 5).min(area.height.saturating_sub(2));
    let card_area = centered_box(box_width, box_height, area);

    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" trips & groups ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Viewer
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Group list
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Viewer", Style::default().fg(theme.text_muted)),
            Span::raw(": "),
            Span::styled(state.viewer.clone(), Style::default().fg(theme.text)),
        ])),
        rows[0],
    );

    if state.book.groups.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No trips or groups in the data file.",
                Style::default().fg(theme.dim),
            )),
            rows[2],
        );
    } else {
        let items = state
            .book
            .groups
            .iter()
            .map(|group| {
                let meta = format!(
                    "  {} · {} · {} people",
                    group.kind.label(),
                    group.status.label(),
                    group.participants.len()
                );
                ListItem::new(Line::from(vec![
                    Span::styled(group.name.clone(), Style::default().fg(theme.text)),
                    Span::styled(meta, Style::default().fg(theme.dim)),
                ]))
            })
            .collect::<Vec<_>>();

        let mut list_state = ListState::default();
        list_state.select(Some(state.start.selected.min(items.len() - 1)));

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("» ");
        frame.render_stateful_widget(list, rows[2], &mut list_state);
    }

    // Error message below the box (only shown when there's one and it fits)
    if let Some(message) = &state.start.message
        && card_area.y + card_area.height + 1 < area.y + area.height
    {
        let error_area = Rect {
            x: card_area.x,
            y: card_area.y + card_area.height + 1,
            width: card_area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }

    if area.height > 0 {
        let bar_area = Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        };
        let spans = hints::hints_to_spans(&hints::common::start_screen(), theme);
        frame.render_widget(Paragraph::new(Line::from(spans)), bar_area);
    }
}
