pub mod components;
pub mod format;
pub mod keymap;
pub mod links;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        crate::app::Screen::Start => {
            screens::start::render(frame, area, state);
            components::help_overlay::render(frame, area, state);
            components::toast::render(frame, area, state.toast.as_ref(), &state.theme);
        }
        crate::app::Screen::Main => render_shell(frame, area, state),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = &state.theme;

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar (label + breathing room)
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, theme);
    components::tabs::render_tabs(frame, layout[1], state.section, theme);

    let content_inner = layout[2];

    match state.section {
        crate::app::Section::Overview => screens::overview::render(frame, content_inner, state),
        crate::app::Section::Expenses => screens::expenses::render(frame, content_inner, state),
        crate::app::Section::Balances => screens::balances::render(frame, content_inner, state),
        crate::app::Section::Settlements => {
            screens::settlements::render(frame, content_inner, state)
        }
    }

    render_bottom_bar(frame, layout[3], state, theme);
    components::command_palette::render(frame, area, state);
    components::help_overlay::render(frame, area, state);
    components::toast::render(frame, area, state.toast.as_ref(), theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let (name, path) = state
        .group()
        .map(|group| (group.name.clone(), links::path_for(group)))
        .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
    let clock = chrono::Utc::now()
        .with_timezone(&state.timezone)
        .format("%H:%M")
        .to_string();
    let issues = state.notices.len();
    let (status, status_style) = if issues == 0 {
        ("OK".to_string(), Style::default().fg(theme.positive))
    } else {
        (
            format!("{issues} data issue(s)"),
            Style::default().fg(theme.error),
        )
    };

    let line = Line::from(vec![
        Span::styled("Group", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {name}  ")),
        Span::styled("Viewer", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.viewer)),
        Span::styled("Web", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {path}  ")),
        Span::styled("Time", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {clock}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    // Global shortcuts (always shown, compact)
    let mut parts = components::tabs::tab_shortcuts(theme);

    parts.push(components::hints::hint_separator(theme));
    parts.push(Span::styled("Ctrl+P", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" cmd"));

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(components::hints::hint_separator(theme));
        parts.extend(context_hints);
    }

    parts.push(components::hints::hint_separator(theme));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" quit"));

    let bar = Paragraph::new(Line::from(parts));
    frame.render_widget(bar, area);
}

/// Returns context-specific keyboard hints based on current section and mode.
fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    match state.section {
        crate::app::Section::Overview => vec![
            Span::styled("x", Style::default().fg(theme.accent)),
            Span::raw(" report  "),
            Span::styled("g", Style::default().fg(theme.accent)),
            Span::raw(" switch  "),
            Span::styled("o", Style::default().fg(theme.accent)),
            Span::raw(" log out"),
        ],
        crate::app::Section::Expenses => match state.expenses.mode {
            crate::app::ExpensesMode::List => {
                components::hints::hints_to_spans(&components::hints::common::list_navigation(), theme)
            }
            crate::app::ExpensesMode::Detail => {
                components::hints::hints_to_spans(&components::hints::common::detail_view(), theme)
            }
        },
        crate::app::Section::Balances => vec![
            Span::styled("4", Style::default().fg(theme.accent)),
            Span::raw(" settle up"),
        ],
        crate::app::Section::Settlements => vec![
            Span::styled("x", Style::default().fg(theme.accent)),
            Span::raw(" report"),
        ],
    }
}
