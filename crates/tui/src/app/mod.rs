use std::time::{Duration, Instant};

use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use engine::{Book, Group};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    report,
    session::{AuthProvider, Session, SessionAuth},
    store, ui,
    ui::keymap::AppAction,
};

const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Expenses,
    Balances,
    Settlements,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Expenses => "Expenses",
            Self::Balances => "Balances",
            Self::Settlements => "Settlements",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Overview => Self::Expenses,
            Self::Expenses => Self::Balances,
            Self::Balances => Self::Settlements,
            Self::Settlements => Self::Overview,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpensesMode {
    #[default]
    List,
    Detail,
}

#[derive(Debug, Default)]
pub struct StartState {
    pub selected: usize,
    pub message: Option<String>,
}

#[derive(Debug, Default)]
pub struct ExpensesState {
    pub selected: usize,
    pub mode: ExpensesMode,
}

impl ExpensesState {
    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Default)]
pub struct PaletteState {
    pub active: bool,
    pub query: String,
    pub selected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteCommand {
    GoOverview,
    GoExpenses,
    GoBalances,
    GoSettlements,
    SwitchGroup,
    ExportReport,
    Logout,
    Quit,
}

impl PaletteCommand {
    pub fn all() -> Vec<PaletteCommand> {
        vec![
            Self::GoOverview,
            Self::GoExpenses,
            Self::GoBalances,
            Self::GoSettlements,
            Self::SwitchGroup,
            Self::ExportReport,
            Self::Logout,
            Self::Quit,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::GoOverview => "Go to overview",
            Self::GoExpenses => "Go to expenses",
            Self::GoBalances => "Go to balances",
            Self::GoSettlements => "Go to settlements",
            Self::SwitchGroup => "Switch trip or group",
            Self::ExportReport => "Download expense report",
            Self::Logout => "Log out",
            Self::Quit => "Quit",
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    pub book: Book,
    pub open_group: Option<usize>,
    pub viewer: String,
    pub start: StartState,
    pub expenses: ExpensesState,
    pub palette: PaletteState,
    pub help_open: bool,
    pub toast: Option<ToastState>,
    pub notices: Vec<String>,
    pub theme: ui::Theme,
    pub timezone: Tz,
}

impl AppState {
    /// The group currently open, if any.
    pub fn group(&self) -> Option<&Group> {
        self.open_group.and_then(|idx| self.book.groups.get(idx))
    }
}

pub struct App {
    config: AppConfig,
    auth: Box<dyn AuthProvider>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let auth = Box::new(SessionAuth::new(config.session_file.clone()));
        Self::with_auth(config, auth)
    }

    /// Construction with an explicit auth provider, so tests can observe
    /// the logout seam without touching the filesystem.
    pub fn with_auth(config: AppConfig, auth: Box<dyn AuthProvider>) -> Result<Self> {
        let session = Session::load(&config.session_file)?;
        let book = store::load_book(&config.data_file)?;

        let notices = store::validation_notices(&book);
        for notice in &notices {
            tracing::warn!("validation: {notice}");
        }

        let viewer = if !config.viewer.trim().is_empty() {
            config.viewer.trim().to_string()
        } else if !session.viewer.trim().is_empty() {
            session.viewer.clone()
        } else {
            "guest".to_string()
        };

        let timezone = match config.timezone.parse::<Tz>() {
            Ok(tz) => tz,
            Err(err) => {
                tracing::warn!(
                    "invalid timezone \"{}\": {err}, using Europe/Rome",
                    config.timezone
                );
                chrono_tz::Europe::Rome
            }
        };

        // Preselect the group the viewer had open last time.
        let selected = session
            .last_group_id
            .as_deref()
            .and_then(|id| book.groups.iter().position(|g| g.id == id))
            .unwrap_or(0);

        let state = AppState {
            screen: Screen::Start,
            section: Section::Overview,
            book,
            open_group: None,
            viewer,
            start: StartState {
                selected,
                message: None,
            },
            expenses: ExpensesState::default(),
            palette: PaletteState::default(),
            help_open: false,
            toast: None,
            notices,
            theme: ui::Theme::named(&config.theme),
            timezone,
        };

        Ok(Self {
            config,
            auth,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.expire_toast();

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.state.palette.active {
            self.handle_palette_key(key).await?;
            return Ok(());
        }
        if self.state.help_open {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.state.help_open = false;
            }
            return Ok(());
        }

        match crate::ui::keymap::map_key(key) {
            AppAction::TogglePalette => {
                if self.state.screen == Screen::Main {
                    self.state.palette = PaletteState {
                        active: true,
                        query: String::new(),
                        selected: 0,
                    };
                }
            }
            AppAction::Quit => {
                self.should_quit = true;
            }
            AppAction::Cancel => self.handle_cancel(),
            AppAction::NextSection => {
                if self.state.screen == Screen::Main {
                    self.state.section = self.state.section.next();
                }
            }
            AppAction::Submit => self.handle_submit(),
            AppAction::Up => match self.state.screen {
                Screen::Start => {
                    self.state.start.selected = self.state.start.selected.saturating_sub(1);
                }
                Screen::Main => {
                    if self.state.section == Section::Expenses {
                        self.state.expenses.select_prev();
                    }
                }
            },
            AppAction::Down => match self.state.screen {
                Screen::Start => {
                    let len = self.state.book.groups.len();
                    if len > 0 {
                        self.state.start.selected =
                            (self.state.start.selected + 1).min(len - 1);
                    }
                }
                Screen::Main => {
                    if self.state.section == Section::Expenses {
                        let len = self.expenses_len();
                        self.state.expenses.select_next(len);
                    }
                }
            },
            AppAction::Input(ch) => self.handle_char(ch).await?,
            AppAction::None => {}
        }

        Ok(())
    }

    fn handle_cancel(&mut self) {
        match self.state.screen {
            Screen::Main => {
                if self.state.section == Section::Expenses
                    && self.state.expenses.mode == ExpensesMode::Detail
                {
                    self.state.expenses.mode = ExpensesMode::List;
                } else {
                    self.state.screen = Screen::Start;
                }
            }
            Screen::Start => {}
        }
    }

    fn handle_submit(&mut self) {
        match self.state.screen {
            Screen::Start => self.open_selected(),
            Screen::Main => {
                if self.state.section == Section::Expenses && self.expenses_len() > 0 {
                    self.state.expenses.mode = ExpensesMode::Detail;
                }
            }
        }
    }

    async fn handle_char(&mut self, ch: char) -> Result<()> {
        if self.state.screen == Screen::Start {
            if ch == '?' {
                self.state.help_open = true;
            }
            return Ok(());
        }

        match ch {
            '1' => self.state.section = Section::Overview,
            '2' => self.state.section = Section::Expenses,
            '3' => self.state.section = Section::Balances,
            '4' => self.state.section = Section::Settlements,
            '?' => self.state.help_open = true,
            'x' | 'X' => self.export_report().await?,
            'g' | 'G' => {
                self.state.screen = Screen::Start;
            }
            'o' | 'O' => self.logout(),
            'j' | 'J' => {
                if self.state.section == Section::Expenses {
                    let len = self.expenses_len();
                    self.state.expenses.select_next(len);
                }
            }
            'k' | 'K' => {
                if self.state.section == Section::Expenses {
                    self.state.expenses.select_prev();
                }
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_palette_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('p') => self.state.palette.active = false,
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Esc => self.state.palette.active = false,
            KeyCode::Up => {
                self.state.palette.selected = self.state.palette.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                let count =
                    ui::components::command_palette::filtered_commands(&self.state).len();
                if count > 0 {
                    self.state.palette.selected =
                        (self.state.palette.selected + 1).min(count - 1);
                }
            }
            KeyCode::Backspace => {
                self.state.palette.query.pop();
                self.state.palette.selected = 0;
            }
            KeyCode::Enter => {
                let commands = ui::components::command_palette::filtered_commands(&self.state);
                let command = commands.get(self.state.palette.selected).copied();
                self.state.palette.active = false;
                if let Some(command) = command {
                    self.run_palette_command(command).await?;
                }
            }
            KeyCode::Char(ch) => {
                self.state.palette.query.push(ch);
                self.state.palette.selected = 0;
            }
            _ => {}
        }
        Ok(())
    }

    async fn run_palette_command(&mut self, command: PaletteCommand) -> Result<()> {
        match command {
            PaletteCommand::GoOverview => self.state.section = Section::Overview,
            PaletteCommand::GoExpenses => self.state.section = Section::Expenses,
            PaletteCommand::GoBalances => self.state.section = Section::Balances,
            PaletteCommand::GoSettlements => self.state.section = Section::Settlements,
            PaletteCommand::SwitchGroup => self.state.screen = Screen::Start,
            PaletteCommand::ExportReport => self.export_report().await?,
            PaletteCommand::Logout => self.logout(),
            PaletteCommand::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn open_selected(&mut self) {
        if self.state.book.groups.is_empty() {
            self.state.start.message = Some("Nothing to open.".to_string());
            return;
        }
        let idx = self.state.start.selected.min(self.state.book.groups.len() - 1);
        let group_id = self.state.book.groups[idx].id.clone();
        let validation = self.state.book.groups[idx].validate();

        self.state.open_group = Some(idx);
        self.state.screen = Screen::Main;
        self.state.section = Section::Overview;
        self.state.expenses = ExpensesState::default();
        self.state.start.message = None;

        let session = Session {
            viewer: self.state.viewer.clone(),
            last_group_id: Some(group_id),
        };
        if let Err(err) = session.save(&self.config.session_file) {
            tracing::warn!("failed to save session: {err}");
        }

        if let Err(err) = validation {
            self.toast(
                ToastLevel::Error,
                format!("Data issues in this group: {err}"),
            );
        }
    }

    /// Writes the open group's expenses to a CSV report off the event
    /// loop, then reports the outcome. Failures leave the app usable and
    /// the action can simply be retried.
    async fn export_report(&mut self) -> Result<()> {
        let Some(group) = self.state.group().cloned() else {
            self.toast(ToastLevel::Info, "Open a trip or group first.".to_string());
            return Ok(());
        };
        let reports_dir = std::path::PathBuf::from(&self.config.reports_dir);
        let timezone = self.state.timezone;

        let outcome =
            tokio::task::spawn_blocking(move || report::write_csv(&group, &reports_dir, timezone))
                .await;

        match outcome {
            Ok(Ok(path)) => self.toast(
                ToastLevel::Success,
                format!("Report saved to {}", path.display()),
            ),
            Ok(Err(err)) => {
                tracing::error!("report export failed: {err}");
                self.toast(ToastLevel::Error, "Report failed. Try again.".to_string());
            }
            Err(err) => {
                tracing::error!("report task crashed: {err}");
                self.toast(ToastLevel::Error, "Report failed. Try again.".to_string());
            }
        }
        Ok(())
    }

    fn logout(&mut self) {
        match self.auth.logout() {
            Ok(()) => {
                self.state.viewer = "guest".to_string();
                self.state.open_group = None;
                self.state.screen = Screen::Start;
                self.state.section = Section::Overview;
                self.toast(ToastLevel::Info, "Logged out.".to_string());
            }
            Err(err) => {
                tracing::error!("logout failed: {err}");
                self.toast(
                    ToastLevel::Error,
                    "Could not clear the session.".to_string(),
                );
            }
        }
    }

    fn expenses_len(&self) -> usize {
        self.state.group().map(|g| g.expenses.len()).unwrap_or(0)
    }

    fn toast(&mut self, level: ToastLevel, message: String) {
        self.state.toast = Some(ToastState {
            message,
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn expire_toast(&mut self) {
        if let Some(toast) = &self.state.toast
            && Instant::now() >= toast.expires_at
        {
            self.state.toast = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use engine::{
        Currency, Expense, ExpenseCategory, GroupKind, GroupStatus, Money, PaidBy, Participant,
    };

    use super::*;

    struct StubAuth {
        called: Arc<AtomicBool>,
        fail: bool,
    }

    impl AuthProvider for StubAuth {
        fn logout(&mut self) -> Result<()> {
            self.called.store(true, Ordering::SeqCst);
            if self.fail {
                Err(AppError::Terminal("boom".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn test_config(dir: &Path) -> AppConfig {
        AppConfig {
            data_file: dir.join("book.json").to_string_lossy().into_owned(),
            reports_dir: dir.join("reports").to_string_lossy().into_owned(),
            session_file: dir.join("session.json").to_string_lossy().into_owned(),
            viewer: "ada".to_string(),
            theme: "dark".to_string(),
            timezone: "Europe/Rome".to_string(),
            log_level: "warn".to_string(),
        }
    }

    fn sample_group(id: &str) -> Group {
        Group {
            id: id.to_string(),
            name: format!("Group {id}"),
            kind: GroupKind::Trip,
            description: None,
            date_range: None,
            currency: Currency::Eur,
            status: GroupStatus::Active,
            participants: vec![
                Participant::new("p1", "Ada"),
                Participant::new("p2", "Bruno"),
            ],
            expenses: vec![
                Expense::new(
                    "e1",
                    "Tickets",
                    Money::new(4200),
                    "2024-03-01",
                    ExpenseCategory::Activities,
                    PaidBy::One("p1".to_string()),
                    vec!["p1".to_string(), "p2".to_string()],
                )
                .unwrap(),
            ],
            settlements: Vec::new(),
        }
    }

    fn test_app(dir: &Path, fail_logout: bool) -> (App, Arc<AtomicBool>) {
        let called = Arc::new(AtomicBool::new(false));
        let auth = Box::new(StubAuth {
            called: called.clone(),
            fail: fail_logout,
        });
        let mut app = App::with_auth(test_config(dir), auth).unwrap();
        app.state.book = Book {
            groups: vec![sample_group("g1"), sample_group("g2")],
        };
        (app, called)
    }

    #[test]
    fn opening_a_group_lands_on_the_overview_and_saves_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = test_app(dir.path(), false);

        app.state.start.selected = 1;
        app.open_selected();

        assert_eq!(app.state.screen, Screen::Main);
        assert_eq!(app.state.section, Section::Overview);
        assert_eq!(app.state.open_group, Some(1));

        let session = Session::load(&app.config.session_file).unwrap();
        assert_eq!(session.last_group_id.as_deref(), Some("g2"));
    }

    #[test]
    fn opening_with_an_empty_book_only_sets_a_message() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = test_app(dir.path(), false);
        app.state.book = Book::default();

        app.open_selected();

        assert_eq!(app.state.screen, Screen::Start);
        assert!(app.state.start.message.is_some());
    }

    #[test]
    fn logout_goes_through_the_auth_seam() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, called) = test_app(dir.path(), false);
        app.state.start.selected = 0;
        app.open_selected();

        app.logout();

        assert!(called.load(Ordering::SeqCst));
        assert_eq!(app.state.screen, Screen::Start);
        assert_eq!(app.state.open_group, None);
        assert_eq!(app.state.viewer, "guest");
    }

    #[test]
    fn failed_logout_keeps_the_session_intact() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, called) = test_app(dir.path(), true);
        app.open_selected();

        app.logout();

        assert!(called.load(Ordering::SeqCst));
        assert_eq!(app.state.screen, Screen::Main);
        assert_eq!(app.state.viewer, "ada");
        let toast = app.state.toast.expect("an error toast");
        assert_eq!(toast.level, ToastLevel::Error);
    }

    #[test]
    fn tab_cycles_through_all_sections_and_wraps() {
        let mut section = Section::Overview;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(section.label());
            section = section.next();
        }
        assert_eq!(
            seen,
            vec!["Overview", "Expenses", "Balances", "Settlements"]
        );
        assert_eq!(section, Section::Overview);
    }

    #[test]
    fn palette_query_narrows_the_command_list() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = test_app(dir.path(), false);

        app.state.palette.query = "report".to_string();
        let commands = ui::components::command_palette::filtered_commands(&app.state);
        assert_eq!(commands, vec![PaletteCommand::ExportReport]);

        app.state.palette.query = String::new();
        let all = ui::components::command_palette::filtered_commands(&app.state);
        assert_eq!(all.len(), PaletteCommand::all().len());
    }

    #[tokio::test]
    async fn export_writes_a_report_and_toasts_success() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = test_app(dir.path(), false);
        app.open_selected();

        app.export_report().await.unwrap();

        let toast = app.state.toast.expect("a toast");
        assert_eq!(toast.level, ToastLevel::Success);
        let reports: Vec<_> = std::fs::read_dir(dir.path().join("reports"))
            .unwrap()
            .collect();
        assert_eq!(reports.len(), 1);
    }

    #[tokio::test]
    async fn export_without_an_open_group_just_informs() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = test_app(dir.path(), false);

        app.export_report().await.unwrap();

        let toast = app.state.toast.expect("a toast");
        assert_eq!(toast.level, ToastLevel::Info);
        assert!(!dir.path().join("reports").exists());
    }

    #[test]
    fn selection_stays_inside_the_expense_list() {
        let mut expenses = ExpensesState::default();
        expenses.select_next(1);
        expenses.select_next(1);
        assert_eq!(expenses.selected, 0);

        expenses.select_prev();
        assert_eq!(expenses.selected, 0);

        expenses.select_next(0);
        assert_eq!(expenses.selected, 0);
    }
}
