//! User detail view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::{debug, warn};

use crate::api::{User, UserId};
use crate::ui::components::{LoadingIndicator, NotificationManager};
use crate::ui::theme::theme;

/// Actions the detail view asks the app to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAction {
    /// Return to the list.
    GoBack,
}

/// Where the single-user fetch stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Loading,
    Loaded(User),
    Failed(String),
}

/// The user detail view.
pub struct DetailView {
    /// The user being displayed, once the route segment parsed.
    user_id: Option<UserId>,
    state: DetailState,
    spinner: LoadingIndicator,
    /// Vertical scroll offset.
    scroll: u16,
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailView {
    /// Create a new detail view.
    pub fn new() -> Self {
        Self {
            user_id: None,
            state: DetailState::Loading,
            spinner: LoadingIndicator::with_message("Loading user..."),
            scroll: 0,
        }
    }

    /// Open the view for a raw `/user/<id>` segment.
    ///
    /// Returns the id to fetch. An unparseable id puts the view in the
    /// failed state and reports it instead.
    pub fn open(&mut self, segment: &str, notifications: &mut NotificationManager) -> Option<UserId> {
        self.scroll = 0;
        match segment.parse::<UserId>() {
            Ok(id) => {
                debug!(id, "Opening user detail");
                self.user_id = Some(id);
                self.state = DetailState::Loading;
                self.spinner.start();
                Some(id)
            }
            Err(_) => {
                let message = format!("Invalid user id: {}", segment);
                warn!(segment, "Unparseable user id in route");
                notifications.error(message.clone());
                self.user_id = None;
                self.state = DetailState::Failed(message);
                self.spinner.stop();
                None
            }
        }
    }

    /// Reset the view when leaving the detail route.
    pub fn close(&mut self) {
        self.user_id = None;
        self.state = DetailState::Loading;
        self.spinner.stop();
        self.scroll = 0;
    }

    /// The id the view is showing.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Check whether the fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }

    /// Store the result of the fetch.
    pub fn set_result(
        &mut self,
        result: Result<User, String>,
        notifications: &mut NotificationManager,
    ) {
        self.spinner.stop();
        match result {
            Ok(user) => {
                debug!(id = user.id, "User detail loaded");
                self.state = DetailState::Loaded(user);
            }
            Err(message) => {
                notifications.error(message.clone());
                self.state = DetailState::Failed(message);
            }
        }
    }

    /// Handle keyboard input.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<DetailAction> {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Backspace, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => {
                Some(DetailAction::GoBack)
            }
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.scroll = 0;
                None
            }
            _ => None,
        }
    }

    /// Advance the spinner.
    pub fn tick(&mut self) {
        self.spinner.tick();
    }

    /// Render the detail view.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let title = match (&self.state, self.user_id) {
            (DetailState::Loaded(user), _) => format!(" {} ", user.name),
            (_, Some(id)) => format!(" User #{} ", id),
            (_, None) => " User ".to_string(),
        };
        let block = Block::default()
            .title(Span::styled(
                title,
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border_focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.state {
            DetailState::Loading => self.spinner.render(frame, inner),
            DetailState::Loaded(user) => self.render_user(frame, inner, user),
            DetailState::Failed(message) => render_failure(frame, inner, message),
        }
    }

    fn render_user(&self, frame: &mut Frame, area: Rect, user: &User) {
        let t = theme();
        let label = Style::default().fg(t.dim);
        let value = Style::default().fg(t.fg);

        let fields = [
            ("ID", user.id.to_string()),
            ("Name", user.name.clone()),
            ("Username", user.username.clone()),
            ("Email", user.email.clone()),
            ("Phone", user.phone.clone()),
            ("Website", user.website.clone()),
            ("Company", user.company.name.clone()),
            ("Address", user.address.to_string()),
        ];

        let mut lines = vec![Line::default()];
        for (name, text) in fields {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", name), label),
                Span::styled(text, value),
            ]));
        }
        if !user.company.catch_phrase.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!("  \"{}\"", user.company.catch_phrase),
                label.add_modifier(Modifier::ITALIC),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    /// Render the key hints for the detail view.
    pub fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let line = Line::from(vec![
            Span::styled(
                " DETAIL ",
                Style::default().fg(t.selection_fg).bg(t.accent),
            ),
            Span::raw(" "),
            Span::styled("j/k scroll · Esc/q back", Style::default().fg(t.dim)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_failure(frame: &mut Frame, area: Rect, message: &str) {
    let t = theme();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("  ✗ {}", message),
            Style::default().fg(t.error),
        ))
        .wrap(Wrap { trim: true }),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "  Press Esc to go back to the list",
            Style::default().fg(t.dim),
        )),
        rows[2],
    );
}

#[cfg(test)]
impl DetailView {
    /// The current fetch state.
    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// The loaded user, if any.
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            DetailState::Loaded(user) => Some(user),
            _ => None,
        }
    }

    /// Current scroll offset.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Address;
    use crate::api::Company;
    use crate::ui::components::NotificationType;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_user(id: UserId) -> User {
        User {
            id,
            name: "Leanne Graham".to_string(),
            username: "Bret".to_string(),
            email: "Sincere@april.biz".to_string(),
            phone: "17707368031".to_string(),
            website: "http://hildegard.org".to_string(),
            company: Company::named("Romaguera-Crona"),
            address: Address {
                street: "Kulas Light".to_string(),
                suite: "Apt. 556".to_string(),
                city: "Gwenborough".to_string(),
                zipcode: "92998-3874".to_string(),
            },
        }
    }

    #[test]
    fn test_open_valid_id_starts_loading() {
        let mut view = DetailView::new();
        let mut notifications = NotificationManager::new();

        assert_eq!(view.open("3", &mut notifications), Some(3));
        assert_eq!(view.user_id(), Some(3));
        assert!(view.is_loading());
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_open_invalid_id_fails_without_fetch() {
        let mut view = DetailView::new();
        let mut notifications = NotificationManager::new();

        assert_eq!(view.open("abc", &mut notifications), None);
        assert_eq!(
            view.state(),
            &DetailState::Failed("Invalid user id: abc".to_string())
        );
        assert_eq!(notifications.count_of(NotificationType::Error), 1);
    }

    #[test]
    fn test_set_result_loaded() {
        let mut view = DetailView::new();
        let mut notifications = NotificationManager::new();
        view.open("1", &mut notifications);

        view.set_result(Ok(test_user(1)), &mut notifications);

        assert!(!view.is_loading());
        assert_eq!(view.user().map(|u| u.username.as_str()), Some("Bret"));
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_set_result_failed_is_distinct_from_loading() {
        let mut view = DetailView::new();
        let mut notifications = NotificationManager::new();
        view.open("99", &mut notifications);

        view.set_result(
            Err("User 99 not found (HTTP 404)".to_string()),
            &mut notifications,
        );

        assert!(!view.is_loading());
        assert!(view.user().is_none());
        assert!(matches!(view.state(), DetailState::Failed(_)));
        assert_eq!(
            notifications.last().map(|n| n.message.as_str()),
            Some("User 99 not found (HTTP 404)")
        );
    }

    #[test]
    fn test_back_keys() {
        let mut view = DetailView::new();
        for code in [KeyCode::Esc, KeyCode::Backspace, KeyCode::Char('q')] {
            assert_eq!(view.handle_input(key(code)), Some(DetailAction::GoBack));
        }
    }

    #[test]
    fn test_scroll_saturates() {
        let mut view = DetailView::new();
        view.handle_input(key(KeyCode::Char('k')));
        assert_eq!(view.scroll(), 0);
        view.handle_input(key(KeyCode::Char('j')));
        view.handle_input(key(KeyCode::Down));
        assert_eq!(view.scroll(), 2);
        view.handle_input(key(KeyCode::Char('g')));
        assert_eq!(view.scroll(), 0);
    }

    #[test]
    fn test_close_resets() {
        let mut view = DetailView::new();
        let mut notifications = NotificationManager::new();
        view.open("1", &mut notifications);
        view.set_result(Ok(test_user(1)), &mut notifications);

        view.close();
        assert_eq!(view.user_id(), None);
        assert!(view.user().is_none());
    }

    #[test]
    fn test_render_each_state() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut view = DetailView::new();
        let mut notifications = NotificationManager::new();

        view.open("1", &mut notifications);
        terminal.draw(|f| view.render(f, f.area())).unwrap();

        view.set_result(Ok(test_user(1)), &mut notifications);
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Kulas Light, Gwenborough, 92998-3874"));

        view.open("x", &mut notifications);
        terminal.draw(|f| view.render(f, f.area())).unwrap();
    }
}
