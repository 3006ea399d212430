//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application.

use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::task::AbortHandle;
use tracing::{debug, info, trace};

use crate::api::UserId;
use crate::error::AppError;
use crate::events::Event;
use crate::tasks::ApiMessage;
use crate::ui::theme::theme;
use crate::ui::{DetailAction, DetailView, ListAction, ListView, NotificationManager};

/// Where the application is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// The user list (`/`).
    #[default]
    List,
    /// A single user (`/user/<id>`). The segment is kept raw and parsed by
    /// the detail view.
    Detail(String),
}

impl Route {
    /// The detail route for a known id.
    pub fn user(id: UserId) -> Self {
        Route::Detail(id.to_string())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/"),
            Route::Detail(segment) => write!(f, "/user/{}", segment),
        }
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim();
        if path.is_empty() || path == "/" {
            return Ok(Route::List);
        }
        match path.strip_prefix("/user/") {
            Some(segment) if !segment.is_empty() && !segment.contains('/') => {
                Ok(Route::Detail(segment.to_string()))
            }
            _ => Err(AppError::InvalidRoute(s.to_string())),
        }
    }
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// The active route.
    route: Route,
    /// Whether the application should quit.
    should_quit: bool,
    /// The user list view. Kept alive while the detail route is shown.
    list_view: ListView,
    /// The user detail view.
    detail_view: DetailView,
    /// Notification manager for toast messages.
    notifications: NotificationManager,
    /// Bumped on every list (re)load; older results are dropped.
    list_generation: u64,
    /// Whether the list has been requested at least once.
    list_requested: bool,
    /// A list fetch the main loop should spawn.
    pending_users_fetch: bool,
    /// A detail fetch the main loop should spawn.
    pending_user_fetch: Option<UserId>,
    /// The in-flight detail fetch, aborted when leaving the detail route.
    detail_task: Option<AbortHandle>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application instance on the list route.
    pub fn new() -> Self {
        Self::with_route(Route::List)
    }

    /// Create a new application instance starting on the given route.
    pub fn with_route(route: Route) -> Self {
        debug!(%route, "Creating new application instance");
        let mut app = Self {
            route: Route::List,
            should_quit: false,
            list_view: ListView::new(),
            detail_view: DetailView::new(),
            notifications: NotificationManager::new(),
            list_generation: 0,
            list_requested: false,
            pending_users_fetch: false,
            pending_user_fetch: None,
            detail_task: None,
        };
        app.navigate(route);
        app
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Show a warning notification.
    pub fn notify_warning(&mut self, message: impl Into<String>) {
        self.notifications.warning(message);
    }

    /// Take the list fetch the main loop should spawn, with its generation.
    pub fn take_pending_fetch_users(&mut self) -> Option<u64> {
        if std::mem::take(&mut self.pending_users_fetch) {
            Some(self.list_generation)
        } else {
            None
        }
    }

    /// Take the detail fetch the main loop should spawn.
    pub fn take_pending_fetch_user(&mut self) -> Option<UserId> {
        self.pending_user_fetch.take()
    }

    /// Hold the handle of the spawned detail fetch.
    pub fn set_detail_task(&mut self, handle: AbortHandle) {
        if let Some(previous) = self.detail_task.replace(handle) {
            previous.abort();
        }
    }

    /// Switch to another route.
    pub fn navigate(&mut self, route: Route) {
        debug!(from = %self.route, to = %route, "Navigating");

        if matches!(self.route, Route::Detail(_)) {
            self.leave_detail();
        }

        match &route {
            Route::List => {
                if !self.list_requested {
                    self.reload_users();
                }
            }
            Route::Detail(segment) => {
                self.pending_user_fetch = self.detail_view.open(segment, &mut self.notifications);
            }
        }
        self.route = route;
    }

    fn leave_detail(&mut self) {
        if let Some(handle) = self.detail_task.take() {
            debug!("Aborting in-flight user fetch");
            handle.abort();
        }
        self.pending_user_fetch = None;
        self.detail_view.close();
    }

    /// Discard the local list and fetch it again.
    pub fn reload_users(&mut self) {
        self.list_generation += 1;
        self.list_requested = true;
        self.pending_users_fetch = true;
        info!(generation = self.list_generation, "Loading user list");
        self.list_view.clear();
        self.list_view.set_loading(true);
    }

    /// Apply a result reported by a background task.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::UsersFetched { generation, result } => {
                if generation != self.list_generation {
                    debug!(
                        generation,
                        current = self.list_generation,
                        "Dropping stale user list"
                    );
                    return;
                }
                match result {
                    Ok(users) => self.list_view.set_users(users),
                    Err(e) => self.list_view.load_failed(&e, &mut self.notifications),
                }
            }
            ApiMessage::UserFetched { id, result } => {
                let current = match self.route {
                    Route::Detail(_) => self.detail_view.user_id(),
                    Route::List => None,
                };
                if current != Some(id) || !self.detail_view.is_loading() {
                    debug!(id, ?current, "Dropping stale user detail");
                    return;
                }
                self.detail_task = None;
                self.detail_view.set_result(result, &mut self.notifications);
            }
        }
    }

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(),
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        // Ctrl+C always quits
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }

        match self.route {
            Route::List => {
                let Some(action) = self
                    .list_view
                    .handle_input(key_event, &mut self.notifications)
                else {
                    return;
                };
                match action {
                    ListAction::OpenUser(id) => self.navigate(Route::user(id)),
                    ListAction::Reload => self.reload_users(),
                    ListAction::Quit => {
                        info!("Quit requested");
                        self.should_quit = true;
                    }
                }
            }
            Route::Detail(_) => {
                if let Some(DetailAction::GoBack) = self.detail_view.handle_input(key_event) {
                    self.navigate(Route::List);
                }
            }
        }
    }

    fn handle_tick(&mut self) {
        self.list_view.tick();
        self.detail_view.tick();
        self.notifications.tick();
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);

        match self.route {
            Route::List => {
                self.list_view.render(frame, chunks[1]);
                self.list_view.render_status_bar(frame, chunks[2]);
            }
            Route::Detail(_) => {
                self.detail_view.render(frame, chunks[1]);
                self.detail_view.render_status_bar(frame, chunks[2]);
            }
        }

        // Toasts go on top of everything
        self.notifications.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let header = Line::from(vec![
            Span::styled(
                "LazyUsers",
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", self.route), Style::default().fg(t.dim)),
        ]);
        let paragraph = Paragraph::new(header).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(t.border)),
        );
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
impl App {
    /// The active route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Get a reference to the list view.
    pub fn list_view(&self) -> &ListView {
        &self.list_view
    }

    /// Get a reference to the detail view.
    pub fn detail_view(&self) -> &DetailView {
        &self.detail_view
    }

    /// Get a reference to the notification manager.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }
}
