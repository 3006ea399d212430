//! User list view.
//!
//! Owns the locally held user collection: the table, the name filter, and
//! the add/edit form. All mutations stay in memory.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::{debug, info, warn};

use crate::api::{User, UserId};
use crate::ui::components::{LoadingIndicator, NotificationManager, TextInput};
use crate::ui::theme::theme;
use crate::ui::views::{UserFormAction, UserFormView};
use crate::users::UserDirectory;

/// Actions the list view asks the app to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    /// Navigate to the detail route of a user.
    OpenUser(UserId),
    /// Discard local changes and fetch the list again.
    Reload,
    /// Leave the application.
    Quit,
}

/// Column headers of the user table.
const HEADERS: [&str; 8] = [
    "ID", "Name", "Username", "Email", "Phone", "Website", "Company", "Address",
];

/// The user list view.
pub struct ListView {
    /// The in-memory collection.
    directory: UserDirectory,
    /// Whether the initial fetch is outstanding.
    loading: bool,
    /// Spinner shown while loading.
    spinner: LoadingIndicator,
    /// The name filter.
    search: TextInput,
    /// Whether keys go to the filter input.
    search_active: bool,
    /// Selected row among the filtered users.
    table_state: TableState,
    /// The add/edit modal.
    form: UserFormView,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    /// Create an empty list view.
    pub fn new() -> Self {
        let mut search = TextInput::new();
        search.set_placeholder("Search by name (press /)");

        Self {
            directory: UserDirectory::new(),
            loading: false,
            spinner: LoadingIndicator::with_message("Loading users..."),
            search,
            search_active: false,
            table_state: TableState::default(),
            form: UserFormView::new(),
        }
    }

    /// Mark the collection as loading (or not).
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if loading {
            self.spinner.start();
        } else {
            self.spinner.stop();
        }
    }

    /// Check if the collection is loading.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Replace the collection with fetched users and stop loading.
    pub fn set_users(&mut self, users: Vec<User>) {
        info!(count = users.len(), "User list loaded");
        self.directory.load(users);
        self.set_loading(false);
        self.clamp_selection();
    }

    /// Record a failed fetch: stop loading and report the message.
    pub fn load_failed(&mut self, message: &str, notifications: &mut NotificationManager) {
        warn!(error = %message, "Failed to load user list");
        self.set_loading(false);
        notifications.error(format!("Error fetching users: {}", message));
    }

    /// Drop every user, e.g. before a reload.
    pub fn clear(&mut self) {
        self.directory.clear();
        self.table_state.select(None);
    }

    /// Users matching the filter, in display order.
    pub fn visible_users(&self) -> Vec<&User> {
        self.directory.filter(self.search.value())
    }

    /// The user on the selected row.
    pub fn selected_user(&self) -> Option<&User> {
        let index = self.table_state.selected()?;
        self.visible_users().get(index).copied()
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_users().len();
        if count == 0 {
            self.table_state.select(None);
        } else {
            let index = self.table_state.selected().unwrap_or(0).min(count - 1);
            self.table_state.select(Some(index));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.visible_users().len();
        if count == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, count as isize - 1);
        self.table_state.select(Some(next as usize));
    }

    /// Open the form in create mode.
    pub fn add_user(&mut self) {
        self.form.open_create();
    }

    /// Open the form in edit mode for the selected user.
    pub fn edit_selected(&mut self) {
        if let Some(user) = self.selected_user().cloned() {
            self.form.open_edit(&user);
        }
    }

    /// Delete the selected user.
    pub fn delete_selected(&mut self, notifications: &mut NotificationManager) {
        let Some(id) = self.selected_user().map(|u| u.id) else {
            return;
        };
        if self.directory.remove(id).is_some() {
            info!(id, "Deleted user");
            notifications.success("User deleted successfully!");
            self.clamp_selection();
        }
    }

    /// Apply the form's result to the collection.
    pub fn apply_form_action(
        &mut self,
        action: UserFormAction,
        notifications: &mut NotificationManager,
    ) {
        match action {
            UserFormAction::Cancel => debug!("User form cancelled"),
            UserFormAction::Create(draft) => match self.directory.add(draft) {
                Some(id) => {
                    info!(id, "Added user");
                    notifications.success("User added successfully!");
                    self.clamp_selection();
                }
                None => {
                    warn!("No user identifier left to assign");
                    notifications.error("Cannot add user: no identifiers left");
                }
            },
            UserFormAction::Update(id, draft) => {
                if self.directory.update(id, &draft) {
                    info!(id, "Updated user");
                    notifications.success("User updated successfully!");
                } else {
                    warn!(id, "Edited user no longer exists");
                    notifications.error("User no longer exists");
                }
                self.clamp_selection();
            }
        }
    }

    /// Apply a key to the filter input, reporting an empty result once per
    /// change of the filter text.
    fn handle_search_input(&mut self, key: KeyEvent, notifications: &mut NotificationManager) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.search_active = false;
            }
            _ => {
                if self.search.handle_input(key) {
                    self.clamp_selection();
                    let query = self.search.value();
                    if !query.trim().is_empty() && self.directory.filter(query).is_empty() {
                        notifications.info("No such user found!");
                    }
                }
            }
        }
    }

    /// Handle keyboard input.
    pub fn handle_input(
        &mut self,
        key: KeyEvent,
        notifications: &mut NotificationManager,
    ) -> Option<ListAction> {
        if self.form.is_visible() {
            if let Some(action) = self.form.handle_input(key) {
                self.apply_form_action(action, notifications);
            }
            return None;
        }

        if self.search_active {
            self.handle_search_input(key, notifications);
            return None;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(ListAction::Quit),
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_selection(1);
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_selection(-1);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.move_selection(isize::MIN / 2);
                None
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                self.move_selection(isize::MAX / 2);
                None
            }
            (KeyCode::Char('/'), KeyModifiers::NONE) => {
                self.search_active = true;
                None
            }
            (KeyCode::Esc, _) if !self.search.is_empty() => {
                self.handle_search_input(
                    KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
                    notifications,
                );
                None
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                self.add_user();
                None
            }
            (KeyCode::Char('e'), KeyModifiers::NONE) => {
                self.edit_selected();
                None
            }
            (KeyCode::Char('d'), KeyModifiers::NONE) | (KeyCode::Delete, _) => {
                self.delete_selected(notifications);
                None
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => Some(ListAction::Reload),
            (KeyCode::Enter, _) => self.selected_user().map(|u| ListAction::OpenUser(u.id)),
            _ => None,
        }
    }

    /// Advance the spinner.
    pub fn tick(&mut self) {
        self.spinner.tick();
    }

    /// Render the list view, and the form on top of it when open.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Search
                Constraint::Min(1),    // Table
            ])
            .split(area);

        self.render_title(frame, chunks[0]);
        self.search
            .render_with_label(frame, chunks[1], "Search", self.search_active);

        if self.loading {
            self.spinner.render(frame, chunks[2]);
        } else {
            self.render_table(frame, chunks[2]);
        }

        self.form.render(frame, area);
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let count = if self.loading {
            String::new()
        } else {
            format!(
                "  ({} of {})",
                self.visible_users().len(),
                self.directory.len()
            )
        };
        let title = Line::from(vec![
            Span::styled(
                " List of Users",
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(count, Style::default().fg(t.dim)),
        ]);
        frame.render_widget(Paragraph::new(title), area);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();

        let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h))).style(
            Style::default()
                .fg(t.selection_fg)
                .bg(t.header_bg)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = self
            .visible_users()
            .into_iter()
            .enumerate()
            .map(|(i, user)| {
                let bg = if i % 2 == 0 { t.row_even_bg } else { t.row_odd_bg };
                Row::new(vec![
                    Cell::from(user.id.to_string()),
                    Cell::from(user.name.clone()),
                    Cell::from(user.username.clone()),
                    Cell::from(user.email.clone()),
                    Cell::from(user.phone.clone()),
                    Cell::from(user.website.clone()),
                    Cell::from(user.company.name.clone()),
                    Cell::from(user.address.to_string()),
                ])
                .style(Style::default().fg(t.fg).bg(bg))
            })
            .collect();

        let widths = [
            Constraint::Length(4),
            Constraint::Percentage(14),
            Constraint::Percentage(10),
            Constraint::Percentage(16),
            Constraint::Percentage(14),
            Constraint::Percentage(10),
            Constraint::Percentage(12),
            Constraint::Min(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(t.border)),
            )
            .highlight_style(
                Style::default()
                    .fg(t.selection_fg)
                    .bg(t.selection_bg)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    /// Render the key hints for the list.
    pub fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let hints = if self.form.is_visible() {
            "Tab move · Ctrl+S save · Esc cancel"
        } else if self.search_active {
            "Type to filter · Enter/Esc done · Ctrl+U clear"
        } else {
            "j/k move · Enter open · a add · e edit · d delete · / search · r reload · q quit"
        };
        let line = Line::from(vec![
            Span::styled(
                " USERS ",
                Style::default().fg(t.selection_fg).bg(t.accent),
            ),
            Span::raw(" "),
            Span::styled(hints, Style::default().fg(t.dim)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
impl ListView {
    /// The underlying collection.
    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// The add/edit form.
    pub fn form(&self) -> &UserFormView {
        &self.form
    }

    /// Mutable access to the add/edit form.
    pub fn form_mut(&mut self) -> &mut UserFormView {
        &mut self.form
    }

    /// Check whether the add/edit form is shown.
    pub fn is_form_open(&self) -> bool {
        self.form.is_visible()
    }

    /// The current filter text.
    pub fn query(&self) -> &str {
        self.search.value()
    }

    /// Check whether keys currently go to the filter input.
    pub fn is_searching(&self) -> bool {
        self.search_active
    }

    /// Number of rows the table shows.
    pub fn visible_count(&self) -> usize {
        if self.loading {
            0
        } else {
            self.visible_users().len()
        }
    }

    /// Index of the selected row.
    pub fn selected_index(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Select a row by index among the visible users.
    pub fn select(&mut self, index: usize) {
        self.table_state.select(Some(index));
        self.clamp_selection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Address;
    use crate::api::Company;
    use crate::ui::components::NotificationType;
    use crate::validation::FormField;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_user(id: UserId, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            phone: "5550100".to_string(),
            website: "http://example.org".to_string(),
            company: Company::named("Acme Corp"),
            address: Address {
                street: "Main St".to_string(),
                suite: String::new(),
                city: "Springfield".to_string(),
                zipcode: "12345".to_string(),
            },
        }
    }

    fn loaded_view() -> ListView {
        let mut view = ListView::new();
        view.set_loading(true);
        view.set_users(vec![
            test_user(1, "Leanne Graham"),
            test_user(2, "Ervin Howell"),
            test_user(3, "Clementine Bauch"),
            test_user(4, "Patricia Lebsack"),
            test_user(5, "Chelsey Dietrich"),
        ]);
        view
    }

    fn type_search(view: &mut ListView, n: &mut NotificationManager, s: &str) {
        view.handle_input(key(KeyCode::Char('/')), n);
        for c in s.chars() {
            view.handle_input(key(KeyCode::Char(c)), n);
        }
    }

    #[test]
    fn test_rows_equal_fetched_count_after_loading() {
        let mut view = ListView::new();
        view.set_loading(true);
        assert_eq!(view.visible_count(), 0);

        view.set_users((1..=10).map(|i| test_user(i, "Someone")).collect());
        assert!(!view.is_loading());
        assert_eq!(view.visible_count(), 10);
        assert_eq!(view.selected_index(), Some(0));
    }

    #[test]
    fn test_load_failed_notifies_and_stops_loading() {
        let mut view = ListView::new();
        let mut notifications = NotificationManager::new();
        view.set_loading(true);

        view.load_failed("Network error: refused", &mut notifications);

        assert!(!view.is_loading());
        let last = notifications.last().unwrap();
        assert_eq!(last.notification_type, NotificationType::Error);
        assert_eq!(last.message, "Error fetching users: Network error: refused");
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();

        type_search(&mut view, &mut notifications, "CH");
        let names: Vec<&str> = view.visible_users().iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Clementine Bauch", "Chelsey Dietrich"]);
        assert!(notifications.is_empty());
        // Filtering never touches the stored list
        assert_eq!(view.directory().len(), 5);
    }

    #[test]
    fn test_no_match_notifies_once_per_change() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::with_max_visible(10);

        type_search(&mut view, &mut notifications, "zz");
        assert_eq!(view.visible_count(), 0);
        assert_eq!(notifications.count_of(NotificationType::Info), 2);
        assert_eq!(
            notifications.last().map(|n| n.message.as_str()),
            Some("No such user found!")
        );

        // Cursor movement does not change the text
        view.handle_input(key(KeyCode::Left), &mut notifications);
        view.handle_input(key(KeyCode::Home), &mut notifications);
        assert_eq!(notifications.count_of(NotificationType::Info), 2);
    }

    #[test]
    fn test_blank_query_does_not_notify() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();

        type_search(&mut view, &mut notifications, "   ");
        assert!(notifications.is_empty());
    }

    #[test]
    fn test_escape_leaves_search_and_keeps_query() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();

        type_search(&mut view, &mut notifications, "leanne");
        view.handle_input(key(KeyCode::Esc), &mut notifications);
        assert!(!view.is_searching());
        assert_eq!(view.query(), "leanne");
        assert_eq!(view.visible_count(), 1);

        // A second Esc clears the filter
        view.handle_input(key(KeyCode::Esc), &mut notifications);
        assert_eq!(view.query(), "");
        assert_eq!(view.visible_count(), 5);
    }

    #[test]
    fn test_enter_opens_selected_user() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();

        view.handle_input(key(KeyCode::Char('j')), &mut notifications);
        view.handle_input(key(KeyCode::Char('j')), &mut notifications);
        assert_eq!(
            view.handle_input(key(KeyCode::Enter), &mut notifications),
            Some(ListAction::OpenUser(3))
        );
    }

    #[test]
    fn test_navigation_clamps() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();

        view.handle_input(key(KeyCode::Char('k')), &mut notifications);
        assert_eq!(view.selected_index(), Some(0));
        view.handle_input(key(KeyCode::Char('G')), &mut notifications);
        assert_eq!(view.selected_index(), Some(4));
        view.handle_input(key(KeyCode::Char('j')), &mut notifications);
        assert_eq!(view.selected_index(), Some(4));
        view.handle_input(key(KeyCode::Char('g')), &mut notifications);
        assert_eq!(view.selected_index(), Some(0));
    }

    #[test]
    fn test_delete_removes_one_row_without_navigating() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();
        view.select(1);

        let action = view.handle_input(key(KeyCode::Char('d')), &mut notifications);

        assert_eq!(action, None);
        assert_eq!(view.visible_count(), 4);
        assert!(view.directory().get(2).is_none());
        assert_eq!(
            notifications.last().map(|n| n.message.as_str()),
            Some("User deleted successfully!")
        );
    }

    #[test]
    fn test_delete_last_row_moves_selection_up() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();
        view.select(4);

        view.delete_selected(&mut notifications);
        assert_eq!(view.selected_index(), Some(3));
    }

    #[test]
    fn test_edit_opens_form_without_navigating() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();
        view.select(3);

        let action = view.handle_input(key(KeyCode::Char('e')), &mut notifications);

        assert_eq!(action, None);
        assert!(view.is_form_open());
        assert_eq!(view.form().editing_id(), Some(4));
        assert_eq!(view.form().value(FormField::Name), "Patricia Lebsack");
    }

    #[test]
    fn test_edit_email_only_changes_email() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();
        view.select(1);
        let before = view.selected_user().cloned().unwrap();

        view.handle_input(key(KeyCode::Char('e')), &mut notifications);
        view.form_mut().set_value(FormField::Email, "ervin@howell.dev");
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        view.handle_input(ctrl_s, &mut notifications);

        assert!(!view.is_form_open());
        let after = view.directory().get(2).unwrap();
        assert_eq!(after.email, "ervin@howell.dev");
        assert_eq!(
            User {
                email: before.email.clone(),
                ..after.clone()
            },
            before
        );
        assert_eq!(notifications.count_of(NotificationType::Success), 1);
        assert_eq!(
            notifications.last().map(|n| n.message.as_str()),
            Some("User updated successfully!")
        );
    }

    #[test]
    fn test_add_user_gets_next_id() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();

        view.handle_input(key(KeyCode::Char('a')), &mut notifications);
        assert!(view.is_form_open());

        let form = view.form_mut();
        form.set_value(FormField::Name, "Al");
        form.set_value(FormField::Username, "user_Al");
        form.set_value(FormField::Email, "al@example.com");
        form.set_value(FormField::Phone, "123");
        form.set_value(FormField::Street, "Elm");
        form.set_value(FormField::City, "Town");
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);

        view.handle_input(ctrl_s, &mut notifications);
        assert!(view.is_form_open());
        assert!(view.form().errors().contains_key(&FormField::Name));
        assert_eq!(view.directory().len(), 5);
        assert!(notifications.is_empty());

        view.form_mut().set_value(FormField::Name, "Ally");
        view.handle_input(ctrl_s, &mut notifications);

        assert!(!view.is_form_open());
        assert_eq!(view.directory().len(), 6);
        let added = view.directory().users().last().unwrap();
        assert_eq!(added.id, 6);
        assert_eq!(added.name, "Ally");
        assert_eq!(
            notifications.last().map(|n| n.message.as_str()),
            Some("User added successfully!")
        );
    }

    #[test]
    fn test_add_refused_when_ids_exhausted() {
        let mut view = ListView::new();
        let mut notifications = NotificationManager::new();
        view.set_users(vec![test_user(UserId::MAX, "Last One")]);

        view.handle_input(key(KeyCode::Char('a')), &mut notifications);
        let form = view.form_mut();
        form.set_value(FormField::Name, "Ally");
        form.set_value(FormField::Username, "user_Ally");
        form.set_value(FormField::Email, "ally@example.com");
        form.set_value(FormField::Phone, "123");
        form.set_value(FormField::Street, "Elm");
        form.set_value(FormField::City, "Town");
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
        view.handle_input(ctrl_s, &mut notifications);

        assert_eq!(view.directory().len(), 1);
        assert_eq!(notifications.count_of(NotificationType::Success), 0);
        assert_eq!(
            notifications.last().map(|n| n.message.as_str()),
            Some("Cannot add user: no identifiers left")
        );
    }

    #[test]
    fn test_form_swallows_list_keys() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();

        view.handle_input(key(KeyCode::Char('a')), &mut notifications);
        assert_eq!(
            view.handle_input(key(KeyCode::Char('q')), &mut notifications),
            None
        );
        assert_eq!(view.form().value(FormField::Name), "q");
    }

    #[test]
    fn test_reload_and_quit_actions() {
        let mut view = loaded_view();
        let mut notifications = NotificationManager::new();
        assert_eq!(
            view.handle_input(key(KeyCode::Char('r')), &mut notifications),
            Some(ListAction::Reload)
        );
        assert_eq!(
            view.handle_input(key(KeyCode::Char('q')), &mut notifications),
            Some(ListAction::Quit)
        );
    }

    #[test]
    fn test_render_smoke() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut view = loaded_view();
        view.add_user();
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area()))
            .unwrap();
    }
}
