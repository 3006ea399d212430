//! Add/edit user form.
//!
//! A modal overlay shared by create and edit. The form is controlled by the
//! list view: it is opened with [`UserFormView::open_create`] or
//! [`UserFormView::open_edit`], and hands the finished record back as a
//! [`UserFormAction`] on submit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

use crate::api::{User, UserId};
use crate::ui::components::{render_modal_frame, TextInput};
use crate::ui::theme::theme;
use crate::users::UserDraft;
use crate::validation::{derive_username, validate, FieldErrors, FormField, FormMode};

/// Actions returned from the user form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserFormAction {
    /// Close the form without saving.
    Cancel,
    /// Append a new user built from the draft.
    Create(UserDraft),
    /// Replace the editable fields of an existing user.
    Update(UserId, UserDraft),
}

/// What currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(FormField),
    Submit,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            FormFocus::Field(field) => {
                let idx = FormField::ALL.iter().position(|f| *f == field).unwrap_or(0);
                FormField::ALL
                    .get(idx + 1)
                    .map(|f| FormFocus::Field(*f))
                    .unwrap_or(FormFocus::Submit)
            }
            FormFocus::Submit => FormFocus::Field(FormField::ALL[0]),
        }
    }

    fn prev(self) -> Self {
        match self {
            FormFocus::Field(field) => {
                let idx = FormField::ALL.iter().position(|f| *f == field).unwrap_or(0);
                if idx == 0 {
                    FormFocus::Submit
                } else {
                    FormFocus::Field(FormField::ALL[idx - 1])
                }
            }
            FormFocus::Submit => FormFocus::Field(FormField::ALL[FormField::ALL.len() - 1]),
        }
    }
}

/// The add/edit user modal.
#[derive(Debug, Default)]
pub struct UserFormView {
    /// Whether the modal is shown.
    visible: bool,
    /// Create or edit.
    mode: FormMode,
    /// Identifier of the user being edited.
    editing_id: Option<UserId>,
    /// Inputs in [`FormField::ALL`] order.
    inputs: [TextInput; 9],
    /// Keyboard focus.
    focus: Option<FormFocus>,
    /// Errors from the last submit attempt.
    errors: FieldErrors,
}

fn field_index(field: FormField) -> usize {
    FormField::ALL
        .iter()
        .position(|f| *f == field)
        .unwrap_or_default()
}

impl UserFormView {
    /// Create a hidden form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the form in create mode with blank fields.
    pub fn open_create(&mut self) {
        debug!("Opening user form in create mode");
        self.reset();
        self.mode = FormMode::Create;
        self.visible = true;
    }

    /// Show the form in edit mode seeded from `user`.
    pub fn open_edit(&mut self, user: &User) {
        debug!(id = user.id, "Opening user form in edit mode");
        self.reset();
        self.mode = FormMode::Edit;
        self.editing_id = Some(user.id);

        let seed = UserDraft::from_user(user);
        self.set_value(FormField::Name, &seed.name);
        self.set_value(FormField::Username, &seed.username);
        self.set_value(FormField::Email, &seed.email);
        self.set_value(FormField::Phone, &seed.phone);
        self.set_value(FormField::Website, &seed.website);
        self.set_value(FormField::Company, &seed.company);
        self.set_value(FormField::Street, &seed.street);
        self.set_value(FormField::City, &seed.city);
        self.set_value(FormField::Zipcode, &seed.zipcode);
        self.input_mut(FormField::Username).set_read_only(true);

        self.visible = true;
    }

    /// Hide the form and drop its contents.
    pub fn close(&mut self) {
        self.reset();
        self.visible = false;
    }

    fn reset(&mut self) {
        self.inputs = Default::default();
        self.editing_id = None;
        self.focus = Some(FormFocus::Field(FormField::Name));
        self.errors.clear();
    }

    /// Check if the form is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn input(&self, field: FormField) -> &TextInput {
        &self.inputs[field_index(field)]
    }

    fn input_mut(&mut self, field: FormField) -> &mut TextInput {
        &mut self.inputs[field_index(field)]
    }

    /// Current value of a field.
    pub fn value(&self, field: FormField) -> &str {
        self.input(field).value()
    }

    /// Replace the value of a field without running side effects.
    pub fn set_value(&mut self, field: FormField, value: &str) {
        self.input_mut(field).set_value(value);
    }

    /// Move focus to `field`.
    pub fn focus_field(&mut self, field: FormField) {
        self.focus = Some(FormFocus::Field(field));
    }

    /// Collect the current field values.
    pub fn draft(&self) -> UserDraft {
        UserDraft {
            name: self.value(FormField::Name).to_string(),
            username: self.value(FormField::Username).to_string(),
            email: self.value(FormField::Email).to_string(),
            phone: self.value(FormField::Phone).to_string(),
            website: self.value(FormField::Website).to_string(),
            company: self.value(FormField::Company).to_string(),
            street: self.value(FormField::Street).to_string(),
            city: self.value(FormField::City).to_string(),
            zipcode: self.value(FormField::Zipcode).to_string(),
        }
    }

    /// Validate and, if clean, close the form and return the submit action.
    ///
    /// On failure the errors are kept for display and focus jumps to the
    /// first invalid field.
    pub fn submit(&mut self) -> Option<UserFormAction> {
        let draft = self.draft();
        self.errors = validate(&draft, self.mode);

        if let Some(field) = self.errors.keys().next().copied() {
            debug!(errors = self.errors.len(), "User form has validation errors");
            self.focus_field(field);
            return None;
        }

        let action = match (self.mode, self.editing_id) {
            (FormMode::Edit, Some(id)) => UserFormAction::Update(id, draft),
            _ => UserFormAction::Create(draft),
        };
        self.close();
        Some(action)
    }

    /// Handle keyboard input.
    ///
    /// Returns an optional action to be handled by the parent.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<UserFormAction> {
        if !self.visible {
            return None;
        }
        let focus = self.focus.unwrap_or(FormFocus::Field(FormField::Name));

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.close();
                Some(UserFormAction::Cancel)
            }
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => self.submit(),
            (KeyCode::Tab, KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.focus = Some(focus.next());
                None
            }
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) | (KeyCode::Up, _) => {
                self.focus = Some(focus.prev());
                None
            }
            (KeyCode::Enter, _) => match focus {
                FormFocus::Submit => self.submit(),
                FormFocus::Field(_) => {
                    self.focus = Some(focus.next());
                    None
                }
            },
            _ => {
                if let FormFocus::Field(field) = focus {
                    self.edit_field(field, key);
                }
                None
            }
        }
    }

    /// Apply a key to a field, keeping the derived username in step with
    /// the name while creating.
    fn edit_field(&mut self, field: FormField, key: KeyEvent) {
        let changed = self.input_mut(field).handle_input(key);
        if changed && field == FormField::Name && self.mode == FormMode::Create {
            let username = derive_username(self.value(FormField::Name));
            self.set_value(FormField::Username, &username);
        }
    }

    /// Render the form as a modal overlay.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let title = match self.mode {
            FormMode::Create => "Add New User",
            FormMode::Edit => "Edit User",
        };
        let inner = render_modal_frame(
            frame,
            area,
            78u16.min(area.width.saturating_sub(2)),
            27u16.min(area.height.saturating_sub(2)),
            title,
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Length(1), // Submit button
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        for (row, pair) in FormField::ALL.chunks(2).enumerate() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(rows[row]);
            for (col, field) in pair.iter().enumerate() {
                self.render_field(frame, cols[col], *field);
            }
        }

        self.render_submit_button(frame, rows[5]);

        let hint = Paragraph::new(Line::styled(
            "Tab/↑↓ move · Enter next · Ctrl+S save · Esc cancel",
            Style::default().fg(theme().dim),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, rows[6]);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: FormField) {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(area);

        let focused = self.focus == Some(FormFocus::Field(field));
        let label = if field == FormField::Username && self.mode == FormMode::Edit {
            "Username (read-only)"
        } else {
            field.label()
        };
        self.input(field)
            .render_with_label(frame, parts[0], label, focused);

        if let Some(error) = self.errors.get(&field) {
            let line = Paragraph::new(Span::styled(
                error.as_str(),
                Style::default().fg(theme().error),
            ));
            frame.render_widget(line, parts[1]);
        }
    }

    fn render_submit_button(&self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let focused = self.focus == Some(FormFocus::Submit);
        let style = if focused {
            Style::default()
                .fg(t.selection_fg)
                .bg(t.success)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.success)
        };
        let text = match self.mode {
            FormMode::Create => " [Enter] Add User ",
            FormMode::Edit => " [Enter] Update User ",
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, style)).alignment(Alignment::Center),
            area,
        );
    }
}

#[cfg(test)]
impl UserFormView {
    /// The current mode.
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Identifier of the user being edited, if any.
    pub fn editing_id(&self) -> Option<UserId> {
        self.editing_id
    }

    /// The focused element.
    pub fn focus(&self) -> Option<FormFocus> {
        self.focus
    }

    /// Errors from the last submit attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}
