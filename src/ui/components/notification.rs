//! Notification/toast component for user feedback.
//!
//! Transient messages stacked in the bottom-right corner. Nothing is
//! persisted; expired toasts are dropped on the next tick.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

/// How long info and success toasts stay up.
const SHORT_DURATION: Duration = Duration::from_secs(3);

/// How long warning and error toasts stay up.
const LONG_DURATION: Duration = Duration::from_secs(5);

/// The severity of a notification, which determines its appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// Informational message (blue).
    Info,
    /// Success message (green).
    Success,
    /// Warning message (yellow).
    Warning,
    /// Error message (red).
    Error,
}

impl NotificationType {
    /// Get the icon for this notification type.
    pub fn icon(&self) -> &'static str {
        match self {
            NotificationType::Info => "ℹ",
            NotificationType::Success => "✓",
            NotificationType::Warning => "⚠",
            NotificationType::Error => "✗",
        }
    }

    /// Get the color for this notification type.
    pub fn color(&self) -> Color {
        match self {
            NotificationType::Info => Color::Blue,
            NotificationType::Success => Color::Green,
            NotificationType::Warning => Color::Yellow,
            NotificationType::Error => Color::Red,
        }
    }

    fn default_duration(&self) -> Duration {
        match self {
            NotificationType::Info | NotificationType::Success => SHORT_DURATION,
            NotificationType::Warning | NotificationType::Error => LONG_DURATION,
        }
    }
}

/// A single notification message.
#[derive(Debug, Clone)]
pub struct Notification {
    /// The notification message.
    pub message: String,
    /// The type of notification.
    pub notification_type: NotificationType,
    /// When the notification was created.
    pub created_at: Instant,
    /// How long the notification should be displayed.
    pub duration: Duration,
}

impl Notification {
    /// Create a notification with the default duration for its type.
    pub fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            created_at: Instant::now(),
            duration: notification_type.default_duration(),
        }
    }

    /// Create an info notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    /// Create a success notification.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    /// Create a warning notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Warning)
    }

    /// Create an error notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    /// Check if the notification has expired.
    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }
}

/// Manages the stack of visible notifications.
#[derive(Debug)]
pub struct NotificationManager {
    /// Queue of notifications, oldest first.
    notifications: VecDeque<Notification>,
    /// Maximum number of visible notifications.
    max_visible: usize,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationManager {
    /// Create a new notification manager showing at most three toasts.
    pub fn new() -> Self {
        Self::with_max_visible(3)
    }

    /// Create a notification manager with a custom max visible count.
    pub fn with_max_visible(max_visible: usize) -> Self {
        Self {
            notifications: VecDeque::new(),
            max_visible,
        }
    }

    /// Add a notification, evicting the oldest past the limit.
    pub fn push(&mut self, notification: Notification) {
        debug!(
            kind = ?notification.notification_type,
            message = %notification.message,
            "Notification"
        );
        self.notifications.push_back(notification);
        while self.notifications.len() > self.max_visible {
            self.notifications.pop_front();
        }
    }

    /// Add an info notification.
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Notification::info(message));
    }

    /// Add a success notification.
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::success(message));
    }

    /// Add a warning notification.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Notification::warning(message));
    }

    /// Add an error notification.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::error(message));
    }

    /// Remove expired notifications.
    pub fn tick(&mut self) {
        self.notifications.retain(|n| !n.is_expired());
    }

    /// Render all notifications in the bottom-right corner of the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let width = 50.min(area.width.saturating_sub(4));
        // Borders plus icon and space
        let inner_width = width.saturating_sub(4) as usize;

        let heights: Vec<u16> = self
            .notifications
            .iter()
            .map(|n| {
                let text_len = n.message.chars().count() + 2;
                let lines = if inner_width > 0 {
                    text_len.div_ceil(inner_width) as u16
                } else {
                    1
                };
                lines + 2
            })
            .collect();

        let total_height = heights
            .iter()
            .sum::<u16>()
            .min(area.height.saturating_sub(2));

        let x = area.x + area.width.saturating_sub(width + 2);
        let y = area.y + area.height.saturating_sub(total_height + 1);
        let stack_area = Rect::new(x, y, width, total_height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(heights.iter().map(|&h| Constraint::Length(h)))
            .split(stack_area);

        for (notification, chunk) in self.notifications.iter().zip(chunks.iter()) {
            render_notification(notification, frame, *chunk);
        }
    }
}

/// Render a single notification.
fn render_notification(notification: &Notification, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    let style = Style::default().fg(notification.notification_type.color());
    let text = Line::from(vec![
        Span::styled(
            format!("{} ", notification.notification_type.icon()),
            style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message.as_str(), style),
    ]);

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).border_style(style))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
impl NotificationManager {
    /// Get the number of notifications.
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    /// Get an iterator over the notifications.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    /// Check if there are any notifications.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Clear all notifications.
    pub fn clear(&mut self) {
        self.notifications.clear();
    }

    /// The most recent notification.
    pub fn last(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    /// Number of visible notifications of the given type.
    pub fn count_of(&self, notification_type: NotificationType) -> usize {
        self.notifications
            .iter()
            .filter(|n| n.notification_type == notification_type)
            .count()
    }
}

#[cfg(test)]
impl Notification {
    /// Override the display duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}
