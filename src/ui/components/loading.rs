//! Loading indicator component.
//!
//! Shown in place of content while a fetch is outstanding.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A loading indicator with an animated spinner.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    /// The message to display.
    message: String,
    /// Current spinner frame index.
    spinner_state: usize,
    /// Whether the loading indicator is active.
    active: bool,
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::with_message("Loading...")
    }
}

impl LoadingIndicator {
    /// Create a loading indicator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            spinner_state: 0,
            active: false,
        }
    }

    /// Start the loading indicator.
    pub fn start(&mut self) {
        self.active = true;
        self.spinner_state = 0;
    }

    /// Stop the loading indicator.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advance the spinner animation.
    ///
    /// This should be called on each tick event.
    pub fn tick(&mut self) {
        if self.active {
            self.spinner_state = (self.spinner_state + 1) % SPINNER_FRAMES.len();
        }
    }

    /// Get the current spinner frame.
    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_state]
    }

    /// Render the indicator centered both ways in the given area.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.active {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let text = format!("{} {}", self.spinner_frame(), self.message);
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(theme().accent))
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, rows[1]);
    }
}

#[cfg(test)]
impl LoadingIndicator {
    /// Get the current message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if the loading indicator is active.
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_indicator_starts_inactive() {
        let loading = LoadingIndicator::default();
        assert!(!loading.is_active());
        assert_eq!(loading.message(), "Loading...");
    }

    #[test]
    fn test_start_stop() {
        let mut loading = LoadingIndicator::with_message("Loading users...");
        loading.start();
        assert!(loading.is_active());
        loading.stop();
        assert!(!loading.is_active());
    }

    #[test]
    fn test_tick_advances_only_when_active() {
        let mut loading = LoadingIndicator::default();
        loading.tick();
        assert_eq!(loading.spinner_frame(), SPINNER_FRAMES[0]);

        loading.start();
        loading.tick();
        assert_eq!(loading.spinner_frame(), SPINNER_FRAMES[1]);
    }

    #[test]
    fn test_tick_wraps_around() {
        let mut loading = LoadingIndicator::default();
        loading.start();
        for _ in 0..SPINNER_FRAMES.len() {
            loading.tick();
        }
        assert_eq!(loading.spinner_frame(), SPINNER_FRAMES[0]);
    }
}
