//! Reusable UI components.

mod input;
mod loading;
mod modal;
mod notification;

pub use input::TextInput;
pub use loading::LoadingIndicator;
pub use modal::render_modal_frame;
pub use notification::NotificationManager;
#[cfg(test)]
pub use notification::NotificationType;
