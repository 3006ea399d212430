//! User interface components and views.
//!
//! All TUI rendering lives here: the list, detail and form views plus the
//! small reusable components they share.

pub(crate) mod components;
pub mod theme;
mod views;

pub use components::NotificationManager;
pub use views::{DetailAction, DetailView, ListAction, ListView};
