//! Application views (screens).

mod detail;
mod list;
mod user_form;

pub use detail::{DetailAction, DetailView};
pub use list::{ListAction, ListView};
pub use user_form::{UserFormAction, UserFormView};
