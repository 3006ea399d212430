//! User directory API client and types.
//!
//! This module provides the interface for reading users from the remote REST API.

mod client;
pub mod error;
pub mod types;

pub use client::UsersClient;
pub use error::ApiError;
pub use types::{Company, User, UserId};
