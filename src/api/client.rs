//! User directory API client implementation.
//!
//! This module provides the client for the read-only user directory REST API.
//! Every request is a single attempt: a failed fetch is reported to the
//! caller and never retried.

use std::time::Duration;

use reqwest::{header, Client, Response};
use tracing::{debug, instrument, warn};

use super::error::{ApiError, Result};
use super::types::{User, UserId};
use crate::config::Settings;

/// Default request timeout in seconds.
#[cfg(test)]
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The user directory API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct UsersClient {
    /// The HTTP client.
    client: Client,
    /// The base URL of the API, without a trailing slash.
    base_url: String,
}

impl UsersClient {
    /// Create a client from the application settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_timeout(
            &settings.api_base_url,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    /// Create a client for `base_url` with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self { client, base_url })
    }

    /// Fetch the whole user collection.
    ///
    /// Calls `GET /users`.
    #[instrument(skip(self))]
    pub async fn fetch_users(&self) -> Result<Vec<User>> {
        let url = format!("{}/users", self.base_url);
        let users: Vec<User> = self.get(&url, "users").await?;
        debug!("Fetched {} users", users.len());
        Ok(users)
    }

    /// Fetch a single user by identifier.
    ///
    /// Calls `GET /users/{id}`.
    #[instrument(skip(self))]
    pub async fn fetch_user(&self, id: UserId) -> Result<User> {
        let url = format!("{}/users/{}", self.base_url, id);
        let user: User = self.get(&url, &format!("User {}", id)).await?;
        debug!(user = %user, "Fetched user");
        Ok(user)
    }

    /// Perform a GET request and decode the JSON body.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::handle_response(response, what).await
    }

    /// Check the status and parse the JSON body.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: Response,
        what: &str,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
        } else {
            let body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", body);
            Err(ApiError::from_status(status, what))
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');

    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(ApiError::InvalidUrl(format!(
            "'{}' must start with http:// or https://",
            url
        )));
    }

    if url.starts_with("http://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}", url);
    }

    Ok(url.to_string())
}

#[cfg(test)]
impl UsersClient {
    /// Create a client for `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}
