//! Async task management for non-blocking API operations.
//!
//! Fetches run in background tokio tasks while the UI keeps drawing. Each
//! task reports through an unbounded channel that the main loop drains with
//! `try_recv()` once per iteration.
//!
//! Every message carries what it was issued for (a list generation or a user
//! identifier) so the app can drop results that arrive after the view that
//! asked for them has moved on.

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use crate::api::{User, UserId, UsersClient};

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// The user collection fetch finished.
    UsersFetched {
        /// The list generation the fetch was issued for.
        generation: u64,
        result: Result<Vec<User>, String>,
    },

    /// A single user fetch finished.
    UserFetched {
        /// The identifier that was requested.
        id: UserId,
        result: Result<User, String>,
    },
}

/// Spawns background tasks for async operations.
#[derive(Debug, Clone)]
pub struct TaskSpawner {
    client: UsersClient,
    tx: mpsc::UnboundedSender<ApiMessage>,
}

impl TaskSpawner {
    /// Create a new spawner sending results through `tx`.
    pub fn new(client: UsersClient, tx: mpsc::UnboundedSender<ApiMessage>) -> Self {
        Self { client, tx }
    }

    /// Spawn a task that fetches the user collection.
    pub fn spawn_fetch_users(&self, generation: u64) -> AbortHandle {
        let tx = self.tx.clone();
        let client = self.client.clone();
        debug!(generation, "Spawning user list fetch");
        tokio::spawn(async move {
            let result = client.fetch_users().await.map_err(|e| {
                warn!(error = %e, "User list fetch failed");
                e.to_string()
            });
            let _ = tx.send(ApiMessage::UsersFetched { generation, result });
        })
        .abort_handle()
    }

    /// Spawn a task that fetches a single user.
    pub fn spawn_fetch_user(&self, id: UserId) -> AbortHandle {
        let tx = self.tx.clone();
        let client = self.client.clone();
        debug!(id, "Spawning user fetch");
        tokio::spawn(async move {
            let result = client.fetch_user(id).await.map_err(|e| {
                warn!(id, error = %e, "User fetch failed");
                e.to_string()
            });
            let _ = tx.send(ApiMessage::UserFetched { id, result });
        })
        .abort_handle()
    }
}
