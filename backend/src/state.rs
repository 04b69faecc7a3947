//! Shared application state.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};
use user_admin_common::{DirectoryStats, Role, Status, User, UserDirectory, UserFilter};

use crate::config::Config;

/// Change notification for dashboards watching the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectoryEvent {
    RoleChanged {
        user_id: String,
        role: Role,
        at: DateTime<Utc>,
    },
    StatusToggled {
        user_id: String,
        status: Status,
        at: DateTime<Utc>,
    },
}

impl DirectoryEvent {
    /// SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            DirectoryEvent::RoleChanged { .. } => "role_changed",
            DirectoryEvent::StatusToggled { .. } => "status_toggled",
        }
    }
}

/// Directory contents right after a mutation.
#[derive(Debug, Clone, Serialize)]
pub struct MutationOutcome {
    pub user_id: String,
    /// False when no record has `user_id`; the directory is then unchanged.
    pub applied: bool,
    pub users: Vec<User>,
    pub stats: DirectoryStats,
}

/// Shared application state passed to all handlers.
///
/// Owns the one live directory of the session. Mutations swap in the value
/// returned by the directory's own operations.
pub struct AppState {
    pub config: Config,
    directory: RwLock<UserDirectory>,
    events: broadcast::Sender<DirectoryEvent>,
}

impl AppState {
    pub fn new(config: Config, directory: UserDirectory) -> Self {
        let (events, _) = broadcast::channel(config.directory.event_capacity.max(1));
        Self {
            config,
            directory: RwLock::new(directory),
            events,
        }
    }

    /// Matching users plus statistics over the whole directory.
    pub async fn query(&self, filter: &UserFilter) -> (Vec<User>, DirectoryStats) {
        let directory = self.directory.read().await;
        (directory.filter(filter), directory.statistics())
    }

    pub async fn statistics(&self) -> DirectoryStats {
        self.directory.read().await.statistics()
    }

    pub async fn user(&self, user_id: &str) -> Option<User> {
        self.directory.read().await.get(user_id).cloned()
    }

    pub async fn set_role(&self, user_id: &str, role: Role) -> MutationOutcome {
        self.mutate(user_id, |directory| directory.set_role(user_id, role), |_| {
            DirectoryEvent::RoleChanged {
                user_id: user_id.to_string(),
                role,
                at: Utc::now(),
            }
        })
        .await
    }

    pub async fn toggle_status(&self, user_id: &str) -> MutationOutcome {
        self.mutate(user_id, |directory| directory.toggle_status(user_id), |user| {
            DirectoryEvent::StatusToggled {
                user_id: user_id.to_string(),
                status: user.status,
                at: Utc::now(),
            }
        })
        .await
    }

    /// Subscribe to directory change events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.events.subscribe()
    }

    async fn mutate(
        &self,
        user_id: &str,
        apply: impl FnOnce(UserDirectory) -> UserDirectory,
        event: impl FnOnce(&User) -> DirectoryEvent,
    ) -> MutationOutcome {
        let mut directory = self.directory.write().await;

        let applied = directory.contains(user_id);
        if applied {
            let current = std::mem::take(&mut *directory);
            *directory = apply(current);
        } else {
            tracing::debug!("No user with id {}, directory unchanged", user_id);
        }

        let outcome = MutationOutcome {
            user_id: user_id.to_string(),
            applied,
            users: directory.users().to_vec(),
            stats: directory.statistics(),
        };

        if let Some(user) = directory.get(user_id).filter(|_| applied) {
            let event = event(user);
            tracing::info!(user_id = %user_id, event = event.name(), "Directory updated");
            // No subscribers is fine
            let _ = self.events.send(event);
        }

        outcome
    }
}
