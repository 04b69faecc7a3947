//! User directory API routes.
//!
//! Provides:
//! - Filtered listing with dashboard statistics (`/admin/users`)
//! - Statistics only (`/admin/users/stats`)
//! - Role choices for the role picker (`/admin/users/roles`)
//! - Single user lookup (`/admin/users/:id`)
//! - Role reassignment and status toggle (`/admin/users/:id/role`, `/admin/users/:id/toggle-status`)
//! - SSE endpoint for directory change events (`/admin/users/events`)

use std::convert::Infallible;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post, put},
    Json, Router,
};
use futures_util::stream::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;
use user_admin_common::{DirectoryStats, Role, Status, User, UserFilter};

use crate::error::{Error, Result};
use crate::state::{AppState, DirectoryEvent, MutationOutcome};

/// Value of the `role`/`status` parameters that lifts the constraint.
const UNCONSTRAINED: &str = "all";

/// Query parameters for GET /admin/users.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    /// Search text matched against name and email
    #[serde(default)]
    pub q: Option<String>,
    /// Role name or "all"
    #[serde(default)]
    pub role: Option<String>,
    /// Status name or "all"
    #[serde(default)]
    pub status: Option<String>,
}

impl ListUsersQuery {
    pub fn into_filter(self) -> Result<UserFilter> {
        Ok(UserFilter::new(
            self.q.unwrap_or_default(),
            parse_constraint::<Role>(self.role.as_deref())?,
            parse_constraint::<Status>(self.status.as_deref())?,
        ))
    }
}

/// Absent, blank or "all" means unconstrained.
fn parse_constraint<T>(value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case(UNCONSTRAINED) => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|e: T::Err| Error::InvalidRequest(e.to_string())),
    }
}

/// Response for GET /admin/users.
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
    /// Number of matching users
    pub total: usize,
    /// Counts over the whole directory, not just the matches
    pub stats: DirectoryStats,
}

/// Body for PUT /admin/users/:id/role.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: Role,
}

/// GET /admin/users - Filtered user list
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UsersResponse>> {
    let filter = query.into_filter()?;
    let (users, stats) = state.query(&filter).await;

    tracing::debug!(
        "Filter {:?} matched {} of {} users",
        filter,
        users.len(),
        stats.total
    );

    Ok(Json(UsersResponse {
        total: users.len(),
        users,
        stats,
    }))
}

/// GET /admin/users/stats
async fn user_stats(State(state): State<Arc<AppState>>) -> Json<DirectoryStats> {
    Json(state.statistics().await)
}

/// GET /admin/users/roles
async fn list_roles() -> Json<Vec<Role>> {
    Json(Role::ALL.to_vec())
}

/// GET /admin/users/:id
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>> {
    state
        .user(&id)
        .await
        .map(Json)
        .ok_or(Error::UserNotFound(id))
}

/// PUT /admin/users/:id/role - Reassign a user's role
///
/// An unknown id leaves the directory unchanged and reports `applied: false`.
async fn set_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<SetRoleRequest>,
) -> Json<MutationOutcome> {
    Json(state.set_role(&id, request.role).await)
}

/// POST /admin/users/:id/toggle-status - Flip active/inactive
async fn toggle_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<MutationOutcome> {
    Json(state.toggle_status(&id).await)
}

/// Directory changes seen by one subscriber.
///
/// A lagged subscriber skips the events it missed and carries on with the
/// next one; the next listing catches it up.
pub fn directory_event_stream(
    rx: broadcast::Receiver<DirectoryEvent>,
) -> impl Stream<Item = DirectoryEvent> {
    BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(event) => Some(event),
        Err(BroadcastStreamRecvError::Lagged(n)) => {
            tracing::debug!("Event subscriber lagged, skipped {} events", n);
            None
        }
    })
}

/// GET /admin/users/events - SSE stream of directory changes.
async fn directory_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let stream = directory_event_stream(state.subscribe_events()).filter_map(|event| {
        match serde_json::to_string(&event) {
            Ok(data) => Some(Ok(Event::default().event(event.name()).data(data))),
            Err(e) => {
                tracing::warn!("Failed to serialize directory event: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

/// Build the user directory router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/stats", get(user_stats))
        .route("/users/roles", get(list_roles))
        .route("/users/events", get(directory_events))
        .route("/users/:id", get(get_user))
        .route("/users/:id/role", put(set_role))
        .route("/users/:id/toggle-status", post(toggle_status))
}
