//! The user directory: an owned collection with unique identifiers.
//!
//! Mutations consume the collection and hand back the updated one, so the
//! caller always holds the single current value. An identifier that matches
//! no record leaves the collection untouched; that is not an error.

use std::collections::HashSet;

use serde::Serialize;

use crate::filter::UserFilter;
use crate::stats::{compute_statistics, DirectoryStats};
use crate::user::{Role, User};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Duplicate user id: {0}")]
    DuplicateId(String),
}

/// Replace the role of the record with `user_id`.
pub fn set_role(mut users: Vec<User>, user_id: &str, role: Role) -> Vec<User> {
    if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
        user.role = role;
    }
    users
}

/// Flip the status of the record with `user_id` between active and inactive.
pub fn toggle_status(mut users: Vec<User>, user_id: &str) -> Vec<User> {
    if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
        user.status = user.status.toggled();
    }
    users
}

/// Validated user collection of one admin session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    /// Build a directory, rejecting collections with repeated identifiers.
    pub fn new(users: Vec<User>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(users.len());
        for user in &users {
            if !seen.insert(user.id.as_str()) {
                return Err(DirectoryError::DuplicateId(user.id.clone()));
            }
        }
        Ok(Self { users })
    }

    /// Caller guarantees identifiers are unique.
    pub(crate) fn from_unchecked(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn into_users(self) -> Vec<User> {
        self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.get(user_id).is_some()
    }

    pub fn filter(&self, filter: &UserFilter) -> Vec<User> {
        filter.apply(&self.users)
    }

    pub fn statistics(&self) -> DirectoryStats {
        compute_statistics(&self.users)
    }

    pub fn set_role(self, user_id: &str, role: Role) -> Self {
        Self {
            users: set_role(self.users, user_id, role),
        }
    }

    pub fn toggle_status(self, user_id: &str) -> Self {
        Self {
            users: toggle_status(self.users, user_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{snapshot, snapshot_directory};
    use crate::user::Status;

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut users = snapshot();
        let mut copy = users[1].clone();
        copy.name = "Someone Else".to_string();
        users.push(copy);

        assert_eq!(
            UserDirectory::new(users),
            Err(DirectoryError::DuplicateId("2".to_string()))
        );
    }

    #[test]
    fn test_empty_directory() {
        let directory = UserDirectory::new(Vec::new()).unwrap();
        assert!(directory.is_empty());
        assert_eq!(directory.statistics().total, 0);
    }

    #[test]
    fn test_set_role_only_touches_target() {
        let before = snapshot();
        let after = set_role(before.clone(), "3", Role::Moderator);

        assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(&after) {
            if old.id == "3" {
                assert_eq!(new.role, Role::Moderator);
                assert_eq!(new.status, old.status);
                assert_eq!(new.permissions, old.permissions);
            } else {
                assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn test_set_role_unknown_id_is_noop() {
        let before = snapshot();
        let after = set_role(before.clone(), "42", Role::Admin);
        assert_eq!(after, before);
    }

    #[test]
    fn test_toggle_status_twice_restores() {
        let directory = snapshot_directory();
        assert_eq!(directory.get("1").unwrap().status, Status::Active);

        let once = directory.clone().toggle_status("1");
        assert_eq!(once.get("1").unwrap().status, Status::Inactive);
        assert_eq!(once.statistics().active, 3);

        let twice = once.toggle_status("1");
        assert_eq!(twice, directory);
    }

    #[test]
    fn test_toggle_status_unknown_id_is_noop() {
        let before = snapshot();
        assert_eq!(toggle_status(before.clone(), ""), before);
    }

    #[test]
    fn test_role_change_updates_statistics() {
        let directory = snapshot_directory().set_role("5", Role::Admin);
        let stats = directory.statistics();
        assert_eq!(stats.admins, 2);
        assert_eq!(stats.moderators, 2);
        assert_eq!(stats.total, 5);
    }

    #[test]
    fn test_directory_filter() {
        let directory = snapshot_directory();
        let filter = UserFilter::new("", Some(Role::Moderator), Some(Status::Inactive));
        let filtered = directory.filter(&filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "4");
        assert!(directory.contains("4"));
        assert!(!directory.contains("6"));
    }

    #[test]
    fn test_directory_serializes_as_array() {
        let json = serde_json::to_value(snapshot_directory()).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(5));
        assert_eq!(json[0]["role"], "admin");
        assert_eq!(json[0]["last_activity"], "2024-09-05");
    }
}
