//! Summary counts shown above the user table.

use serde::{Deserialize, Serialize};

use crate::user::{Role, User};

/// Aggregate counts over a whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
    pub total: usize,
    pub active: usize,
    pub admins: usize,
    pub moderators: usize,
}

pub fn compute_statistics(users: &[User]) -> DirectoryStats {
    users.iter().fold(
        DirectoryStats {
            total: users.len(),
            ..Default::default()
        },
        |mut stats, user| {
            if user.status.is_active() {
                stats.active += 1;
            }
            match user.role {
                Role::Admin => stats.admins += 1,
                Role::Moderator => stats.moderators += 1,
                Role::User | Role::Guest => {}
            }
            stats
        },
    )
}
