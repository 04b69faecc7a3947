//! Directory filtering.

use crate::user::{Role, Status, User};

/// Criteria for narrowing the user list.
///
/// All three clauses must hold for a record to match. `None` for `role` or
/// `status` means the clause is unconstrained; an empty `query` matches
/// every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring of the name or the email
    pub query: String,
    pub role: Option<Role>,
    pub status: Option<Status>,
}

impl UserFilter {
    pub fn new(query: impl Into<String>, role: Option<Role>, status: Option<Status>) -> Self {
        Self {
            query: query.into(),
            role,
            status,
        }
    }

    /// True when no clause restricts anything.
    pub fn is_unconstrained(&self) -> bool {
        self.query.is_empty() && self.role.is_none() && self.status.is_none()
    }

    pub fn matches(&self, user: &User) -> bool {
        self.matches_lowered(user, &self.query.to_lowercase())
    }

    /// `needle` is the already lower-cased query.
    fn matches_lowered(&self, user: &User, needle: &str) -> bool {
        let text = needle.is_empty()
            || user.name.to_lowercase().contains(needle)
            || user.email.to_lowercase().contains(needle);

        text
            && self.role.map_or(true, |role| user.role == role)
            && self.status.map_or(true, |status| user.status == status)
    }

    /// Matching records in their original order.
    pub fn apply(&self, users: &[User]) -> Vec<User> {
        let needle = self.query.to_lowercase();
        users
            .iter()
            .filter(|user| self.matches_lowered(user, &needle))
            .cloned()
            .collect()
    }
}

/// Records of `users` matching all of `query`, `role` and `status`.
pub fn filter_users(
    users: &[User],
    query: &str,
    role: Option<Role>,
    status: Option<Status>,
) -> Vec<User> {
    UserFilter::new(query, role, status).apply(users)
}
