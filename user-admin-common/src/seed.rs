//! The fixed snapshot a session starts from.

use chrono::NaiveDate;

use crate::directory::UserDirectory;
use crate::user::{Role, Status, User};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn user(
    id: &str,
    name: &str,
    email: &str,
    role: Role,
    status: Status,
    last_activity: NaiveDate,
    permissions: &[&str],
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        status,
        last_activity,
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    }
}

/// Built-in user records, in display order.
pub fn snapshot() -> Vec<User> {
    vec![
        user(
            "1",
            "Иван Петров",
            "ivan.petrov@example.com",
            Role::Admin,
            Status::Active,
            date(2024, 9, 5),
            &["users.read", "users.write", "settings.write", "moderation.write"],
        ),
        user(
            "2",
            "Мария Сидорова",
            "maria.sidorova@example.com",
            Role::Moderator,
            Status::Active,
            date(2024, 9, 4),
            &["users.read", "moderation.write"],
        ),
        user(
            "3",
            "Алексей Козлов",
            "alex.kozlov@example.com",
            Role::User,
            Status::Active,
            date(2024, 9, 5),
            &["users.read"],
        ),
        user(
            "4",
            "Светлана Волкова",
            "svetlana.volkova@example.com",
            Role::Moderator,
            Status::Inactive,
            date(2024, 8, 28),
            &["users.read", "moderation.write"],
        ),
        user(
            "5",
            "Дмитрий Соколов",
            "dmitry.sokolov@example.com",
            Role::Guest,
            Status::Active,
            date(2024, 9, 3),
            &[],
        ),
    ]
}

/// The snapshot wrapped in a directory.
pub fn snapshot_directory() -> UserDirectory {
    UserDirectory::from_unchecked(snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_snapshot_ids_are_unique() {
        let users = snapshot();
        let ids: HashSet<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids.len(), users.len());
        assert!(UserDirectory::new(users).is_ok());
    }

    #[test]
    fn test_snapshot_dates() {
        let dates: Vec<String> = snapshot()
            .iter()
            .map(|u| u.last_activity.format("%Y-%m-%d").to_string())
            .collect();
        assert_eq!(
            dates,
            vec!["2024-09-05", "2024-09-04", "2024-09-05", "2024-08-28", "2024-09-03"]
        );
    }

    #[test]
    fn test_guest_has_no_permissions() {
        let users = snapshot();
        let guest = users.iter().find(|u| u.role == Role::Guest).unwrap();
        assert!(guest.permissions.is_empty());
    }
}
