//! Searching and summarizing the user list on the admin pages.

use std::{fmt, str::FromStr};

use crate::models::user::{Role, User};

/// Role dropdown on the user list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn matches(&self, role: Role) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(wanted) => *wanted == role,
        }
    }
}

impl FromStr for RoleFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(RoleFilter::All)
        } else {
            s.parse::<Role>().map(RoleFilter::Only)
        }
    }
}

impl fmt::Display for RoleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleFilter::All => f.write_str("ALL"),
            RoleFilter::Only(role) => role.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: String,
    pub role: RoleFilter,
}

impl UserFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.role != RoleFilter::All
    }

    /// Case-insensitive substring match on first name, last name or email.
    pub fn matches(&self, user: &User) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || [&user.first_name, &user.last_name, &user.email]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
        matches_search && self.role.matches(user.role)
    }

    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|user| self.matches(user)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total: usize,
    pub admins: usize,
    pub users: usize,
}

impl UserStats {
    pub fn of(users: &[User]) -> Self {
        Self {
            total: users.len(),
            admins: users.iter().filter(|u| u.role == Role::Admin).count(),
            users: users.iter().filter(|u| u.role == Role::User).count(),
        }
    }
}

/// Non-admin users ordered by full name, as offered on the transaction desk.
pub fn clients_by_name(users: &[User]) -> Vec<User> {
    let mut clients: Vec<User> = users.iter().filter(|u| !u.is_admin()).cloned().collect();
    clients.sort_by_cached_key(|u| u.full_name().to_lowercase());
    clients
}
