use serde::{Deserialize, Serialize};
use std::fmt;

/// Access role of a helpdesk user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Agent,
    #[default]
    Employee,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Agent => "AGENT",
            Self::Employee => "EMPLOYEE",
        }
    }

    /// Case-insensitive parse; `None` for blank or unknown values.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "ADMIN" => Some(Self::Admin),
            "AGENT" => Some(Self::Agent),
            "EMPLOYEE" => Some(Self::Employee),
            _ => None,
        }
    }

    /// Role assigned at signup: falls back to [`Role::Employee`].
    #[must_use]
    pub fn for_new_user(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    /// Role after an update: invalid or missing input keeps `current`.
    #[must_use]
    pub fn for_update(current: Self, raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or(current)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Role::parse("agent"), Some(Role::Agent));
        assert_eq!(Role::parse(" Admin "), Some(Role::Admin));
        assert_eq!(Role::parse("root"), None);
    }

    #[test]
    fn new_users_default_to_employee() {
        assert_eq!(Role::for_new_user(None), Role::Employee);
        assert_eq!(Role::for_new_user(Some("")), Role::Employee);
        assert_eq!(Role::for_new_user(Some("superuser")), Role::Employee);
        assert_eq!(Role::for_new_user(Some("AGENT")), Role::Agent);
    }

    #[test]
    fn invalid_update_keeps_current_role() {
        assert_eq!(Role::for_update(Role::Agent, Some("nope")), Role::Agent);
        assert_eq!(Role::for_update(Role::Agent, None), Role::Agent);
        assert_eq!(Role::for_update(Role::Agent, Some("admin")), Role::Admin);
    }
}
