//! Canonical ticket lifecycle states and the canonicalizer that maps free-form
//! status tokens onto them.
//!
//! Every status that enters the system (API payloads, history entries, CLI
//! input) goes through [`TicketStatus::canonicalize`]. The alias table is
//! static data so the accepted spellings can be audited in one place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of lifecycle states a ticket can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TicketStatus {
    #[default]
    New,
    InProgress,
    Resolved,
    Closed,
}

/// Extra spellings accepted on top of the canonical identifiers, keyed by the
/// normalized (trimmed, uppercased, underscore-separated) form.
const ALIASES: &[(&str, TicketStatus)] = &[
    ("OPEN", TicketStatus::New),
    ("INPROGRESS", TicketStatus::InProgress),
];

/// Failure to canonicalize a status token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatusError {
    #[error("Status value is required")]
    Empty,

    #[error("Invalid status: {input}. Allowed: {}", TicketStatus::allowed_list())]
    Unknown { input: String },
}

impl TicketStatus {
    pub const ALL: [Self; 4] = [Self::New, Self::InProgress, Self::Resolved, Self::Closed];

    /// Internal identifier, uppercase with underscores.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    /// Human-facing form, also the form persisted in the database.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    /// Terminal states stamp `resolved_at` on the ticket.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Maps any accepted spelling to its canonical status.
    ///
    /// Resolution order: alias table, then internal identifier, then a compact
    /// comparison against the display names with spaces, underscores and
    /// hyphens removed.
    ///
    /// # Errors
    ///
    /// - [`StatusError::Empty`] if the input is absent or blank
    /// - [`StatusError::Unknown`] if no rule matches
    pub fn canonicalize(raw: Option<&str>) -> Result<Self, StatusError> {
        let raw = match raw {
            Some(value) if !value.trim().is_empty() => value,
            _ => return Err(StatusError::Empty),
        };

        let normalized = normalize(raw);

        if let Some((_, status)) = ALIASES.iter().find(|(alias, _)| *alias == normalized) {
            return Ok(*status);
        }

        if let Some(status) = Self::ALL
            .iter()
            .find(|s| s.identifier().eq_ignore_ascii_case(&normalized))
        {
            return Ok(*status);
        }

        let compact_input = compact(raw);
        Self::ALL
            .iter()
            .find(|s| compact(s.display_name()) == compact_input)
            .copied()
            .ok_or_else(|| StatusError::Unknown {
                input: raw.to_string(),
            })
    }

    /// Exact inverse of [`display_name`](Self::display_name), used when
    /// reading persisted rows.
    #[must_use]
    pub fn from_display(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.display_name() == value)
    }

    /// Allowed values and aliases, formatted for error messages.
    #[must_use]
    pub fn allowed_list() -> String {
        let canonical = Self::ALL
            .iter()
            .map(|s| s.display_name())
            .collect::<Vec<_>>()
            .join(", ");
        let aliases = ALIASES
            .iter()
            .map(|(alias, status)| format!("{alias} => {}", status.display_name()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{canonical} (aliases: {aliases})")
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase().replace(['-', ' '], "_")
}

fn compact(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TicketStatus {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::canonicalize(Some(s))
    }
}

impl Serialize for TicketStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.display_name())
    }
}

impl<'de> Deserialize<'de> for TicketStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::canonicalize(Some(&raw)).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_are_idempotent() {
        for status in TicketStatus::ALL {
            assert_eq!(
                TicketStatus::canonicalize(Some(status.display_name())),
                Ok(status)
            );
        }
    }

    #[test]
    fn identifiers_match_case_insensitively() {
        assert_eq!(
            TicketStatus::canonicalize(Some("in_progress")),
            Ok(TicketStatus::InProgress)
        );
        assert_eq!(
            TicketStatus::canonicalize(Some("RESOLVED")),
            Ok(TicketStatus::Resolved)
        );
        assert_eq!(
            TicketStatus::canonicalize(Some("  closed ")),
            Ok(TicketStatus::Closed)
        );
    }

    #[test]
    fn aliases_and_separator_variants() {
        for input in ["OPEN", "open", " Open "] {
            assert_eq!(
                TicketStatus::canonicalize(Some(input)),
                Ok(TicketStatus::New),
                "{input}"
            );
        }
        for input in ["INPROGRESS", "inprogress", "in-progress", "In Progress", "in progress"] {
            assert_eq!(
                TicketStatus::canonicalize(Some(input)),
                Ok(TicketStatus::InProgress),
                "{input}"
            );
        }
    }

    #[test]
    fn compact_match_ignores_mixed_separators() {
        assert_eq!(
            TicketStatus::canonicalize(Some("In_-Progress")),
            Ok(TicketStatus::InProgress)
        );
        assert_eq!(
            TicketStatus::canonicalize(Some("re-solved")),
            Ok(TicketStatus::Resolved)
        );
    }

    #[test]
    fn empty_and_absent_inputs_fail() {
        assert_eq!(TicketStatus::canonicalize(None), Err(StatusError::Empty));
        assert_eq!(TicketStatus::canonicalize(Some("")), Err(StatusError::Empty));
        assert_eq!(
            TicketStatus::canonicalize(Some("   ")),
            Err(StatusError::Empty)
        );
    }

    #[test]
    fn unknown_status_lists_allowed_values() {
        let err = TicketStatus::canonicalize(Some("bogus")).unwrap_err();
        assert_eq!(
            err,
            StatusError::Unknown {
                input: "bogus".to_string()
            }
        );
        let message = err.to_string();
        assert!(message.starts_with("Invalid status: bogus. Allowed: "));
        for status in TicketStatus::ALL {
            assert!(message.contains(status.display_name()));
        }
        assert!(message.contains("OPEN => New"));
        assert!(message.contains("INPROGRESS => In Progress"));
    }

    #[test]
    fn serde_uses_display_form() {
        let json = serde_json::to_string(&TicketStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let parsed: TicketStatus = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(parsed, TicketStatus::New);
        assert!(serde_json::from_str::<TicketStatus>("\"later\"").is_err());
    }

    #[test]
    fn from_display_is_exact() {
        assert_eq!(
            TicketStatus::from_display("In Progress"),
            Some(TicketStatus::InProgress)
        );
        assert_eq!(TicketStatus::from_display("in progress"), None);
    }
}
