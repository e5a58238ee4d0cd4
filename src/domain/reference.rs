//! Client-supplied pointers to reference rows (priorities and categories).

use std::fmt;

/// How a request points at a lookup row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Reference {
    ById(i32),
    ByName(String),
    #[default]
    Absent,
}

impl Reference {
    /// Builds a reference from the optional ID and name fields of a request.
    ///
    /// The ID wins when both are present. Names are trimmed and a blank name
    /// counts as absent.
    #[must_use]
    pub fn from_parts(id: Option<i32>, name: Option<&str>) -> Self {
        match (id, name.map(str::trim)) {
            (Some(id), _) => Self::ById(id),
            (None, Some(name)) if !name.is_empty() => Self::ByName(name.to_string()),
            _ => Self::Absent,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// The reference tables a ticket points into by ID or name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Priority,
    Category,
}

impl LookupKind {
    /// Request field carrying the numeric ID.
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::Priority => "priorityId",
            Self::Category => "categoryId",
        }
    }

    /// Request field carrying the free-text name.
    #[must_use]
    pub const fn name_field(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Category => "category",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Priority => "Priority",
            Self::Category => "Category",
        }
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Key used for every case-insensitive name or email comparison: trimmed and
/// Unicode-lowercased. Stored values are folded in Rust with the same rule,
/// since SQLite `LOWER` only folds ASCII.
#[must_use]
pub fn fold_name(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Formats the configured names for an "allowed values" message: sorted
/// case-insensitively and comma-joined, or `none configured` when empty.
#[must_use]
pub fn allowed_names(mut names: Vec<String>) -> String {
    if names.is_empty() {
        return "none configured".to_string();
    }
    names.sort_by_key(|name| fold_name(name));
    names.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_wins_over_name() {
        assert_eq!(
            Reference::from_parts(Some(3), Some("High")),
            Reference::ById(3)
        );
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(
            Reference::from_parts(None, Some("  high  ")),
            Reference::ByName("high".to_string())
        );
    }

    #[test]
    fn blank_or_missing_is_absent() {
        assert!(Reference::from_parts(None, None).is_absent());
        assert!(Reference::from_parts(None, Some("   ")).is_absent());
    }

    #[test]
    fn fold_name_handles_non_ascii() {
        assert_eq!(fold_name("  ÉLEVÉ "), fold_name("élevé"));
        assert_ne!(fold_name("élevé"), fold_name("eleve"));
    }

    #[test]
    fn allowed_names_sorted_case_insensitively() {
        let names = vec!["medium".to_string(), "HIGH".to_string(), "Low".to_string()];
        assert_eq!(allowed_names(names), "HIGH, Low, medium");
        assert_eq!(allowed_names(Vec::new()), "none configured");
    }
}
