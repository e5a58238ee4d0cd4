//! Domain primitives for the helpdesk: ticket identifiers, lifecycle states,
//! reference pointers and user roles.

pub mod reference;
pub mod role;
pub mod status;

pub use reference::{LookupKind, Reference};
pub use role::Role;
pub use status::{StatusError, TicketStatus};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a ticket.
///
/// Keeps ticket IDs from being mixed up with the plain `i32` IDs used for
/// users and lookup rows.
///
/// # Examples
///
/// ```rust
/// use helpdesk::domain::TicketId;
///
/// let id = TicketId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TicketId(i32);

impl TicketId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TicketId> for i32 {
    fn from(id: TicketId) -> Self {
        id.0
    }
}

impl From<i32> for TicketId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl Serialize for TicketId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for TicketId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        i32::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_id_conversions() {
        let id = TicketId::new(7);
        assert_eq!(i32::from(id), 7);
        assert_eq!(TicketId::from(7), id);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let parsed: TicketId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, id);
    }
}
