use serde::{Deserialize, Serialize};

/// A row of one of the lookup tables (priorities or categories).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: i32,
    pub name: String,
    pub description: String,
}

pub type Priority = LookupEntry;

pub type Category = LookupEntry;
