use crate::domain::Role;
use serde::{Deserialize, Serialize};

/// User as seen by the rest of the system. The password hash never leaves
/// the repository layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub phone_number: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub name: String,
    pub phone_number: Option<String>,
}
