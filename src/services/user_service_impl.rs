//! `SeaORM` implementation of the `UserService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::api::types::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::config::SecurityConfig;
use crate::db::{Store, UserChanges, hash_password};
use crate::domain::Role;
use crate::models::NewUser;
use crate::services::user_service::{UserError, UserService};

const MIN_PASSWORD_LEN: usize = 6;

pub struct SeaOrmUserService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmUserService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    async fn ensure_email_free(&self, email: &str, except: Option<i32>) -> Result<(), UserError> {
        match self.store.get_user_by_email(email).await? {
            Some(existing) if Some(existing.id) != except => {
                Err(UserError::Conflict(existing.email))
            }
            _ => Ok(()),
        }
    }

    fn hash(&self, password: &str) -> Result<String, UserError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(UserError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(hash_password(password, Some(&self.security))?)
    }
}

fn validate_email(raw: Option<&str>) -> Result<String, UserError> {
    let email = raw.map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(UserError::Validation("email is required".into()));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email.to_string()),
        _ => Err(UserError::Validation(format!("invalid email: {email}"))),
    }
}

fn validate_name(raw: Option<&str>) -> Result<String, UserError> {
    let name = raw.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(UserError::Validation("name is required".into()));
    }
    Ok(name.to_string())
}

fn clean_phone(raw: Option<String>) -> Option<String> {
    raw.map(|p| p.trim().to_string()).filter(|p| !p.is_empty())
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn list(&self) -> Result<Vec<UserDto>, UserError> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    async fn get(&self, id: i32) -> Result<UserDto, UserError> {
        self.store
            .get_user(id)
            .await?
            .map(UserDto::from)
            .ok_or(UserError::NotFound(id))
    }

    async fn create(&self, request: CreateUserRequest) -> Result<UserDto, UserError> {
        let email = validate_email(request.email.as_deref())?;
        let name = validate_name(request.name.as_deref())?;
        let password = request
            .password
            .as_deref()
            .ok_or_else(|| UserError::Validation("password is required".into()))?;

        self.ensure_email_free(&email, None).await?;

        let role = Role::for_new_user(request.role.as_deref());
        let user = self
            .store
            .create_user(NewUser {
                email,
                password_hash: self.hash(password)?,
                role,
                name,
                phone_number: clean_phone(request.phone_number),
            })
            .await?;

        info!(user_id = user.id, role = %user.role, "User created");
        Ok(user.into())
    }

    async fn update(&self, id: i32, request: UpdateUserRequest) -> Result<UserDto, UserError> {
        let existing = self.store.get_user(id).await?.ok_or(UserError::NotFound(id))?;

        let email = match request.email.as_deref() {
            Some(raw) => {
                let email = validate_email(Some(raw))?;
                self.ensure_email_free(&email, Some(id)).await?;
                Some(email)
            }
            None => None,
        };
        let name = request
            .name
            .as_deref()
            .map(|n| validate_name(Some(n)))
            .transpose()?;
        let password_hash = match request.password.as_deref() {
            Some(password) if !password.is_empty() => Some(self.hash(password)?),
            _ => None,
        };

        if let Some(raw) = request
            .role
            .as_deref()
            .filter(|r| !r.trim().is_empty() && Role::parse(r).is_none())
        {
            warn!(user_id = id, role = raw, "Ignoring unrecognized role on update");
        }
        let role = Role::for_update(existing.role, request.role.as_deref());

        let changes = UserChanges {
            email,
            name,
            password_hash,
            role: Some(role),
            phone_number: request.phone_number.map(|p| clean_phone(Some(p))),
        };

        let user = self
            .store
            .update_user(id, changes)
            .await?
            .ok_or(UserError::NotFound(id))?;

        info!(user_id = id, "User updated");
        Ok(user.into())
    }

    async fn delete(&self, id: i32) -> Result<(), UserError> {
        if self.store.get_user(id).await?.is_none() {
            return Err(UserError::NotFound(id));
        }

        let count = self.store.user_usage(id).await?;
        if count > 0 {
            return Err(UserError::InUse { id, count });
        }

        self.store.delete_user(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_must_have_local_and_domain() {
        assert_eq!(
            validate_email(Some("  a@b.io ")).unwrap(),
            "a@b.io".to_string()
        );
        assert!(validate_email(None).is_err());
        assert!(validate_email(Some("nobody")).is_err());
        assert!(validate_email(Some("@b.io")).is_err());
        assert!(validate_email(Some("a@")).is_err());
    }

    #[test]
    fn blank_phone_is_cleared() {
        assert_eq!(clean_phone(Some("  ".into())), None);
        assert_eq!(clean_phone(Some(" 555-0100 ".into())).as_deref(), Some("555-0100"));
    }
}
