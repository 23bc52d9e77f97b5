//! Repository for `users.json`.
//!
//! Email addresses are unique across all users (compared case-insensitively).

use chrono::Utc;
use kb_core::types::new_id;
use kb_core::user::{CreateUser, UpdateUser, User};

use crate::{DataStore, DbError};

const EMAIL_TAKEN: &str = "Email already exists";

fn same_email(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Create a user, rejecting a duplicate email with [`DbError::Conflict`].
    pub async fn create(store: &DataStore, input: &CreateUser) -> Result<User, DbError> {
        let now = Utc::now();
        let user = User {
            id: new_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            role: input.role,
            created_at: now,
            updated_at: now,
        };
        let created = user.clone();
        store
            .users
            .modify(move |all| {
                if all.iter().any(|u| same_email(&u.email, &user.email)) {
                    return Err(DbError::Conflict(EMAIL_TAKEN.into()));
                }
                all.push(user);
                Ok(())
            })
            .await?;
        Ok(created)
    }

    /// List all users in insertion order.
    pub async fn list(store: &DataStore) -> Result<Vec<User>, DbError> {
        store.users.read_all().await
    }

    pub async fn find_by_id(store: &DataStore, id: &str) -> Result<Option<User>, DbError> {
        Ok(store.users.read_all().await?.into_iter().find(|u| u.id == id))
    }

    pub async fn find_by_email(store: &DataStore, email: &str) -> Result<Option<User>, DbError> {
        Ok(store
            .users
            .read_all()
            .await?
            .into_iter()
            .find(|u| same_email(&u.email, email)))
    }

    /// Apply a partial update. Returns `None` if no user has `id`.
    pub async fn update(
        store: &DataStore,
        id: &str,
        input: &UpdateUser,
    ) -> Result<Option<User>, DbError> {
        store
            .users
            .modify(|all| {
                if let Some(email) = input.email.as_deref() {
                    if all.iter().any(|u| u.id != id && same_email(&u.email, email)) {
                        return Err(DbError::Conflict(EMAIL_TAKEN.into()));
                    }
                }
                let Some(user) = all.iter_mut().find(|u| u.id == id) else {
                    return Ok(None);
                };
                if let Some(name) = &input.name {
                    user.name = name.clone();
                }
                if let Some(email) = &input.email {
                    user.email = email.clone();
                }
                if let Some(role) = input.role {
                    user.role = role;
                }
                user.updated_at = Utc::now();
                Ok(Some(user.clone()))
            })
            .await
    }

    /// Delete a user. Returns `true` if a record was removed.
    pub async fn delete(store: &DataStore, id: &str) -> Result<bool, DbError> {
        store
            .users
            .modify(|all| {
                let before = all.len();
                all.retain(|u| u.id != id);
                Ok(all.len() < before)
            })
            .await
    }
}
