//! Registration and login flows.

pub mod password;

use crate::storage::{Database, DatabaseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A registered user row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Row identifier
    pub id: i64,
    /// Full display name
    pub username: String,
    /// Unique login email
    pub email: String,
    /// Salted Argon2id hash in PHC string form
    pub password_hash: String,
    /// Saved delivery/contact addresses
    pub addresses: Vec<Address>,
    /// Phone number
    pub phone: Option<String>,
    /// Birth date as entered at registration
    pub birth_date: Option<String>,
    /// Access role, "user" or "admin"
    pub role: String,
}

/// A registration request before it becomes a stored row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub role: String,
}

/// A delivery/contact address attached to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub user_id: i64,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub street: String,
    pub rt: String,
    pub rw: String,
    pub village: String,
    pub district: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
    pub note: Option<String>,
}

/// Why an auth attempt was rejected.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("All fields are required")]
    EmptyFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Wrong email or password")]
    InvalidCredentials,

    #[error("Failed to hash password")]
    HashFailed,

    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

/// Register a new account and return the stored row.
///
/// Validation order matches the registration form: blank fields, then the
/// password confirmation, then the duplicate-email check.
pub fn register(
    db: &Database,
    full_name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<User, AuthError> {
    if full_name.trim().is_empty()
        || email.trim().is_empty()
        || password.is_empty()
        || confirm_password.is_empty()
    {
        return Err(AuthError::EmptyFields);
    }
    if password != confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    if db.email_exists(email)? {
        return Err(AuthError::DuplicateEmail);
    }

    let password_hash = password::hash_password(password).map_err(|_| AuthError::HashFailed)?;

    let new_user = NewUser {
        username: full_name.to_string(),
        email: email.to_string(),
        password_hash,
        phone: None,
        birth_date: None,
        role: "user".to_string(),
    };
    let id = db.register_user(&new_user)?;
    tracing::info!(user = %new_user.email, "registered new account");

    Ok(User {
        id,
        username: new_user.username,
        email: new_user.email,
        password_hash: new_user.password_hash,
        addresses: Vec::new(),
        phone: new_user.phone,
        birth_date: new_user.birth_date,
        role: new_user.role,
    })
}

/// Verify credentials and return the matching user.
pub fn login(db: &Database, email: &str, password: &str) -> Result<User, AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::EmptyFields);
    }

    db.login(email, password)?.ok_or(AuthError::InvalidCredentials)
}
