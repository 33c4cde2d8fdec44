use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const USERNAME_COOLDOWN_DAYS: i64 = 15;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 15;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub last_username_change: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsernameCooldown {
    Allowed,
    Blocked { days_remaining: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameChange {
    Unchanged,
    Apply {
        username: String,
        changed_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordStep {
    #[default]
    Current,
    New,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordOutcome {
    Advanced,
    Completed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormField {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Continue,
    Redirect(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("You can only change your username once every 15 days. Days remaining: {days_remaining}")]
    UsernameCooldown { days_remaining: i64 },
    #[error("Please enter your current password.")]
    MissingCurrentPassword,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,
}
