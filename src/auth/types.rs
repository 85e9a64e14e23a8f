//! Auth types — credential bodies, wire replies, and the error taxonomy.
//!
//! Field names on the request bodies follow the remote API's camelCase JSON
//! shape; everything else is plain Rust naming.

use serde::{Deserialize, Serialize};

use super::role::RoleSelector;

pub const LOGIN_FAILED_FALLBACK: &str = "Invalid email or password.";
pub const REGISTER_FAILED_FALLBACK: &str = "Registration failed.";
pub const NO_TOKEN_MESSAGE: &str = "No token returned.";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match.";
pub const LOGIN_FIELDS_MESSAGE: &str = "Enter both email and password.";
pub const REGISTER_FIELDS_MESSAGE: &str = "Fill in all fields.";
pub const REGISTERED_NOTICE: &str = "Account created! Please check your email.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";

// =============================================================================
// ERROR
// =============================================================================

/// Errors surfaced at the form-submit boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// A local precondition failed; no request was sent.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The login endpoint answered with a non-success status.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The registration endpoint answered with a non-success status.
    #[error("registration failed: {0}")]
    Registration(String),

    /// A success response was missing an expected field.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The issued token could not be decoded.
    #[error("token decode failed: {0}")]
    Decode(String),

    /// The request could not be sent or its body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The session store could not be read or written.
    #[error("session storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Text for the inline error banner.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::Authentication(m) | Self::Registration(m) | Self::Protocol(m) => m.as_str(),
            Self::Decode(_) | Self::Transport(_) | Self::Storage(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Body of `POST /api/Auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    /// Trim the email and require both fields.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] when either field is empty.
    pub fn validated(&self) -> Result<Self, AuthError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(AuthError::Validation(LOGIN_FIELDS_MESSAGE.to_owned()));
        }
        Ok(Self { email: email.to_owned(), password: self.password.clone() })
    }
}

/// Body of `POST /api/Auth/register`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: RoleSelector,
}

impl RegisterRequest {
    /// Check the password confirmation and required fields.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] on a password mismatch or an empty
    /// name, email, or password.
    pub fn validated(&self) -> Result<Self, AuthError> {
        if self.password != self.confirm_password {
            return Err(AuthError::Validation(PASSWORD_MISMATCH_MESSAGE.to_owned()));
        }
        let full_name = self.full_name.trim();
        let email = self.email.trim();
        if full_name.is_empty() || email.is_empty() || self.password.is_empty() {
            return Err(AuthError::Validation(REGISTER_FIELDS_MESSAGE.to_owned()));
        }
        Ok(Self {
            full_name: full_name.to_owned(),
            email: email.to_owned(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            role: self.role,
        })
    }
}

// =============================================================================
// REPLIES
// =============================================================================

/// Raw endpoint reply: status plus the optional fields the flow looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub token: Option<String>,
    pub message: Option<String>,
}

impl ApiReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server message verbatim when present and non-empty, else `fallback`.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(fallback)
            .to_owned()
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
