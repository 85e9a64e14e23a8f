//! Screen view state for the sign-in / sign-up screens.
//!
//! DESIGN
//! ======
//! Each form owns its fields and a [`FormStatus`]. Submission is split into
//! `begin` (gate re-entry, snapshot the fields) and `finish` (apply the
//! outcome) so a caller that drives the request elsewhere still gets the
//! single-in-flight guarantee. `submit_*` on [`AuthScreen`] runs both halves
//! around one [`CredentialFlow`] call while holding `&mut self`, so a screen
//! that has been dropped can never be written to by a late response.

use crate::auth::{AuthError, Destination, LoginRequest, RegisterRequest, RoleSelector};
use crate::flow::CredentialFlow;

/// `idle → submitting → (success | error)`; the next submit starts over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success(String),
    Error(String),
}

impl FormStatus {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Error banner text, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// Success banner text, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Success(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// Result of asking a form to start a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submit<T> {
    Ready(T),
    /// A request is already in flight; nothing was sent.
    Busy,
}

/// What the host should do after a submission settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    /// Full-page redirect to the destination's path.
    Redirect(Destination),
}

// =============================================================================
// LOGIN FORM
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    status: FormStatus,
}

impl LoginForm {
    #[must_use]
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.status.is_busy() { "Signing in..." } else { "Sign In" }
    }

    /// Clear the banner, mark the form busy, and snapshot the credentials.
    pub fn begin(&mut self) -> Submit<LoginRequest> {
        if self.status.is_busy() {
            return Submit::Busy;
        }
        self.status = FormStatus::Submitting;
        Submit::Ready(LoginRequest::new(self.email.clone(), self.password.clone()))
    }

    pub fn finish(&mut self, outcome: Result<Destination, AuthError>) -> Navigation {
        match outcome {
            Ok(destination) => {
                self.status = FormStatus::Idle;
                Navigation::Redirect(destination)
            }
            Err(e) => {
                self.status = FormStatus::Error(e.user_message().to_owned());
                Navigation::Stay
            }
        }
    }
}

// =============================================================================
// REGISTER FORM
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: RoleSelector,
    status: FormStatus,
}

impl RegisterForm {
    #[must_use]
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.status.is_busy() { "Creating account..." } else { "Create Account" }
    }

    pub fn begin(&mut self) -> Submit<RegisterRequest> {
        if self.status.is_busy() {
            return Submit::Busy;
        }
        self.status = FormStatus::Submitting;
        Submit::Ready(RegisterRequest {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            role: self.role,
        })
    }

    /// On success the name, email and password are cleared. The confirmation
    /// and role fields keep their values.
    pub fn finish(&mut self, outcome: Result<String, AuthError>) {
        match outcome {
            Ok(notice) => {
                self.full_name.clear();
                self.email.clear();
                self.password.clear();
                self.status = FormStatus::Success(notice);
            }
            Err(e) => self.status = FormStatus::Error(e.user_message().to_owned()),
        }
    }
}

// =============================================================================
// COMBINED SCREEN
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Login/register screen with a mode toggle. Each mode keeps its own fields
/// and banner; switching modes resets neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthScreen {
    mode: AuthMode,
    pub login: LoginForm,
    pub register: RegisterForm,
}

impl AuthScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn show_login(&mut self) {
        self.mode = AuthMode::Login;
    }

    pub fn show_register(&mut self) {
        self.mode = AuthMode::Register;
    }

    /// Status of the form for the active mode.
    #[must_use]
    pub fn active_status(&self) -> &FormStatus {
        match self.mode {
            AuthMode::Login => self.login.status(),
            AuthMode::Register => self.register.status(),
        }
    }

    /// Submit the login form through `flow`.
    pub async fn submit_login(&mut self, flow: &CredentialFlow) -> Navigation {
        let Submit::Ready(request) = self.login.begin() else {
            return Navigation::Stay;
        };
        let outcome = flow.login(&request).await;
        self.login.finish(outcome)
    }

    /// Submit the register form through `flow`.
    pub async fn submit_register(&mut self, flow: &CredentialFlow) {
        let Submit::Ready(request) = self.register.begin() else {
            return;
        };
        let outcome = flow.register(&request).await;
        self.register.finish(outcome);
    }
}

#[cfg(test)]
#[path = "screen_test.rs"]
mod tests;
