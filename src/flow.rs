//! Credential submission and role redirect.
//!
//! ARCHITECTURE
//! ============
//! Every screen that signs a user in or up goes through [`CredentialFlow`]:
//!
//!   validate locally → one request → branch on status → decode token →
//!   persist token → pick destination
//!
//! A destination is only produced after the token has been received and
//! decoded. A token that fails to decode is neither stored nor acted on.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as [`AuthError`] for the screen to show inline. Nothing
//! is retried and nothing is fatal; the user can always resubmit.

use std::sync::Arc;

use crate::auth::types::{LOGIN_FAILED_FALLBACK, NO_TOKEN_MESSAGE, REGISTER_FAILED_FALLBACK, REGISTERED_NOTICE};
use crate::auth::{AuthApi, AuthError, DecodedClaims, Destination, LoginRequest, RegisterRequest, decode_claims};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct CredentialFlow {
    api: Arc<dyn AuthApi>,
    session: Arc<dyn SessionStore>,
}

impl CredentialFlow {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, session: Arc<dyn SessionStore>) -> Self {
        Self { api, session }
    }

    /// Sign in and return where to send the user.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] for an empty email or password (no request sent)
    /// - [`AuthError::Authentication`] for a non-success status
    /// - [`AuthError::Protocol`] when a success reply carries no token
    /// - [`AuthError::Decode`] when the token payload is unreadable
    /// - [`AuthError::Transport`] / [`AuthError::Storage`] for I/O failures
    pub async fn login(&self, request: &LoginRequest) -> Result<Destination, AuthError> {
        let request = request.validated()?;
        let reply = self.api.login(&request).await.inspect_err(|e| {
            tracing::warn!(error = %e, "login request failed");
        })?;

        if !reply.is_success() {
            tracing::warn!(status = reply.status, "login rejected");
            return Err(AuthError::Authentication(reply.message_or(LOGIN_FAILED_FALLBACK)));
        }

        let Some(token) = reply.token.filter(|t| !t.is_empty()) else {
            tracing::warn!(status = reply.status, "login reply missing token");
            return Err(AuthError::Protocol(NO_TOKEN_MESSAGE.to_owned()));
        };

        let claims = decode_claims(&token).inspect_err(|e| {
            tracing::warn!(error = %e, "issued token could not be decoded");
        })?;
        self.session.set(&token)?;

        let destination = claims.destination();
        tracing::info!(role = ?claims.role(), destination = destination.path(), "login succeeded");
        Ok(destination)
    }

    /// Create an account and return the confirmation notice.
    ///
    /// Identical submissions are sent as separate requests.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] on a password mismatch or empty field (no request sent)
    /// - [`AuthError::Registration`] for a non-success status
    /// - [`AuthError::Transport`] if the request fails
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, AuthError> {
        let request = request.validated()?;
        let reply = self.api.register(&request).await.inspect_err(|e| {
            tracing::warn!(error = %e, "registration request failed");
        })?;

        if !reply.is_success() {
            tracing::warn!(status = reply.status, "registration rejected");
            return Err(AuthError::Registration(reply.message_or(REGISTER_FAILED_FALLBACK)));
        }

        tracing::info!(role = ?request.role, "registration accepted");
        Ok(REGISTERED_NOTICE.to_owned())
    }

    /// Drop the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if the store cannot be written.
    pub fn sign_out(&self) -> Result<(), AuthError> {
        self.session.clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    /// Claims of the stored token, re-decoded on every call.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] or [`AuthError::Decode`].
    pub fn current_claims(&self) -> Result<Option<DecodedClaims>, AuthError> {
        self.session
            .get()?
            .map(|token| decode_claims(&token))
            .transpose()
    }

    /// Role-based area for the stored token; `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] or [`AuthError::Decode`].
    pub fn current_destination(&self) -> Result<Option<Destination>, AuthError> {
        Ok(self.current_claims()?.map(|claims| claims.destination()))
    }
}

#[cfg(test)]
#[path = "flow_test.rs"]
mod tests;

// =============================================================================
// TEST HELPERS
// =============================================================================
