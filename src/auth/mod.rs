//! Auth — credential submission against the remote auth API.
//!
//! ARCHITECTURE
//! ============
//! `types` holds request bodies and the error taxonomy, `role` the redirect
//! map, `claims` token payload decoding, and `api` the HTTP transport behind
//! the [`AuthApi`] trait.

pub mod api;
pub mod claims;
pub mod role;
pub mod types;

pub use api::{AuthApi, HttpAuthApi};
pub use claims::{DecodedClaims, decode_claims};
pub use role::{Destination, Role, RoleSelector};
pub use types::{ApiReply, AuthError, LoginRequest, RegisterRequest};

// =============================================================================
// TEST HELPERS
// =============================================================================
