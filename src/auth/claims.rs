//! Token payload decoding.
//!
//! The token is a three-part `header.payload.signature` string. Only the
//! payload is read; signatures are the API's concern, not the client's.
//! Claims are never stored, callers re-decode from the session token.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::{Map, Value};

use super::role::{Destination, Role};
use super::types::AuthError;

pub const ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";
const EMAIL_CONFIRMED_CLAIM: &str = "email_confirmed";
const EMAIL_CLAIM: &str = "email";
const USER_ROLE_CLAIM: &str = "user_role";

/// Claims the client cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedClaims {
    /// Raw role claim, if present.
    pub role: Option<String>,
    pub email_confirmed: bool,
    pub email: Option<String>,
    pub user_role: Option<String>,
}

impl DecodedClaims {
    /// Parsed role; `None` for a missing or unrecognized claim.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(Role::from_claim)
    }

    #[must_use]
    pub fn destination(&self) -> Destination {
        Destination::for_role(self.role())
    }
}

/// Decode the payload segment of `token`.
///
/// # Errors
///
/// Returns [`AuthError::Decode`] if the payload segment is missing, is not
/// base64url, or is not a JSON object.
pub fn decode_claims(token: &str) -> Result<DecodedClaims, AuthError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AuthError::Decode("missing payload segment".into()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::Decode(format!("payload is not base64url: {e}")))?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| AuthError::Decode(format!("payload is not JSON: {e}")))?;
    let Value::Object(map) = value else {
        return Err(AuthError::Decode("payload is not a JSON object".into()));
    };

    Ok(DecodedClaims {
        role: claim_string(&map, ROLE_CLAIM),
        email_confirmed: claim_bool(&map, EMAIL_CONFIRMED_CLAIM),
        email: claim_string(&map, EMAIL_CLAIM),
        user_role: claim_string(&map, USER_ROLE_CLAIM),
    })
}

/// String claim. Multi-valued claims arrive as arrays; the first string wins.
fn claim_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(|v| v.as_str().map(str::to_owned)),
        _ => None,
    }
}

/// Boolean claim sent either as a JSON bool or as `"true"`/`"True"`.
fn claim_bool(map: &Map<String, Value>, key: &str) -> bool {
    match map.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

#[cfg(test)]
#[path = "claims_test.rs"]
mod tests;
