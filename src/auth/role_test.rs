use super::*;

// =============================================================================
// Role::from_claim
// =============================================================================

#[test]
fn from_claim_known_roles() {
    assert_eq!(Role::from_claim("Admin"), Some(Role::Admin));
    assert_eq!(Role::from_claim("Client"), Some(Role::Client));
    assert_eq!(Role::from_claim("Freelancer"), Some(Role::Freelancer));
}

#[test]
fn from_claim_normal_is_client() {
    assert_eq!(Role::from_claim("normal"), Some(Role::Client));
}

#[test]
fn from_claim_is_case_sensitive() {
    assert_eq!(Role::from_claim("admin"), None);
    assert_eq!(Role::from_claim("FREELANCER"), None);
}

#[test]
fn from_claim_unknown_is_none() {
    assert_eq!(Role::from_claim(""), None);
    assert_eq!(Role::from_claim("Moderator"), None);
}

// =============================================================================
// Destination
// =============================================================================

#[test]
fn redirect_map_paths() {
    assert_eq!(Destination::for_role(Some(Role::Admin)).path(), "/admin/");
    assert_eq!(Destination::for_role(Some(Role::Client)).path(), "/user/");
    assert_eq!(Destination::for_role(Some(Role::Freelancer)).path(), "/freelancer/");
    assert_eq!(Destination::for_role(None).path(), "/");
}

#[test]
fn destination_display_is_path() {
    assert_eq!(Destination::Freelancer.to_string(), "/freelancer/");
}

// =============================================================================
// RoleSelector
// =============================================================================

#[test]
fn selector_defaults_to_client() {
    assert_eq!(RoleSelector::default(), RoleSelector::Client);
}

#[test]
fn selector_serializes_as_integer() {
    assert_eq!(serde_json::to_string(&RoleSelector::Client).unwrap(), "0");
    assert_eq!(serde_json::to_string(&RoleSelector::Freelancer).unwrap(), "1");
}

#[test]
fn selector_rejects_unknown_code() {
    let err = serde_json::from_str::<RoleSelector>("7").unwrap_err();
    assert!(err.to_string().contains("unknown role selector: 7"));
}

#[test]
fn selector_parses_known_code() {
    assert_eq!(serde_json::from_str::<RoleSelector>("1").unwrap(), RoleSelector::Freelancer);
}
