use super::*;
use crate::auth::role::{Destination, RoleSelector};
use crate::auth::test_helpers::token_for_role;
use crate::flow::CredentialFlow;
use crate::session::{MemorySessionStore, SessionStore};
use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

// =============================================================================
// endpoint / parse_reply
// =============================================================================

#[test]
fn endpoint_joins_without_double_slash() {
    assert_eq!(endpoint("https://api.test/", LOGIN_PATH), "https://api.test/api/Auth/login");
    assert_eq!(endpoint("https://api.test", REGISTER_PATH), "https://api.test/api/Auth/register");
}

#[test]
fn parse_reply_reads_token_and_message() {
    let reply = parse_reply(200, r#"{"token":"abc","message":"ok","extra":1}"#);
    assert_eq!(reply, ApiReply { status: 200, token: Some("abc".into()), message: Some("ok".into()) });
}

#[test]
fn parse_reply_tolerates_non_json_body() {
    let reply = parse_reply(500, "<html>Internal Server Error</html>");
    assert_eq!(reply, ApiReply { status: 500, token: None, message: None });
    let reply = parse_reply(200, "");
    assert_eq!(reply, ApiReply { status: 200, token: None, message: None });
}

#[test]
fn parse_reply_null_fields_are_none() {
    let reply = parse_reply(401, r#"{"token":null,"message":null}"#);
    assert_eq!(reply.token, None);
    assert_eq!(reply.message, None);
}

#[test]
fn parse_reply_keeps_token_when_message_is_an_object() {
    let body = json!({ "token": "h.p.s", "message": { "text": "welcome" } }).to_string();
    let reply = parse_reply(200, &body);
    assert_eq!(reply.token.as_deref(), Some("h.p.s"));
    assert_eq!(reply.message, None);
}

#[test]
fn parse_reply_keeps_message_when_token_is_not_a_string() {
    let reply = parse_reply(401, r#"{"token":false,"message":"Account locked."}"#);
    assert_eq!(reply.token, None);
    assert_eq!(reply.message.as_deref(), Some("Account locked."));
    let reply = parse_reply(200, r#"{"token":"abc","message":42}"#);
    assert_eq!(reply.token.as_deref(), Some("abc"));
    assert_eq!(reply.message, None);
}

#[test]
fn parse_reply_non_object_json_yields_nothing() {
    let reply = parse_reply(200, r#"["token","abc"]"#);
    assert_eq!(reply, ApiReply { status: 200, token: None, message: None });
}

// =============================================================================
// HttpAuthApi against an in-process server
// =============================================================================

type Seen = Arc<Mutex<Vec<Value>>>;

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    format!("http://{addr}")
}

fn recording_route(seen: &Seen, status: StatusCode, reply: Value) -> axum::routing::MethodRouter {
    let seen = seen.clone();
    post(move |Json(body): Json<Value>| {
        let seen = seen.clone();
        let reply = reply.clone();
        async move {
            seen.lock().expect("seen mutex should lock").push(body);
            (status, Json(reply))
        }
    })
}

fn api_for(base_url: &str) -> HttpAuthApi {
    let config = ClientConfig::default().with_base_url(base_url).expect("valid base url");
    HttpAuthApi::new(&config).expect("client should build")
}

#[tokio::test]
async fn login_posts_json_body_and_reads_token() {
    let seen = Seen::default();
    let router = Router::new().route(LOGIN_PATH, recording_route(&seen, StatusCode::OK, json!({ "token": "t.k.n" })));
    let api = api_for(&spawn_server(router).await);

    let reply = api.login(&LoginRequest::new("a@b.com", "x")).await.unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.token.as_deref(), Some("t.k.n"));
    let seen = seen.lock().unwrap();
    assert_eq!(seen.as_slice(), &[json!({ "email": "a@b.com", "password": "x" })]);
}

#[tokio::test]
async fn login_non_success_is_an_ok_reply() {
    let seen = Seen::default();
    let router = Router::new().route(
        LOGIN_PATH,
        recording_route(&seen, StatusCode::UNAUTHORIZED, json!({ "message": "Invalid email or password." })),
    );
    let api = api_for(&spawn_server(router).await);

    let reply = api.login(&LoginRequest::new("a@b.com", "bad")).await.unwrap();

    assert_eq!(reply.status, 401);
    assert!(!reply.is_success());
    assert_eq!(reply.message.as_deref(), Some("Invalid email or password."));
}

#[tokio::test]
async fn register_posts_all_fields() {
    let seen = Seen::default();
    let router = Router::new().route(REGISTER_PATH, recording_route(&seen, StatusCode::OK, json!({})));
    let api = api_for(&spawn_server(router).await);
    let request = RegisterRequest {
        full_name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        password: "pw".into(),
        confirm_password: "pw".into(),
        role: RoleSelector::Client,
    };

    let reply = api.register(&request).await.unwrap();

    assert!(reply.is_success());
    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.as_slice(),
        &[json!({
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "password": "pw",
            "confirmPassword": "pw",
            "role": 0
        })]
    );
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let api = api_for(&format!("http://{addr}"));

    let err = api.login(&LoginRequest::new("a@b.com", "x")).await.unwrap_err();
    assert!(matches!(err, AuthError::Transport(_)));
}

#[tokio::test]
async fn login_with_structured_message_still_redirects() {
    let seen = Seen::default();
    let token = token_for_role("Admin");
    let router = Router::new().route(
        LOGIN_PATH,
        recording_route(&seen, StatusCode::OK, json!({ "token": token.as_str(), "message": { "code": "ok" } })),
    );
    let api = Arc::new(api_for(&spawn_server(router).await));
    let session = Arc::new(MemorySessionStore::new());
    let flow = CredentialFlow::new(api, session.clone());

    let dest = flow.login(&LoginRequest::new("root@b.com", "pw")).await.unwrap();

    assert_eq!(dest, Destination::Admin);
    assert_eq!(session.get().unwrap(), Some(token));
}
