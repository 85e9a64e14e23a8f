//! Taskera client auth — sign-in, sign-up and role redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! The marketplace's sign-in, sign-up and combined auth screens all submit
//! credentials to the remote auth API, keep the returned token, and redirect
//! by the role claim inside it. `flow` implements that sequence once;
//! `screen` holds the per-screen view state that drives it.

pub mod auth;
pub mod config;
pub mod flow;
pub mod screen;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use flow::CredentialFlow;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
