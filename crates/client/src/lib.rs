//! `retailinv-client`
//!
//! **Responsibility:** the administrative client's session handling.
//!
//! This crate provides:
//! - Token persistence ([`TokenStore`])
//! - Login, registration and remote token validation ([`SessionClient`])
//! - The route-gating state machine ([`AuthorizationGuard`]) and the
//!   navigation layer that consumes it ([`Navigator`])
//! - Bearer-authenticated bindings for the store/user/product/inventory
//!   services ([`ApiClient`])
//!
//! The backend remains the authority; decoded token claims only pick a UI path.

pub mod api;
pub mod config;
pub mod error;
pub mod guard;
mod http;
pub mod navigator;
pub mod route;
pub mod session;
pub mod token_store;
pub mod types;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{SessionError, SessionResult};
pub use guard::{AuthorizationGuard, Decision, GuardState, SessionStatus};
pub use navigator::{Navigation, Navigator};
pub use route::Route;
pub use session::{SessionClient, TokenValidator};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::LoginResponse;
