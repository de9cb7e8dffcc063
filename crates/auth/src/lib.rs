//! `retailinv-auth`: client-side authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage. Nothing here
//! verifies a signature: decoded claims are a routing hint, and the server
//! remains the only trust boundary.

pub mod authorize;
pub mod claims;
pub mod codec;
pub mod roles;
pub mod user;

pub use authorize::{Access, AuthzError, authorize};
pub use claims::{Claims, TokenValidationError, check_time_window};
pub use codec::decode;
pub use roles::{ParseRoleError, Role};
pub use user::{Credentials, RegistrationRequest, UserAccount};
