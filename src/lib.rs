//! Access-token gate for HTTP services.
//!
//! Private requests carry an `access_token` query parameter which is resolved
//! against a remote token authority; on success the verified `X-Caller-Id` and
//! `X-Client-Id` headers are stamped onto the request for downstream handlers.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

pub use error::RestError;
pub use services::oauth::{Authenticator, caller_id, client_id, is_public};
