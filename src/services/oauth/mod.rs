pub mod authenticator;
pub mod client;
pub mod factory;
pub mod request;
pub mod types;

pub use authenticator::Authenticator;
pub use client::{AccessTokenLookup, HttpAccessTokenClient, LookupError, LookupResponse, OAuthConfig};
pub use factory::build_authenticator;
pub use request::{caller_id, clean_request_headers, client_id, is_public};
pub use types::AccessToken;
