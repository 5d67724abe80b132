/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - auth::access::apply (access token 検証), http::apply (request id / trace / timeout)
 */
pub mod auth;
pub mod http;
