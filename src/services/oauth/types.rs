/*
 * Responsibility
 * - 認可サーバが返す access token 情報 (AccessToken) の型
 * - 検証済みリクエストに付与する identity header 名の定義
 */
use serde::Deserialize;

pub const HEADER_X_PUBLIC: &str = "x-public";
pub const HEADER_X_CLIENT_ID: &str = "x-client-id";
pub const HEADER_X_CALLER_ID: &str = "x-caller-id";

pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// Access grant resolved from a token id.
///
/// - `user_id` becomes `X-Caller-Id`
/// - `client_id` becomes `X-Client-Id`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccessToken {
    pub id: String,
    pub user_id: i64,
    pub client_id: i64,
}
