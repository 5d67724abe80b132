/*
 * Responsibility
 * - Handler から見える「認証済み identity」の型
 * - middleware が検証して header に載せ、handler はこの型だけを受け取る
 */

/// 認証済みのリクエストに付与される identity
///
/// - `caller_id` は access token の user_id (X-Caller-Id)
/// - `client_id` は access token を発行した client (X-Client-Id)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthIdentity {
    pub caller_id: i64,
    pub client_id: i64,
}
