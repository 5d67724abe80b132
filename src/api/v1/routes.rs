/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - access token の検証 (middleware::auth::access) は app 側で v1 全体に掛ける
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::me::me;

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(me))
}
