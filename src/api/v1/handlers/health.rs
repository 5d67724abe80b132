/*
 * Responsibility
 * - GET /health (疎通用)
 * - access token の検証を通さない (app 側で v1 の外に置く)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
