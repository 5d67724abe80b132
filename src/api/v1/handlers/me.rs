/*
 * Responsibility
 * - GET /api/v1/me
 * - middleware が付与した identity header をそのまま返す (認証の疎通確認用)
 */
use axum::Json;

use crate::api::v1::{dto::identity::IdentityResponse, extractors::Identity};

pub async fn me(Identity(identity): Identity) -> Json<IdentityResponse> {
    Json(IdentityResponse {
        caller_id: identity.caller_id,
        client_id: identity.client_id,
    })
}
