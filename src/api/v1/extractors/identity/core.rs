use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::RestError;
use crate::services::oauth::request::{caller_id_from_headers, client_id_from_headers};
use crate::services::oauth::types::HEADER_X_CALLER_ID;

use super::AuthIdentity;

/// Handler で AuthIdentity を受け取るための extractor
/// middleware が X-Caller-Id を付与済みである前提
/// 見つからない場合は 401 を返す（public リクエスト・ミドルウェア未設定）
pub struct Identity(pub AuthIdentity);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(HEADER_X_CALLER_ID) {
            return Err(RestError::unauthorized("request is not authenticated"));
        }

        Ok(Identity(AuthIdentity {
            caller_id: caller_id_from_headers(&parts.headers),
            client_id: client_id_from_headers(&parts.headers),
        }))
    }
}
