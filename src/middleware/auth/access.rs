//! access token 検証 → X-Caller-Id / X-Client-Id を request header に載せる
//!
//! - `X-Public: true` のリクエストは検証しない (偽装された identity header だけ落とす)
//! - それ以外は `Authenticator::authenticate_request` を通し、失敗はそのまま RestError で返す
//! - handler 側は `Identity` extractor で header を読む

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::RestError;
use crate::services::oauth::{clean_request_headers, is_public};
use crate::state::AppState;

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, RestError> {
    if is_public(Some(&req)) {
        clean_request_headers(Some(&mut req));
        return Ok(next.run(req).await);
    }

    if let Err(err) = state.auth.authenticate_request(Some(&mut req)).await {
        tracing::warn!(
            status = err.status(),
            code = err.code(),
            error = %err,
            path = %req.uri().path(),
            "access token verification failed"
        );
        return Err(err);
    }

    Ok(next.run(req).await)
}
