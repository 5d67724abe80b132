//! Transport-level layers shared by every route (`/health` included).
//!
//! - `x-request-id`: generated when absent, echoed back on the response
//! - access log via `TraceLayer`
//! - body size cap
//! - whole-request deadline, always longer than the token authority timeout so
//!   a slow authority is answered by the gate (500), never by this layer (408)

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpPolicy {
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for HttpPolicy {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl HttpPolicy {
    /// Stretch the deadline to at least twice `upstream`.
    pub fn covering(self, upstream: Duration) -> Self {
        Self {
            request_timeout: self.request_timeout.max(upstream.saturating_mul(2)),
            ..self
        }
    }
}

fn status_for(err: BoxError) -> StatusCode {
    if err.is::<Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

pub fn apply(router: Router, policy: HttpPolicy) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(|err: BoxError| async move {
                status_for(err)
            }))
            .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id))
            .layer(RequestBodyLimitLayer::new(policy.body_limit_bytes))
            .layer(TimeoutLayer::new(policy.request_timeout))
            .layer(TraceLayer::new_for_http()),
    )
}
