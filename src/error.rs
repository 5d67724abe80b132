/*
 * Responsibility
 * - アプリ共通の RestError 定義 (bad_request / not_found / unauthorized / internal)
 * - 認可サーバとやり取りするエラー body ({message, status, code}) との相互変換
 * - IntoResponse 実装 (HTTP status / JSON error body)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CODE_BAD_REQUEST: &str = "bad_request";
pub const CODE_NOT_FOUND: &str = "not_found";
pub const CODE_UNAUTHORIZED: &str = "unauthorized_error";
pub const CODE_INTERNAL: &str = "internal_server_error";

/// Wire shape of an error record.
///
/// The same shape is returned to our own clients and received from the
/// token authority when it reports a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestErrorBody {
    pub message: String,
    pub status: i64,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestError {
    #[error("bad_request: {message}")]
    BadRequest { message: String },
    #[error("not_found: {message}")]
    NotFound { message: String },
    #[error("unauthorized_error: {message}")]
    Unauthorized { message: String },
    #[error("internal_server_error: {message}")]
    Internal { message: String },
    /// Error reported by the token authority that does not match one of the
    /// kinds above. Forwarded as-is.
    #[error("{code}: {message}")]
    Upstream {
        message: String,
        status: i64,
        code: String,
    },
}

impl RestError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Parse an error record from a JSON payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let body: RestErrorBody = serde_json::from_slice(bytes)?;
        Ok(body.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message }
            | Self::NotFound { message }
            | Self::Unauthorized { message }
            | Self::Internal { message }
            | Self::Upstream { message, .. } => message,
        }
    }

    pub fn status(&self) -> i64 {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST.as_u16().into(),
            Self::NotFound { .. } => StatusCode::NOT_FOUND.as_u16().into(),
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED.as_u16().into(),
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR.as_u16().into(),
            Self::Upstream { status, .. } => *status,
        }
    }

    /// `status()` as an HTTP status; anything outside 100..=999 becomes 500.
    pub fn http_status(&self) -> StatusCode {
        u16::try_from(self.status())
            .ok()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn code(&self) -> &str {
        match self {
            Self::BadRequest { .. } => CODE_BAD_REQUEST,
            Self::NotFound { .. } => CODE_NOT_FOUND,
            Self::Unauthorized { .. } => CODE_UNAUTHORIZED,
            Self::Internal { .. } => CODE_INTERNAL,
            Self::Upstream { code, .. } => code,
        }
    }

    pub fn to_body(&self) -> RestErrorBody {
        RestErrorBody {
            message: self.message().to_string(),
            status: self.status(),
            code: self.code().to_string(),
        }
    }
}

impl From<RestErrorBody> for RestError {
    fn from(body: RestErrorBody) -> Self {
        let RestErrorBody {
            message,
            status,
            code,
        } = body;

        match (status, code.as_str()) {
            (400, CODE_BAD_REQUEST) => Self::BadRequest { message },
            (404, CODE_NOT_FOUND) => Self::NotFound { message },
            (401, CODE_UNAUTHORIZED) => Self::Unauthorized { message },
            (500, CODE_INTERNAL) => Self::Internal { message },
            _ => Self::Upstream {
                message,
                status,
                code,
            },
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        // 認可サーバ由来の status が HTTP として不正な場合は 500 に倒す (body は元の値のまま)
        (self.http_status(), Json(self.to_body())).into_response()
    }
}
