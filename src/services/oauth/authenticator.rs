/*
 * Responsibility
 * - access token id の検証 (header 掃除 → 抽出 → 認可サーバ問い合わせ → header 付与)
 * - 認可サーバの応答 (成功 / エラー / 不正 body / 無応答) を RestError に写像する
 *
 * Notes
 * - public / private の判定は呼び出し側 (middleware) の責務。ここでは再判定しない。
 * - ログは出さない。失敗はすべて戻り値で返す。
 */
use std::sync::Arc;

use axum::http::Request;

use super::client::AccessTokenLookup;
use super::request::{access_token_id, clean_request_headers, stamp_identity};
use super::types::AccessToken;
use crate::error::RestError;

#[derive(Clone)]
pub struct Authenticator {
    lookup: Arc<dyn AccessTokenLookup>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn new(lookup: Arc<dyn AccessTokenLookup>) -> Self {
        Self { lookup }
    }

    /// Authenticate a private request.
    ///
    /// On success `X-Caller-Id` / `X-Client-Id` are set from the resolved
    /// access token. On failure neither header is present afterwards.
    pub async fn authenticate_request<B>(
        &self,
        request: Option<&mut Request<B>>,
    ) -> Result<(), RestError> {
        let request = request.ok_or_else(|| RestError::bad_request("empty request"))?;

        clean_request_headers(Some(&mut *request));

        let token_id = access_token_id(request);
        if token_id.is_empty() {
            return Err(RestError::bad_request("invalid token id"));
        }

        let access_token = match self.get_access_token(&token_id).await {
            Ok(access_token) => access_token,
            // unknown token は client 側の誤りとして扱う
            Err(err) if err.status() == 404 => {
                return Err(RestError::bad_request("access token info not found"));
            }
            Err(err) => return Err(err),
        };

        stamp_identity(request, &access_token);
        Ok(())
    }

    async fn get_access_token(&self, token_id: &str) -> Result<AccessToken, RestError> {
        let response = self.lookup.get_access_token(token_id).await.map_err(|_| {
            RestError::internal(
                "invalid rest client response when trying to get the access token",
            )
        })?;

        if response.status > 299 {
            return Err(match RestError::from_bytes(&response.body) {
                Ok(err) => err,
                Err(_) if response.status == 404 => {
                    RestError::not_found("access token info not found")
                }
                Err(_) => RestError::internal("cannot unmarshal response"),
            });
        }

        serde_json::from_slice::<AccessToken>(&response.body)
            .map_err(|_| RestError::internal("cannot unmarshal result"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::services::oauth::client::{LookupError, LookupResponse};
    use crate::services::oauth::request::{caller_id, client_id};
    use crate::services::oauth::types::{HEADER_X_CALLER_ID, HEADER_X_CLIENT_ID};

    /// Canned authority: returns `response` (or a transport failure when None)
    /// and records every token id it was asked about.
    struct StubLookup {
        response: Option<LookupResponse>,
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl StubLookup {
        fn responding(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Some(LookupResponse {
                    status,
                    body: body.as_bytes().to_vec(),
                }),
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn unreachable() -> Arc<Self> {
            Arc::new(Self {
                response: None,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AccessTokenLookup for StubLookup {
        async fn get_access_token(
            &self,
            token_id: &str,
        ) -> Result<LookupResponse, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(token_id.to_string());
            self.response
                .clone()
                .ok_or_else(|| LookupError::InvalidUrl("unreachable".into()))
        }
    }

    fn request(uri: &str) -> Request<()> {
        Request::builder()
            .uri(uri)
            .header("X-Caller-Id", "999")
            .header("X-Client-Id", "888")
            .body(())
            .unwrap()
    }

    fn assert_no_identity(req: &Request<()>) {
        assert!(req.headers().get(HEADER_X_CALLER_ID).is_none());
        assert!(req.headers().get(HEADER_X_CLIENT_ID).is_none());
    }

    #[tokio::test]
    async fn missing_request_is_bad_request_without_lookup() {
        let lookup = StubLookup::responding(200, "{}");
        let auth = Authenticator::new(lookup.clone());

        let err = auth.authenticate_request::<()>(None).await.unwrap_err();

        assert_eq!(err, RestError::bad_request("empty request"));
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn blank_token_is_bad_request_without_lookup() {
        let lookup = StubLookup::responding(200, "{}");
        let auth = Authenticator::new(lookup.clone());

        for uri in ["/", "/?access_token=", "/?access_token=%20%20", "/?foo=bar"] {
            let mut req = request(uri);
            let err = auth.authenticate_request(Some(&mut req)).await.unwrap_err();

            assert_eq!(err.status(), 400, "{uri}");
            assert_eq!(err.code(), "bad_request");
            assert_no_identity(&req);
        }
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn success_stamps_identity_headers() {
        let lookup = StubLookup::responding(200, r#"{"id":"abc","user_id":42,"client_id":7}"#);
        let auth = Authenticator::new(lookup.clone());
        let mut req = request("/resource?access_token=%20abc%20");

        auth.authenticate_request(Some(&mut req)).await.unwrap();

        assert_eq!(req.headers()[HEADER_X_CALLER_ID], "42");
        assert_eq!(req.headers()[HEADER_X_CLIENT_ID], "7");
        assert_eq!(caller_id(Some(&req)), 42);
        assert_eq!(client_id(Some(&req)), 7);
        assert_eq!(*lookup.seen.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[tokio::test]
    async fn not_found_is_presented_as_bad_request() {
        let body = r#"{"message":"no such token","status":404,"code":"not_found"}"#;
        let auth = Authenticator::new(StubLookup::responding(404, body));
        let mut req = request("/?access_token=abc");

        let err = auth.authenticate_request(Some(&mut req)).await.unwrap_err();

        assert_eq!(err, RestError::bad_request("access token info not found"));
        assert_no_identity(&req);
    }

    #[tokio::test]
    async fn not_found_without_body_is_still_bad_request() {
        let auth = Authenticator::new(StubLookup::responding(404, ""));
        let mut req = request("/?access_token=abc");

        let err = auth.authenticate_request(Some(&mut req)).await.unwrap_err();

        assert_eq!(err.status(), 400);
        assert_eq!(err.code(), "bad_request");
    }

    #[tokio::test]
    async fn remote_error_is_forwarded_unchanged() {
        let body = r#"{"message":"boom","status":500,"code":"internal_server_error"}"#;
        let auth = Authenticator::new(StubLookup::responding(500, body));
        let mut req = request("/?access_token=abc");

        let err = auth.authenticate_request(Some(&mut req)).await.unwrap_err();

        assert_eq!(err.status(), 500);
        assert_eq!(err.code(), "internal_server_error");
        assert_eq!(err.message(), "boom");
        assert_no_identity(&req);
    }

    #[tokio::test]
    async fn remote_unauthorized_is_forwarded_unchanged() {
        let body = r#"{"message":"token expired","status":401,"code":"unauthorized_error"}"#;
        let auth = Authenticator::new(StubLookup::responding(401, body));
        let mut req = request("/?access_token=abc");

        let err = auth.authenticate_request(Some(&mut req)).await.unwrap_err();

        assert_eq!(err, RestError::unauthorized("token expired"));
    }

    #[tokio::test]
    async fn remote_status_outside_http_range_is_forwarded() {
        let body = r#"{"message":"odd","status":-1,"code":"weird"}"#;
        let auth = Authenticator::new(StubLookup::responding(502, body));
        let mut req = request("/?access_token=abc");

        let err = auth.authenticate_request(Some(&mut req)).await.unwrap_err();

        assert_eq!(err.status(), -1);
        assert_eq!(err.code(), "weird");
        assert_eq!(err.message(), "odd");
    }

    #[tokio::test]
    async fn malformed_error_body_is_internal() {
        let auth = Authenticator::new(StubLookup::responding(503, "<html>down</html>"));
        let mut req = request("/?access_token=abc");

        let err = auth.authenticate_request(Some(&mut req)).await.unwrap_err();

        assert_eq!(err, RestError::internal("cannot unmarshal response"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_internal() {
        let auth = Authenticator::new(StubLookup::responding(200, r#"{"id":"abc"}"#));
        let mut req = request("/?access_token=abc");

        let err = auth.authenticate_request(Some(&mut req)).await.unwrap_err();

        assert_eq!(err, RestError::internal("cannot unmarshal result"));
        assert_no_identity(&req);
    }

    #[tokio::test]
    async fn transport_failure_is_internal() {
        let lookup = StubLookup::unreachable();
        let auth = Authenticator::new(lookup.clone());
        let mut req = request("/?access_token=abc");

        let err = auth.authenticate_request(Some(&mut req)).await.unwrap_err();

        assert_eq!(err.status(), 500);
        assert_eq!(err.code(), "internal_server_error");
        assert_eq!(lookup.calls(), 1);
        assert_no_identity(&req);
    }
}
