/*
 * Responsibility
 * - リクエストの分類 (public / private) と identity header の読み書き
 * - I/O は持たない (header / query だけを見る純粋関数)
 *
 * Notes
 * - caller_id / client_id は「認証済みの文脈」でのみ意味を持つ accessor。
 *   header が無い・数値でない場合はエラーにせず 0 を返す。
 */
use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};

use super::types::{
    AccessToken, HEADER_X_CALLER_ID, HEADER_X_CLIENT_ID, HEADER_X_PUBLIC, PARAM_ACCESS_TOKEN,
};

/// `X-Public: true` (exact match) のリクエストは認証不要。
///
/// Request が無い場合も public 扱い。
pub fn is_public<B>(request: Option<&Request<B>>) -> bool {
    let Some(request) = request else {
        return true;
    };

    request
        .headers()
        .get(HEADER_X_PUBLIC)
        .is_some_and(|v| v == "true")
}

/// Caller (user) id stamped by a successful authentication, or 0.
pub fn caller_id<B>(request: Option<&Request<B>>) -> i64 {
    request.map_or(0, |r| caller_id_from_headers(r.headers()))
}

/// Client id stamped by a successful authentication, or 0.
pub fn client_id<B>(request: Option<&Request<B>>) -> i64 {
    request.map_or(0, |r| client_id_from_headers(r.headers()))
}

pub fn caller_id_from_headers(headers: &HeaderMap) -> i64 {
    header_i64(headers, HEADER_X_CALLER_ID)
}

pub fn client_id_from_headers(headers: &HeaderMap) -> i64 {
    header_i64(headers, HEADER_X_CLIENT_ID)
}

fn header_i64(headers: &HeaderMap, name: &str) -> i64 {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0)
}

/// Caller が identity header を偽装できないよう、処理の最初に必ず削除する。
pub fn clean_request_headers<B>(request: Option<&mut Request<B>>) {
    let Some(request) = request else {
        return;
    };

    let headers = request.headers_mut();
    headers.remove(HEADER_X_CALLER_ID);
    headers.remove(HEADER_X_CLIENT_ID);
}

/// `?access_token=` の値 (trim 済み)。無ければ空文字。
pub fn access_token_id<B>(request: &Request<B>) -> String {
    request
        .uri()
        .query()
        .and_then(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == PARAM_ACCESS_TOKEN)
                .map(|(_, value)| value.trim().to_string())
        })
        .unwrap_or_default()
}

/// 検証済みの AccessToken から identity header を付与する。
pub fn stamp_identity<B>(request: &mut Request<B>, access_token: &AccessToken) {
    let headers = request.headers_mut();
    headers.insert(
        HeaderName::from_static(HEADER_X_CLIENT_ID),
        HeaderValue::from(access_token.client_id),
    );
    headers.insert(
        HeaderName::from_static(HEADER_X_CALLER_ID),
        HeaderValue::from(access_token.user_id),
    );
}
