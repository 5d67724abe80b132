/*!
 * Authenticated identity extractor
 *
 * Responsibility:
 * - 認証済みリクエストの identity (caller_id / client_id) を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - AuthIdentity
 * - Identity
 */

mod core;
mod types;

pub use core::Identity;
pub use types::AuthIdentity;
