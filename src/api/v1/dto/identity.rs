/*
 * Responsibility
 * - 認証済み identity の response DTO
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub caller_id: i64,
    pub client_id: i64,
}
