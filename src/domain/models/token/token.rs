//! JWT 클레임과 토큰 쌍

use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT 클레임
///
/// 액세스 토큰과 리프레시 토큰은 같은 구조를 쓰고 `token_type`으로 구분합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ID
    pub sub: String,
    /// 리프레시 세션 ID
    pub sid: String,
    pub roles: Vec<String>,
    pub auth_provider: AuthProvider,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// 액세스 토큰 만료까지 남은 시간 (초)
    pub expires_in: i64,
}

/// Redis에 저장되는 리프레시 세션 마커
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshSession {
    pub user_id: i64,
    pub session_id: String,
    pub auth_provider: AuthProvider,
    pub issued_at: i64,
}
