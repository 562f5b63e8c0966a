use serde::Serialize;
use crate::domain::dto::users::UserResponse;
use crate::domain::models::token::TokenPair;

/// 가입/로그인 응답: 사용자 정보와 토큰 쌍
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
    /// 소셜 로그인으로 이번에 새로 가입되었는지 여부
    pub is_new_user: bool,
}
