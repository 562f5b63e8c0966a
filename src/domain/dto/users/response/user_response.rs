use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::domain::entities::users::User;

/// 사용자 응답 DTO
///
/// 비밀번호 해시와 소셜 키 같은 내부 필드는 노출하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub auth_provider: AuthProvider,
    pub is_social_user: bool,
    pub roles: Vec<String>,
    pub profile_image_url: Option<String>,
    pub is_email_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            name,
            phone_number,
            auth_provider,
            roles,
            profile_image_url,
            is_email_verified,
            last_login_at,
            created_at,
            ..
        } = user;

        Self {
            id,
            email,
            name,
            phone_number,
            auth_provider,
            is_social_user: auth_provider.is_social(),
            roles,
            profile_image_url,
            is_email_verified,
            last_login_at,
            created_at,
        }
    }
}
