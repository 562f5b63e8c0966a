//! User Entity Implementation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::config::AuthProvider;
use crate::domain::models::social::SocialProfile;

crate::impl_text_column!(AuthProvider);

/// 모든 사용자의 기본 역할
pub const ROLE_USER: &str = "user";
/// 학원을 등록한 사용자에게 부여되는 역할
pub const ROLE_ACADEMY: &str = "academy";
/// 강사 프로필을 등록한 사용자에게 부여되는 역할
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_ADMIN: &str = "admin";

/// 사용자 엔티티
///
/// 로컬 사용자는 `password_hash`를, 소셜 사용자는 `social_key`를 가집니다.
/// `deleted_at`이 설정된 사용자는 탈퇴한 것으로 간주하며 조회되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// 해시된 비밀번호 (소셜 사용자의 경우 None)
    pub password_hash: Option<String>,
    pub name: String,
    pub phone_number: Option<String>,
    pub auth_provider: AuthProvider,
    /// 제공자가 부여한 사용자 식별자
    pub social_key: Option<String>,
    pub roles: Vec<String>,
    pub profile_image_url: Option<String>,
    pub is_email_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_local(&self) -> bool {
        self.auth_provider == AuthProvider::Local
    }
}

/// 신규 사용자 삽입 데이터
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: Option<String>,
    pub name: String,
    pub phone_number: Option<String>,
    pub auth_provider: AuthProvider,
    pub social_key: Option<String>,
    pub profile_image_url: Option<String>,
    pub is_email_verified: bool,
}

impl NewUser {
    /// 로컬 사용자. 가입 전에 이메일 인증을 마쳤으므로 인증 완료 상태로 생성합니다.
    pub fn local(email: &str, name: &str, phone_number: Option<String>, password_hash: String) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password_hash: Some(password_hash),
            name: name.trim().to_string(),
            phone_number,
            auth_provider: AuthProvider::Local,
            social_key: None,
            profile_image_url: None,
            is_email_verified: true,
        }
    }

    /// 소셜 사용자. 제공자가 이메일을 주지 않으면 `{provider}_{key}@social.local` 형식의
    /// 대체 주소를 사용합니다.
    pub fn social(profile: &SocialProfile) -> Self {
        let email = profile
            .email
            .as_ref()
            .map(|e| e.trim().to_lowercase())
            .unwrap_or_else(|| format!("{}_{}@social.local", profile.provider.as_str(), profile.social_key));

        Self {
            email,
            password_hash: None,
            name: profile.name.clone().unwrap_or_else(|| "요기니".to_string()),
            phone_number: None,
            auth_provider: profile.provider,
            social_key: Some(profile.social_key.clone()),
            profile_image_url: profile.profile_image_url.clone(),
            is_email_verified: profile.email.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: Option<&str>) -> SocialProfile {
        SocialProfile {
            provider: AuthProvider::Kakao,
            social_key: "12345".to_string(),
            email: email.map(str::to_string),
            name: Some("김요가".to_string()),
            profile_image_url: None,
        }
    }

    #[test]
    fn test_new_local_user_normalizes_email() {
        let user = NewUser::local("  Yogi@Example.COM ", " 홍길동 ", None, "hash".to_string());
        assert_eq!(user.email, "yogi@example.com");
        assert_eq!(user.name, "홍길동");
        assert_eq!(user.auth_provider, AuthProvider::Local);
        assert!(user.is_email_verified);
    }

    #[test]
    fn test_new_social_user_with_email() {
        let user = NewUser::social(&profile(Some("Kim@Kakao.com")));
        assert_eq!(user.email, "kim@kakao.com");
        assert_eq!(user.social_key.as_deref(), Some("12345"));
        assert!(user.password_hash.is_none());
        assert!(user.is_email_verified);
    }

    #[test]
    fn test_new_social_user_without_email_uses_placeholder() {
        let user = NewUser::social(&profile(None));
        assert_eq!(user.email, "kakao_12345@social.local");
        assert!(!user.is_email_verified);
    }
}
