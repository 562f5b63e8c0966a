//! # Authentication Configuration Module
//!
//! JWT 토큰, 이메일 인증, 소셜 로그인 제공자 관련 설정입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 이메일 인증 후 이메일/패스워드 가입
//! 2. **소셜 로그인**: 카카오, 네이버, 구글 액세스 토큰으로 사용자 정보 조회
//! 3. **JWT 토큰**: 액세스/리프레시 토큰 쌍, Redis 세션 마커로 리프레시 검증
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="1"
//! export JWT_REFRESH_EXPIRATION_DAYS="14"
//! export EMAIL_VERIFICATION_REQUIRED="true"
//! export KAKAO_USER_INFO_URL="https://kapi.kakao.com/v2/user/me"
//! ```

use std::env;
use std::fmt;
use serde::{Deserialize, Serialize};

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 액세스 토큰 만료 시간 (시간 단위, 기본 1시간)
    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1)
    }

    /// 리프레시 토큰 및 세션 마커 만료 시간 (일 단위, 기본 14일)
    pub fn refresh_expiration_days() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(14)
    }

    pub fn refresh_expiration_secs() -> u64 {
        (Self::refresh_expiration_days().max(1) * 24 * 3600) as u64
    }
}

/// 이메일 인증 코드 설정
pub struct VerificationConfig;

impl VerificationConfig {
    /// 인증 코드 유효 시간 (초)
    pub fn code_ttl_secs() -> u64 {
        env::var("EMAIL_CODE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300)
    }

    /// 인증 완료 표시 유효 시간 (초). 이 시간 안에 가입을 마쳐야 합니다.
    pub fn verified_ttl_secs() -> u64 {
        env::var("EMAIL_VERIFIED_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(1800)
    }

    /// 코드 하나당 허용하는 오입력 횟수. 넘으면 코드가 폐기됩니다.
    pub fn max_code_attempts() -> u64 {
        env::var("EMAIL_CODE_MAX_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(5)
    }

    pub fn email_verification_required() -> bool {
        env::var("EMAIL_VERIFICATION_REQUIRED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true)
    }
}

/// 소셜 로그인 제공자의 사용자 정보 엔드포인트
pub struct SocialConfig;

impl SocialConfig {
    pub fn kakao_user_info_url() -> String {
        env::var("KAKAO_USER_INFO_URL")
            .unwrap_or_else(|_| "https://kapi.kakao.com/v2/user/me".to_string())
    }

    pub fn naver_user_info_url() -> String {
        env::var("NAVER_USER_INFO_URL")
            .unwrap_or_else(|_| "https://openapi.naver.com/v1/nid/me".to_string())
    }

    pub fn google_user_info_url() -> String {
        env::var("GOOGLE_USER_INFO_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v3/userinfo".to_string())
    }

    pub fn request_timeout_secs() -> u64 {
        env::var("SOCIAL_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5)
    }
}

/// 인증 제공자
///
/// 데이터베이스의 `users.auth_provider` 컬럼과 JWT `auth_provider` 클레임에
/// 소문자 문자열로 저장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Local,
    Kakao,
    Naver,
    Google,
}

impl AuthProvider {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "kakao" => Ok(AuthProvider::Kakao),
            "naver" => Ok(AuthProvider::Naver),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Kakao => "kakao",
            AuthProvider::Naver => "naver",
            AuthProvider::Google => "google",
        }
    }

    pub fn is_social(&self) -> bool {
        !matches!(self, AuthProvider::Local)
    }
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AuthProvider {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_from_string() {
        assert_eq!(AuthProvider::from_str("local").unwrap(), AuthProvider::Local);
        assert_eq!(AuthProvider::from_str("kakao").unwrap(), AuthProvider::Kakao);
        assert_eq!(AuthProvider::from_str("naver").unwrap(), AuthProvider::Naver);
        assert_eq!(AuthProvider::from_str("GOOGLE").unwrap(), AuthProvider::Google);
        assert!(AuthProvider::from_str("github").is_err());
        assert!(AuthProvider::from_str("").is_err());
    }

    #[test]
    fn test_auth_provider_roundtrip() {
        for provider_str in ["local", "kakao", "naver", "google"] {
            let provider = AuthProvider::from_str(provider_str).unwrap();
            assert_eq!(provider.as_str(), provider_str);
            assert_eq!(provider.to_string(), provider_str);
        }
    }

    #[test]
    fn test_auth_provider_serialization() {
        let json = serde_json::to_string(&AuthProvider::Kakao).unwrap();
        assert_eq!(json, "\"kakao\"");

        let deserialized: AuthProvider = serde_json::from_str("\"naver\"").unwrap();
        assert_eq!(deserialized, AuthProvider::Naver);
    }

    #[test]
    fn test_only_local_is_not_social() {
        assert!(!AuthProvider::Local.is_social());
        assert!(AuthProvider::Kakao.is_social());
        assert!(AuthProvider::Naver.is_social());
        assert!(AuthProvider::Google.is_social());
    }

    #[test]
    fn test_refresh_expiration_secs_is_positive() {
        assert!(JwtConfig::refresh_expiration_secs() >= 24 * 3600);
    }
}
