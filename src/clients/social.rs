//! # 소셜 로그인 사용자 정보 조회
//!
//! 클라이언트(앱/웹)가 제공자 SDK로 받은 액세스 토큰을 각 제공자의 사용자 정보
//! API에 전달해 프로필을 얻습니다. 인가 코드 교환은 클라이언트가 담당합니다.
//!
//! ```text
//! 클라이언트 ── provider access_token ──► POST /api/v1/auth/social/{provider}
//!                                              │
//!                                              ▼
//!                                   GET {user_info_url} (Bearer)
//!                                              │
//!                                              ▼
//!                                   SocialProfile { provider, social_key, .. }
//! ```

use async_trait::async_trait;
use serde_json::Value;
use crate::config::{AuthProvider, SocialConfig};
use crate::core::errors::{AppError, AppResult};
use crate::domain::models::social::SocialProfile;

#[async_trait]
pub trait SocialProvider: Send + Sync {
    fn provider(&self) -> AuthProvider;

    async fn fetch_profile(&self, http: &reqwest::Client, access_token: &str) -> AppResult<SocialProfile>;
}

pub struct KakaoProvider {
    user_info_url: String,
}

pub struct NaverProvider {
    user_info_url: String,
}

pub struct GoogleProvider {
    user_info_url: String,
}

#[async_trait]
impl SocialProvider for KakaoProvider {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Kakao
    }

    async fn fetch_profile(&self, http: &reqwest::Client, access_token: &str) -> AppResult<SocialProfile> {
        let body = get_user_info(http, &self.user_info_url, access_token, self.provider()).await?;
        parse_kakao_profile(&body)
    }
}

#[async_trait]
impl SocialProvider for NaverProvider {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Naver
    }

    async fn fetch_profile(&self, http: &reqwest::Client, access_token: &str) -> AppResult<SocialProfile> {
        let body = get_user_info(http, &self.user_info_url, access_token, self.provider()).await?;
        parse_naver_profile(&body)
    }
}

#[async_trait]
impl SocialProvider for GoogleProvider {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Google
    }

    async fn fetch_profile(&self, http: &reqwest::Client, access_token: &str) -> AppResult<SocialProfile> {
        let body = get_user_info(http, &self.user_info_url, access_token, self.provider()).await?;
        parse_google_profile(&body)
    }
}

pub struct SocialClient {
    http: reqwest::Client,
    providers: Vec<Box<dyn SocialProvider>>,
}

crate::register_service!(SocialClient, SocialClient::from_env);

impl SocialClient {
    pub fn from_env() -> Self {
        Self {
            http: super::http_client(SocialConfig::request_timeout_secs()),
            providers: vec![
                Box::new(KakaoProvider { user_info_url: SocialConfig::kakao_user_info_url() }),
                Box::new(NaverProvider { user_info_url: SocialConfig::naver_user_info_url() }),
                Box::new(GoogleProvider { user_info_url: SocialConfig::google_user_info_url() }),
            ],
        }
    }

    /// 제공자 액세스 토큰으로 사용자 프로필을 조회합니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - `local` 등 소셜 제공자가 아닌 경우
    /// * `AuthenticationError` - 제공자가 토큰을 거부한 경우 (401/403)
    /// * `ExternalServiceError` - 통신 실패 또는 응답 형식 오류
    pub async fn fetch_profile(&self, provider: AuthProvider, access_token: &str) -> AppResult<SocialProfile> {
        let handler = self
            .providers
            .iter()
            .find(|p| p.provider() == provider)
            .ok_or_else(|| AppError::ValidationError(format!("지원하지 않는 소셜 로그인입니다: {}", provider)))?;

        handler.fetch_profile(&self.http, access_token).await
    }
}

async fn get_user_info(
    http: &reqwest::Client,
    url: &str,
    access_token: &str,
    provider: AuthProvider,
) -> AppResult<Value> {
    let response = http
        .get(url)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 요청 실패: {}", provider, e)))?;

    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        log::warn!("{} 액세스 토큰 거부됨 - status: {}", provider, status);
        return Err(AppError::AuthenticationError("소셜 액세스 토큰이 유효하지 않습니다".to_string()));
    }
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalServiceError(format!(
            "{} 사용자 정보 조회 실패: {} {}",
            provider, status, error_text
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 파싱 실패: {}", provider, e)))
}

fn string_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn missing_id(provider: AuthProvider) -> AppError {
    AppError::ExternalServiceError(format!("{} 응답에 사용자 식별자가 없습니다", provider))
}

/// `{"id": 123, "kakao_account": {"email", "profile": {"nickname", "profile_image_url"}}}`
pub fn parse_kakao_profile(body: &Value) -> AppResult<SocialProfile> {
    let social_key = match body.get("id") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return Err(missing_id(AuthProvider::Kakao)),
    };

    Ok(SocialProfile {
        provider: AuthProvider::Kakao,
        social_key,
        email: string_at(body, "/kakao_account/email"),
        name: string_at(body, "/kakao_account/profile/nickname"),
        profile_image_url: string_at(body, "/kakao_account/profile/profile_image_url"),
    })
}

/// `{"resultcode": "00", "response": {"id", "email", "name", "profile_image"}}`
pub fn parse_naver_profile(body: &Value) -> AppResult<SocialProfile> {
    let result_code = body.get("resultcode").and_then(Value::as_str).unwrap_or_default();
    if result_code != "00" {
        let message = body.get("message").and_then(Value::as_str).unwrap_or("unknown");
        return Err(AppError::AuthenticationError(format!("네이버 인증 실패: {}", message)));
    }

    Ok(SocialProfile {
        provider: AuthProvider::Naver,
        social_key: string_at(body, "/response/id").ok_or_else(|| missing_id(AuthProvider::Naver))?,
        email: string_at(body, "/response/email"),
        name: string_at(body, "/response/name").or_else(|| string_at(body, "/response/nickname")),
        profile_image_url: string_at(body, "/response/profile_image"),
    })
}

/// OpenID userinfo(`sub`) 또는 v2 userinfo(`id`) 응답
pub fn parse_google_profile(body: &Value) -> AppResult<SocialProfile> {
    let social_key = string_at(body, "/sub")
        .or_else(|| string_at(body, "/id"))
        .ok_or_else(|| missing_id(AuthProvider::Google))?;

    Ok(SocialProfile {
        provider: AuthProvider::Google,
        social_key,
        email: string_at(body, "/email"),
        name: string_at(body, "/name"),
        profile_image_url: string_at(body, "/picture"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_kakao_profile() {
        let body = json!({
            "id": 3141592653u64,
            "kakao_account": {
                "email": "yogi@kakao.com",
                "profile": { "nickname": "요기", "profile_image_url": "http://k.kakaocdn.net/p.jpg" }
            }
        });

        let profile = parse_kakao_profile(&body).unwrap();
        assert_eq!(profile.provider, AuthProvider::Kakao);
        assert_eq!(profile.social_key, "3141592653");
        assert_eq!(profile.email.as_deref(), Some("yogi@kakao.com"));
        assert_eq!(profile.name.as_deref(), Some("요기"));
    }

    #[test]
    fn test_parse_kakao_profile_without_consent_fields() {
        let profile = parse_kakao_profile(&json!({ "id": 7 })).unwrap();
        assert_eq!(profile.social_key, "7");
        assert!(profile.email.is_none());
        assert!(profile.name.is_none());

        assert!(parse_kakao_profile(&json!({ "kakao_account": {} })).is_err());
    }

    #[test]
    fn test_parse_naver_profile() {
        let body = json!({
            "resultcode": "00",
            "message": "success",
            "response": { "id": "abcDEF", "email": "yogi@naver.com", "name": "김요가", "profile_image": "" }
        });

        let profile = parse_naver_profile(&body).unwrap();
        assert_eq!(profile.social_key, "abcDEF");
        assert_eq!(profile.name.as_deref(), Some("김요가"));
        assert!(profile.profile_image_url.is_none());
    }

    #[test]
    fn test_parse_naver_profile_rejects_failed_result() {
        let body = json!({ "resultcode": "024", "message": "Authentication failed" });
        let err = parse_naver_profile(&body).unwrap_err();
        assert!(matches!(err, AppError::AuthenticationError(_)));
    }

    #[test]
    fn test_parse_google_profile_accepts_sub_or_id() {
        let openid = json!({ "sub": "1098", "email": "yogi@gmail.com", "name": "Yogi", "picture": "https://lh3/p" });
        assert_eq!(parse_google_profile(&openid).unwrap().social_key, "1098");

        let v2 = json!({ "id": "2200", "email": "yogi@gmail.com" });
        assert_eq!(parse_google_profile(&v2).unwrap().social_key, "2200");

        assert!(parse_google_profile(&json!({ "email": "x@y.z" })).is_err());
    }
}
