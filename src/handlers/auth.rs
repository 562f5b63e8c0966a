//! Authentication HTTP Handlers
//!
//! - **이메일 인증**: 6자리 코드 발송/확인 (`POST /auth/email/code`, `/auth/email/verify`)
//! - **로컬 인증**: 가입, 로그인 (`POST /auth/signup`, `/auth/login`)
//! - **소셜 인증**: 제공자 액세스 토큰 교환 (`POST /auth/social/{provider}`)
//! - **세션**: 토큰 갱신, 로그아웃 (`POST /auth/refresh`, `/auth/logout`)
//!
//! 가입/로그인/갱신은 모두 같은 [`AuthResponse`](crate::domain::dto::tokens::AuthResponse)를 반환합니다.

use actix_web::{post, web, HttpResponse};
use serde_json::json;
use validator::Validate;
use crate::config::AuthProvider;
use crate::core::errors::AppError;
use crate::domain::dto::tokens::RefreshTokenRequest;
use crate::domain::dto::users::{
    LoginRequest, SendEmailCodeRequest, SignupRequest, SocialLoginRequest, VerifyEmailCodeRequest,
};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::AuthService;

/// 이메일 인증 코드 발송
///
/// # Endpoint
/// `POST /auth/email/code`
#[post("/email/code")]
pub async fn send_email_code(payload: web::Json<SendEmailCodeRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    AuthService::instance().send_email_code(&payload.email).await?;
    Ok(HttpResponse::Accepted().json(json!({ "message": "인증 코드를 발송했습니다" })))
}

/// 이메일 인증 코드 확인
///
/// 성공하면 일정 시간 동안 해당 이메일로 가입할 수 있습니다.
#[post("/email/verify")]
pub async fn verify_email_code(payload: web::Json<VerifyEmailCodeRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    AuthService::instance().verify_email_code(&payload.email, &payload.code).await?;
    Ok(HttpResponse::Ok().json(json!({ "verified": true })))
}

/// 로컬 회원가입
///
/// # Endpoint
/// `POST /auth/signup`
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/signup \
///   -H "Content-Type: application/json" \
///   -d '{"email":"yogi@example.com","password":"Namaste123!","password_confirm":"Namaste123!","name":"김요가"}'
/// ```
#[post("/signup")]
pub async fn signup(payload: web::Json<SignupRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance().signup(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
pub async fn login(payload: web::Json<LoginRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance().login(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 소셜 로그인
///
/// `provider`는 `kakao`, `naver`, `google` 중 하나입니다. 첫 로그인이면 사용자를 만들고
/// 응답의 `is_new_user`가 `true`입니다.
#[post("/social/{provider}")]
pub async fn social_login(
    provider: web::Path<String>,
    payload: web::Json<SocialLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let provider = AuthProvider::from_str(&provider)
        .ok()
        .filter(AuthProvider::is_social)
        .ok_or_else(|| AppError::ValidationError(format!("지원하지 않는 소셜 제공자입니다: {}", provider)))?;

    let response = AuthService::instance()
        .social_login(provider, &payload.access_token)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 토큰 갱신
///
/// 사용한 리프레시 토큰의 세션은 폐기되고 새 세션의 토큰 쌍이 발급됩니다.
#[post("/refresh")]
pub async fn refresh(payload: web::Json<RefreshTokenRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance().refresh(&payload.refresh_token).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 현재 세션 로그아웃
#[post("")]
pub async fn logout(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    AuthService::instance().logout(&user).await?;
    Ok(HttpResponse::NoContent().finish())
}
