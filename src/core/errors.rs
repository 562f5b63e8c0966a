//! # Application Error Handling System
//!
//! 백엔드 전역에서 사용하는 통합 에러 타입입니다.
//!
//! 모든 계층(리포지토리, 서비스, 핸들러)은 `AppError`를 반환하고,
//! Actix-Web의 `ResponseError` 구현이 이를 HTTP 상태 코드와
//! 숫자형 애플리케이션 코드를 담은 JSON 응답으로 변환합니다.
//!
//! ## 응답 형식
//!
//! ```json
//! { "code": 40400, "message": "Not found: 학원을 찾을 수 없습니다" }
//! ```
//!
//! ## 코드 체계
//!
//! | 변형 | HTTP | code |
//! |------|------|------|
//! | `ValidationError` | 400 | 40000 |
//! | `AuthenticationError` | 401 | 40100 |
//! | `AuthorizationError` | 403 | 40300 |
//! | `NotFound` | 404 | 40400 |
//! | `ConflictError` | 409 | 40900 |
//! | `PayloadTooLarge` | 413 | 41300 |
//! | `UnsupportedMediaType` | 415 | 41500 |
//! | `ExternalServiceError` | 502 | 50200 |
//! | 그 외 | 500 | 50000 |
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find_academy(&self, id: i64) -> AppResult<Academy> {
//!     self.academy_repo
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("학원을 찾을 수 없습니다".to_string()))
//! }
//! ```

use actix_web::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// `thiserror`로 `Display`를 파생하며, 메시지는 응답 본문의 `message`로 그대로 노출됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// PostgreSQL 쿼리/연결 실패
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 명령 실패
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 실패 (validator, JSON 파싱, 제약 조건 위반 포함)
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// 유니크 제약 위반 등 현재 상태와의 충돌
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 토큰 누락/만료/위조, 잘못된 자격 증명
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 인증은 되었으나 역할 또는 소유권이 부족한 경우
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// 외부 API(S3, Elasticsearch, 국세청, 소셜 제공자, SMTP) 실패
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u32,
    pub message: String,
}

impl AppError {
    /// 클라이언트가 분기 처리에 사용하는 숫자형 애플리케이션 코드
    pub fn code(&self) -> u32 {
        match self {
            AppError::ValidationError(_) => 40000,
            AppError::AuthenticationError(_) => 40100,
            AppError::AuthorizationError(_) => 40300,
            AppError::NotFound(_) => 40400,
            AppError::ConflictError(_) => 40900,
            AppError::PayloadTooLarge(_) => 41300,
            AppError::UnsupportedMediaType(_) => 41500,
            AppError::ExternalServiceError(_) => 50200,
            AppError::DatabaseError(_) | AppError::RedisError(_) | AppError::InternalError(_) => 50000,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        }

        actix_web::HttpResponse::build(self.status_code()).json(self.body())
    }
}

/// sqlx 에러 변환
///
/// PostgreSQL SQLSTATE에 따라 의미 있는 변형으로 매핑합니다.
///
/// - `RowNotFound` → `NotFound`
/// - `23505` unique_violation → `ConflictError`
/// - `23503` foreign_key_violation, `23514` check_violation → `ValidationError`
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("요청한 데이터를 찾을 수 없습니다".to_string()),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => AppError::ConflictError(
                    db_err.constraint().map_or_else(
                        || "이미 존재하는 데이터입니다".to_string(),
                        |c| format!("이미 존재하는 데이터입니다 ({})", c),
                    ),
                ),
                Some("23503") => AppError::ValidationError("참조하는 데이터가 존재하지 않습니다".to_string()),
                Some("23514") => AppError::ValidationError(
                    db_err.constraint().map_or_else(
                        || "허용되지 않는 값입니다".to_string(),
                        |c| format!("허용되지 않는 값입니다 ({})", c),
                    ),
                ),
                _ => AppError::DatabaseError(err.to_string()),
            },
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        AppError::RedisError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 임의의 에러에 문맥 메시지를 붙여 `InternalError`로 변환하는 확장 트레이트
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("Email is required".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), 40000);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Academy not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(error.code(), 40400);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());
        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.code(), 40100);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("Insufficient permissions".to_string());
        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(error.code(), 40300);
    }

    #[test]
    fn test_upload_error_responses() {
        let too_large = AppError::PayloadTooLarge("10MB".to_string());
        let media = AppError::UnsupportedMediaType("text/plain".to_string());
        assert_eq!(too_large.error_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(media.error_response().status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(too_large.code(), 41300);
        assert_eq!(media.code(), 41500);
    }

    #[test]
    fn test_server_side_errors_share_code() {
        for error in [
            AppError::DatabaseError("db".to_string()),
            AppError::RedisError("redis".to_string()),
            AppError::InternalError("boom".to_string()),
        ] {
            assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(error.code(), 50000);
        }

        let external = AppError::ExternalServiceError("nts".to_string());
        assert_eq!(external.error_response().status(), StatusCode::BAD_GATEWAY);
        assert_eq!(external.code(), 50200);
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let error = AppError::ConflictError("duplicated business number".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 40900);
        assert_eq!(body["message"], "Conflict error: duplicated business number");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(error, AppError::NotFound(_)));
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
