//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. Spring MVC의 Controller 레이어와 같은 역할로,
//! 요청 본문 검증 후 서비스 싱글톤을 호출하고 결과를 JSON으로 돌려줍니다.
//!
//! ```text
//! Client
//!   │ HTTP Request/Response
//!   ▼
//! Handlers (이 모듈)      ← 추출 + validator 검증
//!   ▼
//! Services               ← 비즈니스 로직
//!   ▼
//! Repositories / Clients ← PostgreSQL, Redis, S3, Elasticsearch, SMTP, 국세청
//! ```
//!
//! ## 에러 응답
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환합니다. JSON 본문/쿼리/경로
//! 추출 실패도 [`json_config`], [`query_config`], [`path_config`]를 통해
//! `AppError::ValidationError`로 바뀌어 같은 `{code, message}` 형식을 유지합니다.
//!
//! ## 모듈 구성
//!
//! | 모듈 | 경로 |
//! |------|------|
//! | `auth` | `/api/v1/auth/*` |
//! | `users` | `/api/v1/users/me` |
//! | `academies` | `/api/v1/academies` |
//! | `teachers` | `/api/v1/teachers` |
//! | `recruitments` | `/api/v1/recruitments` |
//! | `references` | `/api/v1/yoga`, `/api/v1/areas` |
//! | `uploads` | `/api/v1/uploads/images` |

pub mod auth;
pub mod users;
pub mod academies;
pub mod teachers;
pub mod recruitments;
pub mod references;
pub mod uploads;

use actix_web::{error, web};
use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;

/// JSON 본문 파싱 실패를 `ValidationError`로 변환
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("JSON 본문 파싱 실패: {}", err);
        let message = match &err {
            error::JsonPayloadError::ContentType => "Content-Type은 application/json이어야 합니다".to_string(),
            error::JsonPayloadError::Deserialize(e) => format!("요청 본문 형식이 올바르지 않습니다: {}", e),
            _ => format!("요청 본문을 읽을 수 없습니다: {}", err),
        };
        AppError::ValidationError(message).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("쿼리 파라미터가 올바르지 않습니다: {}", err)).into()
    })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("경로 파라미터가 올바르지 않습니다: {}", err)).into()
    })
}

/// 역할 확인
///
/// 같은 경로에 공개 메서드와 보호 메서드가 함께 있어 스코프 미들웨어로
/// 나눌 수 없는 엔드포인트에서 사용합니다.
pub(crate) fn require_role(user: &AuthenticatedUser, role: &str) -> Result<(), AppError> {
    if user.has_role(role) || user.is_admin() {
        return Ok(());
    }
    log::warn!("권한 부족 - user_id: {}, 필요 권한: {}", user.user_id, role);
    Err(AppError::AuthorizationError("접근 권한이 부족합니다".to_string()))
}
