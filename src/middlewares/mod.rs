//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <access token>` 검증
//! - 검증된 사용자를 request extensions에 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)로 저장
//! - 필수/선택 인증 모드와 역할 요구 사항 지원
//! - 실패 응답은 `AppError`와 같은 `{code, message}` 본문
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! web::scope("/academies/me")
//!     .wrap(AuthMiddleware::required_with_role(ROLE_ACADEMY))
//!     .route("", web::get().to(get_my_academy));
//!
//! web::scope("/teachers/{id}")
//!     .wrap(AuthMiddleware::optional())
//!     .route("", web::get().to(get_teacher));
//! ```
//!
//! 액세스 토큰의 역할은 발급 시점의 스냅샷입니다. 학원/강사 등록 직후에는
//! 토큰을 갱신해야 새 역할이 반영됩니다.

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
