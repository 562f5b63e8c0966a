//! 인증 및 보안 서비스 모듈
//!
//! - [`TokenService`] - HS256 액세스/리프레시 토큰 발급과 검증
//! - [`AuthService`] - 이메일 인증, 로컬/소셜 로그인, 갱신, 로그아웃
//!
//! ```rust,ignore
//! use crate::services::auth::{AuthService, TokenService};
//!
//! let response = AuthService::instance().login(request).await?;
//! let claims = TokenService::instance().verify_token(&response.tokens.access_token, TokenType::Access)?;
//! ```

pub mod token_service;
pub mod auth_service;

pub use token_service::*;
pub use auth_service::*;
