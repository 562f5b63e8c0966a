//! 인증된 사용자 정보
//!
//! 인증 미들웨어가 액세스 토큰을 검증한 뒤 요청 extensions에 넣고,
//! 핸들러는 추출자로 꺼내 씁니다.
//!
//! ```rust,ignore
//! #[get("/me")]
//! pub async fn get_me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
//!     let profile = UserService::instance().get_me(user.user_id).await?;
//!     Ok(HttpResponse::Ok().json(profile))
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;
use crate::core::errors::AppError;
use crate::domain::entities::users::{ROLE_ACADEMY, ROLE_ADMIN, ROLE_TEACHER};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    /// 토큰이 속한 리프레시 세션 ID
    pub session_id: String,
    pub auth_provider: AuthProvider,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|&role| self.has_role(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    pub fn is_academy(&self) -> bool {
        self.has_role(ROLE_ACADEMY)
    }

    pub fn is_teacher(&self) -> bool {
        self.has_role(ROLE_TEACHER)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ).into())),
        }
    }
}

/// 선택적 인증 추출자
///
/// `AuthMode::Optional` 스코프에서 사용하며, 토큰이 없으면 `None`입니다.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}
