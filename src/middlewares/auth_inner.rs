//! AuthMiddleware 인증 로직
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::core::errors::AppError;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser, RequiredRole};
use crate::domain::models::token::TokenType;
use crate::services::auth::TokenService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            match (&mode, authenticate(&req)) {
                (AuthMode::Required, Err(err)) => {
                    log::debug!("인증 실패 - {} {}: {}", req.method(), req.path(), err);
                    return Ok(reject(req, err));
                }
                (AuthMode::Required, Ok(user)) => {
                    if let Some(ref required) = required_role {
                        if !required.is_satisfied(&user.roles) {
                            log::warn!(
                                "권한 부족 - user_id: {}, roles: {:?}, 필요 권한: {:?}",
                                user.user_id, user.roles, required
                            );
                            let err = AppError::AuthorizationError("접근 권한이 부족합니다".to_string());
                            return Ok(reject(req, err));
                        }
                    }
                    log::debug!("인증 성공 - user_id: {}", user.user_id);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Ok(user)) => {
                    let allowed = required_role.as_ref().map_or(true, |r| r.is_satisfied(&user.roles));
                    if allowed {
                        req.extensions_mut().insert(user);
                    }
                }
                (AuthMode::Optional, Err(_)) => {}
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 요청의 액세스 토큰을 검증해 사용자 정보를 만듭니다.
fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("유효한 인증 토큰이 필요합니다".to_string()))?;

    let token_service = TokenService::instance();
    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token, TokenType::Access)?;

    let user_id = claims
        .user_id()
        .ok_or_else(|| AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string()))?;

    Ok(AuthenticatedUser {
        user_id,
        session_id: claims.sid,
        auth_provider: claims.auth_provider,
        roles: claims.roles,
    })
}
