//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 사용자 정보를 추출합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 유효한 액세스 토큰이 없으면 401
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 토큰이 없거나 유효하지 않아도 요청을 진행
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 인증 + 특정 역할, 역할이 없으면 403
    pub fn required_with_role(role: &str) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::Single(role.to_string()))
    }

    /// 인증 + 나열된 역할 중 하나
    pub fn required_with_roles(roles: &[&str]) -> Self {
        let role_strings = roles.iter().map(|s| s.to_string()).collect();
        Self::new_with_role(AuthMode::Required, RequiredRole::Any(role_strings))
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, web, App, HttpResponse};
    use serde_json::Value;
    use crate::config::AuthProvider;
    use crate::domain::entities::users::{User, ROLE_ACADEMY, ROLE_ADMIN, ROLE_TEACHER, ROLE_USER};
    use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
    use crate::services::auth::TokenService;

    fn user_with_roles(roles: &[&str]) -> User {
        User {
            id: 7,
            email: "teacher@example.com".to_string(),
            password_hash: None,
            name: "김요가".to_string(),
            phone_number: None,
            auth_provider: AuthProvider::Local,
            social_key: None,
            roles: roles.iter().map(|r| r.to_string()).collect(),
            profile_image_url: None,
            is_email_verified: true,
            last_login_at: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
            deleted_at: None,
        }
    }

    fn bearer_for(roles: &[&str]) -> String {
        let service = TokenService;
        let pair = service
            .generate_token_pair(&user_with_roles(roles), &service.new_session_id())
            .unwrap();
        format!("Bearer {}", pair.access_token)
    }

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "user_id": user.user_id }))
    }

    async fn maybe_whoami(user: OptionalUser) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "user_id": user.0.map(|u| u.user_id) }))
    }

    #[test]
    fn test_required_role_single() {
        let required = RequiredRole::Single(ROLE_ADMIN.to_string());
        let admin_roles = vec![ROLE_ADMIN.to_string(), ROLE_USER.to_string()];
        let user_roles = vec![ROLE_USER.to_string()];

        assert!(required.is_satisfied(&admin_roles));
        assert!(!required.is_satisfied(&user_roles));
    }

    #[test]
    fn test_required_role_any() {
        let required = RequiredRole::Any(vec![ROLE_ACADEMY.to_string(), ROLE_TEACHER.to_string()]);
        let academy_roles = vec![ROLE_USER.to_string(), ROLE_ACADEMY.to_string()];
        let teacher_roles = vec![ROLE_USER.to_string(), ROLE_TEACHER.to_string()];
        let user_roles = vec![ROLE_USER.to_string()];

        assert!(required.is_satisfied(&academy_roles));
        assert!(required.is_satisfied(&teacher_roles));
        assert!(!required.is_satisfied(&user_roles));
    }

    #[test]
    fn test_authenticated_user_roles() {
        let user = AuthenticatedUser {
            user_id: 1,
            session_id: "sid".to_string(),
            auth_provider: AuthProvider::Kakao,
            roles: vec![ROLE_USER.to_string(), ROLE_ACADEMY.to_string()],
        };

        assert!(user.is_academy());
        assert!(!user.is_teacher());
        assert!(!user.is_admin());
        assert!(user.has_any_role(&[ROLE_ADMIN, ROLE_ACADEMY]));
        assert!(!user.has_any_role(&[ROLE_ADMIN, ROLE_TEACHER]));
    }

    #[actix_web::test]
    async fn test_required_without_token_is_401() {
        let app = actix_test::init_service(
            App::new().service(web::scope("/me").wrap(AuthMiddleware::required()).route("", web::get().to(whoami))),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(res.status(), 401);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], 40100);
    }

    #[actix_web::test]
    async fn test_required_with_valid_token_injects_user() {
        let app = actix_test::init_service(
            App::new().service(web::scope("/me").wrap(AuthMiddleware::required()).route("", web::get().to(whoami))),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", bearer_for(&[ROLE_USER])))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["user_id"], 7);
    }

    #[actix_web::test]
    async fn test_missing_role_is_403() {
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/academy")
                    .wrap(AuthMiddleware::required_with_role(ROLE_ACADEMY))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/academy")
            .insert_header(("Authorization", bearer_for(&[ROLE_USER])))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), 403);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], 40300);
    }

    #[actix_web::test]
    async fn test_any_of_roles() {
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/staff")
                    .wrap(AuthMiddleware::required_with_roles(&[ROLE_ACADEMY, ROLE_TEACHER]))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let teacher = actix_test::TestRequest::get()
            .uri("/staff")
            .insert_header(("Authorization", bearer_for(&[ROLE_USER, ROLE_TEACHER])))
            .to_request();
        assert_eq!(actix_test::call_service(&app, teacher).await.status(), 200);

        let plain = actix_test::TestRequest::get()
            .uri("/staff")
            .insert_header(("Authorization", bearer_for(&[ROLE_USER])))
            .to_request();
        assert_eq!(actix_test::call_service(&app, plain).await.status(), 403);
    }

    #[actix_web::test]
    async fn test_refresh_token_is_not_accepted_as_access_token() {
        let app = actix_test::init_service(
            App::new().service(web::scope("/me").wrap(AuthMiddleware::required()).route("", web::get().to(whoami))),
        )
        .await;

        let service = TokenService;
        let pair = service
            .generate_token_pair(&user_with_roles(&[ROLE_USER]), &service.new_session_id())
            .unwrap();
        let req = actix_test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn test_optional_proceeds_without_or_with_bad_token() {
        let app = actix_test::init_service(
            App::new().service(
                web::scope("/maybe")
                    .wrap(AuthMiddleware::optional())
                    .route("", web::get().to(maybe_whoami)),
            ),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/maybe").to_request()).await;
        assert_eq!(res.status(), 200);
        let body: Value = actix_test::read_body_json(res).await;
        assert!(body["user_id"].is_null());

        let req = actix_test::TestRequest::get()
            .uri("/maybe")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), 200);

        let req = actix_test::TestRequest::get()
            .uri("/maybe")
            .insert_header(("Authorization", bearer_for(&[ROLE_USER])))
            .to_request();
        let body: Value = actix_test::read_body_json(actix_test::call_service(&app, req).await).await;
        assert_eq!(body["user_id"], 7);
    }
}
