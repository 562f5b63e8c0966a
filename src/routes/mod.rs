//! API 라우트 설정 모듈
//!
//! 모든 엔드포인트는 `/api/v1` 아래에 있고, 헬스체크만 루트의 `/health`입니다.
//!
//! # Auth Middleware Usage
//!
//! 인증 수준은 스코프 단위로 적용합니다.
//!
//! | 스코프 | 미들웨어 |
//! |--------|----------|
//! | `/auth` | 없음 |
//! | `/auth/logout`, `/users/me`, `/uploads` | `AuthMiddleware::required()` |
//! | `/academies/me` | `AuthMiddleware::required_with_role(ROLE_ACADEMY)` |
//! | `/teachers/me` | `AuthMiddleware::required_with_role(ROLE_TEACHER)` |
//! | `/academies`, `/teachers`, `/recruitments` | `AuthMiddleware::optional()` + 핸들러의 `AuthenticatedUser` 추출자 |
//!
//! 같은 접두어를 쓰는 스코프는 먼저 등록된 것이 요청을 가져가므로
//! `/academies/me`처럼 더 구체적인 스코프를 먼저 등록합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use crate::domain::entities::users::{ROLE_ACADEMY, ROLE_TEACHER};
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

/// 추출자 설정과 모든 라우트를 등록합니다.
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .app_data(handlers::query_config())
        .app_data(handlers::path_config());

    cfg.service(health_check);

    cfg.service(
        web::scope("/api/v1")
            .configure(configure_auth_routes)
            .configure(configure_user_routes)
            .configure(configure_academy_routes)
            .configure(configure_teacher_routes)
            .configure(configure_recruitment_routes)
            .configure(configure_reference_routes)
            .configure(configure_upload_routes),
    );
}

/// 인증 라우트
///
/// ```bash
/// curl -X POST http://localhost:8080/api/v1/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"email":"yogi@example.com","password":"Namaste123!"}'
///
/// curl -X POST http://localhost:8080/api/v1/auth/social/kakao \
///   -H "Content-Type: application/json" \
///   -d '{"access_token":"<kakao access token>"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth/logout")
            .wrap(AuthMiddleware::required())
            .service(handlers::auth::logout),
    );

    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::send_email_code)
            .service(handlers::auth::verify_email_code)
            .service(handlers::auth::signup)
            .service(handlers::auth::login)
            .service(handlers::auth::social_login)
            .service(handlers::auth::refresh),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users/me")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::get_me)
            .service(handlers::users::update_me)
            .service(handlers::users::withdraw),
    );
}

fn configure_academy_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/academies/me")
            .wrap(AuthMiddleware::required_with_role(ROLE_ACADEMY))
            .service(handlers::academies::get_my_academy)
            .service(handlers::academies::update_my_academy),
    );

    cfg.service(
        web::scope("/academies")
            .wrap(AuthMiddleware::optional())
            .service(handlers::academies::register_academy)
            .service(handlers::academies::list_academies)
            .service(handlers::academies::get_academy),
    );
}

fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teachers/me")
            .wrap(AuthMiddleware::required_with_role(ROLE_TEACHER))
            .service(handlers::teachers::get_my_teacher)
            .service(handlers::teachers::update_my_teacher),
    );

    cfg.service(
        web::scope("/teachers")
            .wrap(AuthMiddleware::optional())
            .service(handlers::teachers::register_teacher)
            .service(handlers::teachers::get_teacher),
    );
}

fn configure_recruitment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/recruitments")
            .wrap(AuthMiddleware::optional())
            .service(handlers::recruitments::create_recruitment)
            .service(handlers::recruitments::list_recruitments)
            .service(handlers::recruitments::get_recruitment)
            .service(handlers::recruitments::update_recruitment)
            .service(handlers::recruitments::delete_recruitment),
    );
}

fn configure_reference_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/yoga")
            .service(handlers::references::yoga_groups)
            .service(handlers::references::search_yoga),
    );

    cfg.service(
        web::scope("/areas")
            .service(handlers::references::list_areas)
            .service(handlers::references::list_sigungus),
    );
}

fn configure_upload_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/uploads")
            .wrap(AuthMiddleware::required())
            .service(handlers::uploads::upload_image),
    );
}

/// 헬스체크
///
/// ```bash
/// curl http://localhost:8080/health
/// ```
///
/// ```json
/// { "status": "healthy", "service": "yoga_marketplace_backend", "version": "0.1.0", "timestamp": "..." }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(res.status(), 200);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_protected_routes_require_token() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let requests = vec![
            test::TestRequest::get().uri("/api/v1/users/me").to_request(),
            test::TestRequest::delete().uri("/api/v1/users/me").to_request(),
            test::TestRequest::post().uri("/api/v1/auth/logout").to_request(),
            test::TestRequest::get().uri("/api/v1/academies/me").to_request(),
            test::TestRequest::patch().uri("/api/v1/teachers/me").to_request(),
            test::TestRequest::post().uri("/api/v1/uploads/images").to_request(),
        ];

        for req in requests {
            let path = req.path().to_string();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), 401, "{}", path);
            let body: Value = test::read_body_json(res).await;
            assert_eq!(body["code"], 40100, "{}", path);
        }
    }

    #[actix_web::test]
    async fn test_optional_scope_handler_requires_user() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/recruitments")
            .set_json(json!({ "title": "주말 빈야사 강사" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 40100);
    }

    #[actix_web::test]
    async fn test_malformed_signup_body_is_validation_error() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"email\": ")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 40000);
    }

    #[actix_web::test]
    async fn test_invalid_signup_fields_are_validation_error() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(json!({
                "email": "not-an-email",
                "password": "short",
                "password_confirm": "different",
                "name": ""
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 40000);
    }

    #[actix_web::test]
    async fn test_unknown_social_provider_is_validation_error() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/auth/social/local")
            .set_json(json!({ "access_token": "token" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);
    }

    #[actix_web::test]
    async fn test_non_numeric_path_is_validation_error() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/academies/abc").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 40000);
    }

    #[actix_web::test]
    async fn test_blank_yoga_search_is_validation_error() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/yoga/search?q=%20%20%20").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 400);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], 40000);
    }
}
