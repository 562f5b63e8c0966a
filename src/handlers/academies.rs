//! 학원 핸들러
//!
//! | Method | Path | 인증 |
//! |--------|------|------|
//! | POST | `/academies` | 사용자 |
//! | GET | `/academies` | - |
//! | GET | `/academies/{academy_id}` | - |
//! | GET/PATCH | `/academies/me` | `academy` 역할 |

use actix_web::{get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::academies::{AcademyListQuery, RegisterAcademyRequest, UpdateAcademyRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::academies::AcademyService;

/// 학원 등록
///
/// 사업자등록번호 체크섬과 국세청 진위 확인을 통과해야 하며, 성공하면
/// 사용자에게 `academy` 역할이 추가됩니다. 새 역할은 토큰 갱신 후 반영됩니다.
#[post("")]
pub async fn register_academy(
    user: AuthenticatedUser,
    payload: web::Json<RegisterAcademyRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let academy = AcademyService::instance()
        .register(user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(academy))
}

#[get("")]
pub async fn list_academies(query: web::Query<AcademyListQuery>) -> Result<HttpResponse, AppError> {
    let page = AcademyService::instance().list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/{academy_id}")]
pub async fn get_academy(academy_id: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let academy = AcademyService::instance().get(academy_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(academy))
}

#[get("")]
pub async fn get_my_academy(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let academy = AcademyService::instance().get_mine(user.user_id).await?;
    Ok(HttpResponse::Ok().json(academy))
}

#[patch("")]
pub async fn update_my_academy(
    user: AuthenticatedUser,
    payload: web::Json<UpdateAcademyRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let academy = AcademyService::instance()
        .update_mine(user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(academy))
}
