//! 채용 공고 핸들러
//!
//! 목록/상세는 공개, 등록/수정/삭제는 `academy` 역할이 필요합니다.
//! 수정/삭제는 서비스에서 공고 소유 학원을 한 번 더 확인합니다.

use actix_web::{delete, get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::recruitments::{CreateRecruitmentRequest, RecruitmentListQuery, UpdateRecruitmentRequest};
use crate::domain::entities::users::ROLE_ACADEMY;
use crate::domain::models::auth::AuthenticatedUser;
use crate::handlers::require_role;
use crate::services::recruitments::RecruitmentService;

#[post("")]
pub async fn create_recruitment(
    user: AuthenticatedUser,
    payload: web::Json<CreateRecruitmentRequest>,
) -> Result<HttpResponse, AppError> {
    require_role(&user, ROLE_ACADEMY)?;
    payload.validate()?;

    let recruitment = RecruitmentService::instance()
        .create(user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(recruitment))
}

#[get("")]
pub async fn list_recruitments(query: web::Query<RecruitmentListQuery>) -> Result<HttpResponse, AppError> {
    let page = RecruitmentService::instance().list(query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/{recruitment_id}")]
pub async fn get_recruitment(recruitment_id: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let recruitment = RecruitmentService::instance().get(recruitment_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(recruitment))
}

/// 공고 수정 (PATCH)
///
/// ```json
/// {
///   "is_open": false,
///   "schedules": [
///     { "id": 31, "day_of_week": 1, "start_time": "10:00:00", "end_time": "11:00:00" },
///     { "day_of_week": 3, "start_time": "19:00:00", "end_time": "20:00:00" }
///   ]
/// }
/// ```
///
/// 위 요청은 31번 일정을 수정하고 새 일정을 추가하며, 목록에 없는 기존 일정은 삭제합니다.
#[patch("/{recruitment_id}")]
pub async fn update_recruitment(
    user: AuthenticatedUser,
    recruitment_id: web::Path<i64>,
    payload: web::Json<UpdateRecruitmentRequest>,
) -> Result<HttpResponse, AppError> {
    require_role(&user, ROLE_ACADEMY)?;
    payload.validate()?;

    let recruitment = RecruitmentService::instance()
        .update(&user, recruitment_id.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(recruitment))
}

#[delete("/{recruitment_id}")]
pub async fn delete_recruitment(
    user: AuthenticatedUser,
    recruitment_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_role(&user, ROLE_ACADEMY)?;

    RecruitmentService::instance()
        .delete(&user, recruitment_id.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
