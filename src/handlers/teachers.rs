//! 강사 프로필 핸들러

use actix_web::{get, patch, post, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::teachers::{RegisterTeacherRequest, UpdateTeacherRequest};
use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
use crate::services::teachers::TeacherService;

/// 강사 프로필 등록
///
/// 경력/자격증은 모두 신규 항목이어야 합니다(`id` 없음).
#[post("")]
pub async fn register_teacher(
    user: AuthenticatedUser,
    payload: web::Json<RegisterTeacherRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let teacher = TeacherService::instance()
        .register(user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(teacher))
}

/// 강사 프로필 조회
///
/// 비공개 프로필은 본인과 관리자에게만 보이고, 그 외에는 404입니다.
#[get("/{teacher_id}")]
pub async fn get_teacher(
    teacher_id: web::Path<i64>,
    viewer: OptionalUser,
) -> Result<HttpResponse, AppError> {
    let teacher = TeacherService::instance()
        .get(teacher_id.into_inner(), viewer.0.as_ref())
        .await?;
    Ok(HttpResponse::Ok().json(teacher))
}

#[get("")]
pub async fn get_my_teacher(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let teacher = TeacherService::instance().get_mine(user.user_id).await?;
    Ok(HttpResponse::Ok().json(teacher))
}

/// 강사 프로필 수정 (PATCH)
///
/// `work_experiences`/`certificates`가 있으면 id 기준으로 생성/수정/삭제가 한 번에 반영됩니다.
#[patch("")]
pub async fn update_my_teacher(
    user: AuthenticatedUser,
    payload: web::Json<UpdateTeacherRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let teacher = TeacherService::instance()
        .update_mine(user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(teacher))
}
