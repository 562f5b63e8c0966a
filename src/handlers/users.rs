//! 내 정보 핸들러 (`/users/me`)

use actix_web::{delete, get, patch, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::users::UpdateUserRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::users::UserService;

#[get("")]
pub async fn get_me(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let profile = UserService::instance().get_me(user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// 이름, 연락처, 프로필 이미지 수정
#[patch("")]
pub async fn update_me(
    user: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let profile = UserService::instance()
        .update_me(user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// 회원 탈퇴
///
/// 사용자와 소유한 학원/강사 프로필/공고를 소프트 삭제하고 모든 세션을 폐기합니다.
#[delete("")]
pub async fn withdraw(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    UserService::instance().withdraw(user.user_id).await?;
    log::info!("회원 탈퇴 - user_id: {}", user.user_id);
    Ok(HttpResponse::NoContent().finish())
}
