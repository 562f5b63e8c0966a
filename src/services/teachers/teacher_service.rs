//! # 강사 서비스
//!
//! 프로필 비공개(`is_profile_open = false`) 강사는 본인 외에는 조회할 수 없으며,
//! 존재 여부를 드러내지 않도록 `NotFound`로 응답합니다.

use std::sync::Arc;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::dto::teachers::{RegisterTeacherRequest, TeacherResponse, UpdateTeacherRequest};
use crate::domain::entities::teachers::Teacher;
use crate::domain::entities::users::ROLE_TEACHER;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::teachers::TeacherRepository;
use crate::repositories::users::UserRepository;

pub struct TeacherService {
    db: Arc<Database>,
    teacher_repo: Arc<TeacherRepository>,
    user_repo: Arc<UserRepository>,
}

crate::register_service!(TeacherService { db, teacher_repo, user_repo });

impl TeacherService {
    pub async fn register(&self, user_id: i64, request: RegisterTeacherRequest) -> AppResult<TeacherResponse> {
        if self.teacher_repo.find_by_user_id(user_id).await?.is_some() {
            return Err(AppError::ConflictError("이미 등록한 강사 프로필이 있습니다".to_string()));
        }

        let mut tx = self.db.begin().await?;
        let teacher = self.teacher_repo.insert(&mut tx, user_id, &request).await?;
        self.user_repo.add_role(&mut tx, user_id, ROLE_TEACHER).await?;
        tx.commit().await?;

        self.user_repo.invalidate_cache(user_id).await;
        log::info!("강사 프로필 등록 - teacher_id: {}, user_id: {}", teacher.id, user_id);

        self.to_response(teacher).await
    }

    pub async fn get(&self, teacher_id: i64, viewer: Option<&AuthenticatedUser>) -> AppResult<TeacherResponse> {
        let teacher = self
            .teacher_repo
            .find_by_id(teacher_id)
            .await?
            .ok_or_else(|| AppError::NotFound("강사를 찾을 수 없습니다".to_string()))?;

        let is_owner = viewer.is_some_and(|v| v.user_id == teacher.user_id);
        let is_admin = viewer.is_some_and(AuthenticatedUser::is_admin);
        if !teacher.is_profile_open && !is_owner && !is_admin {
            return Err(AppError::NotFound("강사를 찾을 수 없습니다".to_string()));
        }

        self.to_response(teacher).await
    }

    pub async fn get_mine(&self, user_id: i64) -> AppResult<TeacherResponse> {
        let teacher = self.find_mine(user_id).await?;
        self.to_response(teacher).await
    }

    /// 경력/자격증 목록은 id 기준으로 생성/수정/삭제되며 모두 한 트랜잭션에서 반영됩니다.
    pub async fn update_mine(&self, user_id: i64, request: UpdateTeacherRequest) -> AppResult<TeacherResponse> {
        let mut tx = self.db.begin().await?;
        let teacher = self
            .teacher_repo
            .lock_by_user_id(&mut tx, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("등록한 강사 프로필이 없습니다".to_string()))?;
        let teacher = self.teacher_repo.update(&mut tx, teacher.id, &request).await?;
        tx.commit().await?;

        log::info!("강사 프로필 수정 - teacher_id: {}", teacher.id);
        self.to_response(teacher).await
    }

    async fn find_mine(&self, user_id: i64) -> AppResult<Teacher> {
        self.teacher_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("등록한 강사 프로필이 없습니다".to_string()))
    }

    async fn to_response(&self, teacher: Teacher) -> AppResult<TeacherResponse> {
        Ok(TeacherResponse::from(self.teacher_repo.load_detail(teacher).await?))
    }
}
