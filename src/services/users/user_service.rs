//! # 사용자 관리 서비스 구현
//!
//! ## 회원 탈퇴
//!
//! ```text
//! BEGIN
//!   recruitments (내 학원 공고) ─► deleted_at, is_open = false
//!   academies    (내 학원)      ─► deleted_at
//!   teachers     (내 강사 프로필) ─► deleted_at
//!   users                       ─► deleted_at
//! COMMIT
//! ─► user:{id} 캐시 삭제 ─► session:{id}:* 전부 삭제
//! ```
//!
//! 소프트 삭제된 사용자의 이메일/소셜 키는 부분 유니크 인덱스에서 제외되므로
//! 같은 이메일로 다시 가입할 수 있습니다.

use std::sync::Arc;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::dto::users::{UpdateUserRequest, UserResponse};
use crate::repositories::academies::AcademyRepository;
use crate::repositories::sessions::SessionRepository;
use crate::repositories::teachers::TeacherRepository;
use crate::repositories::users::UserRepository;

pub struct UserService {
    db: Arc<Database>,
    user_repo: Arc<UserRepository>,
    session_repo: Arc<SessionRepository>,
    academy_repo: Arc<AcademyRepository>,
    teacher_repo: Arc<TeacherRepository>,
}

crate::register_service!(UserService {
    db,
    user_repo,
    session_repo,
    academy_repo,
    teacher_repo,
});

impl UserService {
    pub async fn get_me(&self, user_id: i64) -> AppResult<UserResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        Ok(UserResponse::from(user))
    }

    pub async fn update_me(&self, user_id: i64, request: UpdateUserRequest) -> AppResult<UserResponse> {
        if request.is_empty() {
            return self.get_me(user_id).await;
        }

        let user = self.user_repo.update_profile(user_id, &request).await?;
        log::info!("내 정보 수정 - user_id: {}", user_id);
        Ok(UserResponse::from(user))
    }

    pub async fn withdraw(&self, user_id: i64) -> AppResult<()> {
        let mut tx = self.db.begin().await?;
        self.academy_repo.soft_delete_by_user(&mut tx, user_id).await?;
        self.teacher_repo.soft_delete_by_user(&mut tx, user_id).await?;
        self.user_repo.soft_delete(&mut tx, user_id).await?;
        tx.commit().await?;

        self.user_repo.invalidate_cache(user_id).await;
        self.session_repo.revoke_all_sessions(user_id).await?;

        log::info!("회원 탈퇴 완료 - user_id: {}", user_id);
        Ok(())
    }
}
