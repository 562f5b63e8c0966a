//! # 채용 공고 서비스
//!
//! 공고는 학원 소유입니다. 수정/삭제는 공고를 올린 학원의 사용자(또는 관리자)만 할 수 있습니다.
//!
//! ```text
//! PATCH /recruitments/{id}
//!   ├─ 소유 학원 확인 ─────────────── 불일치 → 403
//!   └─ BEGIN
//!        SELECT .. FOR UPDATE (공고)   없음 → 404
//!        UPDATE recruitments (COALESCE)
//!        recruitment_yogas 교체        (yoga_ids가 있을 때)
//!        schedules 생성/수정/삭제      (schedules가 있을 때, 모르는 id → 400)
//!      COMMIT
//! ```

use std::sync::Arc;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::dto::common::{PageResponse, Paging};
use crate::domain::dto::recruitments::{
    CreateRecruitmentRequest, RecruitmentListQuery, RecruitmentResponse, UpdateRecruitmentRequest,
};
use crate::domain::entities::recruitments::Recruitment;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::academies::AcademyRepository;
use crate::repositories::recruitments::{RecruitmentFilter, RecruitmentRepository};

pub struct RecruitmentService {
    db: Arc<Database>,
    recruitment_repo: Arc<RecruitmentRepository>,
    academy_repo: Arc<AcademyRepository>,
}

crate::register_service!(RecruitmentService {
    db,
    recruitment_repo,
    academy_repo,
});

impl RecruitmentService {
    pub async fn create(&self, user_id: i64, request: CreateRecruitmentRequest) -> AppResult<RecruitmentResponse> {
        let academy = self
            .academy_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::AuthorizationError("학원을 등록한 사용자만 공고를 올릴 수 있습니다".to_string()))?;

        let mut tx = self.db.begin().await?;
        let recruitment = self.recruitment_repo.insert(&mut tx, academy.id, &request).await?;
        tx.commit().await?;

        log::info!("채용 공고 등록 - recruitment_id: {}, academy_id: {}", recruitment.id, academy.id);
        self.to_response(recruitment).await
    }

    pub async fn get(&self, recruitment_id: i64) -> AppResult<RecruitmentResponse> {
        let recruitment = self.find(recruitment_id).await?;
        self.to_response(recruitment).await
    }

    pub async fn list(&self, query: RecruitmentListQuery) -> AppResult<PageResponse<RecruitmentResponse>> {
        let paging = Paging::new(query.page, query.size);
        let filter = RecruitmentFilter {
            sigungu_id: query.sigungu_id,
            yoga_id: query.yoga_id,
            academy_id: query.academy_id,
            is_open: query.is_open,
        };

        let (recruitments, total) = self.recruitment_repo.list(filter, paging).await?;
        let items = self
            .recruitment_repo
            .load_details(recruitments)
            .await?
            .into_iter()
            .map(RecruitmentResponse::from)
            .collect();

        Ok(PageResponse::new(items, paging, total))
    }

    pub async fn update(
        &self,
        user: &AuthenticatedUser,
        recruitment_id: i64,
        request: UpdateRecruitmentRequest,
    ) -> AppResult<RecruitmentResponse> {
        let recruitment = self.find(recruitment_id).await?;
        self.ensure_owner(user, &recruitment).await?;

        let mut tx = self.db.begin().await?;
        self.recruitment_repo
            .lock_by_id(&mut tx, recruitment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("채용 공고를 찾을 수 없습니다".to_string()))?;
        let recruitment = self.recruitment_repo.update(&mut tx, recruitment_id, &request).await?;
        tx.commit().await?;

        log::info!("채용 공고 수정 - recruitment_id: {}, user_id: {}", recruitment_id, user.user_id);
        self.to_response(recruitment).await
    }

    pub async fn delete(&self, user: &AuthenticatedUser, recruitment_id: i64) -> AppResult<()> {
        let recruitment = self.find(recruitment_id).await?;
        self.ensure_owner(user, &recruitment).await?;

        self.recruitment_repo.soft_delete(recruitment_id).await?;
        log::info!("채용 공고 삭제 - recruitment_id: {}, user_id: {}", recruitment_id, user.user_id);
        Ok(())
    }

    async fn find(&self, recruitment_id: i64) -> AppResult<Recruitment> {
        self.recruitment_repo
            .find_by_id(recruitment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("채용 공고를 찾을 수 없습니다".to_string()))
    }

    async fn ensure_owner(&self, user: &AuthenticatedUser, recruitment: &Recruitment) -> AppResult<()> {
        if user.is_admin() {
            return Ok(());
        }

        let owns = self
            .academy_repo
            .find_by_user_id(user.user_id)
            .await?
            .is_some_and(|academy| academy.id == recruitment.academy_id);

        if !owns {
            log::warn!(
                "타 학원 공고 변경 시도 - recruitment_id: {}, user_id: {}",
                recruitment.id,
                user.user_id
            );
            return Err(AppError::AuthorizationError("본인 학원의 공고만 변경할 수 있습니다".to_string()));
        }
        Ok(())
    }

    async fn to_response(&self, recruitment: Recruitment) -> AppResult<RecruitmentResponse> {
        Ok(RecruitmentResponse::from(self.recruitment_repo.load_detail(recruitment).await?))
    }
}
