//! # 학원 서비스
//!
//! 학원 등록은 사업자등록번호 검증을 통과해야 하며, 등록과 동시에 사용자에게
//! `academy` 역할이 추가됩니다. 역할은 다음 토큰 갱신부터 토큰에 반영됩니다.

use std::sync::Arc;
use crate::clients::business_registry::BusinessRegistryClient;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::dto::academies::{AcademyListQuery, AcademyResponse, RegisterAcademyRequest, UpdateAcademyRequest};
use crate::domain::dto::common::{PageResponse, Paging};
use crate::domain::dto::validators::digits_only;
use crate::domain::entities::academies::Academy;
use crate::domain::entities::users::ROLE_ACADEMY;
use crate::repositories::academies::{AcademyFilter, AcademyRepository};
use crate::repositories::users::UserRepository;

pub struct AcademyService {
    db: Arc<Database>,
    academy_repo: Arc<AcademyRepository>,
    user_repo: Arc<UserRepository>,
    business_registry: Arc<BusinessRegistryClient>,
}

crate::register_service!(AcademyService {
    db,
    academy_repo,
    user_repo,
    business_registry,
});

impl AcademyService {
    pub async fn register(&self, user_id: i64, request: RegisterAcademyRequest) -> AppResult<AcademyResponse> {
        if self.academy_repo.find_by_user_id(user_id).await?.is_some() {
            return Err(AppError::ConflictError("이미 등록한 학원이 있습니다".to_string()));
        }

        let business_number = digits_only(&request.business_number);
        if self.academy_repo.exists_by_business_number(&business_number).await? {
            return Err(AppError::ConflictError("이미 등록된 사업자등록번호입니다".to_string()));
        }

        self.business_registry
            .verify(&business_number, &request.representative_name, request.opened_at)
            .await?;

        let mut tx = self.db.begin().await?;
        let academy = self.academy_repo.insert(&mut tx, user_id, &request, &business_number).await?;
        self.user_repo.add_role(&mut tx, user_id, ROLE_ACADEMY).await?;
        tx.commit().await?;

        self.user_repo.invalidate_cache(user_id).await;
        log::info!("학원 등록 - academy_id: {}, user_id: {}", academy.id, user_id);

        self.to_response(academy).await
    }

    pub async fn get(&self, academy_id: i64) -> AppResult<AcademyResponse> {
        let academy = self
            .academy_repo
            .find_by_id(academy_id)
            .await?
            .ok_or_else(|| AppError::NotFound("학원을 찾을 수 없습니다".to_string()))?;

        self.to_response(academy).await
    }

    pub async fn get_mine(&self, user_id: i64) -> AppResult<AcademyResponse> {
        let academy = self.find_mine(user_id).await?;
        self.to_response(academy).await
    }

    pub async fn update_mine(&self, user_id: i64, request: UpdateAcademyRequest) -> AppResult<AcademyResponse> {
        let academy = self.find_mine(user_id).await?;

        let mut tx = self.db.begin().await?;
        let academy = self.academy_repo.update(&mut tx, academy.id, &request).await?;
        tx.commit().await?;

        log::info!("학원 정보 수정 - academy_id: {}", academy.id);
        self.to_response(academy).await
    }

    pub async fn list(&self, query: AcademyListQuery) -> AppResult<PageResponse<AcademyResponse>> {
        let paging = Paging::new(query.page, query.size);
        let filter = AcademyFilter {
            sigungu_id: query.sigungu_id,
            yoga_id: query.yoga_id,
        };

        let (academies, total) = self.academy_repo.list(filter, paging).await?;
        let items = self
            .academy_repo
            .load_details(academies)
            .await?
            .into_iter()
            .map(AcademyResponse::from)
            .collect();

        Ok(PageResponse::new(items, paging, total))
    }

    /// 사용자의 학원. 공고 서비스도 소유 학원 확인에 사용합니다.
    async fn find_mine(&self, user_id: i64) -> AppResult<Academy> {
        self.academy_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("등록한 학원이 없습니다".to_string()))
    }

    async fn to_response(&self, academy: Academy) -> AppResult<AcademyResponse> {
        Ok(AcademyResponse::from(self.academy_repo.load_detail(academy).await?))
    }
}
