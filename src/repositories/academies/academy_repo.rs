//! # 학원 리포지토리
//!
//! `academies`와 하위 테이블(`academy_yogas`, `academy_images`)을 다룹니다.
//! 목록 조회 시 하위 데이터는 학원 ID 묶음으로 한 번에 읽어 N+1 조회를 피합니다.

use std::collections::HashMap;
use std::sync::Arc;
use sqlx::PgConnection;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::dto::academies::{AcademyDetail, RegisterAcademyRequest, UpdateAcademyRequest};
use crate::domain::dto::common::Paging;
use crate::domain::entities::academies::Academy;
use crate::domain::entities::references::{SigunguSummary, YogaSummary};
use crate::repositories::{group_by_parent, replace_images, replace_links};

const ACADEMY_COLUMNS: &str = "a.id, a.user_id, a.name, a.business_number, a.representative_name, a.opened_at, \
     a.call_number, a.road_address, a.detail_address, a.sigungu_id, a.introduce, a.instagram_url, \
     a.homepage_url, a.created_at, a.updated_at, a.deleted_at";

const LIST_FILTER: &str = "a.deleted_at IS NULL \
     AND ($1::BIGINT IS NULL OR a.sigungu_id = $1) \
     AND ($2::BIGINT IS NULL OR EXISTS ( \
         SELECT 1 FROM academy_yogas ay WHERE ay.academy_id = a.id AND ay.yoga_id = $2))";

pub struct AcademyRepository {
    db: Arc<Database>,
}

crate::register_repository!(AcademyRepository { db });

#[derive(Debug, Clone, Copy, Default)]
pub struct AcademyFilter {
    pub sigungu_id: Option<i64>,
    pub yoga_id: Option<i64>,
}

impl AcademyRepository {
    pub async fn find_by_id(&self, academy_id: i64) -> AppResult<Option<Academy>> {
        let academy = sqlx::query_as::<_, Academy>(&format!(
            "SELECT {} FROM academies a WHERE a.id = $1 AND a.deleted_at IS NULL",
            ACADEMY_COLUMNS
        ))
        .bind(academy_id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(academy)
    }

    pub async fn find_by_user_id(&self, user_id: i64) -> AppResult<Option<Academy>> {
        let academy = sqlx::query_as::<_, Academy>(&format!(
            "SELECT {} FROM academies a WHERE a.user_id = $1 AND a.deleted_at IS NULL",
            ACADEMY_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(academy)
    }

    pub async fn exists_by_business_number(&self, business_number: &str) -> AppResult<bool> {
        let exists = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM academies WHERE business_number = $1)")
            .bind(business_number)
            .fetch_one(self.db.pool())
            .await?;
        Ok(exists)
    }

    /// 트랜잭션 안에서 학원과 하위 데이터를 생성합니다.
    ///
    /// `business_number`는 하이픈을 제거한 값이어야 합니다.
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        request: &RegisterAcademyRequest,
        business_number: &str,
    ) -> AppResult<Academy> {
        let academy = sqlx::query_as::<_, Academy>(&format!(
            "INSERT INTO academies AS a (user_id, name, business_number, representative_name, opened_at, \
                call_number, road_address, detail_address, sigungu_id, introduce, instagram_url, homepage_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING {}",
            ACADEMY_COLUMNS
        ))
        .bind(user_id)
        .bind(request.name.trim())
        .bind(business_number)
        .bind(request.representative_name.trim())
        .bind(request.opened_at)
        .bind(&request.call_number)
        .bind(request.road_address.trim())
        .bind(&request.detail_address)
        .bind(request.sigungu_id)
        .bind(&request.introduce)
        .bind(&request.instagram_url)
        .bind(&request.homepage_url)
        .fetch_one(&mut *conn)
        .await?;

        replace_links(conn, "academy_yogas", "academy_id", "yoga_id", academy.id, &request.yoga_ids).await?;
        replace_images(conn, "academy_images", "academy_id", academy.id, &request.image_uris).await?;

        Ok(academy)
    }

    /// 트랜잭션 안에서 부분 수정합니다. `None` 필드는 유지합니다.
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        academy_id: i64,
        update: &UpdateAcademyRequest,
    ) -> AppResult<Academy> {
        let academy = sqlx::query_as::<_, Academy>(&format!(
            "UPDATE academies AS a SET \
                name = COALESCE($2, a.name), \
                call_number = COALESCE($3, a.call_number), \
                road_address = COALESCE($4, a.road_address), \
                detail_address = COALESCE($5, a.detail_address), \
                sigungu_id = COALESCE($6, a.sigungu_id), \
                introduce = COALESCE($7, a.introduce), \
                instagram_url = COALESCE($8, a.instagram_url), \
                homepage_url = COALESCE($9, a.homepage_url), \
                updated_at = NOW() \
             WHERE a.id = $1 AND a.deleted_at IS NULL RETURNING {}",
            ACADEMY_COLUMNS
        ))
        .bind(academy_id)
        .bind(&update.name)
        .bind(&update.call_number)
        .bind(&update.road_address)
        .bind(&update.detail_address)
        .bind(update.sigungu_id)
        .bind(&update.introduce)
        .bind(&update.instagram_url)
        .bind(&update.homepage_url)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound("학원을 찾을 수 없습니다".to_string()))?;

        if let Some(ref yoga_ids) = update.yoga_ids {
            replace_links(conn, "academy_yogas", "academy_id", "yoga_id", academy_id, yoga_ids).await?;
        }
        if let Some(ref image_uris) = update.image_uris {
            replace_images(conn, "academy_images", "academy_id", academy_id, image_uris).await?;
        }

        Ok(academy)
    }

    pub async fn list(&self, filter: AcademyFilter, paging: Paging) -> AppResult<(Vec<Academy>, i64)> {
        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM academies a WHERE {}", LIST_FILTER))
            .bind(filter.sigungu_id)
            .bind(filter.yoga_id)
            .fetch_one(self.db.pool())
            .await?;

        let academies = sqlx::query_as::<_, Academy>(&format!(
            "SELECT {} FROM academies a WHERE {} ORDER BY a.created_at DESC, a.id DESC LIMIT $3 OFFSET $4",
            ACADEMY_COLUMNS, LIST_FILTER
        ))
        .bind(filter.sigungu_id)
        .bind(filter.yoga_id)
        .bind(paging.size)
        .bind(paging.offset())
        .fetch_all(self.db.pool())
        .await?;

        Ok((academies, total))
    }

    /// 학원 목록에 지역/요가/이미지 정보를 붙입니다. 입력 순서를 유지합니다.
    pub async fn load_details(&self, academies: Vec<Academy>) -> AppResult<Vec<AcademyDetail>> {
        if academies.is_empty() {
            return Ok(Vec::new());
        }

        let academy_ids: Vec<i64> = academies.iter().map(|a| a.id).collect();
        let sigungu_ids: Vec<i64> = academies.iter().map(|a| a.sigungu_id).collect();

        let sigungus: HashMap<i64, SigunguSummary> = sqlx::query_as::<_, SigunguSummary>(
            "SELECT s.id, s.name, s.area_id, ar.name AS area_name \
             FROM sigungus s JOIN areas ar ON ar.id = s.area_id WHERE s.id = ANY($1)",
        )
        .bind(&sigungu_ids)
        .fetch_all(self.db.pool())
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

        let yoga_rows: Vec<(i64, i64, String)> = sqlx::query_as(
            "SELECT ay.academy_id, y.id, y.name FROM academy_yogas ay \
             JOIN yogas y ON y.id = ay.yoga_id WHERE ay.academy_id = ANY($1) ORDER BY y.name",
        )
        .bind(&academy_ids)
        .fetch_all(self.db.pool())
        .await?;
        let mut yogas = group_by_parent(
            yoga_rows
                .into_iter()
                .map(|(academy_id, id, name)| (academy_id, YogaSummary { id, name }))
                .collect(),
        );

        let image_rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT academy_id, uri FROM academy_images WHERE academy_id = ANY($1) ORDER BY position, id",
        )
        .bind(&academy_ids)
        .fetch_all(self.db.pool())
        .await?;
        let mut images = group_by_parent(image_rows);

        Ok(academies
            .into_iter()
            .map(|academy| AcademyDetail {
                sigungu: sigungus.get(&academy.sigungu_id).cloned(),
                yogas: yogas.remove(&academy.id).unwrap_or_default(),
                image_uris: images.remove(&academy.id).unwrap_or_default(),
                academy,
            })
            .collect())
    }

    pub async fn load_detail(&self, academy: Academy) -> AppResult<AcademyDetail> {
        self.load_details(vec![academy])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("학원 상세 정보 구성 실패".to_string()))
    }

    /// 사용자의 학원을 소프트 삭제하고, 해당 학원의 공고도 함께 삭제합니다.
    pub async fn soft_delete_by_user(&self, conn: &mut PgConnection, user_id: i64) -> AppResult<()> {
        sqlx::query(
            "UPDATE recruitments SET deleted_at = NOW(), is_open = FALSE, updated_at = NOW() \
             WHERE deleted_at IS NULL AND academy_id IN ( \
                SELECT id FROM academies WHERE user_id = $1 AND deleted_at IS NULL)",
        )
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query("UPDATE academies SET deleted_at = NOW(), updated_at = NOW() WHERE user_id = $1 AND deleted_at IS NULL")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}
