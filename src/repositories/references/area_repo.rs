//! 지역(시/도, 시/군/구) 리포지토리

use std::sync::Arc;
use crate::core::errors::AppResult;
use crate::db::Database;
use crate::domain::entities::references::{Area, Sigungu};

pub struct AreaRepository {
    db: Arc<Database>,
}

crate::register_repository!(AreaRepository { db });

impl AreaRepository {
    pub async fn find_all(&self) -> AppResult<Vec<Area>> {
        let areas = sqlx::query_as::<_, Area>("SELECT id, name FROM areas ORDER BY id")
            .fetch_all(self.db.pool())
            .await?;
        Ok(areas)
    }

    pub async fn find_by_id(&self, area_id: i64) -> AppResult<Option<Area>> {
        let area = sqlx::query_as::<_, Area>("SELECT id, name FROM areas WHERE id = $1")
            .bind(area_id)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(area)
    }

    pub async fn find_sigungus(&self, area_id: i64) -> AppResult<Vec<Sigungu>> {
        let sigungus = sqlx::query_as::<_, Sigungu>(
            "SELECT id, area_id, name FROM sigungus WHERE area_id = $1 ORDER BY name",
        )
        .bind(area_id)
        .fetch_all(self.db.pool())
        .await?;
        Ok(sigungus)
    }

    /// 시드 적재용. 이미 있으면 기존 ID를 반환합니다.
    pub async fn upsert_area(&self, name: &str) -> AppResult<i64> {
        let id = sqlx::query_scalar(
            "INSERT INTO areas (name) VALUES ($1) \
             ON CONFLICT (name) DO UPDATE SET updated_at = NOW() RETURNING id",
        )
        .bind(name)
        .fetch_one(self.db.pool())
        .await?;
        Ok(id)
    }

    pub async fn upsert_sigungu(&self, area_id: i64, name: &str) -> AppResult<i64> {
        let id = sqlx::query_scalar(
            "INSERT INTO sigungus (area_id, name) VALUES ($1, $2) \
             ON CONFLICT (area_id, name) DO UPDATE SET updated_at = NOW() RETURNING id",
        )
        .bind(area_id)
        .bind(name)
        .fetch_one(self.db.pool())
        .await?;
        Ok(id)
    }
}
