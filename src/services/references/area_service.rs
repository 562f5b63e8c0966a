use std::sync::Arc;
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::references::{Area, Sigungu};
use crate::repositories::references::AreaRepository;

pub struct AreaService {
    area_repo: Arc<AreaRepository>,
}

crate::register_service!(AreaService { area_repo });

impl AreaService {
    pub async fn areas(&self) -> AppResult<Vec<Area>> {
        self.area_repo.find_all().await
    }

    /// 존재하지 않는 시/도면 `NotFound`입니다.
    pub async fn sigungus(&self, area_id: i64) -> AppResult<Vec<Sigungu>> {
        if self.area_repo.find_by_id(area_id).await?.is_none() {
            return Err(AppError::NotFound("지역을 찾을 수 없습니다".to_string()));
        }
        self.area_repo.find_sigungus(area_id).await
    }
}
