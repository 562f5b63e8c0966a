use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use crate::domain::entities::academies::Academy;
use crate::domain::entities::references::{SigunguSummary, YogaSummary};

#[derive(Debug, Clone, Serialize)]
pub struct AcademyResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub business_number: String,
    pub representative_name: String,
    pub opened_at: NaiveDate,
    pub call_number: String,
    pub road_address: String,
    pub detail_address: Option<String>,
    pub sigungu: Option<SigunguSummary>,
    pub introduce: Option<String>,
    pub instagram_url: Option<String>,
    pub homepage_url: Option<String>,
    pub yogas: Vec<YogaSummary>,
    pub image_uris: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 학원과 연관 데이터 묶음
#[derive(Debug, Clone)]
pub struct AcademyDetail {
    pub academy: Academy,
    pub sigungu: Option<SigunguSummary>,
    pub yogas: Vec<YogaSummary>,
    pub image_uris: Vec<String>,
}

impl From<AcademyDetail> for AcademyResponse {
    fn from(detail: AcademyDetail) -> Self {
        let AcademyDetail { academy, sigungu, yogas, image_uris } = detail;

        Self {
            id: academy.id,
            user_id: academy.user_id,
            name: academy.name,
            business_number: academy.business_number,
            representative_name: academy.representative_name,
            opened_at: academy.opened_at,
            call_number: academy.call_number,
            road_address: academy.road_address,
            detail_address: academy.detail_address,
            sigungu,
            introduce: academy.introduce,
            instagram_url: academy.instagram_url,
            homepage_url: academy.homepage_url,
            yogas,
            image_uris,
            created_at: academy.created_at,
            updated_at: academy.updated_at,
        }
    }
}
