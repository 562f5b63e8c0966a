use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 시/도
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Area {
    pub id: i64,
    pub name: String,
}

/// 시/군/구
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sigungu {
    pub id: i64,
    pub area_id: i64,
    pub name: String,
}

/// 상위 시/도 이름을 함께 담은 시/군/구 요약
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SigunguSummary {
    pub id: i64,
    pub name: String,
    pub area_id: i64,
    pub area_name: String,
}
