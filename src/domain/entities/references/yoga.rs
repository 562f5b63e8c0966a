use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 요가 분류 그룹 (예: 하타 계열, 빈야사 계열)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct YogaGroup {
    pub id: i64,
    pub category: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Yoga {
    pub id: i64,
    pub yoga_group_id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct YogaSummary {
    pub id: i64,
    pub name: String,
}
