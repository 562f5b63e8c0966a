//! 참조 데이터(요가 분류, 지역) DTO

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::dto::validators::validate_search_term;
use crate::domain::entities::references::{YogaGroup, YogaSummary};

#[derive(Debug, Clone, Serialize)]
pub struct YogaGroupResponse {
    pub id: i64,
    pub category: String,
    pub description: Option<String>,
    pub yogas: Vec<YogaSummary>,
}

impl YogaGroupResponse {
    pub fn new(group: YogaGroup, yogas: Vec<YogaSummary>) -> Self {
        Self {
            id: group.id,
            category: group.category,
            description: group.description,
            yogas,
        }
    }
}

/// 요가 이름 자동완성 질의
#[derive(Debug, Deserialize, Validate)]
pub struct YogaSearchQuery {
    #[validate(
        length(min = 1, max = 50, message = "검색어는 1-50자 사이여야 합니다"),
        custom(function = "validate_search_term")
    )]
    pub q: String,
}
