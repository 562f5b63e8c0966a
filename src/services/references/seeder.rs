//! 참조 데이터 적재
//!
//! ```json
//! // areas.json
//! [{ "name": "서울특별시", "sigungus": ["강남구", "마포구"] }]
//!
//! // yoga.json
//! [{ "category": "전통", "description": "..", "yogas": [{ "name": "하타", "description": null }] }]
//! ```
//!
//! 이름 기준 upsert이므로 같은 파일을 여러 번 적재해도 결과가 같습니다.

use std::sync::Arc;
use serde::Deserialize;
use crate::core::errors::AppResult;
use crate::repositories::references::{AreaRepository, YogaRepository};

#[derive(Debug, Clone, Deserialize)]
pub struct AreaSeed {
    pub name: String,
    #[serde(default)]
    pub sigungus: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YogaSeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YogaGroupSeed {
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub yogas: Vec<YogaSeed>,
}

#[derive(Debug, Default, PartialEq)]
pub struct SeedSummary {
    pub parents: usize,
    pub children: usize,
}

pub struct ReferenceSeeder {
    area_repo: Arc<AreaRepository>,
    yoga_repo: Arc<YogaRepository>,
}

crate::register_service!(ReferenceSeeder { area_repo, yoga_repo });

impl ReferenceSeeder {
    pub async fn seed_areas(&self, areas: &[AreaSeed]) -> AppResult<SeedSummary> {
        let mut summary = SeedSummary::default();
        for area in areas {
            let area_id = self.area_repo.upsert_area(area.name.trim()).await?;
            summary.parents += 1;
            for sigungu in &area.sigungus {
                self.area_repo.upsert_sigungu(area_id, sigungu.trim()).await?;
                summary.children += 1;
            }
        }

        log::info!("지역 적재 완료 - 시/도 {}, 시/군/구 {}", summary.parents, summary.children);
        Ok(summary)
    }

    pub async fn seed_yoga(&self, groups: &[YogaGroupSeed]) -> AppResult<SeedSummary> {
        let mut summary = SeedSummary::default();
        for group in groups {
            let group_id = self
                .yoga_repo
                .upsert_group(group.category.trim(), group.description.as_deref())
                .await?;
            summary.parents += 1;
            for yoga in &group.yogas {
                self.yoga_repo
                    .upsert_yoga(group_id, yoga.name.trim(), yoga.description.as_deref())
                    .await?;
                summary.children += 1;
            }
        }

        log::info!("요가 분류 적재 완료 - 그룹 {}, 요가 {}", summary.parents, summary.children);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_files_deserialize_with_defaults() {
        let areas: Vec<AreaSeed> = serde_json::from_str(
            r#"[{"name":"서울특별시","sigungus":["강남구","마포구"]},{"name":"세종특별자치시"}]"#,
        )
        .unwrap();
        assert_eq!(areas[0].sigungus.len(), 2);
        assert!(areas[1].sigungus.is_empty());

        let groups: Vec<YogaGroupSeed> =
            serde_json::from_str(r#"[{"category":"전통","yogas":[{"name":"하타"}]}]"#).unwrap();
        assert_eq!(groups[0].yogas[0].name, "하타");
        assert!(groups[0].description.is_none());
    }
}
