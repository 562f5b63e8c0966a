//! # 요가 분류 서비스
//!
//! 자동완성은 Elasticsearch `match_phrase_prefix`를 우선 사용하고,
//! 검색 엔진이 설정되지 않았거나 실패하면 데이터베이스 접두어 검색으로 대체합니다.

use std::collections::HashMap;
use std::sync::Arc;
use crate::clients::search::{SearchClient, YogaDocument};
use crate::config::SearchConfig;
use crate::core::errors::AppResult;
use crate::domain::dto::references::YogaGroupResponse;
use crate::domain::entities::references::{Yoga, YogaGroup, YogaSummary};
use crate::repositories::references::YogaRepository;

pub struct YogaService {
    yoga_repo: Arc<YogaRepository>,
    search_client: Arc<SearchClient>,
}

crate::register_service!(YogaService { yoga_repo, search_client });

impl YogaService {
    /// 그룹별로 묶은 전체 요가 분류
    pub async fn groups(&self) -> AppResult<Vec<YogaGroupResponse>> {
        let groups = self.yoga_repo.find_groups().await?;
        let yogas = self.yoga_repo.find_all().await?;
        Ok(nest_yogas(groups, yogas))
    }

    pub async fn search(&self, query: &str) -> AppResult<Vec<YogaSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let size = SearchConfig::autocomplete_size();

        if self.search_client.is_enabled() {
            match self.search_client.search_yoga(query, size).await {
                Ok(hits) => return Ok(hits),
                Err(e) => log::warn!("검색 엔진 조회 실패, 데이터베이스 검색으로 대체: {}", e),
            }
        }

        self.yoga_repo.search_by_prefix(query, size as i64).await
    }

    /// 데이터베이스의 요가 분류로 검색 인덱스를 다시 만듭니다.
    pub async fn reindex(&self) -> AppResult<usize> {
        let groups = self.yoga_repo.find_groups().await?;
        let yogas = self.yoga_repo.find_all().await?;
        let documents = to_documents(&groups, yogas);

        self.search_client.recreate_index().await?;
        self.search_client.index_yogas(&documents).await
    }
}

fn nest_yogas(groups: Vec<YogaGroup>, yogas: Vec<Yoga>) -> Vec<YogaGroupResponse> {
    let mut by_group: HashMap<i64, Vec<YogaSummary>> = HashMap::new();
    for yoga in yogas {
        by_group
            .entry(yoga.yoga_group_id)
            .or_default()
            .push(YogaSummary { id: yoga.id, name: yoga.name });
    }

    groups
        .into_iter()
        .map(|group| {
            let yogas = by_group.remove(&group.id).unwrap_or_default();
            YogaGroupResponse::new(group, yogas)
        })
        .collect()
}

fn to_documents(groups: &[YogaGroup], yogas: Vec<Yoga>) -> Vec<YogaDocument> {
    let categories: HashMap<i64, &str> = groups.iter().map(|g| (g.id, g.category.as_str())).collect();

    yogas
        .into_iter()
        .map(|yoga| YogaDocument {
            category: categories.get(&yoga.yoga_group_id).copied().unwrap_or_default().to_string(),
            id: yoga.id,
            name: yoga.name,
            group_id: yoga.yoga_group_id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: i64, category: &str) -> YogaGroup {
        YogaGroup { id, category: category.to_string(), description: None }
    }

    fn yoga(id: i64, group_id: i64, name: &str) -> Yoga {
        Yoga { id, yoga_group_id: group_id, name: name.to_string(), description: None }
    }

    #[test]
    fn test_nest_yogas_keeps_group_order_and_empty_groups() {
        let groups = vec![group(2, "플로우"), group(1, "전통"), group(3, "기타")];
        let yogas = vec![yoga(10, 1, "하타"), yoga(11, 2, "빈야사"), yoga(12, 1, "아쉬탕가")];

        let nested = nest_yogas(groups, yogas);

        assert_eq!(nested.iter().map(|g| g.id).collect::<Vec<_>>(), vec![2, 1, 3]);
        assert_eq!(nested[1].yogas.iter().map(|y| y.id).collect::<Vec<_>>(), vec![10, 12]);
        assert!(nested[2].yogas.is_empty());
    }

    #[test]
    fn test_documents_carry_group_category() {
        let docs = to_documents(&[group(1, "전통")], vec![yoga(10, 1, "하타"), yoga(11, 9, "고아")]);
        assert_eq!(docs[0].category, "전통");
        assert_eq!(docs[1].category, "");
    }
}
