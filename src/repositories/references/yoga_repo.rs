//! 요가 분류 리포지토리

use std::sync::Arc;
use crate::core::errors::AppResult;
use crate::db::Database;
use crate::domain::entities::references::{Yoga, YogaGroup, YogaSummary};

pub struct YogaRepository {
    db: Arc<Database>,
}

crate::register_repository!(YogaRepository { db });

/// LIKE 패턴의 특수 문자를 이스케이프합니다.
pub fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl YogaRepository {
    pub async fn find_groups(&self) -> AppResult<Vec<YogaGroup>> {
        let groups = sqlx::query_as::<_, YogaGroup>(
            "SELECT id, category, description FROM yoga_groups ORDER BY id",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(groups)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Yoga>> {
        let yogas = sqlx::query_as::<_, Yoga>(
            "SELECT id, yoga_group_id, name, description FROM yogas ORDER BY yoga_group_id, name",
        )
        .fetch_all(self.db.pool())
        .await?;
        Ok(yogas)
    }

    /// 이름 접두어 검색 (대소문자 무시)
    pub async fn search_by_prefix(&self, query: &str, limit: i64) -> AppResult<Vec<YogaSummary>> {
        let yogas = sqlx::query_as::<_, YogaSummary>(
            "SELECT id, name FROM yogas WHERE name ILIKE $1 ESCAPE '\\' ORDER BY length(name), name LIMIT $2",
        )
        .bind(format!("{}%", escape_like(query.trim())))
        .bind(limit)
        .fetch_all(self.db.pool())
        .await?;
        Ok(yogas)
    }

    pub async fn upsert_group(&self, category: &str, description: Option<&str>) -> AppResult<i64> {
        let id = sqlx::query_scalar(
            "INSERT INTO yoga_groups (category, description) VALUES ($1, $2) \
             ON CONFLICT (category) DO UPDATE SET description = EXCLUDED.description, updated_at = NOW() \
             RETURNING id",
        )
        .bind(category)
        .bind(description)
        .fetch_one(self.db.pool())
        .await?;
        Ok(id)
    }

    pub async fn upsert_yoga(&self, group_id: i64, name: &str, description: Option<&str>) -> AppResult<i64> {
        let id = sqlx::query_scalar(
            "INSERT INTO yogas (yoga_group_id, name, description) VALUES ($1, $2, $3) \
             ON CONFLICT (name) DO UPDATE SET yoga_group_id = EXCLUDED.yoga_group_id, \
                description = EXCLUDED.description, updated_at = NOW() \
             RETURNING id",
        )
        .bind(group_id)
        .bind(name)
        .bind(description)
        .fetch_one(self.db.pool())
        .await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("하타"), "하타");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }
}
