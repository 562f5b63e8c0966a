//! # Repository Layer
//!
//! PostgreSQL(sqlx)과 Redis 데이터 액세스 계층입니다.
//! 각 리포지토리는 `register_repository!`로 등록되는 싱글톤이며,
//! `Arc<Database>`/`Arc<RedisClient>`를 주입받습니다.
//!
//! 여러 테이블을 함께 쓰는 작업은 `&mut PgConnection`을 받는 메서드로 제공되어
//! 서비스가 연 트랜잭션 안에서 호출됩니다.
//!
//! ```rust,ignore
//! let mut tx = self.db.begin().await?;
//! let academy = self.academy_repo.insert(&mut tx, user_id, &request, &business_number).await?;
//! self.user_repo.add_role(&mut tx, user_id, ROLE_ACADEMY).await?;
//! tx.commit().await?;
//! ```

pub mod patch;
pub mod users;
pub mod sessions;
pub mod academies;
pub mod teachers;
pub mod recruitments;
pub mod references;

use std::collections::HashMap;
use sqlx::PgConnection;
use crate::core::errors::AppResult;

/// (부모 ID, 값) 목록을 부모 ID별로 묶습니다. 입력 순서를 유지합니다.
pub(crate) fn group_by_parent<T>(rows: Vec<(i64, T)>) -> HashMap<i64, Vec<T>> {
    let mut grouped: HashMap<i64, Vec<T>> = HashMap::new();
    for (parent_id, value) in rows {
        grouped.entry(parent_id).or_default().push(value);
    }
    grouped
}

/// 중복을 제거하되 처음 등장한 순서를 유지합니다.
pub(crate) fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// 다대다 연결 테이블의 행을 주어진 ID 목록으로 교체합니다.
///
/// `table`, `parent_column`, `child_column`은 코드 상수만 전달합니다.
pub(crate) async fn replace_links(
    conn: &mut PgConnection,
    table: &str,
    parent_column: &str,
    child_column: &str,
    parent_id: i64,
    child_ids: &[i64],
) -> AppResult<()> {
    sqlx::query(&format!("DELETE FROM {} WHERE {} = $1", table, parent_column))
        .bind(parent_id)
        .execute(&mut *conn)
        .await?;

    let child_ids = dedup_ids(child_ids);
    if child_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(&format!(
        "INSERT INTO {} ({}, {}) SELECT $1, UNNEST($2::BIGINT[]) ON CONFLICT DO NOTHING",
        table, parent_column, child_column
    ))
    .bind(parent_id)
    .bind(&child_ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// 이미지 테이블의 행을 주어진 URI 목록(순서 = position)으로 교체합니다.
pub(crate) async fn replace_images(
    conn: &mut PgConnection,
    table: &str,
    parent_column: &str,
    parent_id: i64,
    uris: &[String],
) -> AppResult<()> {
    sqlx::query(&format!("DELETE FROM {} WHERE {} = $1", table, parent_column))
        .bind(parent_id)
        .execute(&mut *conn)
        .await?;

    if uris.is_empty() {
        return Ok(());
    }

    sqlx::query(&format!(
        "INSERT INTO {} ({}, uri, position) \
         SELECT $1, u.uri, (u.ord - 1)::INT FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS u(uri, ord)",
        table, parent_column
    ))
    .bind(parent_id)
    .bind(uris)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_parent_keeps_order() {
        let grouped = group_by_parent(vec![(1, "a"), (2, "b"), (1, "c")]);
        assert_eq!(grouped[&1], vec!["a", "c"]);
        assert_eq!(grouped[&2], vec!["b"]);
        assert!(!grouped.contains_key(&3));
    }

    #[test]
    fn test_dedup_ids_keeps_first_occurrence() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(dedup_ids(&[]).is_empty());
    }
}
