//! 하위 레코드 부분 수정 계산
//!
//! PATCH 요청에 담긴 하위 레코드 목록(각 항목은 선택적 `id`)을 부모의 기존 하위
//! 레코드 id와 비교해 생성/수정/삭제 집합으로 나눕니다.
//!
//! ```text
//! existing = {10, 11, 12}
//! incoming = [{id: 11}, {id: None}, {id: 12}]
//!
//! create = [{id: None}]
//! update = [(11, ..), (12, ..)]
//! delete = [10]
//! ```
//!
//! - 부모에 속하지 않은 id는 `ValidationError` (아무것도 쓰지 않음)
//! - 같은 id가 두 번 나오면 `ValidationError`
//! - 빈 목록은 기존 레코드 전부 삭제
//!
//! 목록 자체가 생략된 경우(`None`)는 호출하지 않고 하위 레코드를 그대로 둡니다.
//! 계산 결과의 반영은 리포지토리가 한 트랜잭션 안에서 수행합니다.

use std::collections::HashSet;
use crate::core::errors::{AppError, AppResult};

/// 선택적 id를 가진 하위 레코드 입력
pub trait Identified {
    fn id(&self) -> Option<i64>;
}

#[derive(Debug, PartialEq)]
pub struct Reconciliation<T> {
    pub create: Vec<T>,
    pub update: Vec<(i64, T)>,
    /// 기존 id 순서를 유지
    pub delete: Vec<i64>,
}

impl<T> Reconciliation<T> {
    pub fn is_noop(&self) -> bool {
        self.create.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}

pub fn reconcile<T: Identified>(existing: &[i64], incoming: Vec<T>) -> AppResult<Reconciliation<T>> {
    let existing_set: HashSet<i64> = existing.iter().copied().collect();
    let mut seen = HashSet::with_capacity(incoming.len());

    let mut create = Vec::new();
    let mut update = Vec::new();

    for item in incoming {
        match item.id() {
            None => create.push(item),
            Some(id) => {
                if !existing_set.contains(&id) {
                    return Err(AppError::ValidationError(format!(
                        "존재하지 않거나 수정할 수 없는 항목입니다 (id={})",
                        id
                    )));
                }
                if !seen.insert(id) {
                    return Err(AppError::ValidationError(format!(
                        "같은 항목이 중복되었습니다 (id={})",
                        id
                    )));
                }
                update.push((id, item));
            }
        }
    }

    let delete = existing
        .iter()
        .copied()
        .filter(|id| !seen.contains(id))
        .collect();

    Ok(Reconciliation { create, update, delete })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: Option<i64>,
        label: &'static str,
    }

    impl Identified for Item {
        fn id(&self) -> Option<i64> {
            self.id
        }
    }

    fn item(id: Option<i64>, label: &'static str) -> Item {
        Item { id, label }
    }

    #[test]
    fn test_splits_into_create_update_delete() {
        let incoming = vec![item(Some(11), "mon"), item(None, "new"), item(Some(12), "wed")];
        let result = reconcile(&[10, 11, 12], incoming).unwrap();

        assert_eq!(result.create, vec![item(None, "new")]);
        assert_eq!(result.update, vec![(11, item(Some(11), "mon")), (12, item(Some(12), "wed"))]);
        assert_eq!(result.delete, vec![10]);
    }

    #[test]
    fn test_empty_incoming_deletes_everything() {
        let result = reconcile::<Item>(&[3, 1, 2], vec![]).unwrap();

        assert!(result.create.is_empty());
        assert!(result.update.is_empty());
        assert_eq!(result.delete, vec![3, 1, 2]);
    }

    #[test]
    fn test_no_existing_rows_all_creates() {
        let result = reconcile(&[], vec![item(None, "a"), item(None, "b")]).unwrap();

        assert_eq!(result.create.len(), 2);
        assert!(result.update.is_empty());
        assert!(result.delete.is_empty());
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        let err = reconcile(&[1, 2], vec![item(Some(99), "foreign")]).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg.contains("99")));
    }

    #[test]
    fn test_id_on_new_parent_is_rejected() {
        let err = reconcile(&[], vec![item(Some(1), "x")]).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let err = reconcile(&[5], vec![item(Some(5), "a"), item(Some(5), "b")]).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg.contains("중복")));
    }

    #[test]
    fn test_resubmitting_same_set_only_updates() {
        let incoming = vec![item(Some(1), "a"), item(Some(2), "b")];
        let result = reconcile(&[1, 2], incoming).unwrap();

        assert!(result.create.is_empty());
        assert!(result.delete.is_empty());
        assert_eq!(result.update.len(), 2);
        assert!(!result.is_noop());
    }

    #[test]
    fn test_partitions_cover_existing_ids_exactly_once() {
        let existing = [1, 2, 3, 4, 5, 6];
        let incoming = vec![item(Some(2), ""), item(Some(5), ""), item(None, ""), item(Some(6), "")];
        let result = reconcile(&existing, incoming).unwrap();

        let mut touched: Vec<i64> = result.update.iter().map(|(id, _)| *id).collect();
        touched.extend(&result.delete);
        touched.sort_unstable();
        assert_eq!(touched, existing.to_vec());
    }
}
