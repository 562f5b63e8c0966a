//! 목록 조회 공통 DTO

use serde::Serialize;
use crate::config::PagingConfig;

/// 1부터 시작하는 페이지 번호와 1..=100 범위로 보정된 페이지 크기
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paging {
    pub page: i64,
    pub size: i64,
}

impl Paging {
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            size: size.unwrap_or(PagingConfig::DEFAULT_SIZE).clamp(1, PagingConfig::MAX_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.size
    }
}

#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total: i64,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, paging: Paging, total: i64) -> Self {
        Self {
            items,
            page: paging.page,
            size: paging.size,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_defaults() {
        let paging = Paging::new(None, None);
        assert_eq!(paging, Paging { page: 1, size: 20 });
        assert_eq!(paging.offset(), 0);
    }

    #[test]
    fn test_paging_clamps_out_of_range_values() {
        assert_eq!(Paging::new(Some(0), Some(0)), Paging { page: 1, size: 1 });
        assert_eq!(Paging::new(Some(-3), Some(1000)), Paging { page: 1, size: 100 });
        assert_eq!(Paging::new(Some(3), Some(10)).offset(), 20);
    }
}
