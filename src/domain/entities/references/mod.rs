//! 참조 데이터 엔티티 (지역, 요가 분류)
//!
//! 시드 도구로 적재되며 API에서는 읽기 전용입니다.

pub mod area;
pub mod yoga;

pub use area::*;
pub use yoga::*;
