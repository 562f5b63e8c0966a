//! 참조 데이터 서비스
//!
//! - [`YogaService`] - 요가 분류 조회, 자동완성 검색, 검색 인덱스 재색인
//! - [`AreaService`] - 시/도, 시/군/구 조회
//! - [`ReferenceSeeder`] - JSON 참조 데이터 적재 (`seed` 바이너리)

pub mod yoga_service;
pub mod area_service;
pub mod seeder;

pub use yoga_service::*;
pub use area_service::*;
pub use seeder::*;
