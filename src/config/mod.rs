//! # Configuration Module
//!
//! 환경 변수 기반 설정을 중앙에서 관리합니다.
//! Spring의 `@Configuration` 클래스와 비슷한 역할이며, 각 설정은 상태 없는
//! 유닛 구조체의 연관 함수로 제공됩니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 서버, PostgreSQL, Redis, 비밀번호 해시 설정
//! - [`auth_config`] - JWT, 이메일 인증, 소셜 로그인 설정
//! - [`integration_config`] - 스토리지, 검색, 메일, 사업자 조회 설정
//!
//! ## 프로파일
//!
//! `PROFILE` 환경 변수로 `.env.dev`/`.env.prod` 파일을 선택하며,
//! 없으면 `.env`를 읽습니다. 로딩은 `main`에서 수행합니다.

pub mod data_config;
pub mod auth_config;
pub mod integration_config;

pub use data_config::*;
pub use auth_config::*;
pub use integration_config::*;
