//! # Domain Layer Module
//!
//! 요가 강사/학원 마켓플레이스의 도메인 타입입니다.
//!
//! ## 구성
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 테이블과 대응하는 엔티티 (User, Academy, Teacher, Recruitment, 참조 데이터)
//! ├── dto       - HTTP 요청/응답 계약과 검증 규칙
//! └── models    - 인증 사용자, JWT 클레임, 세션 마커, 소셜 프로필
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, Clients)
//! ```
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 시스템 | 역할 |
//! |--------|-----------|------|
//! | `@Entity` | `entities` 모듈 | 테이블 매핑 |
//! | `@RequestBody` / `@ResponseBody` | `dto` 모듈 | API 계약 정의 |
//! | `@Valid` | `validator::Validate` | 입력값 검증 |

pub mod entities;
pub mod dto;
pub mod models;
