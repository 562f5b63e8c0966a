//! 요가 강사/학원 매칭 마켓플레이스 백엔드
//!
//! 요가 학원의 채용 공고와 강사 프로필을 잇는 REST API 서비스입니다.
//!
//! # Features
//!
//! - **인증**: 이메일 인증 기반 로컬 가입, 카카오/네이버/구글 소셜 로그인, JWT 토큰 쌍과 Redis 세션
//! - **학원**: 사업자등록번호 진위 확인 후 등록, 지역/요가 종류별 목록
//! - **강사**: 경력/자격증을 포함한 프로필, 부분 수정 시 하위 항목 일괄 반영
//! - **채용 공고**: 수업 일정 포함 공고 등록/수정/마감
//! - **참조 데이터**: 요가 분류(Elasticsearch 자동완성), 시/도와 시/군/구
//! - **업로드**: S3 호환 스토리지 이미지 업로드
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (/api/v1)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 추출/검증, 응답 직렬화
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 트랜잭션 경계
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────────────────┐
//! │  Repositories   │     │ Clients                      │
//! └─────────────────┘     │ S3, ES, SMTP, 국세청, 소셜     │
//!          │              └──────────────────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ PostgreSQL+Redis│ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use yoga_marketplace_backend::services::recruitments::RecruitmentService;
//!
//! let page = RecruitmentService::instance().list(query).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod clients;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
