//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 각 서비스는 `register_service!`로 등록되는 싱글톤이며, 필드 타입으로
//! 리포지토리와 외부 클라이언트를 주입받습니다.
//!
//! - `auth` - 회원가입, 로그인, 소셜 로그인, 토큰 갱신/로그아웃, 이메일 인증
//! - `users` - 내 정보 조회/수정, 회원 탈퇴
//! - `academies` - 학원 등록(사업자 진위 확인), 조회, 수정, 목록
//! - `teachers` - 강사 프로필 등록, 조회, 수정
//! - `recruitments` - 채용 공고 등록, 조회, 수정, 삭제, 목록
//! - `references` - 요가 분류, 지역, 참조 데이터 적재
//! - `uploads` - 이미지 업로드
//!
//! ```rust,ignore
//! use crate::services::academies::AcademyService;
//!
//! let academy = AcademyService::instance().get(academy_id).await?;
//! ```

pub mod auth;
pub mod users;
pub mod academies;
pub mod teachers;
pub mod recruitments;
pub mod references;
pub mod uploads;
