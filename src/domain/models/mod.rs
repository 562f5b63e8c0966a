//! 도메인 모델
//!
//! 데이터베이스 테이블에 대응하지 않는 값 객체입니다.
//!
//! - [`auth`] - 요청에 주입되는 인증 사용자, 인증 모드와 역할 요구 사항
//! - [`token`] - JWT 클레임, 토큰 쌍, 리프레시 세션 마커
//! - [`social`] - 소셜 제공자 응답을 정규화한 프로필

pub mod auth;
pub mod token;
pub mod social;
