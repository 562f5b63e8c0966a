//! 사용자 관리 서비스 모듈
//!
//! 내 정보 조회/수정과 회원 탈퇴를 담당합니다. 가입/로그인은 [`crate::services::auth`]에 있습니다.
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let me = UserService::instance().get_me(user.user_id).await?;
//! ```

pub mod user_service;

pub use user_service::*;
