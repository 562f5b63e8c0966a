//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 정의입니다. 요청 DTO는 `validator::Validate`를 구현하며
//! 핸들러가 서비스 호출 전에 검증합니다.
//!
//! 부분 수정(PATCH) DTO의 필드는 모두 `Option`이며, `None`은 "변경 없음"을 뜻합니다.
//! 하위 레코드 목록 필드는 `None`이면 유지, 빈 배열이면 전부 삭제입니다.

pub mod common;
pub mod validators;
pub mod users;
pub mod tokens;
pub mod academies;
pub mod teachers;
pub mod recruitments;
pub mod references;
pub mod uploads;

pub use common::{PageResponse, Paging};
pub use tokens::{AuthResponse, RefreshTokenRequest};
pub use users::{
    LoginRequest, SendEmailCodeRequest, SignupRequest, SocialLoginRequest, UpdateUserRequest, UserResponse,
    VerifyEmailCodeRequest,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_reexports_resolve_to_submodule_types() {
        let paging: Paging = common::Paging::new(None, None);
        assert_eq!(paging.size, 20);

        let refresh: RefreshTokenRequest = serde_json::from_str(r#"{"refresh_token":"abc"}"#).unwrap();
        let via_module: tokens::request::RefreshTokenRequest = refresh;
        assert_eq!(via_module.refresh_token, "abc");
    }
}
