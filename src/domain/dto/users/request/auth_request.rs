//! 인증 요청 DTO
//!
//! 이메일 인증, 로컬 가입/로그인, 소셜 로그인 요청 본문입니다.

use serde::Deserialize;
use validator::{Validate, ValidationError};
use crate::domain::dto::validators::{
    validate_password_strength, validate_phone_number, validate_verification_code,
};

#[derive(Debug, Deserialize, Validate)]
pub struct SendEmailCodeRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyEmailCodeRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(custom(function = "validate_verification_code"))]
    pub code: String,
}

/// 로컬 회원가입
///
/// 같은 이메일로 `/auth/email/verify`를 먼저 마쳐야 합니다.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_passwords_match"))]
pub struct SignupRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, max = 64, message = "비밀번호는 8-64자 사이여야 합니다"))]
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    pub password_confirm: String,

    #[validate(length(min = 1, max = 30, message = "이름은 1-30자 사이여야 합니다"))]
    pub name: String,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,
}

fn validate_passwords_match(req: &SignupRequest) -> Result<(), ValidationError> {
    if req.password != req.password_confirm {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("비밀번호가 일치하지 않습니다".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 소셜 로그인
///
/// 클라이언트가 제공자 SDK로 받은 액세스 토큰을 전달합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct SocialLoginRequest {
    #[validate(length(min = 1, message = "제공자 액세스 토큰이 필요합니다"))]
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, confirm: &str) -> SignupRequest {
        SignupRequest {
            email: "yogi@example.com".to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
            name: "홍길동".to_string(),
            phone_number: Some("010-1234-5678".to_string()),
        }
    }

    #[test]
    fn test_valid_signup() {
        assert!(signup("namaste108", "namaste108").validate().is_ok());
    }

    #[test]
    fn test_signup_password_mismatch() {
        let errors = signup("namaste108", "namaste109").validate().unwrap_err();
        assert!(errors.to_string().contains("비밀번호가 일치하지 않습니다"));
    }

    #[test]
    fn test_signup_weak_password() {
        assert!(signup("namastee", "namastee").validate().is_err());
        assert!(signup("nm1", "nm1").validate().is_err());
    }

    #[test]
    fn test_signup_invalid_phone() {
        let mut req = signup("namaste108", "namaste108");
        req.phone_number = Some("12-34".to_string());
        assert!(req.validate().is_err());

        req.phone_number = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_verify_code_request() {
        let req = VerifyEmailCodeRequest {
            email: "yogi@example.com".to_string(),
            code: "12345".to_string(),
        };
        assert!(req.validate().is_err());
    }
}
