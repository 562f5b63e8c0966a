//! 여러 DTO가 공유하는 커스텀 검증 함수

use validator::ValidationError;

/// 하이픈을 제외한 숫자만 남깁니다.
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// 국내 전화번호: 0으로 시작하는 9~11자리 숫자, 하이픈 허용
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    let only_allowed = value.chars().all(|c| c.is_ascii_digit() || c == '-');
    let digits = digits_only(value);

    if !only_allowed || !digits.starts_with('0') || !(9..=11).contains(&digits.len()) {
        return Err(ValidationError::new("invalid_phone_number")
            .with_message("유효한 전화번호를 입력해주세요".into()));
    }
    Ok(())
}

/// 사업자등록번호 형식: 하이픈을 제외하고 10자리 숫자
pub fn validate_business_number_format(value: &str) -> Result<(), ValidationError> {
    let only_allowed = value.chars().all(|c| c.is_ascii_digit() || c == '-');
    if !only_allowed || digits_only(value).len() != 10 {
        return Err(ValidationError::new("invalid_business_number")
            .with_message("사업자등록번호는 10자리 숫자여야 합니다".into()));
    }
    Ok(())
}

/// 영문자와 숫자를 각각 하나 이상 포함
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_letter && has_digit) {
        return Err(ValidationError::new("weak_password")
            .with_message("비밀번호는 영문자와 숫자를 포함해야 합니다".into()));
    }
    Ok(())
}

pub fn validate_verification_code(code: &str) -> Result<(), ValidationError> {
    if code.len() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("invalid_code")
            .with_message("인증 코드는 6자리 숫자입니다".into()));
    }
    Ok(())
}

/// 앞뒤 공백을 제외하고 1자 이상인 검색어
pub fn validate_search_term(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank_search_term")
            .with_message("검색어를 입력해주세요".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term_rejects_blank() {
        assert!(validate_search_term("하타").is_ok());
        assert!(validate_search_term(" 빈 ").is_ok());
        assert!(validate_search_term("").is_err());
        assert!(validate_search_term("   ").is_err());
        assert!(validate_search_term("\t\n").is_err());
    }

    #[test]
    fn test_phone_number() {
        assert!(validate_phone_number("010-1234-5678").is_ok());
        assert!(validate_phone_number("0212345678").is_ok());
        assert!(validate_phone_number("02-123-4567").is_ok());
        assert!(validate_phone_number("1234-5678").is_err());
        assert!(validate_phone_number("010-1234-56789").is_err());
        assert!(validate_phone_number("010 1234 5678").is_err());
    }

    #[test]
    fn test_business_number_format() {
        assert!(validate_business_number_format("123-45-67891").is_ok());
        assert!(validate_business_number_format("1234567891").is_ok());
        assert!(validate_business_number_format("123-45-6789").is_err());
        assert!(validate_business_number_format("12a4567891").is_err());
    }

    #[test]
    fn test_password_strength() {
        assert!(validate_password_strength("yoga1234").is_ok());
        assert!(validate_password_strength("yogayoga").is_err());
        assert!(validate_password_strength("12345678").is_err());
    }

    #[test]
    fn test_verification_code() {
        assert!(validate_verification_code("012345").is_ok());
        assert!(validate_verification_code("12345").is_err());
        assert!(validate_verification_code("12345a").is_err());
    }
}
