use serde::Deserialize;
use validator::Validate;
use crate::domain::dto::validators::validate_phone_number;

/// 내 정보 수정 (PATCH)
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 30, message = "이름은 1-30자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,

    #[validate(url(message = "유효한 이미지 URL이 아닙니다"))]
    pub profile_image_url: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone_number.is_none() && self.profile_image_url.is_none()
    }
}
