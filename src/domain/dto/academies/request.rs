//! 학원 요청 DTO

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;
use crate::domain::dto::validators::{validate_business_number_format, validate_phone_number};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterAcademyRequest {
    #[validate(length(min = 1, max = 50, message = "학원명은 1-50자 사이여야 합니다"))]
    pub name: String,

    #[validate(custom(function = "validate_business_number_format"))]
    pub business_number: String,

    #[validate(length(min = 1, max = 30, message = "대표자명은 1-30자 사이여야 합니다"))]
    pub representative_name: String,

    /// 개업일자. 사업자 진위확인에 사용됩니다.
    pub opened_at: NaiveDate,

    #[validate(custom(function = "validate_phone_number"))]
    pub call_number: String,

    #[validate(length(min = 1, max = 200, message = "도로명 주소는 1-200자 사이여야 합니다"))]
    pub road_address: String,

    #[validate(length(max = 100, message = "상세 주소는 100자 이하여야 합니다"))]
    pub detail_address: Option<String>,

    #[validate(range(min = 1, message = "시군구를 선택해주세요"))]
    pub sigungu_id: i64,

    #[validate(length(max = 2000, message = "소개는 2000자 이하여야 합니다"))]
    pub introduce: Option<String>,

    #[validate(url(message = "유효한 인스타그램 URL이 아닙니다"))]
    pub instagram_url: Option<String>,

    #[validate(url(message = "유효한 홈페이지 URL이 아닙니다"))]
    pub homepage_url: Option<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "요가 종류는 20개까지 선택할 수 있습니다"))]
    pub yoga_ids: Vec<i64>,

    #[serde(default)]
    #[validate(length(max = 10, message = "이미지는 10개까지 등록할 수 있습니다"))]
    pub image_uris: Vec<String>,
}

/// 학원 정보 수정 (PATCH)
///
/// 사업자등록번호, 대표자명, 개업일자는 진위확인을 거친 값이므로 수정할 수 없습니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAcademyRequest {
    #[validate(length(min = 1, max = 50, message = "학원명은 1-50자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_phone_number"))]
    pub call_number: Option<String>,

    #[validate(length(min = 1, max = 200, message = "도로명 주소는 1-200자 사이여야 합니다"))]
    pub road_address: Option<String>,

    #[validate(length(max = 100, message = "상세 주소는 100자 이하여야 합니다"))]
    pub detail_address: Option<String>,

    #[validate(range(min = 1, message = "시군구를 선택해주세요"))]
    pub sigungu_id: Option<i64>,

    #[validate(length(max = 2000, message = "소개는 2000자 이하여야 합니다"))]
    pub introduce: Option<String>,

    #[validate(url(message = "유효한 인스타그램 URL이 아닙니다"))]
    pub instagram_url: Option<String>,

    #[validate(url(message = "유효한 홈페이지 URL이 아닙니다"))]
    pub homepage_url: Option<String>,

    #[validate(length(max = 20, message = "요가 종류는 20개까지 선택할 수 있습니다"))]
    pub yoga_ids: Option<Vec<i64>>,

    #[validate(length(max = 10, message = "이미지는 10개까지 등록할 수 있습니다"))]
    pub image_uris: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct AcademyListQuery {
    pub sigungu_id: Option<i64>,
    pub yoga_id: Option<i64>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterAcademyRequest {
        RegisterAcademyRequest {
            name: "나마스테 요가".to_string(),
            business_number: "123-45-67891".to_string(),
            representative_name: "김대표".to_string(),
            opened_at: NaiveDate::from_ymd_opt(2020, 3, 2).unwrap(),
            call_number: "02-123-4567".to_string(),
            road_address: "서울특별시 강남구 테헤란로 1".to_string(),
            detail_address: None,
            sigungu_id: 1,
            introduce: None,
            instagram_url: Some("https://instagram.com/namaste".to_string()),
            homepage_url: None,
            yoga_ids: vec![1, 2],
            image_uris: vec![],
        }
    }

    #[test]
    fn test_valid_register_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_invalid_fields_are_rejected() {
        let mut req = request();
        req.business_number = "123-45".to_string();
        assert!(req.validate().is_err());

        let mut req = request();
        req.sigungu_id = 0;
        assert!(req.validate().is_err());

        let mut req = request();
        req.instagram_url = Some("not a url".to_string());
        assert!(req.validate().is_err());

        let mut req = request();
        req.yoga_ids = (1..=21).collect();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateAcademyRequest::default().validate().is_ok());
    }
}
