//! 강사 프로필 요청 DTO
//!
//! 경력과 자격증은 `id`가 있으면 기존 레코드 수정, 없으면 신규 생성으로 처리되며
//! 요청에서 빠진 기존 레코드는 삭제됩니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::dto::validators::validate_phone_number;
use crate::domain::entities::teachers::Gender;
use crate::repositories::patch::Identified;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_work_period"))]
pub struct WorkExperienceInput {
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 50, message = "근무처 이름은 1-50자 사이여야 합니다"))]
    pub academy_name: String,

    pub work_in_at: NaiveDate,

    pub work_out_at: Option<NaiveDate>,

    #[validate(length(max = 500, message = "설명은 500자 이하여야 합니다"))]
    pub description: Option<String>,
}

fn validate_work_period(input: &WorkExperienceInput) -> Result<(), ValidationError> {
    if let Some(work_out_at) = input.work_out_at {
        if work_out_at < input.work_in_at {
            return Err(ValidationError::new("invalid_work_period")
                .with_message("퇴사일은 입사일 이후여야 합니다".into()));
        }
    }
    Ok(())
}

impl Identified for WorkExperienceInput {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CertificateInput {
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 50, message = "자격증명은 1-50자 사이여야 합니다"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "발급 기관은 1-50자 사이여야 합니다"))]
    pub issued_by: String,

    pub issued_at: NaiveDate,

    pub image_uri: Option<String>,
}

impl Identified for CertificateInput {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterTeacherRequest {
    #[validate(length(min = 1, max = 30, message = "이름은 1-30자 사이여야 합니다"))]
    pub name: String,

    pub gender: Gender,

    #[validate(range(min = 1900, max = 2100, message = "출생연도가 올바르지 않습니다"))]
    pub birth_year: i32,

    #[validate(length(max = 2000, message = "소개는 2000자 이하여야 합니다"))]
    pub introduce: Option<String>,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,

    pub is_profile_open: Option<bool>,

    #[serde(default)]
    #[validate(length(max = 20, message = "요가 종류는 20개까지 선택할 수 있습니다"))]
    pub yoga_ids: Vec<i64>,

    #[serde(default)]
    #[validate(length(max = 10, message = "활동 지역은 10개까지 선택할 수 있습니다"))]
    pub sigungu_ids: Vec<i64>,

    #[serde(default)]
    #[validate(length(max = 10, message = "이미지는 10개까지 등록할 수 있습니다"))]
    pub image_uris: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 30), nested)]
    pub work_experiences: Vec<WorkExperienceInput>,

    #[serde(default)]
    #[validate(length(max = 30), nested)]
    pub certificates: Vec<CertificateInput>,
}

/// 강사 프로필 수정 (PATCH)
///
/// 스칼라 필드는 `null`과 생략 모두 "변경 없음"입니다. `introduce`, `email`,
/// `phone_number`는 PATCH로 비울 수 없습니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTeacherRequest {
    #[validate(length(min = 1, max = 30, message = "이름은 1-30자 사이여야 합니다"))]
    pub name: Option<String>,

    pub gender: Option<Gender>,

    #[validate(range(min = 1900, max = 2100, message = "출생연도가 올바르지 않습니다"))]
    pub birth_year: Option<i32>,

    #[validate(length(max = 2000, message = "소개는 2000자 이하여야 합니다"))]
    pub introduce: Option<String>,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,

    pub is_profile_open: Option<bool>,

    #[validate(length(max = 20, message = "요가 종류는 20개까지 선택할 수 있습니다"))]
    pub yoga_ids: Option<Vec<i64>>,

    #[validate(length(max = 10, message = "활동 지역은 10개까지 선택할 수 있습니다"))]
    pub sigungu_ids: Option<Vec<i64>>,

    #[validate(length(max = 10, message = "이미지는 10개까지 등록할 수 있습니다"))]
    pub image_uris: Option<Vec<String>>,

    #[validate(length(max = 30), nested)]
    pub work_experiences: Option<Vec<WorkExperienceInput>>,

    #[validate(length(max = 30), nested)]
    pub certificates: Option<Vec<CertificateInput>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience(work_in: (i32, u32, u32), work_out: Option<(i32, u32, u32)>) -> WorkExperienceInput {
        WorkExperienceInput {
            id: None,
            academy_name: "옴 요가".to_string(),
            work_in_at: NaiveDate::from_ymd_opt(work_in.0, work_in.1, work_in.2).unwrap(),
            work_out_at: work_out.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            description: None,
        }
    }

    #[test]
    fn test_work_period_validation() {
        assert!(experience((2020, 1, 1), None).validate().is_ok());
        assert!(experience((2020, 1, 1), Some((2021, 1, 1))).validate().is_ok());
        assert!(experience((2021, 1, 1), Some((2020, 1, 1))).validate().is_err());
    }

    #[test]
    fn test_nested_validation_in_update() {
        let update = UpdateTeacherRequest {
            work_experiences: Some(vec![experience((2021, 1, 1), Some((2020, 1, 1)))]),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        assert!(UpdateTeacherRequest::default().validate().is_ok());
    }

    #[test]
    fn test_gender_deserialization() {
        let body = r#"{"name":"이강사","gender":"female","birth_year":1990}"#;
        let req: RegisterTeacherRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.gender, Gender::Female);
        assert!(req.work_experiences.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_nested_certificate_validation_in_register() {
        let body = r#"{
            "name": "이강사",
            "gender": "female",
            "birth_year": 1990,
            "certificates": [{"name": "", "issued_by": "요가연맹", "issued_at": "2020-05-01"}]
        }"#;
        let req: RegisterTeacherRequest = serde_json::from_str(body).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.errors().contains_key("certificates"));
    }
}
