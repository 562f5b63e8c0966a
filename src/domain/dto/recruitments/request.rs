//! 채용 공고 요청 DTO

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::entities::recruitments::EmploymentType;
use crate::repositories::patch::Identified;

/// 수업 일정 입력
///
/// `id`가 있으면 기존 일정 수정, 없으면 신규 일정입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_time_range"))]
pub struct ScheduleInput {
    pub id: Option<i64>,

    #[validate(range(min = 0, max = 6, message = "요일은 0(일)부터 6(토) 사이여야 합니다"))]
    pub day_of_week: i16,

    pub start_time: NaiveTime,

    pub end_time: NaiveTime,
}

fn validate_time_range(input: &ScheduleInput) -> Result<(), ValidationError> {
    if input.start_time >= input.end_time {
        return Err(ValidationError::new("invalid_time_range")
            .with_message("종료 시간은 시작 시간 이후여야 합니다".into()));
    }
    Ok(())
}

impl Identified for ScheduleInput {
    fn id(&self) -> Option<i64> {
        self.id
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecruitmentRequest {
    #[validate(length(min = 1, max = 100, message = "제목은 1-100자 사이여야 합니다"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "내용은 1-5000자 사이여야 합니다"))]
    pub content: String,

    pub employment_type: EmploymentType,

    #[validate(length(max = 200, message = "급여 안내는 200자 이하여야 합니다"))]
    pub pay_description: Option<String>,

    #[validate(length(max = 200, message = "지원 방법은 200자 이하여야 합니다"))]
    pub application_method: Option<String>,

    pub deadline: Option<NaiveDate>,

    pub is_open: Option<bool>,

    #[serde(default)]
    #[validate(length(max = 20, message = "요가 종류는 20개까지 선택할 수 있습니다"))]
    pub yoga_ids: Vec<i64>,

    #[serde(default)]
    #[validate(length(max = 21, message = "일정은 21개까지 등록할 수 있습니다"), nested)]
    pub schedules: Vec<ScheduleInput>,
}

/// 채용 공고 수정 (PATCH)
///
/// `schedules`가 없으면 일정은 그대로 두고, 있으면 id 기준으로
/// 생성/수정/삭제 집합을 계산해 한 트랜잭션에서 반영합니다.
///
/// 스칼라 필드는 생략과 `null`이 같게 취급되어 기존 값을 유지합니다.
/// 따라서 `deadline`, `pay_description`, `application_method`는 PATCH로 비울 수 없습니다.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateRecruitmentRequest {
    #[validate(length(min = 1, max = 100, message = "제목은 1-100자 사이여야 합니다"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000, message = "내용은 1-5000자 사이여야 합니다"))]
    pub content: Option<String>,

    pub employment_type: Option<EmploymentType>,

    #[validate(length(max = 200, message = "급여 안내는 200자 이하여야 합니다"))]
    pub pay_description: Option<String>,

    #[validate(length(max = 200, message = "지원 방법은 200자 이하여야 합니다"))]
    pub application_method: Option<String>,

    pub deadline: Option<NaiveDate>,

    pub is_open: Option<bool>,

    #[validate(length(max = 20, message = "요가 종류는 20개까지 선택할 수 있습니다"))]
    pub yoga_ids: Option<Vec<i64>>,

    #[validate(length(max = 21, message = "일정은 21개까지 등록할 수 있습니다"), nested)]
    pub schedules: Option<Vec<ScheduleInput>>,
}

#[derive(Debug, Deserialize)]
pub struct RecruitmentListQuery {
    pub sigungu_id: Option<i64>,
    pub yoga_id: Option<i64>,
    pub academy_id: Option<i64>,
    pub is_open: Option<bool>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(day: i16, start: &str, end: &str) -> ScheduleInput {
        ScheduleInput {
            id: None,
            day_of_week: day,
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
        }
    }

    #[test]
    fn test_schedule_validation() {
        assert!(schedule(1, "10:00:00", "11:00:00").validate().is_ok());
        assert!(schedule(7, "10:00:00", "11:00:00").validate().is_err());
        assert!(schedule(-1, "10:00:00", "11:00:00").validate().is_err());
        assert!(schedule(1, "11:00:00", "11:00:00").validate().is_err());
        assert!(schedule(1, "12:00:00", "11:00:00").validate().is_err());
    }

    #[test]
    fn test_update_request_distinguishes_missing_and_empty_schedules() {
        let missing: UpdateRecruitmentRequest = serde_json::from_str(r#"{"title":"대강 구합니다"}"#).unwrap();
        assert!(missing.schedules.is_none());

        let empty: UpdateRecruitmentRequest = serde_json::from_str(r#"{"schedules":[]}"#).unwrap();
        assert_eq!(empty.schedules.as_deref(), Some(&[][..]));
    }

    #[test]
    fn test_create_request_deserialization() {
        let body = r#"{
            "title": "오전 하타 강사 모집",
            "content": "주 2회 오전 수업",
            "employment_type": "part_time",
            "yoga_ids": [1, 3],
            "schedules": [{"day_of_week": 1, "start_time": "09:00:00", "end_time": "10:00:00"}]
        }"#;
        let req: CreateRecruitmentRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.employment_type, EmploymentType::PartTime);
        assert_eq!(req.schedules.len(), 1);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_nested_schedule_errors_fail_update() {
        let update = UpdateRecruitmentRequest {
            schedules: Some(vec![schedule(1, "09:00:00", "10:00:00"), schedule(2, "12:00:00", "11:00:00")]),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.errors().contains_key("schedules"));

        let too_many = UpdateRecruitmentRequest {
            schedules: Some((0..22).map(|_| schedule(1, "09:00:00", "10:00:00")).collect()),
            ..Default::default()
        };
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_schedule_input_serializes_times() {
        let value = serde_json::to_value(schedule(3, "18:30:00", "19:30:00")).unwrap();
        assert_eq!(value["day_of_week"], 3);
        assert_eq!(value["start_time"], "18:30:00");
        assert!(value["id"].is_null());
    }

    #[test]
    fn test_null_scalar_fields_mean_unchanged() {
        let explicit_null: UpdateRecruitmentRequest =
            serde_json::from_str(r#"{"deadline":null,"pay_description":null}"#).unwrap();
        let omitted: UpdateRecruitmentRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(explicit_null.deadline, omitted.deadline);
        assert!(explicit_null.deadline.is_none());
        assert!(explicit_null.pay_description.is_none());
        assert!(explicit_null.schedules.is_none());
    }
}
