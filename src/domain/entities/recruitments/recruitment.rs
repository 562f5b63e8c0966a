//! Recruitment Entity
//!
//! 학원이 올리는 강사 채용 공고와 수업 일정입니다.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 고용 형태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    FullTime,
    PartTime,
    /// 대강
    Substitute,
}

impl EmploymentType {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "full_time" => Ok(EmploymentType::FullTime),
            "part_time" => Ok(EmploymentType::PartTime),
            "substitute" => Ok(EmploymentType::Substitute),
            _ => Err(format!("Unsupported employment type: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "full_time",
            EmploymentType::PartTime => "part_time",
            EmploymentType::Substitute => "substitute",
        }
    }
}

crate::impl_text_column!(EmploymentType);

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recruitment {
    pub id: i64,
    pub academy_id: i64,
    pub title: String,
    pub content: String,
    pub employment_type: EmploymentType,
    pub pay_description: Option<String>,
    pub application_method: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 수업 일정. `day_of_week`는 0(일요일)부터 6(토요일)까지입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RecruitmentSchedule {
    pub id: i64,
    pub recruitment_id: i64,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employment_type_roundtrip() {
        for raw in ["full_time", "part_time", "substitute"] {
            assert_eq!(EmploymentType::from_str(raw).unwrap().as_str(), raw);
        }
        assert!(EmploymentType::from_str("FULL_TIME").is_err());
    }

    #[test]
    fn test_employment_type_serde_matches_column_value() {
        let json = serde_json::to_string(&EmploymentType::PartTime).unwrap();
        assert_eq!(json, "\"part_time\"");
    }
}
