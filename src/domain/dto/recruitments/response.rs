use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use crate::domain::entities::recruitments::{EmploymentType, Recruitment, RecruitmentSchedule};
use crate::domain::entities::references::YogaSummary;

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResponse {
    pub id: i64,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<RecruitmentSchedule> for ScheduleResponse {
    fn from(schedule: RecruitmentSchedule) -> Self {
        Self {
            id: schedule.id,
            day_of_week: schedule.day_of_week,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
        }
    }
}

/// 공고에 표시되는 학원 요약
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RecruitmentAcademy {
    pub id: i64,
    pub name: String,
    pub road_address: String,
    pub sigungu_id: i64,
    pub sigungu_name: String,
    pub area_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecruitmentResponse {
    pub id: i64,
    pub academy: Option<RecruitmentAcademy>,
    pub title: String,
    pub content: String,
    pub employment_type: EmploymentType,
    pub pay_description: Option<String>,
    pub application_method: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub is_open: bool,
    pub yogas: Vec<YogaSummary>,
    pub schedules: Vec<ScheduleResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 채용 공고와 연관 데이터 묶음
#[derive(Debug, Clone)]
pub struct RecruitmentDetail {
    pub recruitment: Recruitment,
    pub academy: Option<RecruitmentAcademy>,
    pub yogas: Vec<YogaSummary>,
    pub schedules: Vec<RecruitmentSchedule>,
}

impl From<RecruitmentDetail> for RecruitmentResponse {
    fn from(detail: RecruitmentDetail) -> Self {
        let RecruitmentDetail { recruitment, academy, yogas, schedules } = detail;

        Self {
            id: recruitment.id,
            academy,
            title: recruitment.title,
            content: recruitment.content,
            employment_type: recruitment.employment_type,
            pay_description: recruitment.pay_description,
            application_method: recruitment.application_method,
            deadline: recruitment.deadline,
            is_open: recruitment.is_open,
            yogas,
            schedules: schedules.into_iter().map(ScheduleResponse::from).collect(),
            created_at: recruitment.created_at,
            updated_at: recruitment.updated_at,
        }
    }
}

