use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::domain::entities::references::{SigunguSummary, YogaSummary};
use crate::domain::entities::teachers::{Certificate, Gender, Teacher, WorkExperience};

#[derive(Debug, Clone, Serialize)]
pub struct TeacherResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub gender: Gender,
    pub birth_year: i32,
    pub introduce: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub is_profile_open: bool,
    pub yogas: Vec<YogaSummary>,
    pub sigungus: Vec<SigunguSummary>,
    pub image_uris: Vec<String>,
    pub work_experiences: Vec<WorkExperience>,
    pub certificates: Vec<Certificate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 강사 프로필과 하위 레코드 묶음
#[derive(Debug, Clone)]
pub struct TeacherDetail {
    pub teacher: Teacher,
    pub yogas: Vec<YogaSummary>,
    pub sigungus: Vec<SigunguSummary>,
    pub image_uris: Vec<String>,
    pub work_experiences: Vec<WorkExperience>,
    pub certificates: Vec<Certificate>,
}

impl From<TeacherDetail> for TeacherResponse {
    fn from(detail: TeacherDetail) -> Self {
        let TeacherDetail { teacher, yogas, sigungus, image_uris, work_experiences, certificates } = detail;

        Self {
            id: teacher.id,
            user_id: teacher.user_id,
            name: teacher.name,
            gender: teacher.gender,
            birth_year: teacher.birth_year,
            introduce: teacher.introduce,
            email: teacher.email,
            phone_number: teacher.phone_number,
            is_profile_open: teacher.is_profile_open,
            yogas,
            sigungus,
            image_uris,
            work_experiences,
            certificates,
            created_at: teacher.created_at,
            updated_at: teacher.updated_at,
        }
    }
}
