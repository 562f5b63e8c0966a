//! Teacher Entity
//!
//! 강사 프로필과 하위 레코드(경력, 자격증)입니다.
//! 하위 레코드는 강사 삭제 시 함께 삭제됩니다.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!("Unsupported gender: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

crate::impl_text_column!(Gender);

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub gender: Gender,
    pub birth_year: i32,
    pub introduce: Option<String>,
    /// 연락용 이메일 (계정 이메일과 다를 수 있음)
    pub email: Option<String>,
    pub phone_number: Option<String>,
    /// false면 본인 외에는 프로필을 볼 수 없음
    pub is_profile_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkExperience {
    pub id: i64,
    pub teacher_id: i64,
    pub academy_name: String,
    pub work_in_at: NaiveDate,
    /// None이면 재직 중
    pub work_out_at: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Certificate {
    pub id: i64,
    pub teacher_id: i64,
    pub name: String,
    pub issued_by: String,
    pub issued_at: NaiveDate,
    pub image_uri: Option<String>,
}
