//! Academy Entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 요가 학원
///
/// 사용자 한 명은 삭제되지 않은 학원을 하나만 가질 수 있고,
/// 사업자등록번호는 전체에서 유일합니다.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Academy {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// 하이픈 없는 10자리 사업자등록번호
    pub business_number: String,
    pub representative_name: String,
    pub opened_at: NaiveDate,
    pub call_number: String,
    pub road_address: String,
    pub detail_address: Option<String>,
    pub sigungu_id: i64,
    pub introduce: Option<String>,
    pub instagram_url: Option<String>,
    pub homepage_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
