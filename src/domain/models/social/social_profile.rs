//! 소셜 제공자별 사용자 정보 응답을 하나의 형태로 정규화한 프로필

use serde::{Deserialize, Serialize};
use crate::config::AuthProvider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    pub provider: AuthProvider,
    /// 제공자 내 고유 사용자 ID
    pub social_key: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub profile_image_url: Option<String>,
}
