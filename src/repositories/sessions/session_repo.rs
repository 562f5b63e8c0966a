//! # 세션/인증 코드 리포지토리
//!
//! Redis에 저장되는 단기 상태를 다룹니다.
//!
//! | 키 | 값 | TTL |
//! |----|----|-----|
//! | `session:{user_id}:{session_id}` | `RefreshSession` | 리프레시 토큰 수명 |
//! | `verification:email:{email}` | 6자리 코드 | 300초 |
//! | `verification:attempts:{email}` | 오입력 횟수 | 300초 (첫 오입력부터) |
//! | `verification:verified:{email}` | `true` | 1800초 |
//!
//! 세션 마커가 있어야만 리프레시 토큰으로 재발급할 수 있으므로,
//! 마커 삭제가 곧 세션 폐기입니다.

use std::sync::Arc;
use chrono::Utc;
use crate::caching::redis::RedisClient;
use crate::config::{AuthProvider, JwtConfig, VerificationConfig};
use crate::core::errors::AppResult;
use crate::domain::models::token::RefreshSession;

pub struct SessionRepository {
    redis: Arc<RedisClient>,
}

crate::register_repository!(SessionRepository { redis });

pub fn session_key(user_id: i64, session_id: &str) -> String {
    format!("session:{}:{}", user_id, session_id)
}

pub fn user_sessions_pattern(user_id: i64) -> String {
    format!("session:{}:*", user_id)
}

pub fn email_code_key(email: &str) -> String {
    format!("verification:email:{}", email.trim().to_lowercase())
}

pub fn email_attempts_key(email: &str) -> String {
    format!("verification:attempts:{}", email.trim().to_lowercase())
}

pub fn email_verified_key(email: &str) -> String {
    format!("verification:verified:{}", email.trim().to_lowercase())
}

impl SessionRepository {
    /// 새 리프레시 세션 마커를 저장합니다.
    pub async fn create_session(
        &self,
        user_id: i64,
        session_id: &str,
        auth_provider: AuthProvider,
    ) -> AppResult<RefreshSession> {
        let session = RefreshSession {
            user_id,
            session_id: session_id.to_string(),
            auth_provider,
            issued_at: Utc::now().timestamp(),
        };

        self.redis
            .set_with_expiry(&session_key(user_id, session_id), &session, JwtConfig::refresh_expiration_secs())
            .await?;

        log::debug!("세션 저장 - user_id: {}, session_id: {}", user_id, session_id);
        Ok(session)
    }

    /// 세션 마커를 삭제합니다. 이미 없었으면 false를 반환합니다.
    pub async fn revoke_session(&self, user_id: i64, session_id: &str) -> AppResult<bool> {
        Ok(self.redis.del(&session_key(user_id, session_id)).await?)
    }

    /// 사용자의 모든 세션을 폐기하고 폐기한 개수를 반환합니다.
    pub async fn revoke_all_sessions(&self, user_id: i64) -> AppResult<usize> {
        let revoked = self.redis.invalidate_pattern(&user_sessions_pattern(user_id)).await?;
        log::info!("전체 세션 폐기 - user_id: {}, count: {}", user_id, revoked);
        Ok(revoked)
    }

    /// 새 코드를 저장하고 이전 코드의 오입력 횟수를 초기화합니다.
    pub async fn save_email_code(&self, email: &str, code: &str) -> AppResult<()> {
        self.redis
            .set_with_expiry(&email_code_key(email), &code, VerificationConfig::code_ttl_secs())
            .await?;
        self.redis.del(&email_attempts_key(email)).await?;
        Ok(())
    }

    /// 오입력을 기록하고 누적 횟수를 반환합니다.
    pub async fn record_email_code_failure(&self, email: &str) -> AppResult<u64> {
        Ok(self
            .redis
            .incr_with_expiry(&email_attempts_key(email), VerificationConfig::code_ttl_secs())
            .await?)
    }

    /// 코드와 오입력 횟수를 함께 폐기합니다.
    pub async fn discard_email_code(&self, email: &str) -> AppResult<()> {
        self.redis
            .del_multiple(&[email_code_key(email), email_attempts_key(email)])
            .await?;
        Ok(())
    }

    pub async fn find_email_code(&self, email: &str) -> AppResult<Option<String>> {
        Ok(self.redis.get(&email_code_key(email)).await?)
    }

    /// 인증 코드를 소모하고 인증 완료 표시를 남깁니다.
    pub async fn mark_email_verified(&self, email: &str) -> AppResult<()> {
        self.discard_email_code(email).await?;
        self.redis
            .set_with_expiry(&email_verified_key(email), &true, VerificationConfig::verified_ttl_secs())
            .await?;
        Ok(())
    }

    pub async fn is_email_verified(&self, email: &str) -> AppResult<bool> {
        Ok(self.redis.exists(&email_verified_key(email)).await?)
    }

    /// 가입 완료 후 인증 완료 표시를 제거합니다.
    pub async fn consume_email_verified(&self, email: &str) -> AppResult<()> {
        self.redis.del(&email_verified_key(email)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_keys() {
        assert_eq!(session_key(42, "abc"), "session:42:abc");
        assert_eq!(user_sessions_pattern(42), "session:42:*");
    }

    #[test]
    fn test_verification_keys_are_case_insensitive() {
        assert_eq!(email_code_key(" Yogi@Example.com"), "verification:email:yogi@example.com");
        assert_eq!(email_verified_key("YOGI@example.com"), "verification:verified:yogi@example.com");
        assert_eq!(email_attempts_key("Yogi@Example.com "), "verification:attempts:yogi@example.com");
    }
}
