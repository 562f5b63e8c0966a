//! # Redis 클라이언트
//!
//! 세션 마커, 이메일 인증 코드, 사용자 캐시를 저장하는 Redis 래퍼입니다.
//! Spring의 `RedisTemplate`과 비슷하게 값을 JSON으로 직렬화해 저장합니다.
//!
//! ## 연결 관리
//!
//! `ConnectionManager`는 멀티플렉싱된 단일 연결을 공유하며 끊기면 자동으로
//! 재연결합니다. 복제 비용이 낮아 호출마다 복제해서 사용합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use crate::config::RedisConfig;

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

fn serde_error(desc: &'static str, e: serde_json::Error) -> redis::RedisError {
    redis::RedisError::from((redis::ErrorKind::TypeError, desc, e.to_string()))
}

impl RedisClient {
    /// `REDIS_URL`로 연결하고 `PING`으로 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(RedisConfig::url())?;
        let mut manager = client.get_connection_manager().await?;

        redis::cmd("PING").query_async::<()>(&mut manager).await?;
        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    /// JSON으로 저장된 값을 조회합니다.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;

        value
            .map(|json| serde_json::from_str(&json).map_err(|e| serde_error("Deserialization failed", e)))
            .transpose()
    }

    /// TTL(초)과 함께 저장합니다.
    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        let json = serde_json::to_string(value).map_err(|e| serde_error("Serialization failed", e))?;
        conn.set_ex(key, json, seconds).await
    }

    /// 카운터를 1 증가시키고 증가된 값을 반환합니다. 처음 생성될 때만 TTL을 설정합니다.
    pub async fn incr_with_expiry(&self, key: &str, seconds: u64) -> Result<u64, redis::RedisError> {
        let mut conn = self.manager.clone();
        let count: u64 = conn.incr(key, 1).await?;
        if count == 1 {
            let _: bool = conn.expire(key, seconds as i64).await?;
        }
        Ok(count)
    }

    pub async fn exists(&self, key: &str) -> Result<bool, redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.exists(key).await
    }

    /// 키를 삭제하고 실제로 삭제되었는지 반환합니다.
    pub async fn del(&self, key: &str) -> Result<bool, redis::RedisError> {
        let mut conn = self.manager.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.manager.clone();
        conn.del(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.keys(pattern).await
    }

    /// 패턴에 해당하는 모든 키를 삭제하고 삭제한 개수를 반환합니다.
    pub async fn invalidate_pattern(&self, pattern: &str) -> Result<usize, redis::RedisError> {
        let keys = self.keys(pattern).await?;
        let count = keys.len();
        self.del_multiple(&keys).await?;
        Ok(count)
    }
}
