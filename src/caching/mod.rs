//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 키-값 저장소입니다.
//!
//! # 용도
//!
//! - 리프레시 세션 마커: `session:{user_id}:{session_id}`
//! - 이메일 인증 코드: `verification:email:{email}`, `verification:verified:{email}`
//! - 사용자 조회 캐시: `user:{user_id}`
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("verification:email:a@b.com", &"123456", 300).await?;
//! let code: Option<String> = cache.get("verification:email:a@b.com").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
