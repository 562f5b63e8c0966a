//! # 사용자 리포지토리 구현
//!
//! `users` 테이블 데이터 액세스와 Redis 조회 캐시를 담당합니다.
//!
//! ## 캐싱 전략
//!
//! - **키 패턴**: `user:{user_id}`
//! - **TTL**: `USER_CACHE_TTL_SECS` (기본 600초)
//! - **무효화**: 프로필 수정, 역할 추가, 탈퇴 시 즉시 삭제
//!
//! 캐시 장애는 요청 실패로 이어지지 않으며 경고 로그 후 DB 조회로 진행합니다.
//!
//! ## 소프트 삭제
//!
//! 탈퇴한 사용자는 `deleted_at`이 설정되며 모든 조회에서 제외됩니다.
//! 이메일/소셜 키 유니크 인덱스는 살아있는 사용자에게만 적용되므로 재가입이 가능합니다.

use std::sync::Arc;
use sqlx::PgConnection;
use crate::caching::redis::RedisClient;
use crate::config::{AuthProvider, RedisConfig};
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::dto::users::UpdateUserRequest;
use crate::domain::entities::users::{NewUser, User};

const USER_COLUMNS: &str = "id, email, password_hash, name, phone_number, auth_provider, social_key, roles, \
     profile_image_url, is_email_verified, last_login_at, created_at, updated_at, deleted_at";

pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

crate::register_repository!(UserRepository { db, redis });

fn cache_key(user_id: i64) -> String {
    format!("user:{}", user_id)
}

impl UserRepository {
    /// ID로 살아있는 사용자를 조회합니다. 캐시를 우선 확인합니다.
    pub async fn find_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        match self.redis.get::<User>(&cache_key(user_id)).await {
            Ok(Some(user)) => return Ok(Some(user)),
            Ok(None) => {}
            Err(e) => log::warn!("사용자 캐시 조회 실패 - user_id: {}, error: {}", user_id, e),
        }

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;

        if let Some(ref user) = user {
            if let Err(e) = self
                .redis
                .set_with_expiry(&cache_key(user_id), user, RedisConfig::user_cache_ttl_secs())
                .await
            {
                log::warn!("사용자 캐시 저장 실패 - user_id: {}, error: {}", user_id, e);
            }
        }

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(email.trim().to_lowercase())
        .fetch_optional(self.db.pool())
        .await?;

        Ok(user)
    }

    pub async fn find_by_social_key(&self, provider: AuthProvider, social_key: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE auth_provider = $1 AND social_key = $2 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(provider)
        .bind(social_key)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(user)
    }

    pub async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1 AND deleted_at IS NULL)",
        )
        .bind(email.trim().to_lowercase())
        .fetch_one(self.db.pool())
        .await?;

        Ok(exists)
    }

    /// 사용자 생성
    ///
    /// 이메일 또는 (제공자, 소셜 키) 중복 시 `ConflictError`가 반환됩니다.
    pub async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (email, password_hash, name, phone_number, auth_provider, social_key, \
             profile_image_url, is_email_verified) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.name)
        .bind(&new_user.phone_number)
        .bind(new_user.auth_provider)
        .bind(&new_user.social_key)
        .bind(&new_user.profile_image_url)
        .bind(new_user.is_email_verified)
        .fetch_one(self.db.pool())
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::ConflictError(_) => AppError::ConflictError("이미 가입된 사용자입니다".to_string()),
            other => other,
        })?;

        log::info!("사용자 생성 - id: {}, provider: {}", user.id, user.auth_provider);
        Ok(user)
    }

    pub async fn update_profile(&self, user_id: i64, update: &UpdateUserRequest) -> AppResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                phone_number = COALESCE($3, phone_number), \
                profile_image_url = COALESCE($4, profile_image_url), \
                updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user_id)
        .bind(&update.name)
        .bind(&update.phone_number)
        .bind(&update.profile_image_url)
        .fetch_optional(self.db.pool())
        .await?
        .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다".to_string()))?;

        self.invalidate_cache(user_id).await;
        Ok(user)
    }

    pub async fn touch_last_login(&self, user_id: i64) -> AppResult<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await?;

        self.invalidate_cache(user_id).await;
        Ok(())
    }

    /// 트랜잭션 안에서 역할을 추가합니다. 이미 가진 역할이면 변경하지 않습니다.
    ///
    /// 커밋 후 호출자가 [`invalidate_cache`](Self::invalidate_cache)를 호출해야 합니다.
    pub async fn add_role(&self, conn: &mut PgConnection, user_id: i64, role: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET roles = array_append(roles, $2), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL AND NOT ($2 = ANY(roles))",
        )
        .bind(user_id)
        .bind(role)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// 트랜잭션 안에서 소프트 삭제합니다. 이미 탈퇴한 사용자면 `NotFound`입니다.
    ///
    /// 캐시 무효화는 커밋 후 호출자가 `invalidate_cache`로 수행합니다.
    pub async fn soft_delete(&self, conn: &mut PgConnection, user_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다".to_string()));
        }

        Ok(())
    }

    pub async fn invalidate_cache(&self, user_id: i64) {
        if let Err(e) = self.redis.del(&cache_key(user_id)).await {
            log::warn!("사용자 캐시 삭제 실패 - user_id: {}, error: {}", user_id, e);
        }
    }
}
