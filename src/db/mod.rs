//! PostgreSQL 연결 관리
//!
//! `sqlx::PgPool`을 감싸 `ServiceLocator`에 인프라 컴포넌트로 등록합니다.
//! 연결 시 `migrations/` 디렉터리의 스키마 마이그레이션을 적용합니다.

use std::time::Duration;
use log::info;
use sqlx::{PgPool, Postgres, Transaction};
use sqlx::postgres::PgPoolOptions;
use crate::config::DatabaseConfig;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 환경 설정으로 커넥션 풀을 만들고 연결을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let pool = PgPoolOptions::new()
            .max_connections(DatabaseConfig::max_connections())
            .acquire_timeout(Duration::from_secs(DatabaseConfig::acquire_timeout_secs()))
            .connect(&DatabaseConfig::url())
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;
        info!("✅ PostgreSQL 연결 성공 (max_connections={})", DatabaseConfig::max_connections());

        let database = Self { pool };
        if DatabaseConfig::run_migrations() {
            database.migrate().await?;
        }

        Ok(database)
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("✅ 데이터베이스 마이그레이션 적용 완료");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
