//! # 강사 리포지토리
//!
//! 강사 프로필과 하위 레코드를 다룹니다.
//!
//! | 테이블 | 수정 방식 |
//! |--------|-----------|
//! | `teacher_yogas`, `teacher_sigungus` | 목록 전체 교체 |
//! | `teacher_images` | 목록 전체 교체 (순서 유지) |
//! | `teacher_work_experiences`, `teacher_certificates` | id 기준 생성/수정/삭제 |

use std::sync::Arc;
use sqlx::PgConnection;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::dto::teachers::{
    CertificateInput, RegisterTeacherRequest, TeacherDetail, UpdateTeacherRequest, WorkExperienceInput,
};
use crate::domain::entities::references::{SigunguSummary, YogaSummary};
use crate::domain::entities::teachers::{Certificate, Teacher, WorkExperience};
use crate::repositories::patch::{reconcile, Reconciliation};
use crate::repositories::{replace_images, replace_links};

const TEACHER_COLUMNS: &str = "t.id, t.user_id, t.name, t.gender, t.birth_year, t.introduce, t.email, \
     t.phone_number, t.is_profile_open, t.created_at, t.updated_at, t.deleted_at";

pub struct TeacherRepository {
    db: Arc<Database>,
}

crate::register_repository!(TeacherRepository { db });

impl TeacherRepository {
    pub async fn find_by_id(&self, teacher_id: i64) -> AppResult<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {} FROM teachers t WHERE t.id = $1 AND t.deleted_at IS NULL",
            TEACHER_COLUMNS
        ))
        .bind(teacher_id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(teacher)
    }

    pub async fn find_by_user_id(&self, user_id: i64) -> AppResult<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {} FROM teachers t WHERE t.user_id = $1 AND t.deleted_at IS NULL",
            TEACHER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(teacher)
    }

    /// 트랜잭션 안에서 사용자의 강사 행을 `FOR UPDATE`로 잠급니다.
    pub async fn lock_by_user_id(&self, conn: &mut PgConnection, user_id: i64) -> AppResult<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {} FROM teachers t WHERE t.user_id = $1 AND t.deleted_at IS NULL FOR UPDATE",
            TEACHER_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(teacher)
    }

    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        user_id: i64,
        request: &RegisterTeacherRequest,
    ) -> AppResult<Teacher> {
        // 신규 프로필에는 기존 하위 레코드가 없으므로 id가 붙은 항목은 거부됩니다.
        let experiences = reconcile(&[], request.work_experiences.clone())?;
        let certificates = reconcile(&[], request.certificates.clone())?;

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "INSERT INTO teachers AS t (user_id, name, gender, birth_year, introduce, email, phone_number, is_profile_open) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            TEACHER_COLUMNS
        ))
        .bind(user_id)
        .bind(request.name.trim())
        .bind(request.gender)
        .bind(request.birth_year)
        .bind(&request.introduce)
        .bind(&request.email)
        .bind(&request.phone_number)
        .bind(request.is_profile_open.unwrap_or(true))
        .fetch_one(&mut *conn)
        .await?;

        replace_links(conn, "teacher_yogas", "teacher_id", "yoga_id", teacher.id, &request.yoga_ids).await?;
        replace_links(conn, "teacher_sigungus", "teacher_id", "sigungu_id", teacher.id, &request.sigungu_ids).await?;
        replace_images(conn, "teacher_images", "teacher_id", teacher.id, &request.image_uris).await?;
        apply_work_experiences(conn, teacher.id, experiences).await?;
        apply_certificates(conn, teacher.id, certificates).await?;

        Ok(teacher)
    }

    /// 트랜잭션 안에서 부분 수정합니다.
    ///
    /// 호출 전에 [`lock_by_user_id`](Self::lock_by_user_id)로 부모 행을 잠가야 합니다.
    /// 그래야 동시에 들어온 PATCH가 추가한 경력/자격증도 삭제 집합 계산에 포함됩니다.
    ///
    /// 경력/자격증 목록은 id 기준으로 반영합니다.
    /// 다른 강사의 id가 섞여 있으면 아무것도 쓰지 않고 `ValidationError`를 반환합니다.
    /// `introduce`, `email`, `phone_number`는 `null`이면 기존 값을 유지합니다.
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        teacher_id: i64,
        update: &UpdateTeacherRequest,
    ) -> AppResult<Teacher> {
        let experiences = match update.work_experiences {
            Some(ref incoming) => {
                let existing = locked_child_ids(conn, "teacher_work_experiences", teacher_id).await?;
                Some(reconcile(&existing, incoming.clone())?)
            }
            None => None,
        };
        let certificates = match update.certificates {
            Some(ref incoming) => {
                let existing = locked_child_ids(conn, "teacher_certificates", teacher_id).await?;
                Some(reconcile(&existing, incoming.clone())?)
            }
            None => None,
        };

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers AS t SET \
                name = COALESCE($2, t.name), \
                gender = COALESCE($3, t.gender), \
                birth_year = COALESCE($4, t.birth_year), \
                introduce = COALESCE($5, t.introduce), \
                email = COALESCE($6, t.email), \
                phone_number = COALESCE($7, t.phone_number), \
                is_profile_open = COALESCE($8, t.is_profile_open), \
                updated_at = NOW() \
             WHERE t.id = $1 AND t.deleted_at IS NULL RETURNING {}",
            TEACHER_COLUMNS
        ))
        .bind(teacher_id)
        .bind(&update.name)
        .bind(update.gender)
        .bind(update.birth_year)
        .bind(&update.introduce)
        .bind(&update.email)
        .bind(&update.phone_number)
        .bind(update.is_profile_open)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound("강사 프로필을 찾을 수 없습니다".to_string()))?;

        if let Some(ref yoga_ids) = update.yoga_ids {
            replace_links(conn, "teacher_yogas", "teacher_id", "yoga_id", teacher_id, yoga_ids).await?;
        }
        if let Some(ref sigungu_ids) = update.sigungu_ids {
            replace_links(conn, "teacher_sigungus", "teacher_id", "sigungu_id", teacher_id, sigungu_ids).await?;
        }
        if let Some(ref image_uris) = update.image_uris {
            replace_images(conn, "teacher_images", "teacher_id", teacher_id, image_uris).await?;
        }
        if let Some(experiences) = experiences {
            apply_work_experiences(conn, teacher_id, experiences).await?;
        }
        if let Some(certificates) = certificates {
            apply_certificates(conn, teacher_id, certificates).await?;
        }

        Ok(teacher)
    }

    pub async fn load_detail(&self, teacher: Teacher) -> AppResult<TeacherDetail> {
        let pool = self.db.pool();

        let yogas = sqlx::query_as::<_, YogaSummary>(
            "SELECT y.id, y.name FROM teacher_yogas ty JOIN yogas y ON y.id = ty.yoga_id \
             WHERE ty.teacher_id = $1 ORDER BY y.name",
        )
        .bind(teacher.id)
        .fetch_all(pool)
        .await?;

        let sigungus = sqlx::query_as::<_, SigunguSummary>(
            "SELECT s.id, s.name, s.area_id, ar.name AS area_name FROM teacher_sigungus ts \
             JOIN sigungus s ON s.id = ts.sigungu_id JOIN areas ar ON ar.id = s.area_id \
             WHERE ts.teacher_id = $1 ORDER BY ar.id, s.name",
        )
        .bind(teacher.id)
        .fetch_all(pool)
        .await?;

        let image_uris: Vec<String> = sqlx::query_scalar(
            "SELECT uri FROM teacher_images WHERE teacher_id = $1 ORDER BY position, id",
        )
        .bind(teacher.id)
        .fetch_all(pool)
        .await?;

        let work_experiences = sqlx::query_as::<_, WorkExperience>(
            "SELECT id, teacher_id, academy_name, work_in_at, work_out_at, description \
             FROM teacher_work_experiences WHERE teacher_id = $1 ORDER BY work_in_at DESC, id",
        )
        .bind(teacher.id)
        .fetch_all(pool)
        .await?;

        let certificates = sqlx::query_as::<_, Certificate>(
            "SELECT id, teacher_id, name, issued_by, issued_at, image_uri \
             FROM teacher_certificates WHERE teacher_id = $1 ORDER BY issued_at DESC, id",
        )
        .bind(teacher.id)
        .fetch_all(pool)
        .await?;

        Ok(TeacherDetail {
            teacher,
            yogas,
            sigungus,
            image_uris,
            work_experiences,
            certificates,
        })
    }

    pub async fn soft_delete_by_user(&self, conn: &mut PgConnection, user_id: i64) -> AppResult<()> {
        sqlx::query("UPDATE teachers SET deleted_at = NOW(), updated_at = NOW() WHERE user_id = $1 AND deleted_at IS NULL")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

async fn locked_child_ids(conn: &mut PgConnection, table: &str, teacher_id: i64) -> AppResult<Vec<i64>> {
    let ids = sqlx::query_scalar(&format!(
        "SELECT id FROM {} WHERE teacher_id = $1 ORDER BY id FOR UPDATE",
        table
    ))
    .bind(teacher_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(ids)
}

async fn apply_work_experiences(
    conn: &mut PgConnection,
    teacher_id: i64,
    plan: Reconciliation<WorkExperienceInput>,
) -> AppResult<()> {
    if !plan.delete.is_empty() {
        sqlx::query("DELETE FROM teacher_work_experiences WHERE teacher_id = $1 AND id = ANY($2)")
            .bind(teacher_id)
            .bind(&plan.delete)
            .execute(&mut *conn)
            .await?;
    }

    for (id, item) in &plan.update {
        sqlx::query(
            "UPDATE teacher_work_experiences SET academy_name = $3, work_in_at = $4, work_out_at = $5, \
                description = $6, updated_at = NOW() WHERE id = $1 AND teacher_id = $2",
        )
        .bind(id)
        .bind(teacher_id)
        .bind(&item.academy_name)
        .bind(item.work_in_at)
        .bind(item.work_out_at)
        .bind(&item.description)
        .execute(&mut *conn)
        .await?;
    }

    for item in &plan.create {
        sqlx::query(
            "INSERT INTO teacher_work_experiences (teacher_id, academy_name, work_in_at, work_out_at, description) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(teacher_id)
        .bind(&item.academy_name)
        .bind(item.work_in_at)
        .bind(item.work_out_at)
        .bind(&item.description)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

async fn apply_certificates(
    conn: &mut PgConnection,
    teacher_id: i64,
    plan: Reconciliation<CertificateInput>,
) -> AppResult<()> {
    if !plan.delete.is_empty() {
        sqlx::query("DELETE FROM teacher_certificates WHERE teacher_id = $1 AND id = ANY($2)")
            .bind(teacher_id)
            .bind(&plan.delete)
            .execute(&mut *conn)
            .await?;
    }

    for (id, item) in &plan.update {
        sqlx::query(
            "UPDATE teacher_certificates SET name = $3, issued_by = $4, issued_at = $5, image_uri = $6, \
                updated_at = NOW() WHERE id = $1 AND teacher_id = $2",
        )
        .bind(id)
        .bind(teacher_id)
        .bind(&item.name)
        .bind(&item.issued_by)
        .bind(item.issued_at)
        .bind(&item.image_uri)
        .execute(&mut *conn)
        .await?;
    }

    for item in &plan.create {
        sqlx::query(
            "INSERT INTO teacher_certificates (teacher_id, name, issued_by, issued_at, image_uri) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(teacher_id)
        .bind(&item.name)
        .bind(&item.issued_by)
        .bind(item.issued_at)
        .bind(&item.image_uri)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use chrono::NaiveDate;
    use serde_json::json;

    async fn setup() -> (Arc<Database>, Arc<TeacherRepository>, i64, i64) {
        let db = Arc::new(Database::new().await.expect("DATABASE_URL must point at a test database"));
        let repo = Arc::new(TeacherRepository { db: db.clone() });

        let user_id: i64 = sqlx::query_scalar("INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id")
            .bind(format!("lock-{}@example.com", uuid::Uuid::new_v4()))
            .bind("동시수정")
            .fetch_one(db.pool())
            .await
            .unwrap();

        let register: RegisterTeacherRequest =
            serde_json::from_value(json!({ "name": "동시수정", "gender": "female", "birth_year": 1990 })).unwrap();
        let mut tx = db.begin().await.unwrap();
        let teacher = repo.insert(&mut tx, user_id, &register).await.unwrap();
        tx.commit().await.unwrap();

        (db, repo, user_id, teacher.id)
    }

    fn new_experience(name: &str) -> WorkExperienceInput {
        WorkExperienceInput {
            id: None,
            academy_name: name.to_string(),
            work_in_at: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
            work_out_at: None,
            description: None,
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ignore] // Run with: DATABASE_URL=... cargo test -- --ignored
    async fn test_concurrent_patch_clears_rows_added_by_earlier_patch() {
        let (db, repo, user_id, teacher_id) = setup().await;

        let mut first = db.begin().await.unwrap();
        repo.lock_by_user_id(&mut first, user_id).await.unwrap().unwrap();
        let add = UpdateTeacherRequest {
            work_experiences: Some(vec![new_experience("먼저 추가한 경력")]),
            ..Default::default()
        };
        repo.update(&mut first, teacher_id, &add).await.unwrap();

        let second = tokio::spawn({
            let db = db.clone();
            let repo = repo.clone();
            async move {
                let mut tx = db.begin().await?;
                repo.lock_by_user_id(&mut tx, user_id).await?;
                let clear = UpdateTeacherRequest {
                    work_experiences: Some(vec![]),
                    ..Default::default()
                };
                repo.update(&mut tx, teacher_id, &clear).await?;
                tx.commit().await?;
                Ok::<_, AppError>(())
            }
        });

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(!second.is_finished(), "second PATCH must wait for the teacher row lock");

        first.commit().await.unwrap();
        second.await.unwrap().unwrap();

        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM teacher_work_experiences WHERE teacher_id = $1")
            .bind(teacher_id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ignore]
    async fn test_lock_by_user_id_skips_missing_profile() {
        let (db, repo, _, _) = setup().await;

        let mut tx = db.begin().await.unwrap();
        assert!(repo.lock_by_user_id(&mut tx, -1).await.unwrap().is_none());
        tx.rollback().await.unwrap();
    }
}
