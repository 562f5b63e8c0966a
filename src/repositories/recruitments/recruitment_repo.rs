//! # 채용 공고 리포지토리
//!
//! 공고 수정 시 수업 일정은 [`reconcile`]로 계산한 생성/수정/삭제 집합을
//! 서비스가 연 트랜잭션 안에서 반영합니다. 부모 공고 행을 먼저 잠그므로
//! 같은 공고에 대한 동시 PATCH는 순서대로 처리됩니다.

use std::collections::HashMap;
use std::sync::Arc;
use sqlx::PgConnection;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::dto::common::Paging;
use crate::domain::dto::recruitments::{
    CreateRecruitmentRequest, RecruitmentAcademy, RecruitmentDetail, ScheduleInput, UpdateRecruitmentRequest,
};
use crate::domain::entities::recruitments::{Recruitment, RecruitmentSchedule};
use crate::domain::entities::references::YogaSummary;
use crate::repositories::patch::{reconcile, Reconciliation};
use crate::repositories::{group_by_parent, replace_links};

const RECRUITMENT_COLUMNS: &str = "r.id, r.academy_id, r.title, r.content, r.employment_type, r.pay_description, \
     r.application_method, r.deadline, r.is_open, r.created_at, r.updated_at, r.deleted_at";

const LIST_FILTER: &str = "r.deleted_at IS NULL AND a.deleted_at IS NULL \
     AND ($1::BIGINT IS NULL OR a.sigungu_id = $1) \
     AND ($2::BIGINT IS NULL OR EXISTS ( \
         SELECT 1 FROM recruitment_yogas ry WHERE ry.recruitment_id = r.id AND ry.yoga_id = $2)) \
     AND ($3::BIGINT IS NULL OR r.academy_id = $3) \
     AND ($4::BOOLEAN IS NULL OR r.is_open = $4)";

#[derive(Debug, Clone, Copy, Default)]
pub struct RecruitmentFilter {
    pub sigungu_id: Option<i64>,
    pub yoga_id: Option<i64>,
    pub academy_id: Option<i64>,
    pub is_open: Option<bool>,
}

pub struct RecruitmentRepository {
    db: Arc<Database>,
}

crate::register_repository!(RecruitmentRepository { db });

impl RecruitmentRepository {
    pub async fn find_by_id(&self, recruitment_id: i64) -> AppResult<Option<Recruitment>> {
        let recruitment = sqlx::query_as::<_, Recruitment>(&format!(
            "SELECT {} FROM recruitments r WHERE r.id = $1 AND r.deleted_at IS NULL",
            RECRUITMENT_COLUMNS
        ))
        .bind(recruitment_id)
        .fetch_optional(self.db.pool())
        .await?;
        Ok(recruitment)
    }

    /// 트랜잭션 안에서 공고 행을 잠그고 읽습니다.
    pub async fn lock_by_id(&self, conn: &mut PgConnection, recruitment_id: i64) -> AppResult<Option<Recruitment>> {
        let recruitment = sqlx::query_as::<_, Recruitment>(&format!(
            "SELECT {} FROM recruitments r WHERE r.id = $1 AND r.deleted_at IS NULL FOR UPDATE",
            RECRUITMENT_COLUMNS
        ))
        .bind(recruitment_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(recruitment)
    }

    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        academy_id: i64,
        request: &CreateRecruitmentRequest,
    ) -> AppResult<Recruitment> {
        let schedules = reconcile(&[], request.schedules.clone())?;

        let recruitment = sqlx::query_as::<_, Recruitment>(&format!(
            "INSERT INTO recruitments AS r (academy_id, title, content, employment_type, pay_description, \
                application_method, deadline, is_open) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {}",
            RECRUITMENT_COLUMNS
        ))
        .bind(academy_id)
        .bind(request.title.trim())
        .bind(&request.content)
        .bind(request.employment_type)
        .bind(&request.pay_description)
        .bind(&request.application_method)
        .bind(request.deadline)
        .bind(request.is_open.unwrap_or(true))
        .fetch_one(&mut *conn)
        .await?;

        replace_links(conn, "recruitment_yogas", "recruitment_id", "yoga_id", recruitment.id, &request.yoga_ids).await?;
        apply_schedules(conn, recruitment.id, schedules).await?;

        Ok(recruitment)
    }

    /// 트랜잭션 안에서 부분 수정합니다.
    ///
    /// 호출 전에 [`lock_by_id`](Self::lock_by_id)로 부모 행을 잠가야 합니다.
    /// 스칼라 컬럼은 `COALESCE`로 갱신하므로 `None`은 기존 값 유지입니다.
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        recruitment_id: i64,
        update: &UpdateRecruitmentRequest,
    ) -> AppResult<Recruitment> {
        let schedules = match update.schedules {
            Some(ref incoming) => {
                let existing: Vec<i64> = sqlx::query_scalar(
                    "SELECT id FROM recruitment_schedules WHERE recruitment_id = $1 ORDER BY id",
                )
                .bind(recruitment_id)
                .fetch_all(&mut *conn)
                .await?;
                Some(reconcile(&existing, incoming.clone())?)
            }
            None => None,
        };

        let recruitment = sqlx::query_as::<_, Recruitment>(&format!(
            "UPDATE recruitments AS r SET \
                title = COALESCE($2, r.title), \
                content = COALESCE($3, r.content), \
                employment_type = COALESCE($4, r.employment_type), \
                pay_description = COALESCE($5, r.pay_description), \
                application_method = COALESCE($6, r.application_method), \
                deadline = COALESCE($7, r.deadline), \
                is_open = COALESCE($8, r.is_open), \
                updated_at = NOW() \
             WHERE r.id = $1 AND r.deleted_at IS NULL RETURNING {}",
            RECRUITMENT_COLUMNS
        ))
        .bind(recruitment_id)
        .bind(&update.title)
        .bind(&update.content)
        .bind(update.employment_type)
        .bind(&update.pay_description)
        .bind(&update.application_method)
        .bind(update.deadline)
        .bind(update.is_open)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound("채용 공고를 찾을 수 없습니다".to_string()))?;

        if let Some(ref yoga_ids) = update.yoga_ids {
            replace_links(conn, "recruitment_yogas", "recruitment_id", "yoga_id", recruitment_id, yoga_ids).await?;
        }
        if let Some(schedules) = schedules {
            apply_schedules(conn, recruitment_id, schedules).await?;
        }

        Ok(recruitment)
    }

    pub async fn soft_delete(&self, recruitment_id: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE recruitments SET deleted_at = NOW(), is_open = FALSE, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(recruitment_id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("채용 공고를 찾을 수 없습니다".to_string()));
        }
        Ok(())
    }

    pub async fn list(&self, filter: RecruitmentFilter, paging: Paging) -> AppResult<(Vec<Recruitment>, i64)> {
        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM recruitments r JOIN academies a ON a.id = r.academy_id WHERE {}",
            LIST_FILTER
        ))
        .bind(filter.sigungu_id)
        .bind(filter.yoga_id)
        .bind(filter.academy_id)
        .bind(filter.is_open)
        .fetch_one(self.db.pool())
        .await?;

        let recruitments = sqlx::query_as::<_, Recruitment>(&format!(
            "SELECT {} FROM recruitments r JOIN academies a ON a.id = r.academy_id WHERE {} \
             ORDER BY r.created_at DESC, r.id DESC LIMIT $5 OFFSET $6",
            RECRUITMENT_COLUMNS, LIST_FILTER
        ))
        .bind(filter.sigungu_id)
        .bind(filter.yoga_id)
        .bind(filter.academy_id)
        .bind(filter.is_open)
        .bind(paging.size)
        .bind(paging.offset())
        .fetch_all(self.db.pool())
        .await?;

        Ok((recruitments, total))
    }

    /// 공고 목록에 학원 요약/요가/일정을 붙입니다. 입력 순서를 유지합니다.
    pub async fn load_details(&self, recruitments: Vec<Recruitment>) -> AppResult<Vec<RecruitmentDetail>> {
        if recruitments.is_empty() {
            return Ok(Vec::new());
        }

        let pool = self.db.pool();
        let recruitment_ids: Vec<i64> = recruitments.iter().map(|r| r.id).collect();
        let academy_ids: Vec<i64> = recruitments.iter().map(|r| r.academy_id).collect();

        let academies: HashMap<i64, RecruitmentAcademy> = sqlx::query_as::<_, RecruitmentAcademy>(
            "SELECT a.id, a.name, a.road_address, a.sigungu_id, s.name AS sigungu_name, ar.name AS area_name \
             FROM academies a JOIN sigungus s ON s.id = a.sigungu_id JOIN areas ar ON ar.id = s.area_id \
             WHERE a.id = ANY($1)",
        )
        .bind(&academy_ids)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

        let yoga_rows: Vec<(i64, i64, String)> = sqlx::query_as(
            "SELECT ry.recruitment_id, y.id, y.name FROM recruitment_yogas ry \
             JOIN yogas y ON y.id = ry.yoga_id WHERE ry.recruitment_id = ANY($1) ORDER BY y.name",
        )
        .bind(&recruitment_ids)
        .fetch_all(pool)
        .await?;
        let mut yogas = group_by_parent(
            yoga_rows
                .into_iter()
                .map(|(recruitment_id, id, name)| (recruitment_id, YogaSummary { id, name }))
                .collect(),
        );

        let schedules = sqlx::query_as::<_, RecruitmentSchedule>(
            "SELECT id, recruitment_id, day_of_week, start_time, end_time FROM recruitment_schedules \
             WHERE recruitment_id = ANY($1) ORDER BY day_of_week, start_time, id",
        )
        .bind(&recruitment_ids)
        .fetch_all(pool)
        .await?;
        let mut schedules = group_by_parent(schedules.into_iter().map(|s| (s.recruitment_id, s)).collect());

        Ok(recruitments
            .into_iter()
            .map(|recruitment| RecruitmentDetail {
                academy: academies.get(&recruitment.academy_id).cloned(),
                yogas: yogas.remove(&recruitment.id).unwrap_or_default(),
                schedules: schedules.remove(&recruitment.id).unwrap_or_default(),
                recruitment,
            })
            .collect())
    }

    pub async fn load_detail(&self, recruitment: Recruitment) -> AppResult<RecruitmentDetail> {
        self.load_details(vec![recruitment])
            .await?
            .pop()
            .ok_or_else(|| AppError::InternalError("채용 공고 상세 정보 구성 실패".to_string()))
    }
}

async fn apply_schedules(
    conn: &mut PgConnection,
    recruitment_id: i64,
    plan: Reconciliation<ScheduleInput>,
) -> AppResult<()> {
    if plan.is_noop() {
        return Ok(());
    }

    if !plan.delete.is_empty() {
        sqlx::query("DELETE FROM recruitment_schedules WHERE recruitment_id = $1 AND id = ANY($2)")
            .bind(recruitment_id)
            .bind(&plan.delete)
            .execute(&mut *conn)
            .await?;
    }

    for (id, schedule) in &plan.update {
        sqlx::query(
            "UPDATE recruitment_schedules SET day_of_week = $3, start_time = $4, end_time = $5, updated_at = NOW() \
             WHERE id = $1 AND recruitment_id = $2",
        )
        .bind(id)
        .bind(recruitment_id)
        .bind(schedule.day_of_week)
        .bind(schedule.start_time)
        .bind(schedule.end_time)
        .execute(&mut *conn)
        .await?;
    }

    if !plan.create.is_empty() {
        let days: Vec<i16> = plan.create.iter().map(|s| s.day_of_week).collect();
        let starts: Vec<chrono::NaiveTime> = plan.create.iter().map(|s| s.start_time).collect();
        let ends: Vec<chrono::NaiveTime> = plan.create.iter().map(|s| s.end_time).collect();

        sqlx::query(
            "INSERT INTO recruitment_schedules (recruitment_id, day_of_week, start_time, end_time) \
             SELECT $1, d, s, e FROM UNNEST($2::SMALLINT[], $3::TIME[], $4::TIME[]) AS t(d, s, e)",
        )
        .bind(recruitment_id)
        .bind(&days)
        .bind(&starts)
        .bind(&ends)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
