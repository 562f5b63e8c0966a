//! 참조 데이터 핸들러 (요가 분류, 지역)

use actix_web::{get, web, HttpResponse};
use validator::Validate;
use crate::core::errors::AppError;
use crate::domain::dto::references::YogaSearchQuery;
use crate::services::references::{AreaService, YogaService};

#[get("/groups")]
pub async fn yoga_groups() -> Result<HttpResponse, AppError> {
    let groups = YogaService::instance().groups().await?;
    Ok(HttpResponse::Ok().json(groups))
}

/// 요가 이름 자동완성
///
/// `GET /yoga/search?q=빈야`
#[get("/search")]
pub async fn search_yoga(query: web::Query<YogaSearchQuery>) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let hits = YogaService::instance().search(&query.q).await?;
    Ok(HttpResponse::Ok().json(hits))
}

#[get("")]
pub async fn list_areas() -> Result<HttpResponse, AppError> {
    let areas = AreaService::instance().areas().await?;
    Ok(HttpResponse::Ok().json(areas))
}

#[get("/{area_id}/sigungus")]
pub async fn list_sigungus(area_id: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let sigungus = AreaService::instance().sigungus(area_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(sigungus))
}
