//! # Elasticsearch 요가 검색
//!
//! 요가 이름 자동완성에 쓰는 `yoga` 인덱스를 다룹니다.
//! `ELASTICSEARCH_URL`이 없으면 비활성화되며, 호출자는 데이터베이스 검색으로 대체합니다.

use serde::Serialize;
use serde_json::{json, Value};
use crate::config::SearchConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::entities::references::YogaSummary;

/// 인덱스에 저장되는 요가 문서
#[derive(Debug, Clone, Serialize)]
pub struct YogaDocument {
    pub id: i64,
    pub name: String,
    pub group_id: i64,
    pub category: String,
}

pub struct SearchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    index: String,
}

crate::register_service!(SearchClient, SearchClient::from_env);

impl SearchClient {
    pub fn from_env() -> Self {
        Self {
            http: super::http_client(5),
            base_url: SearchConfig::url().map(|u| u.trim_end_matches('/').to_string()),
            index: SearchConfig::yoga_index(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    fn base_url(&self) -> AppResult<&str> {
        self.base_url
            .as_deref()
            .ok_or_else(|| AppError::ExternalServiceError("검색 엔진이 설정되지 않았습니다".to_string()))
    }

    /// 이름 접두어로 요가를 검색합니다 (`match_phrase_prefix`).
    pub async fn search_yoga(&self, query: &str, size: usize) -> AppResult<Vec<YogaSummary>> {
        let url = format!("{}/{}/_search", self.base_url()?, self.index);
        let body = json!({
            "size": size,
            "_source": ["id", "name"],
            "query": { "match_phrase_prefix": { "name": { "query": query } } }
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("검색 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!("검색 실패: {} {}", status, error_text)));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("검색 응답 파싱 실패: {}", e)))?;

        Ok(parse_hits(&body))
    }

    /// 인덱스를 지우고 새 매핑으로 다시 만듭니다.
    pub async fn recreate_index(&self) -> AppResult<()> {
        let url = format!("{}/{}", self.base_url()?, self.index);

        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("인덱스 삭제 요청 실패: {}", e)))?;
        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::ExternalServiceError(format!("인덱스 삭제 실패: {}", response.status())));
        }

        let mapping = json!({
            "mappings": {
                "properties": {
                    "id": { "type": "long" },
                    "name": { "type": "text" },
                    "group_id": { "type": "long" },
                    "category": { "type": "keyword" }
                }
            }
        });
        let response = self
            .http
            .put(&url)
            .json(&mapping)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("인덱스 생성 요청 실패: {}", e)))?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!("인덱스 생성 실패: {} {}", status, error_text)));
        }

        log::info!("검색 인덱스 재생성 완료: {}", self.index);
        Ok(())
    }

    /// `_bulk` API로 문서를 색인합니다.
    pub async fn index_yogas(&self, documents: &[YogaDocument]) -> AppResult<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let url = format!("{}/_bulk?refresh=true", self.base_url()?);
        let payload = bulk_payload(&self.index, documents)?;

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("색인 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!("색인 실패: {} {}", status, error_text)));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("색인 응답 파싱 실패: {}", e)))?;
        if body.get("errors").and_then(Value::as_bool).unwrap_or(false) {
            return Err(AppError::ExternalServiceError("일부 문서 색인 실패".to_string()));
        }

        log::info!("요가 문서 {}건 색인 완료", documents.len());
        Ok(documents.len())
    }
}

/// 액션 줄과 문서 줄이 번갈아 오는 NDJSON. 마지막 줄도 개행으로 끝납니다.
pub fn bulk_payload(index: &str, documents: &[YogaDocument]) -> AppResult<String> {
    let mut payload = String::new();
    for document in documents {
        let action = json!({ "index": { "_index": index, "_id": document.id.to_string() } });
        payload.push_str(&action.to_string());
        payload.push('\n');
        payload.push_str(
            &serde_json::to_string(document)
                .context("문서 직렬화 실패")?,
        );
        payload.push('\n');
    }
    Ok(payload)
}

pub fn parse_hits(body: &Value) -> Vec<YogaSummary> {
    body.pointer("/hits/hits")
        .and_then(Value::as_array)
        .map(|hits| {
            hits.iter()
                .filter_map(|hit| {
                    let source = hit.get("_source")?;
                    Some(YogaSummary {
                        id: source.get("id")?.as_i64()?,
                        name: source.get("name")?.as_str()?.to_string(),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_payload_is_ndjson() {
        let documents = vec![
            YogaDocument { id: 1, name: "하타".to_string(), group_id: 1, category: "전통".to_string() },
            YogaDocument { id: 2, name: "빈야사".to_string(), group_id: 1, category: "전통".to_string() },
        ];

        let payload = bulk_payload("yoga", &documents).unwrap();
        let lines: Vec<&str> = payload.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(payload.ends_with('\n'));
        let action: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(action["index"]["_index"], "yoga");
        assert_eq!(action["index"]["_id"], "1");
        let doc: Value = serde_json::from_str(lines[3]).unwrap();
        assert_eq!(doc["name"], "빈야사");
    }

    #[test]
    fn test_parse_hits_skips_malformed_entries() {
        let body = serde_json::json!({
            "hits": { "hits": [
                { "_source": { "id": 3, "name": "아쉬탕가" } },
                { "_source": { "name": "id 없음" } },
                { "_id": "9" }
            ] }
        });

        assert_eq!(parse_hits(&body), vec![YogaSummary { id: 3, name: "아쉬탕가".to_string() }]);
        assert!(parse_hits(&serde_json::json!({})).is_empty());
    }
}
