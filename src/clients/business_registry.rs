//! # 사업자등록번호 검증
//!
//! 1. 체크섬: 10자리 숫자의 마지막 자리는 앞 9자리로 계산한 검증 숫자입니다.
//! 2. 진위확인: `NTS_SERVICE_KEY`가 있으면 국세청 진위확인 API로 번호/대표자명/개업일자가
//!    등록 정보와 일치하는지 확인합니다 (`valid == "01"`).

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use crate::config::BusinessRegistryConfig;
use crate::core::errors::{AppError, AppResult};

const CHECKSUM_WEIGHTS: [u32; 9] = [1, 3, 7, 1, 3, 7, 1, 3, 5];
const VALID: &str = "01";

pub fn is_valid_checksum(business_number: &str) -> bool {
    if business_number.len() != 10 {
        return false;
    }
    let digits: Option<Vec<u32>> = business_number.chars().map(|c| c.to_digit(10)).collect();
    let Some(digits) = digits else {
        return false;
    };

    let weighted: u32 = digits
        .iter()
        .zip(CHECKSUM_WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();
    let sum = weighted + (digits[8] * 5) / 10;

    (10 - sum % 10) % 10 == digits[9]
}

#[derive(Debug, Deserialize)]
struct ValidateResponse {
    #[serde(default)]
    data: Vec<ValidateResult>,
}

#[derive(Debug, Deserialize)]
struct ValidateResult {
    valid: String,
    #[serde(default)]
    valid_msg: Option<String>,
}

pub struct BusinessRegistryClient {
    http: reqwest::Client,
    service_key: Option<String>,
    base_url: String,
}

crate::register_service!(BusinessRegistryClient, BusinessRegistryClient::from_env);

impl BusinessRegistryClient {
    pub fn from_env() -> Self {
        let service_key = BusinessRegistryConfig::service_key();
        if service_key.is_none() {
            log::warn!("NTS_SERVICE_KEY not set, business numbers are checked by checksum only");
        }

        Self {
            http: super::http_client(10),
            service_key,
            base_url: BusinessRegistryConfig::base_url().trim_end_matches('/').to_string(),
        }
    }

    /// 하이픈이 제거된 10자리 사업자등록번호를 검증합니다.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 체크섬 불일치 또는 등록 정보 불일치
    /// * `ExternalServiceError` - 진위확인 API 통신 실패
    pub async fn verify(
        &self,
        business_number: &str,
        representative_name: &str,
        opened_at: NaiveDate,
    ) -> AppResult<()> {
        if !is_valid_checksum(business_number) {
            log::warn!("사업자등록번호 체크섬 불일치: {}", business_number);
            return Err(AppError::ValidationError("유효하지 않은 사업자등록번호입니다".to_string()));
        }

        let Some(ref service_key) = self.service_key else {
            return Ok(());
        };

        let url = format!(
            "{}/validate?serviceKey={}",
            self.base_url,
            urlencoding::encode(service_key)
        );
        let body = json!({
            "businesses": [{
                "b_no": business_number,
                "start_dt": opened_at.format("%Y%m%d").to_string(),
                "p_nm": representative_name.trim(),
            }]
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("사업자 진위확인 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "사업자 진위확인 실패: {} {}",
                status, error_text
            )));
        }

        let result = response
            .json::<ValidateResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("사업자 진위확인 응답 파싱 실패: {}", e)))?;

        match result.data.first() {
            Some(item) if item.valid == VALID => Ok(()),
            Some(item) => {
                log::warn!(
                    "사업자 진위확인 불일치 - b_no: {}, msg: {}",
                    business_number,
                    item.valid_msg.as_deref().unwrap_or("")
                );
                Err(AppError::ValidationError("사업자등록 정보가 일치하지 않습니다".to_string()))
            }
            None => Err(AppError::ExternalServiceError("사업자 진위확인 응답이 비어 있습니다".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_accepts_registered_numbers() {
        assert!(is_valid_checksum("1248100998"));
        assert!(is_valid_checksum("2208162517"));
        assert!(is_valid_checksum("1234567891"));
    }

    #[test]
    fn test_checksum_rejects_invalid_numbers() {
        assert!(!is_valid_checksum("1234567890"));
        assert!(!is_valid_checksum("2148801925"));
        assert!(!is_valid_checksum("123456789"));
        assert!(!is_valid_checksum("12345678a1"));
        assert!(!is_valid_checksum("123-45-678"));
    }

    #[test]
    fn test_validate_response_parsing() {
        let body = r#"{"status_code":"OK","request_cnt":1,"valid_cnt":1,
            "data":[{"b_no":"1248100998","valid":"01","request_param":{}}]}"#;
        let parsed: ValidateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data[0].valid, VALID);
    }

    #[actix_web::test]
    async fn test_verify_without_service_key_checks_checksum_only() {
        let client = BusinessRegistryClient {
            http: reqwest::Client::new(),
            service_key: None,
            base_url: "http://127.0.0.1:1".to_string(),
        };
        let opened_at = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        assert!(client.verify("1248100998", "홍길동", opened_at).await.is_ok());
        let err = client.verify("1234567890", "홍길동", opened_at).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
