//! 외부 연동 구성
//!
//! S3 호환 오브젝트 스토리지, Elasticsearch, SMTP, 국세청 사업자등록정보 API 설정입니다.
//! 선택적인 연동(검색, 메일, 사업자 조회)은 값이 없으면 `None`을 반환하고,
//! 해당 기능은 대체 동작으로 처리됩니다.

use std::env;

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// S3 호환 스토리지 (AWS S3, MinIO, NCP Object Storage 등)
pub struct StorageConfig;

impl StorageConfig {
    pub fn endpoint() -> String {
        env::var("S3_ENDPOINT").unwrap_or_else(|_| "https://s3.ap-northeast-2.amazonaws.com".to_string())
    }

    pub fn region() -> String {
        env::var("S3_REGION").unwrap_or_else(|_| "ap-northeast-2".to_string())
    }

    pub fn bucket() -> String {
        env::var("S3_BUCKET").unwrap_or_else(|_| "yoga-marketplace".to_string())
    }

    pub fn access_key() -> String {
        env::var("S3_ACCESS_KEY").unwrap_or_else(|_| {
            log::warn!("S3_ACCESS_KEY not set, uploads will be rejected by the storage");
            String::new()
        })
    }

    pub fn secret_key() -> String {
        env::var("S3_SECRET_KEY").unwrap_or_default()
    }

    /// 업로드된 객체를 클라이언트에 노출할 기본 URL
    ///
    /// 지정하지 않으면 `{endpoint}/{bucket}` 경로 형식을 사용합니다.
    pub fn public_base_url() -> String {
        optional("S3_PUBLIC_BASE_URL").unwrap_or_else(|| {
            format!("{}/{}", Self::endpoint().trim_end_matches('/'), Self::bucket())
        })
    }

    /// 이미지 최대 크기 (바이트, 기본 10MiB)
    pub fn max_image_bytes() -> usize {
        env::var("UPLOAD_MAX_IMAGE_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10 * 1024 * 1024)
    }
}

pub struct SearchConfig;

impl SearchConfig {
    /// Elasticsearch 주소. 없으면 데이터베이스 검색으로 대체합니다.
    pub fn url() -> Option<String> {
        optional("ELASTICSEARCH_URL")
    }

    pub fn yoga_index() -> String {
        env::var("ELASTICSEARCH_YOGA_INDEX").unwrap_or_else(|_| "yoga".to_string())
    }

    pub fn autocomplete_size() -> usize {
        env::var("YOGA_AUTOCOMPLETE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10)
    }
}

pub struct MailConfig;

impl MailConfig {
    /// SMTP 호스트. 없으면 메일 내용을 로그로만 남깁니다.
    pub fn smtp_host() -> Option<String> {
        optional("SMTP_HOST")
    }

    pub fn smtp_port() -> u16 {
        env::var("SMTP_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(587)
    }

    pub fn smtp_username() -> String {
        env::var("SMTP_USERNAME").unwrap_or_default()
    }

    pub fn smtp_password() -> String {
        env::var("SMTP_PASSWORD").unwrap_or_default()
    }

    pub fn from_address() -> String {
        env::var("MAIL_FROM").unwrap_or_else(|_| "Yoga Marketplace <no-reply@yoga.local>".to_string())
    }
}

/// 국세청 사업자등록정보 진위확인 API
pub struct BusinessRegistryConfig;

impl BusinessRegistryConfig {
    /// 공공데이터포털 서비스 키. 없으면 체크섬 검증만 수행합니다.
    pub fn service_key() -> Option<String> {
        optional("NTS_SERVICE_KEY")
    }

    pub fn base_url() -> String {
        env::var("NTS_BASE_URL").unwrap_or_else(|_| "https://api.odcloud.kr/api/nts-businessman/v1".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_filters_blank_values() {
        assert_eq!(optional("YOGA_MARKETPLACE_SURELY_UNSET_KEY"), None);
    }

    #[test]
    fn test_storage_defaults() {
        if env::var("UPLOAD_MAX_IMAGE_BYTES").is_err() {
            assert_eq!(StorageConfig::max_image_bytes(), 10 * 1024 * 1024);
        }
        if env::var("S3_PUBLIC_BASE_URL").is_err() && env::var("S3_ENDPOINT").is_err() && env::var("S3_BUCKET").is_err() {
            assert_eq!(
                StorageConfig::public_base_url(),
                "https://s3.ap-northeast-2.amazonaws.com/yoga-marketplace"
            );
        }
    }

    #[test]
    fn test_search_defaults() {
        if env::var("ELASTICSEARCH_YOGA_INDEX").is_err() {
            assert_eq!(SearchConfig::yoga_index(), "yoga");
        }
    }
}
