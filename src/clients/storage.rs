//! # S3 호환 오브젝트 스토리지
//!
//! 경로 방식(`{endpoint}/{bucket}/{key}`) PUT 요청에 AWS Signature Version 4
//! 서명을 붙여 업로드합니다. AWS S3, MinIO, NCP Object Storage에서 동작합니다.
//!
//! ```text
//! canonical request ─sha256─► string to sign ─HMAC(signing key)─► signature
//!
//! signing key = HMAC(HMAC(HMAC(HMAC("AWS4" + secret, date), region), "s3"), "aws4_request")
//! ```

use chrono::{DateTime, Datelike, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use uuid::Uuid;
use crate::config::StorageConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};

type HmacSha256 = Hmac<Sha256>;

const SIGNING_ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";

pub struct StorageClient {
    http: reqwest::Client,
    endpoint: String,
    region: String,
    bucket: String,
    access_key: String,
    secret_key: String,
    public_base_url: String,
}

crate::register_service!(StorageClient, StorageClient::from_env);

/// 업로드된 객체 정보
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub uri: String,
}

impl StorageClient {
    pub fn from_env() -> Self {
        Self {
            http: super::http_client(30),
            endpoint: StorageConfig::endpoint().trim_end_matches('/').to_string(),
            region: StorageConfig::region(),
            bucket: StorageConfig::bucket(),
            access_key: StorageConfig::access_key(),
            secret_key: StorageConfig::secret_key(),
            public_base_url: StorageConfig::public_base_url().trim_end_matches('/').to_string(),
        }
    }

    pub async fn put_object(&self, key: &str, content_type: &str, body: Vec<u8>) -> AppResult<StoredObject> {
        let url = reqwest::Url::parse(&format!("{}/{}/{}", self.endpoint, self.bucket, encode_path(key)))
            .with_context(|| format!("스토리지 주소 오류 ({})", key))?;
        let host = host_header(&url)?;

        let now = Utc::now();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let payload_hash = hex::encode(Sha256::digest(&body));

        let signature = self.sign_put(&host, url.path(), content_type, &payload_hash, &now)?;

        let response = self
            .http
            .put(url)
            .header("content-type", content_type)
            .header("x-amz-content-sha256", &payload_hash)
            .header("x-amz-date", &amz_date)
            .header("authorization", signature)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("스토리지 업로드 요청 실패: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("스토리지 업로드 실패 - key: {}, status: {}, body: {}", key, status, error_text);
            return Err(AppError::ExternalServiceError(format!("스토리지 업로드 실패: {}", status)));
        }

        Ok(StoredObject {
            key: key.to_string(),
            uri: format!("{}/{}", self.public_base_url, key),
        })
    }

    /// `Authorization` 헤더 값을 만듭니다.
    fn sign_put(
        &self,
        host: &str,
        canonical_uri: &str,
        content_type: &str,
        payload_hash: &str,
        now: &DateTime<Utc>,
    ) -> AppResult<String> {
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date_stamp = now.format("%Y%m%d").to_string();

        let signed_headers = "content-type;host;x-amz-content-sha256;x-amz-date";
        let canonical_headers = format!(
            "content-type:{}\nhost:{}\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
            content_type.trim(),
            host,
            payload_hash,
            amz_date
        );
        let canonical_request = format!(
            "PUT\n{}\n\n{}\n{}\n{}",
            canonical_uri, canonical_headers, signed_headers, payload_hash
        );

        let scope = format!("{}/{}/{}/aws4_request", date_stamp, self.region, SERVICE);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            SIGNING_ALGORITHM,
            amz_date,
            scope,
            hex::encode(Sha256::digest(canonical_request.as_bytes()))
        );

        let signing_key = derive_signing_key(&self.secret_key, &date_stamp, &self.region, SERVICE)?;
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

        Ok(format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            SIGNING_ALGORITHM, self.access_key, scope, signed_headers, signature
        ))
    }
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> AppResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .context("HMAC 키 오류")?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

pub fn derive_signing_key(secret_key: &str, date_stamp: &str, region: &str, service: &str) -> AppResult<Vec<u8>> {
    let k_date = hmac_sha256(format!("AWS4{}", secret_key).as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

fn host_header(url: &reqwest::Url) -> AppResult<String> {
    let host = url
        .host_str()
        .ok_or_else(|| AppError::InternalError("스토리지 주소에 호스트가 없습니다".to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// 키의 각 경로 구간을 URI 인코딩합니다. `/`는 유지합니다.
fn encode_path(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// `images/{yyyy}/{mm}/{uuid}.{ext}`
pub fn image_object_key(extension: &str, now: DateTime<Utc>, id: Uuid) -> String {
    format!("images/{:04}/{:02}/{}.{}", now.year(), now.month(), id, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_signing_key_matches_published_vector() {
        let key = derive_signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20120215",
            "us-east-1",
            "iam",
        )
        .unwrap();

        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn test_image_object_key_layout() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let id = Uuid::nil();
        assert_eq!(
            image_object_key("png", now, id),
            "images/2024/03/00000000-0000-0000-0000-000000000000.png"
        );
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("images/2024/03/a b.png"), "images/2024/03/a%20b.png");
    }

    #[test]
    fn test_host_header_includes_non_default_port() {
        let url = reqwest::Url::parse("http://localhost:9000/bucket/key").unwrap();
        assert_eq!(host_header(&url).unwrap(), "localhost:9000");

        let url = reqwest::Url::parse("https://s3.ap-northeast-2.amazonaws.com/bucket/key").unwrap();
        assert_eq!(host_header(&url).unwrap(), "s3.ap-northeast-2.amazonaws.com");
    }

    #[test]
    fn test_authorization_header_shape() {
        let client = StorageClient {
            http: reqwest::Client::new(),
            endpoint: "http://localhost:9000".to_string(),
            region: "ap-northeast-2".to_string(),
            bucket: "yoga".to_string(),
            access_key: "AKIDEXAMPLE".to_string(),
            secret_key: "secret".to_string(),
            public_base_url: "http://localhost:9000/yoga".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();

        let header = client
            .sign_put("localhost:9000", "/yoga/images/a.png", "image/png", "UNSIGNED", &now)
            .unwrap();

        assert!(header.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240309/ap-northeast-2/s3/aws4_request"));
        assert!(header.contains("SignedHeaders=content-type;host;x-amz-content-sha256;x-amz-date"));
        let signature = header.rsplit("Signature=").next().unwrap();
        assert_eq!(signature.len(), 64);
    }
}
