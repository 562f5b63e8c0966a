//! # 이미지 업로드 서비스
//!
//! 허용 형식은 JPEG, PNG, WebP, GIF입니다. 선언된 Content-Type과 파일 시그니처가
//! 모두 허용 형식이고 서로 일치해야 합니다.
//!
//! 저장 키는 `images/{yyyy}/{mm}/{uuid}.{ext}`이며 응답의 `uri`를
//! 프로필/학원/자격증 이미지 필드에 그대로 넣습니다.

use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use crate::clients::storage::{image_object_key, StorageClient};
use crate::config::StorageConfig;
use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::uploads::UploadResponse;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// 파일 앞부분의 매직 바이트로 형식을 판별합니다.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            Some(Self::Webp)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else {
            None
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Gif => "gif",
        }
    }
}

pub struct UploadService {
    storage_client: Arc<StorageClient>,
}

crate::register_service!(UploadService { storage_client });

impl UploadService {
    pub async fn upload_image(&self, content_type: Option<&str>, bytes: Vec<u8>) -> AppResult<UploadResponse> {
        let kind = check_image(content_type, &bytes, StorageConfig::max_image_bytes())?;

        let key = image_object_key(kind.extension(), Utc::now(), Uuid::new_v4());
        let size = bytes.len();
        let stored = self.storage_client.put_object(&key, kind.content_type(), bytes).await?;

        log::info!("이미지 업로드 완료 - key: {}, size: {}", stored.key, size);
        Ok(UploadResponse {
            key: stored.key,
            uri: stored.uri,
            content_type: kind.content_type().to_string(),
            size,
        })
    }
}

/// 크기 제한과 형식을 확인합니다.
pub fn check_image(content_type: Option<&str>, bytes: &[u8], max_bytes: usize) -> AppResult<ImageKind> {
    if bytes.is_empty() {
        return Err(AppError::ValidationError("빈 파일은 업로드할 수 없습니다".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "이미지는 {}바이트 이하여야 합니다",
            max_bytes
        )));
    }

    let declared = content_type.unwrap_or("application/octet-stream");
    let kind = ImageKind::from_content_type(declared)
        .ok_or_else(|| AppError::UnsupportedMediaType(format!("허용되지 않는 형식입니다 ({})", declared)))?;

    match ImageKind::sniff(bytes) {
        Some(actual) if actual == kind => Ok(kind),
        _ => Err(AppError::UnsupportedMediaType(
            "파일 내용이 선언된 형식과 일치하지 않습니다".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    #[test]
    fn test_content_type_parsing() {
        assert_eq!(ImageKind::from_content_type("image/png"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_content_type("IMAGE/JPEG; charset=binary"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_content_type("image/svg+xml"), None);
        assert_eq!(ImageKind::from_content_type("text/plain"), None);
    }

    #[test]
    fn test_sniff_signatures() {
        assert_eq!(ImageKind::sniff(PNG), Some(ImageKind::Png));
        assert_eq!(ImageKind::sniff(JPEG), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::sniff(b"GIF89a...."), Some(ImageKind::Gif));
        assert_eq!(ImageKind::sniff(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageKind::Webp));
        assert_eq!(ImageKind::sniff(b"<svg"), None);
    }

    #[test]
    fn test_check_image_accepts_matching_type() {
        assert_eq!(check_image(Some("image/png"), PNG, 1024).unwrap(), ImageKind::Png);
    }

    #[test]
    fn test_check_image_rejects_oversized() {
        let err = check_image(Some("image/png"), PNG, 4).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }

    #[test]
    fn test_check_image_rejects_unsupported_or_mismatched() {
        assert!(matches!(
            check_image(Some("text/plain"), b"hello", 1024).unwrap_err(),
            AppError::UnsupportedMediaType(_)
        ));
        assert!(matches!(
            check_image(None, PNG, 1024).unwrap_err(),
            AppError::UnsupportedMediaType(_)
        ));
        assert!(matches!(
            check_image(Some("image/jpeg"), PNG, 1024).unwrap_err(),
            AppError::UnsupportedMediaType(_)
        ));
    }

    #[test]
    fn test_check_image_rejects_empty() {
        assert!(matches!(
            check_image(Some("image/png"), &[], 1024).unwrap_err(),
            AppError::ValidationError(_)
        ));
    }
}
