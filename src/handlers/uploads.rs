//! 이미지 업로드 핸들러
//!
//! `multipart/form-data`의 `file` 필드 하나를 받습니다.
//!
//! ```bash
//! curl -X POST http://localhost:8080/api/v1/uploads/images \
//!   -H "Authorization: Bearer $ACCESS_TOKEN" \
//!   -F "file=@studio.jpg;type=image/jpeg"
//! ```

use actix_multipart::Multipart;
use actix_web::{post, HttpResponse};
use futures_util::TryStreamExt;
use crate::config::StorageConfig;
use crate::core::errors::AppError;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::uploads::UploadService;

const FILE_FIELD: &str = "file";

#[post("/images")]
pub async fn upload_image(user: AuthenticatedUser, mut payload: Multipart) -> Result<HttpResponse, AppError> {
    let max_bytes = StorageConfig::max_image_bytes();

    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(|mime| mime.to_string());
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            // 제한을 넘는 순간 중단
            if bytes.len() + chunk.len() > max_bytes {
                log::warn!("업로드 크기 초과 - user_id: {}", user.user_id);
                return Err(AppError::PayloadTooLarge(format!(
                    "이미지는 {}바이트 이하여야 합니다",
                    max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        let uploaded = UploadService::instance()
            .upload_image(content_type.as_deref(), bytes)
            .await?;
        return Ok(HttpResponse::Created().json(uploaded));
    }

    Err(AppError::ValidationError(format!("'{}' 필드가 필요합니다", FILE_FIELD)))
}

fn multipart_error(err: actix_multipart::MultipartError) -> AppError {
    AppError::ValidationError(format!("multipart 요청을 읽을 수 없습니다: {}", err))
}
