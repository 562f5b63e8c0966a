use serde::Serialize;

/// 이미지 업로드 결과
///
/// `uri`를 학원/강사/자격증의 이미지 필드에 그대로 사용합니다.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub uri: String,
    pub content_type: String,
    pub size: usize,
}
