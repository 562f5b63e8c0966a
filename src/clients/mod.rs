//! # 외부 연동 클라이언트
//!
//! 서비스 계층이 사용하는 외부 HTTP/SMTP 연동입니다. 모두 `register_service!`로
//! 등록되는 싱글톤이며 생성 시 환경 설정을 읽습니다.
//!
//! | 클라이언트 | 대상 | 설정이 없을 때 |
//! |------------|------|----------------|
//! | [`social::SocialClient`] | 카카오/네이버/구글 사용자 정보 API | 기본 URL 사용 |
//! | [`storage::StorageClient`] | S3 호환 오브젝트 스토리지 (SigV4) | 스토리지가 요청 거부 |
//! | [`search::SearchClient`] | Elasticsearch | 데이터베이스 검색으로 대체 |
//! | [`mail::MailClient`] | SMTP | 로그로만 기록 |
//! | [`business_registry::BusinessRegistryClient`] | 국세청 사업자등록 진위확인 | 체크섬만 검증 |

pub mod social;
pub mod storage;
pub mod search;
pub mod mail;
pub mod business_registry;

use std::time::Duration;

/// 연동 클라이언트 공용 HTTP 클라이언트를 만듭니다.
pub(crate) fn http_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|e| {
            log::error!("HTTP 클라이언트 생성 실패, 기본 설정 사용: {}", e);
            reqwest::Client::new()
        })
}
