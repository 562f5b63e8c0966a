//! # Core Framework Module
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: Spring의 ApplicationContext 역할
//! - **자동 등록**: `register_service!` / `register_repository!`가 `inventory`로 생성자를 제출
//! - **의존성 해결**: `Arc<T>` 필드 타입 기반 주입, 첫 `instance()` 호출 시 생성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: `thiserror` 기반 전역 에러 타입
//! - **HTTP 통합**: `ResponseError` 구현으로 `{code, message}` 응답 생성
//! - **자동 변환**: `sqlx`, `redis`, `validator` 에러의 `From` 구현
//!
//! | Spring | 이 프레임워크 |
//! |--------|---------------|
//! | `@Service` | `register_service!` |
//! | `@Repository` | `register_repository!` |
//! | `ApplicationContext` | `ServiceLocator` |
//! | `@Autowired` | `Arc<T>` 필드 |
//! | `@ExceptionHandler` | `AppError::error_response()` |
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! use crate::core::registry::ServiceLocator;
//!
//! // 1. 인프라 컴포넌트 등록
//! ServiceLocator::set(Arc::new(Database::new().await?));
//! ServiceLocator::set(Arc::new(RedisClient::new().await?));
//!
//! // 2. 모든 리포지토리/서비스를 미리 생성 (배선 오류를 서버 시작 전에 발견)
//! ServiceLocator::initialize_all().await?;
//! ```
//!
//! ## 트러블슈팅
//!
//! ```text
//! panic: Component not found: StorageClient. Register it with register_service!/register_repository! or ServiceLocator::set()
//! ```
//! **해결**: 해당 타입에 `register_service!` 적용 또는 `ServiceLocator::set()`으로 수동 등록

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
