//! 공통 유틸리티 모듈
//!
//! # Modules
//!
//! - [`display_terminal`] - 서버 기동 시 서비스 레지스트리 초기화 과정 출력
//!
//! ```rust,ignore
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");
//! ```

pub mod display_terminal;
