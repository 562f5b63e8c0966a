//! Users Entity Module
//!
//! 로컬 가입 사용자와 소셜 로그인 사용자를 하나의 `users` 테이블로 표현합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::NewUser;
//!
//! let local = NewUser::local("user@example.com", "홍길동", None, hashed_password);
//! let social = NewUser::social(&profile);
//! ```

pub mod user;

pub use user::*;
