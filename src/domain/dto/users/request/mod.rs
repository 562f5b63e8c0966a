pub mod auth_request;
pub mod user_request;

pub use auth_request::*;
pub use user_request::*;
