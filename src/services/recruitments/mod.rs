pub mod recruitment_service;

pub use recruitment_service::*;
