pub mod teacher_service;

pub use teacher_service::*;
