pub mod teacher_repo;

pub use teacher_repo::*;
