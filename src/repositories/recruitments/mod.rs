pub mod recruitment_repo;

pub use recruitment_repo::*;
