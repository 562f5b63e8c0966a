pub mod academy_repo;

pub use academy_repo::*;
