pub mod area_repo;
pub mod yoga_repo;

pub use area_repo::*;
pub use yoga_repo::*;
