pub mod recruitment;

pub use recruitment::*;
