pub mod academy;

pub use academy::*;
