pub mod writer;

pub use writer::{render, write_manifest};
