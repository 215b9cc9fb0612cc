//! Output handling

pub mod writer;

pub use writer::{write_args, write_raw, write_record};
