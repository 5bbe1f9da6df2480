//! Utility functions

pub mod path;

pub use path::{conform_path, container_join, normalize_path};
