//! Shared helpers: path handling, identifier shaping, timestamps.

pub mod paths;
pub mod text;
pub mod time;

pub use paths::{is_under_prefix, normalize_path, path_segments};
pub use text::{capitalize, pascal_case, slugify, title_from_segment};
pub use time::resolve_generated_at;
