//! Utility modules.

pub mod file;
pub mod text;

pub use file::{is_text_file, read_file_content};
pub use text::has_meaningful_content;
