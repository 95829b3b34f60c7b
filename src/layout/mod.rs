//! Screenplay layout.
//!
//! - Line breaking for a fixed-pitch font (plain and styled text)
//! - Pagination of elements onto pages with continuation markers

pub mod engine;
pub mod text_wrap;

// Re-export main types
pub use engine::ScreenplayWriter;
pub use text_wrap::{WrappedLine, break_lines, chars_per_line, wrap_content, wrap_words};
