pub mod api;
mod buffer;
pub mod config;
mod cursor;
pub mod error;
pub mod formatter;
pub mod mode;
pub mod report;

// Re-export the main public API
pub use api::{format_string, get_matching_paths, run};
pub use config::load_config;
pub use error::{GqlfmtError, Result};
pub use mode::Mode;
