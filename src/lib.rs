//! wav-shrink - Batch WAV File-Size Reducer
//!
//! Re-encodes WAV files at a lower frame rate so each one fits under a target
//! size. Files are processed one by one or on a worker pool.

pub mod audio;
pub mod config;
pub mod error;
pub mod logging;
pub mod processing;

pub use config::{Args, Config};
pub use error::{Result, WavShrinkError};
pub use logging::{init_logging, init_queue_logging};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

pub fn get_library_info() -> LibraryInfo {
    LibraryInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct LibraryInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}

impl std::fmt::Display for LibraryInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} - {}", self.name, self.version, self.description)
    }
}
