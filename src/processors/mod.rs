//! Pipeline orchestration modules.

pub mod consolidate;
pub mod selection;

// Re-export key operations for convenience
pub use consolidate::collect_session;
pub use selection::latest_csv_files;
