//! Telemetry session consolidation pipeline.
//!
//! This crate collects the newest per-subsystem CSV logs written during a
//! participant session and folds them into one multi-sheet workbook:
//! - Normalizing locale decimal separators without touching non-numeric fields
//! - Loading ragged `;`-delimited files into rectangular tables without dropping data
//! - Selecting the most recently written log file(s) per subsystem folder
//! - Writing one worksheet per consolidated dataset
//!
//! # Example
//!
//! ```no_run
//! use session_pipeline::config::SessionConfig;
//! use session_pipeline::processors::consolidate::collect_session;
//!
//! let config = SessionConfig::default();
//! let datasets = collect_session(&config).unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;

pub use config::{ClassificationRule, SessionConfig, SubsystemConfig};
pub use core::loaders::{NamedDataset, RaggedTable};
pub use core::normalize::DecimalSep;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
