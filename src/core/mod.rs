//! Core data types and I/O operations.

pub mod loaders;
pub mod normalize;
pub mod writers;

pub use loaders::{load_ragged_csv, LoaderError, NamedDataset, RaggedTable};
pub use normalize::{normalize_decimal, DecimalSep};
pub use writers::{write_session_workbook, WriteError};
