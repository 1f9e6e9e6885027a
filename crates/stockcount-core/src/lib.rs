pub mod db;
pub mod enrichment;
pub mod error;
pub mod outputs;
pub mod pipelines;
pub mod projection;
pub mod sanitize;
pub mod session_join;
pub mod settings;
pub mod store;
pub mod timestamp_normalizer;
pub mod types;

pub use error::{ExportError, Result};
