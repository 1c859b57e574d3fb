//! Dataset generation for feederbook.
//!
//! This crate walks the fixed region → feeder → DT → meter hierarchy, builds
//! one record per meter, and writes the result as an XLSX workbook. It can also
//! read such a workbook back into records.

pub mod engine;
pub mod errors;
pub mod input;
pub mod model;
pub mod output;

pub use engine::{GenerationEngine, GenerationResult, generate_records};
pub use errors::GenerationError;
pub use input::xlsx::read_workbook;
pub use model::{DEFAULT_SHEET_NAME, GenerateOptions, GenerationReport};
pub use output::xlsx::write_workbook;
