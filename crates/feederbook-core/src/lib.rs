//! Core contracts and helpers for feederbook.
//!
//! This crate defines the meter reading record, the sheet column contract, the
//! hierarchy layout, and the static reading tables shared by the generator,
//! the evaluator, and the CLI.

pub mod codes;
pub mod error;
pub mod layout;
pub mod record;
pub mod tables;
pub mod validation;

pub use error::{Error, Result};
pub use layout::HierarchyLayout;
pub use record::{COLUMNS, CellValue, Flag, MeterReadingRecord};
pub use tables::ReadingPair;
pub use validation::{validate_layout, validate_records};

/// File name the sample dataset is written to, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "sample_feeder_dt_meter_data.xlsx";
