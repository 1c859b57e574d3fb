use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use feederbook_core::DEFAULT_OUTPUT_FILE;

/// Sheet name used when none is given.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Workbook path; an existing file is overwritten.
    pub output_path: PathBuf,
    /// Name of the single worksheet.
    pub sheet_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }
}

/// Summary of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub regions: u32,
    pub feeders: u32,
    pub dts: u32,
    pub rows_written: u64,
    pub duration_ms: u64,
}
