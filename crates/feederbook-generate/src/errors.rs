use thiserror::Error;

/// Errors emitted by the generation engine and the workbook I/O.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Core(#[from] feederbook_core::Error),
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("xlsx read error: {0}")]
    Read(#[from] calamine::XlsxError),
    #[error("invalid workbook: {0}")]
    InvalidWorkbook(String),
}
