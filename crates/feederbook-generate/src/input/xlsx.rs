use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use tracing::info;

use feederbook_core::{COLUMNS, CellValue, MeterReadingRecord};

use crate::errors::GenerationError;

/// Read a workbook written by [`crate::output::xlsx::write_workbook`].
///
/// The first worksheet must start with the fixed column header. Numeric cells
/// must hold whole numbers that fit in an `i64`; they come back as integers.
pub fn read_workbook(path: &Path) -> Result<Vec<MeterReadingRecord>, GenerationError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook.worksheet_range_at(0).ok_or_else(|| {
        GenerationError::InvalidWorkbook("workbook has no worksheets".to_string())
    })??;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| GenerationError::InvalidWorkbook("worksheet is empty".to_string()))?;
    check_header(header)?;

    let mut records = Vec::new();
    for (idx, row) in rows.enumerate() {
        let cells = row
            .iter()
            .enumerate()
            .map(|(col, data)| to_cell(data, idx + 2, col))
            .collect::<Result<Vec<_>, _>>()?;
        let record = MeterReadingRecord::from_cells(&cells).map_err(|err| {
            GenerationError::InvalidWorkbook(format!("row {}: {err}", idx + 2))
        })?;
        records.push(record);
    }

    info!(path = %path.display(), rows = records.len(), "workbook read");
    Ok(records)
}

fn check_header(header: &[Data]) -> Result<(), GenerationError> {
    let found: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
    if found != COLUMNS {
        return Err(GenerationError::InvalidWorkbook(format!(
            "unexpected header: {}",
            found.join(", ")
        )));
    }
    Ok(())
}

/// Floats that convert to `i64` without clamping: `[-2^63, 2^63)`.
const I64_RANGE: std::ops::Range<f64> =
    -9_223_372_036_854_775_808.0..9_223_372_036_854_775_808.0;

fn to_cell(data: &Data, row: usize, col: usize) -> Result<CellValue, GenerationError> {
    match data {
        Data::Int(value) => Ok(CellValue::Int(*value)),
        Data::Float(value) if value.fract() == 0.0 && I64_RANGE.contains(value) => {
            Ok(CellValue::Int(*value as i64))
        }
        Data::String(value) => Ok(CellValue::Text(value.clone())),
        other => Err(GenerationError::InvalidWorkbook(format!(
            "row {row}, column '{}': unsupported cell {other:?}",
            COLUMNS.get(col).copied().unwrap_or("?")
        ))),
    }
}
