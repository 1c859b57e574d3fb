use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use tracing::info;

use feederbook_core::{COLUMNS, CellValue, MeterReadingRecord};

/// Write records as a single-sheet workbook with the fixed column header.
///
/// Integer columns are stored as numbers and text columns as strings. No
/// index column and no styling are written. An existing file is replaced.
///
/// Returns the number of data rows written.
pub fn write_workbook(
    path: &Path,
    sheet_name: &str,
    records: &[MeterReadingRecord],
) -> Result<u64, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, cell) in record.cells().iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell)?;
        }
    }

    workbook.save(path)?;

    info!(
        path = %path.display(),
        sheet = sheet_name,
        rows = records.len(),
        "workbook written"
    );
    Ok(records.len() as u64)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> Result<(), XlsxError> {
    match cell {
        CellValue::Int(value) => worksheet.write_number(row, col, *value as f64)?,
        CellValue::Text(value) => worksheet.write_string(row, col, value.as_str())?,
    };
    Ok(())
}
