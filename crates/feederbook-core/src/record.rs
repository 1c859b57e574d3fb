use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Column headers of the exported sheet, in order.
pub const COLUMNS: [&str; 16] = [
    "Region Name",
    "Feeder Name",
    "Feeder Code",
    "Feeder Day2 reading",
    "Feeder Day1 reading",
    "MF Feeder",
    "DT Name",
    "DT Code",
    "DT Day2 Reading",
    "DT Day1 Reading",
    "MF DT",
    "Meter No.",
    "Meter Day1 Reading",
    "Meter Day2 Reading",
    "Daily energy",
    "Load Data",
];

/// Yes/No flag column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    Yes,
    No,
}

impl Flag {
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Yes => "Yes",
            Flag::No => "No",
        }
    }

    pub fn is_yes(self) -> bool {
        matches!(self, Flag::Yes)
    }

    pub fn inverse(self) -> Flag {
        match self {
            Flag::Yes => Flag::No,
            Flag::No => Flag::Yes,
        }
    }
}

impl From<bool> for Flag {
    fn from(value: bool) -> Self {
        if value { Flag::Yes } else { Flag::No }
    }
}

impl FromStr for Flag {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "1" => Ok(Flag::Yes),
            "no" | "n" | "false" | "0" => Ok(Flag::No),
            other => Err(Error::InvalidRecord(format!("not a yes/no flag: {other:?}"))),
        }
    }
}

/// Neutral cell value shared by the workbook writer and reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Int(i64),
    Text(String),
}

impl CellValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(value) => Some(*value),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value.as_str()),
            CellValue::Int(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

/// One row of the dataset: a meter with its DT and feeder context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReadingRecord {
    pub region_name: String,
    pub feeder_name: String,
    pub feeder_code: String,
    pub feeder_day2_reading: i64,
    pub feeder_day1_reading: i64,
    pub feeder_mf: i64,
    pub dt_name: String,
    pub dt_code: String,
    pub dt_day2_reading: i64,
    pub dt_day1_reading: i64,
    pub dt_mf: i64,
    pub meter_no: String,
    pub meter_day1_reading: i64,
    pub meter_day2_reading: i64,
    pub daily_energy: Flag,
    pub load_data: Flag,
}

impl MeterReadingRecord {
    /// Cells in `COLUMNS` order.
    pub fn cells(&self) -> [CellValue; 16] {
        [
            CellValue::from(self.region_name.as_str()),
            CellValue::from(self.feeder_name.as_str()),
            CellValue::from(self.feeder_code.as_str()),
            CellValue::Int(self.feeder_day2_reading),
            CellValue::Int(self.feeder_day1_reading),
            CellValue::Int(self.feeder_mf),
            CellValue::from(self.dt_name.as_str()),
            CellValue::from(self.dt_code.as_str()),
            CellValue::Int(self.dt_day2_reading),
            CellValue::Int(self.dt_day1_reading),
            CellValue::Int(self.dt_mf),
            CellValue::from(self.meter_no.as_str()),
            CellValue::Int(self.meter_day1_reading),
            CellValue::Int(self.meter_day2_reading),
            CellValue::from(self.daily_energy.as_str()),
            CellValue::from(self.load_data.as_str()),
        ]
    }

    /// Parse a row laid out in `COLUMNS` order.
    pub fn from_cells(cells: &[CellValue]) -> Result<Self> {
        if cells.len() != COLUMNS.len() {
            return Err(Error::InvalidRecord(format!(
                "expected {} cells, found {}",
                COLUMNS.len(),
                cells.len()
            )));
        }

        Ok(Self {
            region_name: text(cells, 0)?,
            feeder_name: text(cells, 1)?,
            feeder_code: text(cells, 2)?,
            feeder_day2_reading: int(cells, 3)?,
            feeder_day1_reading: int(cells, 4)?,
            feeder_mf: int(cells, 5)?,
            dt_name: text(cells, 6)?,
            dt_code: text(cells, 7)?,
            dt_day2_reading: int(cells, 8)?,
            dt_day1_reading: int(cells, 9)?,
            dt_mf: int(cells, 10)?,
            meter_no: text(cells, 11)?,
            meter_day1_reading: int(cells, 12)?,
            meter_day2_reading: int(cells, 13)?,
            daily_energy: text(cells, 14)?.parse()?,
            load_data: text(cells, 15)?.parse()?,
        })
    }
}

fn text(cells: &[CellValue], idx: usize) -> Result<String> {
    cells[idx].as_str().map(str::to_string).ok_or_else(|| {
        Error::InvalidRecord(format!("column '{}' must be text", COLUMNS[idx]))
    })
}

fn int(cells: &[CellValue], idx: usize) -> Result<i64> {
    cells[idx].as_i64().ok_or_else(|| {
        Error::InvalidRecord(format!("column '{}' must be an integer", COLUMNS[idx]))
    })
}
