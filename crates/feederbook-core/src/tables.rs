//! Static reading tables for the sample dataset.
//!
//! Positions are 1-based, matching how feeders, DTs, and meters are numbered
//! in the generated codes.

use serde::Serialize;

/// Register values captured on two successive days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadingPair {
    pub day1: i64,
    pub day2: i64,
}

impl ReadingPair {
    pub const fn new(day1: i64, day2: i64) -> Self {
        Self { day1, day2 }
    }
}

/// Multiplying factor applied to every feeder and DT reading.
pub const MULTIPLYING_FACTOR: i64 = 1;

/// Meter day1 register is this value times the meter position.
pub const METER_BASE_STEP: i64 = 100;

/// Feeder start values keyed by feeder code.
pub const FEEDER_READINGS: [(&str, ReadingPair); 6] = [
    ("F001", ReadingPair::new(5100, 5320)),
    ("F002", ReadingPair::new(6200, 6430)),
    ("F003", ReadingPair::new(7300, 7530)),
    ("F004", ReadingPair::new(8400, 8630)),
    ("F005", ReadingPair::new(9500, 9730)),
    ("F006", ReadingPair::new(10600, 10830)),
];

/// DT readings by DT position within a feeder.
pub const DT_PATTERNS: [ReadingPair; 4] = [
    ReadingPair::new(1000, 1050),
    ReadingPair::new(2000, 2050),
    ReadingPair::new(3000, 3050),
    ReadingPair::new(4000, 4050),
];

/// Day2 − day1 advance by meter position within a DT.
pub const METER_ADVANCES: [i64; 10] = [5, 4, 6, 3, 7, 5, 6, 4, 4, 4];

pub fn feeder_readings(feeder_code: &str) -> Option<ReadingPair> {
    FEEDER_READINGS
        .iter()
        .find(|(code, _)| *code == feeder_code)
        .map(|(_, pair)| *pair)
}

pub fn dt_readings(position: u32) -> Option<ReadingPair> {
    position_index(position).and_then(|idx| DT_PATTERNS.get(idx).copied())
}

pub fn meter_advance(position: u32) -> Option<i64> {
    position_index(position).and_then(|idx| METER_ADVANCES.get(idx).copied())
}

/// Meter readings for a position: day1 is `100 × position`, day2 adds the advance.
pub fn meter_readings(position: u32) -> Option<ReadingPair> {
    let advance = meter_advance(position)?;
    let day1 = METER_BASE_STEP * i64::from(position);
    Some(ReadingPair::new(day1, day1 + advance))
}

fn position_index(position: u32) -> Option<usize> {
    (position as usize).checked_sub(1)
}
