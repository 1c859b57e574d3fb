//! Naming scheme for feeders, DTs, and meters.

/// `F001`, `F002`, ... for the global feeder index (1-based).
pub fn feeder_code(index: u32) -> String {
    format!("F{index:03}")
}

pub fn feeder_name(feeder_code: &str) -> String {
    format!("Feeder {feeder_code}")
}

/// `<feeder>DT<nnn>` for the DT position within its feeder.
pub fn dt_code(feeder_code: &str, position: u32) -> String {
    format!("{feeder_code}DT{position:03}")
}

pub fn dt_name(dt_code: &str) -> String {
    format!("DT {dt_code}")
}

/// `MTR-<dt>-<nn>` for the meter position within its DT.
pub fn meter_number(dt_code: &str, position: u32) -> String {
    format!("MTR-{dt_code}-{position:02}")
}
