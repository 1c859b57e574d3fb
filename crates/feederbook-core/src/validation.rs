use std::collections::{BTreeMap, BTreeSet};

use crate::codes::feeder_code;
use crate::error::{Error, Result};
use crate::layout::HierarchyLayout;
use crate::record::MeterReadingRecord;
use crate::tables::{DT_PATTERNS, METER_ADVANCES, feeder_readings};

/// Validate that a layout stays inside the static lookup tables.
///
/// This checks:
/// - at least one region, and no empty level
/// - every feeder code the layout produces has start values
/// - the DT pattern and meter advance tables cover each position
pub fn validate_layout(layout: &HierarchyLayout) -> Result<()> {
    if layout.regions.is_empty() {
        return Err(Error::InvalidLayout("no regions configured".to_string()));
    }
    if layout.feeders_per_region == 0 || layout.dts_per_feeder == 0 || layout.meters_per_dt == 0
    {
        return Err(Error::InvalidLayout(
            "every hierarchy level needs at least one entity".to_string(),
        ));
    }

    for index in 1..=layout.total_feeders() {
        let code = feeder_code(index);
        if feeder_readings(&code).is_none() {
            return Err(Error::InvalidLayout(format!(
                "no feeder readings for {code} ({} feeders requested)",
                layout.total_feeders()
            )));
        }
    }

    if layout.dts_per_feeder as usize > DT_PATTERNS.len() {
        return Err(Error::InvalidLayout(format!(
            "dts_per_feeder is {} but only {} DT patterns exist",
            layout.dts_per_feeder,
            DT_PATTERNS.len()
        )));
    }

    if layout.meters_per_dt as usize > METER_ADVANCES.len() {
        return Err(Error::InvalidLayout(format!(
            "meters_per_dt is {} but only {} meter advances exist",
            layout.meters_per_dt,
            METER_ADVANCES.len()
        )));
    }

    Ok(())
}

/// Validate the structural invariants of a generated dataset.
///
/// This checks:
/// - meter numbers are unique
/// - each DT code belongs to a single feeder
/// - the two flag columns are complementary
/// - meter day2 never falls below day1
pub fn validate_records(records: &[MeterReadingRecord]) -> Result<()> {
    let mut meters = BTreeSet::new();
    let mut dt_feeders: BTreeMap<&str, &str> = BTreeMap::new();

    for record in records {
        if !meters.insert(record.meter_no.as_str()) {
            return Err(Error::InvalidRecord(format!(
                "duplicate meter number: {}",
                record.meter_no
            )));
        }

        let feeder = *dt_feeders
            .entry(record.dt_code.as_str())
            .or_insert(record.feeder_code.as_str());
        if feeder != record.feeder_code {
            return Err(Error::InvalidRecord(format!(
                "DT code {} appears under feeders {feeder} and {}",
                record.dt_code, record.feeder_code
            )));
        }

        if record.daily_energy == record.load_data {
            return Err(Error::InvalidRecord(format!(
                "meter {} has matching daily energy and load data flags",
                record.meter_no
            )));
        }

        if record.meter_day2_reading < record.meter_day1_reading {
            return Err(Error::InvalidRecord(format!(
                "meter {} day2 reading is below day1",
                record.meter_no
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_layout_is_valid() {
        assert!(validate_layout(&HierarchyLayout::STANDARD).is_ok());
    }

    #[test]
    fn rejects_more_feeders_than_table() {
        let layout = HierarchyLayout {
            regions: &["Region 1", "Region 2", "Region 3", "Region 4"],
            ..HierarchyLayout::STANDARD
        };
        let err = validate_layout(&layout).expect_err("F007 has no readings");
        assert!(err.to_string().contains("F007"));
    }

    #[test]
    fn rejects_oversized_dt_and_meter_levels() {
        let layout = HierarchyLayout {
            dts_per_feeder: 5,
            ..HierarchyLayout::STANDARD
        };
        assert!(validate_layout(&layout).is_err());

        let layout = HierarchyLayout {
            meters_per_dt: 11,
            ..HierarchyLayout::STANDARD
        };
        assert!(validate_layout(&layout).is_err());
    }

    #[test]
    fn rejects_empty_levels() {
        let layout = HierarchyLayout {
            regions: &[],
            ..HierarchyLayout::STANDARD
        };
        assert!(validate_layout(&layout).is_err());

        let layout = HierarchyLayout {
            meters_per_dt: 0,
            ..HierarchyLayout::STANDARD
        };
        assert!(validate_layout(&layout).is_err());
    }

    #[test]
    fn smaller_layouts_are_valid() {
        let layout = HierarchyLayout {
            regions: &["Region 1"],
            feeders_per_region: 1,
            dts_per_feeder: 2,
            meters_per_dt: 3,
        };
        assert!(validate_layout(&layout).is_ok());
    }
}
