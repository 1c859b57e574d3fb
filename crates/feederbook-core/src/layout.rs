use serde::Serialize;

/// Shape of the region → feeder → DT → meter hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HierarchyLayout {
    /// Region names, in generation order.
    pub regions: &'static [&'static str],
    pub feeders_per_region: u32,
    pub dts_per_feeder: u32,
    pub meters_per_dt: u32,
}

impl HierarchyLayout {
    /// The layout of the published sample dataset.
    pub const STANDARD: HierarchyLayout = HierarchyLayout {
        regions: &["Region 1", "Region 2", "Region 3"],
        feeders_per_region: 2,
        dts_per_feeder: 4,
        meters_per_dt: 10,
    };

    /// Feeders across all regions; feeder codes run from 1 to this value.
    pub fn total_feeders(&self) -> u32 {
        self.regions.len() as u32 * self.feeders_per_region
    }

    pub fn total_dts(&self) -> u32 {
        self.total_feeders() * self.dts_per_feeder
    }

    /// One row is produced per meter.
    pub fn total_rows(&self) -> u32 {
        self.total_dts() * self.meters_per_dt
    }
}
