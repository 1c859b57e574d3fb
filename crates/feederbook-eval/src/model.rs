/// Asset tree rebuilt from flat rows, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    pub regions: Vec<RegionNode>,
    /// Raw-row SLA counters across the whole dataset.
    pub sla: SlaCounter,
}

#[derive(Debug, Clone)]
pub struct RegionNode {
    pub name: String,
    pub feeders: Vec<FeederNode>,
    /// Raw-row SLA counters for this region.
    pub sla: SlaCounter,
}

#[derive(Debug, Clone)]
pub struct FeederNode {
    pub code: String,
    pub name: String,
    /// Energy from the first row seen for this feeder.
    pub energy: i64,
    pub dts: Vec<DtNode>,
}

#[derive(Debug, Clone)]
pub struct DtNode {
    pub code: String,
    pub name: String,
    /// Energy from the first row seen for this DT.
    pub energy: i64,
    pub meters: Vec<MeterNode>,
}

#[derive(Debug, Clone)]
pub struct MeterNode {
    pub number: String,
    pub energy: i64,
    pub daily_energy: bool,
    pub load_data: bool,
}

/// Yes-counts for the two flag columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlaCounter {
    pub rows: u64,
    pub daily_yes: u64,
    pub load_yes: u64,
}

impl SlaCounter {
    pub fn record(&mut self, daily_energy: bool, load_data: bool) {
        self.rows += 1;
        self.daily_yes += u64::from(daily_energy);
        self.load_yes += u64::from(load_data);
    }
}

impl FeederNode {
    pub fn meters(&self) -> impl Iterator<Item = &MeterNode> {
        self.dts.iter().flat_map(|dt| dt.meters.iter())
    }
}

impl RegionNode {
    pub fn dts(&self) -> impl Iterator<Item = &DtNode> {
        self.feeders.iter().flat_map(|feeder| feeder.dts.iter())
    }
}
