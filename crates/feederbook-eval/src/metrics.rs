use serde::{Deserialize, Serialize};

use crate::model::SlaCounter;

/// Metrics contract version for energy-balance reports.
pub const METRICS_VERSION: &str = "0.1";

/// Loss below this percentage is green.
pub const LOSS_GREEN_MAX: f64 = 2.0;
/// Loss up to and including this percentage is amber.
pub const LOSS_AMBER_MAX: f64 = 5.0;
/// SLA at or above this percentage is green.
pub const SLA_GREEN_MIN: f64 = 95.0;
/// SLA at or above this percentage is amber.
pub const SLA_AMBER_MIN: f64 = 85.0;

/// Traffic-light classification of a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Band {
    Green,
    Amber,
    Red,
}

impl Band {
    pub fn for_loss(pct: f64) -> Band {
        if pct < LOSS_GREEN_MAX {
            Band::Green
        } else if pct <= LOSS_AMBER_MAX {
            Band::Amber
        } else {
            Band::Red
        }
    }

    pub fn for_sla(pct: f64) -> Band {
        if pct >= SLA_GREEN_MIN {
            Band::Green
        } else if pct >= SLA_AMBER_MIN {
            Band::Amber
        } else {
            Band::Red
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Band::Green => "Green",
            Band::Amber => "Amber",
            Band::Red => "Red",
        }
    }
}

/// Number of assets under a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetCounts {
    pub feeders: u64,
    pub dts: u64,
    pub meters: u64,
}

/// Energy in at each level and the percentage lost between levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBalance {
    pub feeder_energy: i64,
    pub dt_energy: i64,
    pub consumer_energy: i64,
    pub loss_feeder_dt_pct: f64,
    pub loss_dt_consumer_pct: f64,
    pub loss_feeder_consumer_pct: f64,
}

impl EnergyBalance {
    pub fn new(feeder_energy: i64, dt_energy: i64, consumer_energy: i64) -> Self {
        Self {
            feeder_energy,
            dt_energy,
            consumer_energy,
            loss_feeder_dt_pct: pct_loss(feeder_energy, dt_energy),
            loss_dt_consumer_pct: pct_loss(dt_energy, consumer_energy),
            loss_feeder_consumer_pct: pct_loss(feeder_energy, consumer_energy),
        }
    }
}

/// Share of rows reporting daily energy and load data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlaMetrics {
    pub rows: u64,
    pub daily_energy_pct: f64,
    pub load_data_pct: f64,
    pub daily_energy_band: Band,
    pub load_data_band: Band,
}

impl From<SlaCounter> for SlaMetrics {
    fn from(counter: SlaCounter) -> Self {
        let daily_energy_pct = pct(counter.daily_yes, counter.rows);
        let load_data_pct = pct(counter.load_yes, counter.rows);
        Self {
            rows: counter.rows,
            daily_energy_pct,
            load_data_pct,
            daily_energy_band: Band::for_sla(daily_energy_pct),
            load_data_band: Band::for_sla(load_data_pct),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtMetrics {
    pub code: String,
    pub name: String,
    pub meters: u64,
    pub dt_energy: i64,
    pub consumer_energy: i64,
    pub loss_dt_consumer_pct: f64,
    pub loss_band: Band,
    pub sla: SlaMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeederMetrics {
    pub code: String,
    pub name: String,
    pub counts: AssetCounts,
    pub balance: EnergyBalance,
    /// Band of the feeder → consumer loss.
    pub loss_band: Band,
    pub sla: SlaMetrics,
    pub dts: Vec<DtMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMetrics {
    pub name: String,
    pub counts: AssetCounts,
    pub balance: EnergyBalance,
    pub loss_band: Band,
    pub sla: SlaMetrics,
    pub feeders: Vec<FeederMetrics>,
}

/// Machine-readable energy-balance report for a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub metrics_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub counts: AssetCounts,
    pub balance: EnergyBalance,
    pub loss_band: Band,
    pub sla: SlaMetrics,
    pub regions: Vec<RegionMetrics>,
}

/// Energy between two register values, never negative, scaled by the MF.
///
/// `None` when the difference or the scaled value does not fit in an `i64`.
pub fn energy(day1: i64, day2: i64, mf: i64) -> Option<i64> {
    day2.checked_sub(day1)?.max(0).checked_mul(mf)
}

/// `(input − output) / input` as a percentage, 0 when there is no input.
pub fn pct_loss(input: i64, output: i64) -> f64 {
    if input == 0 {
        return 0.0;
    }
    round2((input - output) as f64 / input as f64 * 100.0)
}

pub fn pct(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
