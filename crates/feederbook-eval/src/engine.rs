use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::info;

use feederbook_core::MeterReadingRecord;
use feederbook_generate::read_workbook;

use crate::errors::EvalError;
use crate::metrics::{
    AssetCounts, Band, DtMetrics, EnergyBalance, FeederMetrics, METRICS_VERSION, MetricsReport,
    RegionMetrics, SlaMetrics, energy,
};
use crate::model::{DtNode, FeederNode, Hierarchy, MeterNode, RegionNode, SlaCounter};

/// Read a workbook and evaluate its energy balance.
pub fn evaluate_workbook(path: &Path) -> Result<MetricsReport, EvalError> {
    let records = read_workbook(path)?;
    let mut report = evaluate_records(&records)?;
    report.source = Some(path.display().to_string());
    Ok(report)
}

/// Evaluate losses and SLA ratios for a set of rows.
pub fn evaluate_records(records: &[MeterReadingRecord]) -> Result<MetricsReport, EvalError> {
    if records.is_empty() {
        return Err(EvalError::InvalidDataset("dataset has no rows".to_string()));
    }

    let hierarchy = build_hierarchy(records)?;
    let regions = hierarchy
        .regions
        .iter()
        .map(region_metrics)
        .collect::<Result<Vec<_>, _>>()?;

    let counts = regions.iter().fold(AssetCounts::default(), |acc, region| {
        AssetCounts {
            feeders: acc.feeders + region.counts.feeders,
            dts: acc.dts + region.counts.dts,
            meters: acc.meters + region.counts.meters,
        }
    });
    let balance = EnergyBalance::new(
        checked_total(regions.iter().map(|r| r.balance.feeder_energy), "feeder energy")?,
        checked_total(regions.iter().map(|r| r.balance.dt_energy), "DT energy")?,
        checked_total(regions.iter().map(|r| r.balance.consumer_energy), "consumer energy")?,
    );

    info!(
        regions = regions.len(),
        feeders = counts.feeders,
        dts = counts.dts,
        meters = counts.meters,
        "energy balance evaluated"
    );

    Ok(MetricsReport {
        metrics_version: METRICS_VERSION.to_string(),
        source: None,
        counts,
        loss_band: Band::for_loss(balance.loss_feeder_consumer_pct),
        balance,
        sla: SlaMetrics::from(hierarchy.sla),
        regions,
    })
}

/// Group rows into region → feeder → DT → meter.
///
/// Feeders and DTs are keyed by code, meters by number. Asset energies come
/// from the first row seen for that asset; repeated meter numbers are ignored
/// for meter-level totals but still count towards raw-row SLA figures.
/// Readings whose energy does not fit in an `i64` reject the dataset.
pub fn build_hierarchy(records: &[MeterReadingRecord]) -> Result<Hierarchy, EvalError> {
    let mut hierarchy = Hierarchy::default();
    let mut region_index: HashMap<&str, usize> = HashMap::new();
    let mut feeder_index: HashMap<&str, (usize, usize)> = HashMap::new();
    let mut dt_index: HashMap<&str, (usize, usize, usize)> = HashMap::new();
    let mut seen_meters: HashSet<&str> = HashSet::new();

    for record in records {
        let daily = record.daily_energy.is_yes();
        let load = record.load_data.is_yes();
        hierarchy.sla.record(daily, load);

        let r = *region_index
            .entry(record.region_name.as_str())
            .or_insert_with(|| {
                hierarchy.regions.push(RegionNode {
                    name: record.region_name.clone(),
                    feeders: Vec::new(),
                    sla: SlaCounter::default(),
                });
                hierarchy.regions.len() - 1
            });
        hierarchy.regions[r].sla.record(daily, load);

        let (r, f) = match feeder_index.entry(record.feeder_code.as_str()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let energy = asset_energy(
                    record.feeder_day1_reading,
                    record.feeder_day2_reading,
                    record.feeder_mf,
                    &record.feeder_code,
                )?;
                let feeders = &mut hierarchy.regions[r].feeders;
                feeders.push(FeederNode {
                    code: record.feeder_code.clone(),
                    name: record.feeder_name.clone(),
                    energy,
                    dts: Vec::new(),
                });
                *entry.insert((r, feeders.len() - 1))
            }
        };

        let (r, f, d) = match dt_index.entry(record.dt_code.as_str()) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let energy = asset_energy(
                    record.dt_day1_reading,
                    record.dt_day2_reading,
                    record.dt_mf,
                    &record.dt_code,
                )?;
                let dts = &mut hierarchy.regions[r].feeders[f].dts;
                dts.push(DtNode {
                    code: record.dt_code.clone(),
                    name: record.dt_name.clone(),
                    energy,
                    meters: Vec::new(),
                });
                *entry.insert((r, f, dts.len() - 1))
            }
        };

        if seen_meters.insert(record.meter_no.as_str()) {
            let energy = asset_energy(
                record.meter_day1_reading,
                record.meter_day2_reading,
                1,
                &record.meter_no,
            )?;
            hierarchy.regions[r].feeders[f].dts[d].meters.push(MeterNode {
                number: record.meter_no.clone(),
                energy,
                daily_energy: daily,
                load_data: load,
            });
        }
    }

    Ok(hierarchy)
}

fn asset_energy(day1: i64, day2: i64, mf: i64, asset: &str) -> Result<i64, EvalError> {
    energy(day1, day2, mf).ok_or_else(|| {
        EvalError::InvalidDataset(format!(
            "energy for {asset} overflows (day1 {day1}, day2 {day2}, mf {mf})"
        ))
    })
}

fn checked_total(mut values: impl Iterator<Item = i64>, what: &str) -> Result<i64, EvalError> {
    values
        .try_fold(0i64, |acc, value| acc.checked_add(value))
        .ok_or_else(|| EvalError::InvalidDataset(format!("total {what} overflows")))
}

fn region_metrics(region: &RegionNode) -> Result<RegionMetrics, EvalError> {
    let feeders = region
        .feeders
        .iter()
        .map(feeder_metrics)
        .collect::<Result<Vec<_>, _>>()?;
    let counts = AssetCounts {
        feeders: feeders.len() as u64,
        dts: region.dts().count() as u64,
        meters: feeders.iter().map(|f| f.counts.meters).sum(),
    };
    let balance = EnergyBalance::new(
        checked_total(feeders.iter().map(|f| f.balance.feeder_energy), "feeder energy")?,
        checked_total(feeders.iter().map(|f| f.balance.dt_energy), "DT energy")?,
        checked_total(feeders.iter().map(|f| f.balance.consumer_energy), "consumer energy")?,
    );

    Ok(RegionMetrics {
        name: region.name.clone(),
        counts,
        loss_band: Band::for_loss(balance.loss_feeder_consumer_pct),
        balance,
        sla: SlaMetrics::from(region.sla),
        feeders,
    })
}

fn feeder_metrics(feeder: &FeederNode) -> Result<FeederMetrics, EvalError> {
    let dts = feeder
        .dts
        .iter()
        .map(dt_metrics)
        .collect::<Result<Vec<_>, _>>()?;
    let counts = AssetCounts {
        feeders: 1,
        dts: dts.len() as u64,
        meters: dts.iter().map(|dt| dt.meters).sum(),
    };
    let balance = EnergyBalance::new(
        feeder.energy,
        checked_total(dts.iter().map(|dt| dt.dt_energy), "DT energy")?,
        checked_total(dts.iter().map(|dt| dt.consumer_energy), "consumer energy")?,
    );

    Ok(FeederMetrics {
        code: feeder.code.clone(),
        name: feeder.name.clone(),
        counts,
        loss_band: Band::for_loss(balance.loss_feeder_consumer_pct),
        balance,
        sla: SlaMetrics::from(meter_sla(feeder.meters())),
        dts,
    })
}

fn dt_metrics(dt: &DtNode) -> Result<DtMetrics, EvalError> {
    let consumer_energy = checked_total(dt.meters.iter().map(|m| m.energy), "consumer energy")?;
    let balance = EnergyBalance::new(0, dt.energy, consumer_energy);

    Ok(DtMetrics {
        code: dt.code.clone(),
        name: dt.name.clone(),
        meters: dt.meters.len() as u64,
        dt_energy: dt.energy,
        consumer_energy,
        loss_dt_consumer_pct: balance.loss_dt_consumer_pct,
        loss_band: Band::for_loss(balance.loss_dt_consumer_pct),
        sla: SlaMetrics::from(meter_sla(dt.meters.iter())),
    })
}

fn meter_sla<'a>(meters: impl Iterator<Item = &'a MeterNode>) -> SlaCounter {
    meters.fold(SlaCounter::default(), |mut counter, meter| {
        counter.record(meter.daily_energy, meter.load_data);
        counter
    })
}
