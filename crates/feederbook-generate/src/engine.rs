use std::time::Instant;

use tracing::{debug, info};

use feederbook_core::codes::{dt_code, dt_name, feeder_code, feeder_name, meter_number};
use feederbook_core::tables::{MULTIPLYING_FACTOR, dt_readings, feeder_readings, meter_readings};
use feederbook_core::{
    Error as CoreError, Flag, HierarchyLayout, MeterReadingRecord, validate_layout,
    validate_records,
};

use crate::errors::GenerationError;
use crate::model::{GenerateOptions, GenerationReport};
use crate::output::xlsx::write_workbook;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub records: Vec<MeterReadingRecord>,
    pub report: GenerationReport,
}

/// Entry point for generating the sample workbook.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
    layout: HierarchyLayout,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            layout: HierarchyLayout::STANDARD,
        }
    }

    /// Replace the hierarchy layout. The layout is still checked against the
    /// lookup tables when the engine runs.
    pub fn with_layout(mut self, layout: HierarchyLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Generate every record and write them to the configured workbook.
    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        info!(
            rows = self.layout.total_rows(),
            path = %self.options.output_path.display(),
            "generation started"
        );

        let records = generate_records(&self.layout)?;
        validate_records(&records)?;

        let rows_written = write_workbook(
            &self.options.output_path,
            &self.options.sheet_name,
            &records,
        )?;

        let report = GenerationReport {
            output_path: self.options.output_path.clone(),
            regions: self.layout.regions.len() as u32,
            feeders: self.layout.total_feeders(),
            dts: self.layout.total_dts(),
            rows_written,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            rows_written = report.rows_written,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GenerationResult { records, report })
    }
}

/// Build the dataset for a layout, in region → feeder → DT → meter order.
///
/// Feeder codes come from a counter that keeps running across regions, so the
/// first feeder of the second region is `F003` in the standard layout.
pub fn generate_records(layout: &HierarchyLayout) -> Result<Vec<MeterReadingRecord>, CoreError> {
    validate_layout(layout)?;

    let mut records = Vec::with_capacity(layout.total_rows() as usize);
    let mut feeder_index = 0_u32;

    for region in layout.regions {
        for _ in 0..layout.feeders_per_region {
            feeder_index += 1;
            let feeder_code = feeder_code(feeder_index);
            let feeder = feeder_readings(&feeder_code).ok_or_else(|| {
                CoreError::MissingLookup(format!("feeder readings for {feeder_code}"))
            })?;
            debug!(region = %region, feeder = %feeder_code, "generating feeder");

            for dt_position in 1..=layout.dts_per_feeder {
                let dt_code = dt_code(&feeder_code, dt_position);
                let dt = dt_readings(dt_position).ok_or_else(|| {
                    CoreError::MissingLookup(format!("DT pattern for position {dt_position}"))
                })?;

                for meter_position in 1..=layout.meters_per_dt {
                    let meter = meter_readings(meter_position).ok_or_else(|| {
                        CoreError::MissingLookup(format!(
                            "meter advance for position {meter_position}"
                        ))
                    })?;
                    let daily_energy = Flag::from(meter_position % 2 == 1);

                    records.push(MeterReadingRecord {
                        region_name: region.to_string(),
                        feeder_name: feeder_name(&feeder_code),
                        feeder_code: feeder_code.clone(),
                        feeder_day2_reading: feeder.day2,
                        feeder_day1_reading: feeder.day1,
                        feeder_mf: MULTIPLYING_FACTOR,
                        dt_name: dt_name(&dt_code),
                        dt_code: dt_code.clone(),
                        dt_day2_reading: dt.day2,
                        dt_day1_reading: dt.day1,
                        dt_mf: MULTIPLYING_FACTOR,
                        meter_no: meter_number(&dt_code, meter_position),
                        meter_day1_reading: meter.day1,
                        meter_day2_reading: meter.day2,
                        daily_energy,
                        load_data: daily_energy.inverse(),
                    });
                }
            }
        }
    }

    Ok(records)
}
