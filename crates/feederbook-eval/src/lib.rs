//! Energy-balance evaluation for feeder datasets.
//!
//! Rebuilds the asset tree from flat rows and reports losses between feeder,
//! DT, and consumer energy along with daily-energy and load-data SLA ratios.

pub mod engine;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod report;

pub use engine::{build_hierarchy, evaluate_records, evaluate_workbook};
pub use errors::EvalError;
pub use metrics::{
    AssetCounts, Band, DtMetrics, EnergyBalance, FeederMetrics, METRICS_VERSION, MetricsReport,
    RegionMetrics, SlaMetrics,
};
pub use report::render_report;
