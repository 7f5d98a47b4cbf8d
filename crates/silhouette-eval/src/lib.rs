//! Run statistics, stats chart and markdown reporting.

pub mod chart;
pub mod errors;
pub mod report;
pub mod stats;

pub use chart::{ChartOutput, ChartingDisabled, DoughnutChart, StatsDisplay, display_stats};
pub use errors::DisplayError;
pub use report::{PREVIEW_LIMIT, render_report, status_line, variation_preview};
pub use stats::{RunStats, STATS_VERSION, StatsSummary, summarize, summarize_with_budget};
