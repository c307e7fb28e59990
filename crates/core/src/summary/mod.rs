//! Month and quarter summaries.
//!
//! Records are bucketed by the month and quarter of their event date. Each
//! bucket keeps running sums; tax and cash figures are derived when the
//! summaries are emitted for a year.

pub mod engine;
pub mod error;
pub mod modelo130;
pub mod service;
pub mod types;


pub use engine::AggregationEngine;
pub use error::SummaryError;
pub use service::SummariesService;
pub use types::{
    Modelo130Estimate, MonthSummariesResponse, MonthSummary, PeriodMetrics, PeriodSummary,
    QuarterSummariesResponse, QuarterSummary, StatePaymentTotals,
};
