//! Summaries service.

use tracing::{info, warn};

use autonomo_shared::types::{MonthKey, QuarterKey, WorkspaceId};

use super::engine::AggregationEngine;
use super::error::SummaryError;
use super::types::{MonthSummariesResponse, QuarterSummariesResponse};
use crate::records::Record;
use crate::settings::Settings;
use crate::source::{RecordItem, RecordSource};

/// Computes a workspace year's summaries from a [`RecordSource`].
///
/// Each call builds a fresh [`AggregationEngine`], so repeated calls never
/// see each other's records.
#[derive(Debug, Clone)]
pub struct SummariesService<S> {
    source: S,
}

impl<S: RecordSource> SummariesService<S> {
    /// Creates a service reading from `source`.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Twelve month summaries for `settings.year`.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Source` if any month partition cannot be read.
    pub fn month_summaries(
        &self,
        workspace_id: &WorkspaceId,
        settings: &Settings,
    ) -> Result<MonthSummariesResponse, SummaryError> {
        let mut engine = AggregationEngine::new();
        for month in MonthKey::months_of(settings.year) {
            let items = self.source.query_by_month(workspace_id, month, None)?;
            Self::register_items(&mut engine, &items, settings);
        }

        info!(%workspace_id, year = settings.year, "Computed month summaries");
        Ok(MonthSummariesResponse {
            settings: settings.clone(),
            items: engine.month_summaries(settings),
        })
    }

    /// Four quarter summaries for `settings.year`.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Source` if any quarter partition cannot be read.
    pub fn quarter_summaries(
        &self,
        workspace_id: &WorkspaceId,
        settings: &Settings,
    ) -> Result<QuarterSummariesResponse, SummaryError> {
        let mut engine = AggregationEngine::new();
        for quarter in QuarterKey::quarters_of(settings.year) {
            let items = self.source.query_by_quarter(workspace_id, quarter, None)?;
            Self::register_items(&mut engine, &items, settings);
        }

        info!(%workspace_id, year = settings.year, "Computed quarter summaries");
        Ok(QuarterSummariesResponse {
            settings: settings.clone(),
            items: engine.quarter_summaries(settings),
        })
    }

    fn register_items(engine: &mut AggregationEngine, items: &[RecordItem], settings: &Settings) {
        for item in items {
            if let Record::Expense(expense) = &item.record
                && !settings.accepts_category(expense.category())
            {
                warn!(
                    record_key = %item.record_key,
                    category = expense.category(),
                    "Expense category is not configured"
                );
            }
            engine.register(&item.record);
        }
    }
}
