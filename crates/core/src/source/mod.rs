//! Where records come from.
//!
//! Summaries read records one period partition at a time through the
//! [`RecordSource`] port. [`InMemoryRecordStore`] is the bundled adapter.

pub mod error;
pub mod item;
pub mod memory;

pub use error::SourceError;
pub use item::{RecordItem, month_partition, quarter_partition};
pub use memory::InMemoryRecordStore;

use autonomo_shared::types::{MonthKey, QuarterKey, WorkspaceId};

use crate::records::RecordType;

/// Read access to a workspace's stored records by period partition.
pub trait RecordSource {
    /// Records filed under `month`, optionally restricted to one type.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the backing store cannot be read.
    fn query_by_month(
        &self,
        workspace_id: &WorkspaceId,
        month: MonthKey,
        record_type: Option<RecordType>,
    ) -> Result<Vec<RecordItem>, SourceError>;

    /// Records filed under `quarter`, optionally restricted to one type.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the backing store cannot be read.
    fn query_by_quarter(
        &self,
        workspace_id: &WorkspaceId,
        quarter: QuarterKey,
        record_type: Option<RecordType>,
    ) -> Result<Vec<RecordItem>, SourceError>;
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    fn query_by_month(
        &self,
        workspace_id: &WorkspaceId,
        month: MonthKey,
        record_type: Option<RecordType>,
    ) -> Result<Vec<RecordItem>, SourceError> {
        (**self).query_by_month(workspace_id, month, record_type)
    }

    fn query_by_quarter(
        &self,
        workspace_id: &WorkspaceId,
        quarter: QuarterKey,
        record_type: Option<RecordType>,
    ) -> Result<Vec<RecordItem>, SourceError> {
        (**self).query_by_quarter(workspace_id, quarter, record_type)
    }
}
