//! In-memory record store.

use std::collections::BTreeMap;

use tracing::debug;

use autonomo_shared::types::{MonthKey, QuarterKey, WorkspaceId};

use super::error::SourceError;
use super::item::{RecordItem, month_partition, quarter_partition};
use super::RecordSource;
use crate::records::{RecordKey, RecordType};

/// Record store backed by an ordered map, keyed by workspace and record key.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    items: BTreeMap<(WorkspaceId, RecordKey), RecordItem>,
}

impl InMemoryRecordStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `item`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Conflict` if the workspace already holds a record
    /// with the same key.
    pub fn insert(&mut self, item: RecordItem) -> Result<(), SourceError> {
        let key = (item.workspace_id.clone(), item.record_key.clone());
        if self.items.contains_key(&key) {
            return Err(SourceError::Conflict(item.record_key.to_string()));
        }
        debug!(workspace_id = %item.workspace_id, record_key = %item.record_key, "Stored record");
        self.items.insert(key, item);
        Ok(())
    }

    /// Number of stored items across all workspaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn query(
        &self,
        workspace_id: &WorkspaceId,
        matches_partition: impl Fn(&RecordItem) -> bool,
        record_type: Option<RecordType>,
    ) -> Vec<RecordItem> {
        self.items
            .values()
            .filter(|item| &item.workspace_id == workspace_id)
            .filter(|item| matches_partition(item))
            .filter(|item| record_type.is_none_or(|t| item.record_type == t))
            .cloned()
            .collect()
    }
}

impl RecordSource for InMemoryRecordStore {
    fn query_by_month(
        &self,
        workspace_id: &WorkspaceId,
        month: MonthKey,
        record_type: Option<RecordType>,
    ) -> Result<Vec<RecordItem>, SourceError> {
        let partition = month_partition(workspace_id, month);
        Ok(self.query(
            workspace_id,
            |item| item.workspace_month == partition,
            record_type,
        ))
    }

    fn query_by_quarter(
        &self,
        workspace_id: &WorkspaceId,
        quarter: QuarterKey,
        record_type: Option<RecordType>,
    ) -> Result<Vec<RecordItem>, SourceError> {
        let partition = quarter_partition(workspace_id, quarter);
        Ok(self.query(
            workspace_id,
            |item| item.workspace_quarter == partition,
            record_type,
        ))
    }
}
