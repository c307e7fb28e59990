//! Stored record items and their partition keys.

use chrono::{DateTime, NaiveDate, Utc};

use autonomo_shared::types::{MonthKey, QuarterKey, RecordId, WorkspaceId};

use crate::records::{Dated, Record, RecordKey, RecordType};

/// Partition holding a workspace's records for one month: `WS#<id>#M#YYYY-MM`.
#[must_use]
pub fn month_partition(workspace_id: &WorkspaceId, month: MonthKey) -> String {
    format!("WS#{workspace_id}#M#{month}")
}

/// Partition holding a workspace's records for one quarter: `WS#<id>#Q#YYYY-QN`.
#[must_use]
pub fn quarter_partition(workspace_id: &WorkspaceId, quarter: QuarterKey) -> String {
    format!("WS#{workspace_id}#Q#{quarter}")
}

/// A record as stored for a workspace, with its derived keys and audit fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordItem {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// `TYPE#date#id`, unique within the workspace.
    pub record_key: RecordKey,
    /// Record id.
    pub record_id: RecordId,
    /// Record type tag.
    pub record_type: RecordType,
    /// Event date the record is filed under.
    pub event_date: NaiveDate,
    /// The record payload.
    pub record: Record,
    /// Month partition key.
    pub workspace_month: String,
    /// Quarter partition key.
    pub workspace_quarter: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Creator.
    pub created_by: String,
    /// Last updater.
    pub updated_by: String,
}

impl RecordItem {
    /// Wraps `record` for storage in `workspace_id`.
    ///
    /// A fresh time-ordered id is generated when `record_id` is `None`.
    #[must_use]
    pub fn new(
        workspace_id: WorkspaceId,
        record: Record,
        record_id: Option<RecordId>,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let record_id = record_id.unwrap_or_else(RecordId::generate);
        let record_type = record.record_type();
        let event_date = record.event_date();

        Self {
            workspace_month: month_partition(&workspace_id, record.month_key()),
            workspace_quarter: quarter_partition(&workspace_id, record.quarter_key()),
            record_key: RecordKey::new(record_type, event_date, record_id.clone()),
            workspace_id,
            record_id,
            record_type,
            event_date,
            record,
            created_at: now,
            updated_at: now,
            created_by: actor.to_string(),
            updated_by: actor.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autonomo_shared::types::Money;
    use rust_decimal_macros::dec;

    use crate::records::{NewTransfer, Transfer, TransferOp};

    fn transfer() -> Record {
        Record::Transfer(
            Transfer::new(NewTransfer {
                date: NaiveDate::from_ymd_opt(2024, 11, 5).unwrap(),
                operation: TransferOp::Inflow,
                amount: Money::new(dec!(10)),
                note: None,
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_partition_keys() {
        let ws = WorkspaceId::parse("ws-1").unwrap();
        assert_eq!(
            month_partition(&ws, MonthKey::of(2024, 3).unwrap()),
            "WS#ws-1#M#2024-03"
        );
        assert_eq!(
            quarter_partition(&ws, QuarterKey::of(2024, 1).unwrap()),
            "WS#ws-1#Q#2024-Q1"
        );
    }

    #[test]
    fn test_new_item_derives_keys() {
        let ws = WorkspaceId::parse("ws-1").unwrap();
        let now = Utc::now();
        let item = RecordItem::new(
            ws,
            transfer(),
            Some(RecordId::parse("t-1").unwrap()),
            "tester",
            now,
        );

        assert_eq!(item.record_key.to_string(), "TRANSFER#2024-11-05#t-1");
        assert_eq!(item.workspace_month, "WS#ws-1#M#2024-11");
        assert_eq!(item.workspace_quarter, "WS#ws-1#Q#2024-Q4");
        assert_eq!(item.created_at, item.updated_at);
        assert_eq!(item.created_by, "tester");
    }

    #[test]
    fn test_new_item_generates_id() {
        let ws = WorkspaceId::parse("ws-1").unwrap();
        let item = RecordItem::new(ws, transfer(), None, "tester", Utc::now());
        assert!(!item.record_id.as_str().is_empty());
        assert_eq!(item.record_key.record_id, item.record_id);
    }
}
