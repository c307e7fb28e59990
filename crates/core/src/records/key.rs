//! Record keys: `TYPE#YYYY-MM-DD#record_id`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use autonomo_shared::ValidationError;
use autonomo_shared::types::RecordId;

use super::record::RecordType;

const SEPARATOR: char = '#';

/// Identifies a stored record within its workspace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    /// Type tag.
    pub record_type: RecordType,
    /// Event date the record is filed under.
    pub event_date: NaiveDate,
    /// Record id.
    pub record_id: RecordId,
}

impl RecordKey {
    /// Builds a key.
    #[must_use]
    pub const fn new(record_type: RecordType, event_date: NaiveDate, record_id: RecordId) -> Self {
        Self {
            record_type,
            event_date,
            record_id,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.record_type,
            self.event_date.format("%Y-%m-%d"),
            self.record_id
        )
    }
}

impl FromStr for RecordKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidRecordKey(s.to_string());

        let parts: Vec<&str> = s.split(SEPARATOR).collect();
        let [record_type, event_date, record_id] = parts.as_slice() else {
            return Err(invalid());
        };

        let record_type = record_type.parse().map_err(|_| invalid())?;
        let event_date = NaiveDate::parse_from_str(event_date, "%Y-%m-%d").map_err(|_| invalid())?;
        let record_id = RecordId::parse(*record_id).map_err(|_| invalid())?;

        Ok(Self::new(record_type, event_date, record_id))
    }
}
