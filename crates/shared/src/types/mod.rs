//! Common value types used across the application.

pub mod id;
pub mod money;
pub mod period;
pub mod rate;

pub use id::*;
pub use money::Money;
pub use period::{MonthKey, PeriodKey, PeriodKind, QuarterKey};
pub use rate::{Percentage, Rate};
