//! Monthly budget plans.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use autonomo_shared::ValidationError;
use autonomo_shared::types::{Money, MonthKey};

use super::record::Dated;

/// Input for creating a budget entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBudgetEntry {
    /// Month the plan applies to.
    pub month_key: MonthKey,
    /// Planned spending.
    pub planned_spend: Money,
    /// Earnings recorded against the plan.
    pub earned: Money,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-text goal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_goal: Option<String>,
}

/// A budget plan for one month. Stored alongside the other records but never
/// part of tax summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewBudgetEntry", into = "NewBudgetEntry")]
pub struct BudgetEntry {
    month_key: MonthKey,
    planned_spend: Money,
    earned: Money,
    description: Option<String>,
    budget_goal: Option<String>,
}

impl BudgetEntry {
    /// Creates a budget entry.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NegativeAmount` if the planned spend is negative.
    pub fn new(input: NewBudgetEntry) -> Result<Self, ValidationError> {
        Ok(Self {
            month_key: input.month_key,
            planned_spend: Money::non_negative(
                input.planned_spend.amount(),
                "BudgetEntry.planned_spend",
            )?,
            earned: input.earned,
            description: input.description,
            budget_goal: input.budget_goal,
        })
    }

    /// Planned spending.
    #[must_use]
    pub const fn planned_spend(&self) -> Money {
        self.planned_spend
    }

    /// Earnings recorded against the plan.
    #[must_use]
    pub const fn earned(&self) -> Money {
        self.earned
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Free-text goal.
    #[must_use]
    pub fn budget_goal(&self) -> Option<&str> {
        self.budget_goal.as_deref()
    }
}

impl Dated for BudgetEntry {
    fn event_date(&self) -> NaiveDate {
        self.month_key.first_day()
    }

    fn month_key(&self) -> MonthKey {
        self.month_key
    }
}

impl TryFrom<NewBudgetEntry> for BudgetEntry {
    type Error = ValidationError;

    fn try_from(input: NewBudgetEntry) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

impl From<BudgetEntry> for NewBudgetEntry {
    fn from(entry: BudgetEntry) -> Self {
        Self {
            month_key: entry.month_key,
            planned_spend: entry.planned_spend,
            earned: entry.earned,
            description: entry.description,
            budget_goal: entry.budget_goal,
        }
    }
}
