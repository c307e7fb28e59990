//! Modelo 130 provisional IRPF estimate.

use std::collections::BTreeMap;

use autonomo_shared::types::{Money, MonthKey};

use super::types::{Modelo130Estimate, PeriodMetrics};
use crate::records::StatePaymentType;
use crate::settings::Settings;

impl Modelo130Estimate {
    /// Computes the cumulative estimate for the year of `through`, up to and
    /// including that month.
    ///
    /// Net income and withholding accumulate from [`Settings::first_active_month`].
    /// Modelo 130 payments already recorded in the year are subtracted, and the
    /// result is floored at zero:
    ///
    /// `max(0, irpf_rate * net_income - withholding - prior_payments)`
    ///
    /// Prior payments are bucketed by payment date, not by the quarter they
    /// settle. A January payment for the previous year's Q4 therefore counts
    /// against this year's estimates and lowers Q1.
    #[must_use]
    pub fn compute(
        months: &BTreeMap<MonthKey, PeriodMetrics>,
        settings: &Settings,
        through: MonthKey,
    ) -> Self {
        let first_active = settings.first_active_month();
        let mut accumulated = PeriodMetrics::default();
        let mut prior_payments = Money::ZERO;

        for (month, metrics) in months
            .range(..=through)
            .filter(|(month, _)| month.year() == through.year())
        {
            if first_active.is_some_and(|first| *month >= first) {
                accumulated += *metrics;
            }
            prior_payments += metrics.state_payments.get(StatePaymentType::Modelo130);
        }

        let accumulated_net_income = accumulated.net_income();
        let accumulated_withholding = accumulated.withholding();
        let due = settings.irpf_rate.of(accumulated_net_income)
            - accumulated_withholding
            - prior_payments;

        Self {
            accumulated_net_income,
            accumulated_withholding,
            prior_payments,
            amount: due.max(Money::ZERO),
        }
    }
}
