//! Calculator policies.
//!
//! Two quantities have no single right answer and are chosen explicitly:
//! how many working days a month has, and how long a "day" is when the
//! hours needed to afford a product are expressed in days.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::WEEKS_PER_MONTH;

const MAX_FLAT_WORKING_DAYS: u8 = 31;
const HOURS_PER_DAY: u8 = 24;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalculatorConfigError {
    #[error(
        "flat working days per month must be between 1 and {max}, got {0}",
        max = MAX_FLAT_WORKING_DAYS
    )]
    InvalidFlatWorkingDays(u8),
}

/// How working days per month are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingDaysPolicy {
    /// Working days per week times four weeks.
    #[default]
    WeeklyTimesFour,
    /// A fixed number of days regardless of the weekly schedule (e.g. 30).
    Flat(u8),
}

impl WorkingDaysPolicy {
    /// Whether the salary input must carry working days per week.
    pub fn requires_weekly_days(&self) -> bool {
        matches!(self, Self::WeeklyTimesFour)
    }

    pub fn days_per_month(
        &self,
        working_days_per_week: Option<u8>,
    ) -> Decimal {
        match self {
            Self::WeeklyTimesFour => {
                Decimal::from(working_days_per_week.unwrap_or(0)) * Decimal::from(WEEKS_PER_MONTH)
            }
            Self::Flat(days) => Decimal::from(*days),
        }
    }
}

/// What one "day" means when converting hours to afford into days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayLengthPolicy {
    /// A straight-through 24 hour day.
    #[default]
    Calendar,
    /// One working day: work hours plus commute.
    WorkingDay,
}

impl DayLengthPolicy {
    pub fn hours(
        &self,
        effective_work_hours: Decimal,
    ) -> Decimal {
        match self {
            Self::Calendar => Decimal::from(HOURS_PER_DAY),
            Self::WorkingDay => effective_work_hours,
        }
    }
}

/// Policy choices for an [`IncomeCalculator`](super::IncomeCalculator).
///
/// Deserializes from a TOML table where both keys are optional:
///
/// ```
/// use wtb_core::calculations::{CalculatorConfig, DayLengthPolicy, WorkingDaysPolicy};
///
/// let config: CalculatorConfig = toml::from_str(
///     r#"
///     working_days = { flat = 30 }
///     day_length = "working_day"
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.working_days, WorkingDaysPolicy::Flat(30));
/// assert_eq!(config.day_length, DayLengthPolicy::WorkingDay);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    pub working_days: WorkingDaysPolicy,
    pub day_length: DayLengthPolicy,
}

impl CalculatorConfig {
    /// Validates the policy values.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorConfigError::InvalidFlatWorkingDays`] if a flat
    /// working-day count is zero or larger than a month.
    pub fn validate(&self) -> Result<(), CalculatorConfigError> {
        if let WorkingDaysPolicy::Flat(days) = self.working_days {
            if days == 0 || days > MAX_FLAT_WORKING_DAYS {
                return Err(CalculatorConfigError::InvalidFlatWorkingDays(days));
            }
        }
        Ok(())
    }
}
