use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Gross monthly income in the selected currency.
    pub monthly_income: Decimal,

    /// Contracted working hours per day, fractional values allowed.
    pub daily_work_hours: Decimal,

    /// Only required when working days per month are derived from it.
    #[serde(default)]
    pub working_days_per_week: Option<u8>,

    /// Currency every monetary input is expressed in.
    #[serde(default)]
    pub currency: Option<CurrencyCode>,
}
