use serde::{Deserialize, Serialize};

use super::{CommuteInput, HousingInput, ObligationsInput, ProductGoal, SalaryInput};

/// Immutable snapshot of everything a single evaluation consumes.
///
/// Housing defaults to an owned home, commute to working from home and
/// obligations to zero, so a minimal TOML input only needs `[salary]` and
/// `[product]`:
///
/// ```
/// use rust_decimal_macros::dec;
/// use wtb_core::IncomeInput;
///
/// let input: IncomeInput = toml::from_str(
///     r#"
///     [salary]
///     monthly_income = 50000
///     daily_work_hours = 8
///     working_days_per_week = 5
///     currency = "INR"
///
///     [product]
///     name = "Laptop"
///     cost = 20000
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(input.salary.monthly_income, dec!(50000));
/// assert!(input.housing.owned);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeInput {
    pub salary: SalaryInput,
    #[serde(default)]
    pub housing: HousingInput,
    #[serde(default)]
    pub commute: CommuteInput,
    #[serde(default)]
    pub obligations: ObligationsInput,
    pub product: ProductGoal,
}
