//! Mandatory-field and range checks run before any derivation.
//!
//! Every problem is collected; a later check never clears an earlier one.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::config::CalculatorConfig;
use crate::models::{CommuteInput, IncomeInput};

const MAX_DAILY_WORK_HOURS: u8 = 24;
const MAX_DAYS_PER_WEEK: u8 = 7;
const MAX_COMMUTE_HOURS: u8 = 23;
const MAX_COMMUTE_MINUTES: u8 = 59;

/// Identifies one field of an [`IncomeInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Currency,
    MonthlyIncome,
    DailyWorkHours,
    WorkingDaysPerWeek,
    MonthlyRent,
    OfficeDaysPerWeek,
    DailyCommuteExpense,
    CommuteHours,
    CommuteMinutes,
    MonthlyEmi,
    MonthlySavings,
    ProductName,
    ProductCost,
}

impl InputField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Currency => "Currency",
            Self::MonthlyIncome => "Monthly Salary",
            Self::DailyWorkHours => "Working Hours Per Day",
            Self::WorkingDaysPerWeek => "Working Days Per Week",
            Self::MonthlyRent => "Monthly Rent Amount",
            Self::OfficeDaysPerWeek => "Office Days Per Week",
            Self::DailyCommuteExpense => "Daily Commute Expense",
            Self::CommuteHours => "Commute Hours",
            Self::CommuteMinutes => "Commute Minutes",
            Self::MonthlyEmi => "Monthly EMI",
            Self::MonthlySavings => "Desired Monthly Saving",
            Self::ProductName => "Product Name",
            Self::ProductCost => "Product Cost",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    /// Absent, blank, or zero where a value is mandatory.
    Missing,
    Negative,
    OutOfRange { min: Decimal, max: Decimal },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: InputField,
    pub problem: FieldProblem,
}

impl fmt::Display for FieldIssue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.problem {
            FieldProblem::Missing => write!(f, "{} is required", self.field),
            FieldProblem::Negative => write!(f, "{} must not be negative", self.field),
            FieldProblem::OutOfRange { min, max } => {
                write!(f, "{} must be between {} and {}", self.field, min, max)
            }
        }
    }
}

/// One or more user-correctable input problems.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("invalid input: {}", join_issues(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn single(
        field: InputField,
        problem: FieldProblem,
    ) -> Self {
        Self {
            issues: vec![FieldIssue { field, problem }],
        }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Fields with a [`FieldProblem::Missing`] issue, in check order.
    pub fn missing_fields(&self) -> Vec<InputField> {
        self.issues
            .iter()
            .filter(|i| i.problem == FieldProblem::Missing)
            .map(|i| i.field)
            .collect()
    }

    pub fn contains(
        &self,
        field: InputField,
    ) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

#[derive(Default)]
struct Validator {
    issues: Vec<FieldIssue>,
}

impl Validator {
    fn push(
        &mut self,
        field: InputField,
        problem: FieldProblem,
    ) {
        self.issues.push(FieldIssue { field, problem });
    }

    /// Mandatory amount: must be present and strictly positive.
    fn required_amount(
        &mut self,
        field: InputField,
        value: Decimal,
    ) {
        if value < Decimal::ZERO {
            self.push(field, FieldProblem::Negative);
        } else if value.is_zero() {
            self.push(field, FieldProblem::Missing);
        }
    }

    fn optional_amount(
        &mut self,
        field: InputField,
        value: Decimal,
    ) {
        if value < Decimal::ZERO {
            self.push(field, FieldProblem::Negative);
        }
    }

    /// Mandatory count in `1..=max`.
    fn required_count(
        &mut self,
        field: InputField,
        value: u8,
        max: u8,
    ) {
        if value == 0 {
            self.push(field, FieldProblem::Missing);
        } else {
            self.in_range(field, value, 1, max);
        }
    }

    /// Count in `min..=max`.
    fn in_range(
        &mut self,
        field: InputField,
        value: u8,
        min: u8,
        max: u8,
    ) {
        if !(min..=max).contains(&value) {
            self.push(
                field,
                FieldProblem::OutOfRange {
                    min: Decimal::from(min),
                    max: Decimal::from(max),
                },
            );
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                issues: self.issues,
            })
        }
    }
}

/// Checks every mandatory field of `input` under the given policies.
///
/// # Errors
///
/// Returns a [`ValidationError`] listing every problem found.
pub fn validate(
    input: &IncomeInput,
    config: &CalculatorConfig,
) -> Result<(), ValidationError> {
    let mut v = Validator::default();
    let salary = &input.salary;

    if salary.currency.is_none() {
        v.push(InputField::Currency, FieldProblem::Missing);
    }
    v.required_amount(InputField::MonthlyIncome, salary.monthly_income);

    v.required_amount(InputField::DailyWorkHours, salary.daily_work_hours);
    if salary.daily_work_hours > Decimal::from(MAX_DAILY_WORK_HOURS) {
        v.push(
            InputField::DailyWorkHours,
            FieldProblem::OutOfRange {
                min: Decimal::ZERO,
                max: Decimal::from(MAX_DAILY_WORK_HOURS),
            },
        );
    }

    match salary.working_days_per_week {
        Some(days) if config.working_days.requires_weekly_days() => {
            v.required_count(InputField::WorkingDaysPerWeek, days, MAX_DAYS_PER_WEEK)
        }
        Some(days) => v.in_range(InputField::WorkingDaysPerWeek, days, 1, MAX_DAYS_PER_WEEK),
        None if config.working_days.requires_weekly_days() => {
            v.push(InputField::WorkingDaysPerWeek, FieldProblem::Missing)
        }
        None => {}
    }

    if input.housing.owned {
        v.optional_amount(InputField::MonthlyRent, input.housing.monthly_rent);
    } else {
        v.required_amount(InputField::MonthlyRent, input.housing.monthly_rent);
    }

    if let CommuteInput::WorkFromOffice(office) = &input.commute {
        v.required_count(
            InputField::OfficeDaysPerWeek,
            office.days_per_week,
            MAX_DAYS_PER_WEEK,
        );
        v.required_amount(InputField::DailyCommuteExpense, office.daily_expense);
        v.in_range(
            InputField::CommuteHours,
            office.commute_time.hours,
            0,
            MAX_COMMUTE_HOURS,
        );
        v.in_range(
            InputField::CommuteMinutes,
            office.commute_time.minutes,
            0,
            MAX_COMMUTE_MINUTES,
        );
    }

    v.optional_amount(InputField::MonthlyEmi, input.obligations.monthly_emi);
    v.optional_amount(InputField::MonthlySavings, input.obligations.monthly_savings);

    if input.product.name.trim().is_empty() {
        v.push(InputField::ProductName, FieldProblem::Missing);
    }
    v.required_amount(InputField::ProductCost, input.product.cost);

    v.finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::WorkingDaysPolicy;
    use crate::models::{
        CommuteTime, CurrencyCode, HousingInput, ObligationsInput, OfficeCommute, ProductGoal,
        SalaryInput,
    };

    fn valid_input() -> IncomeInput {
        IncomeInput {
            salary: SalaryInput {
                monthly_income: dec!(50000),
                daily_work_hours: dec!(8),
                working_days_per_week: Some(5),
                currency: Some(CurrencyCode::parse("INR").unwrap()),
            },
            housing: HousingInput::owned(),
            commute: CommuteInput::WorkFromHome,
            obligations: ObligationsInput::default(),
            product: ProductGoal::new("Laptop", dec!(20000)),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert_eq!(validate(&valid_input(), &CalculatorConfig::default()), Ok(()));
    }

    #[test]
    fn zeroed_input_lists_every_missing_field() {
        let input = IncomeInput {
            salary: SalaryInput {
                monthly_income: dec!(0),
                daily_work_hours: dec!(0),
                working_days_per_week: None,
                currency: None,
            },
            housing: HousingInput::rented(dec!(0)),
            commute: CommuteInput::WorkFromOffice(OfficeCommute {
                days_per_week: 0,
                daily_expense: dec!(0),
                commute_time: CommuteTime::default(),
            }),
            obligations: ObligationsInput::default(),
            product: ProductGoal::new("   ", dec!(0)),
        };

        let err = validate(&input, &CalculatorConfig::default()).unwrap_err();

        assert_eq!(
            err.missing_fields(),
            vec![
                InputField::Currency,
                InputField::MonthlyIncome,
                InputField::DailyWorkHours,
                InputField::WorkingDaysPerWeek,
                InputField::MonthlyRent,
                InputField::OfficeDaysPerWeek,
                InputField::DailyCommuteExpense,
                InputField::ProductName,
                InputField::ProductCost,
            ]
        );
    }

    #[test]
    fn zero_emi_does_not_clear_earlier_failures() {
        let mut input = valid_input();
        input.salary.monthly_income = dec!(0);
        input.obligations.monthly_emi = dec!(0);

        let err = validate(&input, &CalculatorConfig::default()).unwrap_err();

        assert_eq!(err.missing_fields(), vec![InputField::MonthlyIncome]);
    }

    #[test]
    fn owned_home_does_not_need_rent() {
        let mut input = valid_input();
        input.housing = HousingInput {
            owned: true,
            monthly_rent: dec!(0),
        };

        assert!(validate(&input, &CalculatorConfig::default()).is_ok());
    }

    #[test]
    fn flat_policy_makes_weekly_days_optional() {
        let mut input = valid_input();
        input.salary.working_days_per_week = None;
        let config = CalculatorConfig {
            working_days: WorkingDaysPolicy::Flat(30),
            ..Default::default()
        };

        assert!(validate(&input, &config).is_ok());
        assert!(validate(&input, &CalculatorConfig::default()).is_err());
    }

    #[test]
    fn out_of_range_values_are_reported() {
        let mut input = valid_input();
        input.salary.daily_work_hours = dec!(25);
        input.salary.working_days_per_week = Some(8);
        input.commute = CommuteInput::WorkFromOffice(OfficeCommute {
            days_per_week: 9,
            daily_expense: dec!(100),
            commute_time: CommuteTime::new(1, 75),
        });

        let err = validate(&input, &CalculatorConfig::default()).unwrap_err();

        assert_eq!(
            err.issues(),
            &[
                FieldIssue {
                    field: InputField::DailyWorkHours,
                    problem: FieldProblem::OutOfRange {
                        min: dec!(0),
                        max: dec!(24),
                    },
                },
                FieldIssue {
                    field: InputField::WorkingDaysPerWeek,
                    problem: FieldProblem::OutOfRange {
                        min: dec!(1),
                        max: dec!(7),
                    },
                },
                FieldIssue {
                    field: InputField::OfficeDaysPerWeek,
                    problem: FieldProblem::OutOfRange {
                        min: dec!(1),
                        max: dec!(7),
                    },
                },
                FieldIssue {
                    field: InputField::CommuteMinutes,
                    problem: FieldProblem::OutOfRange {
                        min: dec!(0),
                        max: dec!(59),
                    },
                },
            ]
        );
    }

    #[test]
    fn fractional_hours_below_one_are_accepted() {
        let mut input = valid_input();
        input.salary.daily_work_hours = dec!(0.5);

        assert_eq!(validate(&input, &CalculatorConfig::default()), Ok(()));
    }

    #[test]
    fn too_many_hours_reports_the_accepted_range() {
        let mut input = valid_input();
        input.salary.daily_work_hours = dec!(24.5);

        let err = validate(&input, &CalculatorConfig::default()).unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid input: Working Hours Per Day must be between 0 and 24"
        );
    }

    #[test]
    fn zero_weekly_days_are_out_of_range_under_flat_policy() {
        let mut input = valid_input();
        input.salary.working_days_per_week = Some(0);
        let config = CalculatorConfig {
            working_days: WorkingDaysPolicy::Flat(30),
            ..Default::default()
        };

        let err = validate(&input, &config).unwrap_err();

        assert_eq!(
            err.issues(),
            &[FieldIssue {
                field: InputField::WorkingDaysPerWeek,
                problem: FieldProblem::OutOfRange {
                    min: dec!(1),
                    max: dec!(7),
                },
            }]
        );
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut input = valid_input();
        input.obligations.monthly_savings = dec!(-1);
        input.product.cost = dec!(-5);

        let err = validate(&input, &CalculatorConfig::default()).unwrap_err();

        assert!(err.contains(InputField::MonthlySavings));
        assert!(err.contains(InputField::ProductCost));
        assert!(err.missing_fields().is_empty());
    }

    #[test]
    fn error_message_names_each_field() {
        let err = ValidationError {
            issues: vec![
                FieldIssue {
                    field: InputField::MonthlyIncome,
                    problem: FieldProblem::Missing,
                },
                FieldIssue {
                    field: InputField::MonthlyEmi,
                    problem: FieldProblem::Negative,
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "invalid input: Monthly Salary is required; Monthly EMI must not be negative"
        );
    }
}
