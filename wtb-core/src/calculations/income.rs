//! Income calculator: turns a salary, living costs and commute into an hourly
//! income and prices a product in working time.
//!
//! # Derivation
//!
//! All monetary inputs are first converted from the selected currency into the
//! rate table's base currency, then:
//!
//! | Step | Quantity | Formula |
//! |------|----------|---------|
//! | 1    | Working days per month | policy: days/week × 4, or a flat count |
//! | 2    | Monthly office expense | office days/week × 4 × daily commute expense |
//! | 3    | Total deductions | rent + EMI + savings + office expense |
//! | 4    | Net monthly income | monthly income − total deductions |
//! | 5    | Daily income | net monthly income ÷ working days per month |
//! | 6    | Effective work hours | daily work hours + daily commute hours |
//! | 7    | Hourly income | daily income ÷ effective work hours (0 if no hours) |
//! | 8    | Product cost in base | product cost × rate of selected currency |
//! | 9    | Hours to afford | product cost in base ÷ hourly income (0 if no income) |
//! | 10   | Days to afford | hours to afford ÷ day length (policy: 24 or effective hours) |
//! | 11   | Monthly commute hours | office days/week × 4 × daily commute hours |
//!
//! A net monthly income of zero or less stops the derivation at step 4 and
//! yields [`Evaluation::NonViable`].
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use wtb_core::calculations::{CalculatorConfig, Evaluation, IncomeCalculator};
//! use wtb_core::{
//!     CommuteInput, CurrencyCode, CurrencyRate, CurrencyRateTable, HousingInput, IncomeInput,
//!     ObligationsInput, ProductGoal, SalaryInput,
//! };
//!
//! let inr = CurrencyCode::parse("INR").unwrap();
//! let rupee = CurrencyRate::new(inr.clone(), Some("₹"), dec!(1));
//! let rates = CurrencyRateTable::new(inr.clone(), vec![rupee]).unwrap();
//!
//! let input = IncomeInput {
//!     salary: SalaryInput {
//!         monthly_income: dec!(50000),
//!         daily_work_hours: dec!(8),
//!         working_days_per_week: Some(5),
//!         currency: Some(inr),
//!     },
//!     housing: HousingInput::owned(),
//!     commute: CommuteInput::WorkFromHome,
//!     obligations: ObligationsInput::default(),
//!     product: ProductGoal::new("Phone", dec!(20000)),
//! };
//!
//! let calculator = IncomeCalculator::new(&rates, CalculatorConfig::default());
//! let Evaluation::Summary(summary) = calculator.evaluate(&input).unwrap() else {
//!     panic!("income should be viable");
//! };
//!
//! assert_eq!(summary.hourly_income, dec!(312.50));
//! assert_eq!(summary.hours_to_afford, dec!(64.00));
//! assert_eq!(summary.days_to_afford, dec!(2.67));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use super::common::{
    OverflowError, WEEKS_PER_MONTH, checked_add, checked_div, checked_mul, round_half_up,
};
use super::config::{CalculatorConfig, CalculatorConfigError};
use super::summary::{Evaluation, ExpenseBreakdown, IncomeSummary, NonViableIncome};
use super::validation::{FieldProblem, InputField, ValidationError, validate};
use crate::models::{CommuteInput, CurrencyRateTable, IncomeInput, UnknownCurrencyError};

/// Errors that stop an evaluation before a summary is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IncomeCalculatorError {
    /// One or more input fields are missing or invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The selected currency is not in the rate table.
    #[error(transparent)]
    UnknownCurrency(#[from] UnknownCurrencyError),

    /// The calculator policies are invalid.
    #[error(transparent)]
    Config(#[from] CalculatorConfigError),

    /// The inputs are valid but a derived figure exceeds the `Decimal` range.
    #[error(transparent)]
    Overflow(#[from] OverflowError),
}

/// Calculator for a single income evaluation.
///
/// Borrows the rate table; each call to [`evaluate`](Self::evaluate) is an
/// independent, side-effect free computation.
#[derive(Debug, Clone)]
pub struct IncomeCalculator<'a> {
    rates: &'a CurrencyRateTable,
    config: CalculatorConfig,
}

impl<'a> IncomeCalculator<'a> {
    pub fn new(
        rates: &'a CurrencyRateTable,
        config: CalculatorConfig,
    ) -> Self {
        Self { rates, config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Validates `input` and derives the income summary.
    ///
    /// # Errors
    ///
    /// Returns [`IncomeCalculatorError`] if:
    /// - the configuration is invalid
    /// - any mandatory field is missing or out of range (all are listed)
    /// - the selected currency is not in the rate table
    /// - an intermediate figure does not fit in a `Decimal`
    ///
    /// A non-positive net income is not an error; it is reported as
    /// [`Evaluation::NonViable`].
    pub fn evaluate(
        &self,
        input: &IncomeInput,
    ) -> Result<Evaluation, IncomeCalculatorError> {
        self.config.validate()?;
        validate(input, &self.config)?;

        let Some(currency) = input.salary.currency.as_ref() else {
            return Err(ValidationError::single(InputField::Currency, FieldProblem::Missing).into());
        };
        let rate = self.rates.rate(currency)?;
        let to_base =
            |amount: Decimal, quantity: &'static str| checked_mul(amount, rate, quantity);

        let monthly_income = to_base(input.salary.monthly_income, "monthly income")?;
        let rent = to_base(input.housing.effective_rent(), "monthly rent")?;
        let emi = to_base(input.obligations.monthly_emi, "monthly EMI")?;
        let savings = to_base(input.obligations.monthly_savings, "monthly savings")?;

        let working_days_per_month =
            self.working_days_per_month(input.salary.working_days_per_week);
        let monthly_office_expense = to_base(
            self.monthly_office_expense(&input.commute)?,
            "monthly office expense",
        )?;
        let total_deductions =
            self.total_deductions(rent, emi, savings, monthly_office_expense)?;
        let net_monthly_income = self.net_monthly_income(monthly_income, total_deductions);

        if net_monthly_income <= Decimal::ZERO {
            debug!(%net_monthly_income, %total_deductions, "income is not viable");
            return Ok(Evaluation::NonViable(NonViableIncome {
                base_currency: self.rates.base().clone(),
                net_monthly_income: round_half_up(net_monthly_income),
                total_deductions: round_half_up(total_deductions),
            }));
        }

        let daily_income = self.daily_income(net_monthly_income, working_days_per_month)?;
        let effective_work_hours =
            self.effective_work_hours(input.salary.daily_work_hours, &input.commute)?;
        let hourly_income = self.hourly_income(daily_income, effective_work_hours)?;
        let product_cost_in_base = to_base(input.product.cost, "product cost")?;
        let hours_to_afford = self.hours_to_afford(product_cost_in_base, hourly_income)?;
        let days_to_afford = self.days_to_afford(hours_to_afford, effective_work_hours)?;
        let monthly_commute_hours = self.monthly_commute_hours(&input.commute)?;

        debug!(
            currency = %currency,
            %net_monthly_income,
            %hourly_income,
            %hours_to_afford,
            "evaluated income"
        );

        Ok(Evaluation::Summary(IncomeSummary {
            base_currency: self.rates.base().clone(),
            input_currency: currency.clone(),
            product_name: input.product.name.trim().to_string(),
            working_days_per_month,
            monthly_office_expense: round_half_up(monthly_office_expense),
            monthly_commute_hours: round_half_up(monthly_commute_hours),
            total_deductions: round_half_up(total_deductions),
            net_monthly_income: round_half_up(net_monthly_income),
            daily_income: round_half_up(daily_income),
            effective_work_hours: round_half_up(effective_work_hours),
            hourly_income: round_half_up(hourly_income),
            product_cost_in_base: round_half_up(product_cost_in_base),
            hours_to_afford: round_half_up(hours_to_afford),
            days_to_afford: round_half_up(days_to_afford),
            breakdown: ExpenseBreakdown {
                rent: round_half_up(rent),
                emi: round_half_up(emi),
                savings: round_half_up(savings),
                commute: round_half_up(monthly_office_expense),
                remaining: round_half_up(net_monthly_income),
            },
        }))
    }

    fn working_days_per_month(
        &self,
        working_days_per_week: Option<u8>,
    ) -> Decimal {
        self.config
            .working_days
            .days_per_month(working_days_per_week)
    }

    /// Office days in a month: office days per week × 4.
    fn monthly_office_days(
        &self,
        commute: &CommuteInput,
    ) -> Decimal {
        Decimal::from(commute.office_days_per_week()) * Decimal::from(WEEKS_PER_MONTH)
    }

    /// Commute expense for a month of office days, in the input currency.
    fn monthly_office_expense(
        &self,
        commute: &CommuteInput,
    ) -> Result<Decimal, OverflowError> {
        checked_mul(
            self.monthly_office_days(commute),
            commute.daily_expense(),
            "monthly office expense",
        )
    }

    fn monthly_commute_hours(
        &self,
        commute: &CommuteInput,
    ) -> Result<Decimal, OverflowError> {
        checked_mul(
            self.monthly_office_days(commute),
            commute.daily_hours(),
            "monthly commute hours",
        )
    }

    fn total_deductions(
        &self,
        rent: Decimal,
        emi: Decimal,
        savings: Decimal,
        office_expense: Decimal,
    ) -> Result<Decimal, OverflowError> {
        [emi, savings, office_expense]
            .into_iter()
            .try_fold(rent, |total, amount| {
                checked_add(total, amount, "total deductions")
            })
    }

    /// Both operands are non-negative, so the difference always fits.
    fn net_monthly_income(
        &self,
        monthly_income: Decimal,
        total_deductions: Decimal,
    ) -> Decimal {
        monthly_income - total_deductions
    }

    fn daily_income(
        &self,
        net_monthly_income: Decimal,
        working_days_per_month: Decimal,
    ) -> Result<Decimal, OverflowError> {
        if working_days_per_month <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        checked_div(net_monthly_income, working_days_per_month, "daily income")
    }

    fn effective_work_hours(
        &self,
        daily_work_hours: Decimal,
        commute: &CommuteInput,
    ) -> Result<Decimal, OverflowError> {
        checked_add(daily_work_hours, commute.daily_hours(), "effective work hours")
    }

    fn hourly_income(
        &self,
        daily_income: Decimal,
        effective_work_hours: Decimal,
    ) -> Result<Decimal, OverflowError> {
        if effective_work_hours <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        checked_div(daily_income, effective_work_hours, "hourly income")
    }

    fn hours_to_afford(
        &self,
        product_cost_in_base: Decimal,
        hourly_income: Decimal,
    ) -> Result<Decimal, OverflowError> {
        if hourly_income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        checked_div(product_cost_in_base, hourly_income, "hours to afford")
    }

    fn days_to_afford(
        &self,
        hours_to_afford: Decimal,
        effective_work_hours: Decimal,
    ) -> Result<Decimal, OverflowError> {
        let day_length = self.config.day_length.hours(effective_work_hours);
        if day_length <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }
        checked_div(hours_to_afford, day_length, "days to afford")
    }
}
