//! Income and currency calculations.
//!
//! This module provides the calculation logic for pricing a purchase in
//! working time: input validation, the income derivation, and conversion of
//! the results into display currencies.

pub mod common;
pub mod config;
pub mod converter;
pub mod income;
pub mod summary;
pub mod validation;

pub use common::OverflowError;
pub use config::{CalculatorConfig, CalculatorConfigError, DayLengthPolicy, WorkingDaysPolicy};
pub use converter::{ConversionError, CurrencyConverter, CurrencyView};
pub use income::{IncomeCalculator, IncomeCalculatorError};
pub use summary::{BreakdownEntry, Evaluation, ExpenseBreakdown, IncomeSummary, NonViableIncome};
pub use validation::{FieldIssue, FieldProblem, InputField, ValidationError, validate};
