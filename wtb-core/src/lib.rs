pub mod calculations;
pub mod models;

pub use calculations::{
    CalculatorConfig, CurrencyConverter, Evaluation, IncomeCalculator, IncomeCalculatorError,
    IncomeSummary, NonViableIncome, ValidationError,
};
pub use models::*;
