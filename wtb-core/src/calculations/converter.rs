//! Currency conversion over a static [`CurrencyRateTable`].

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use super::common::{OverflowError, checked_div, checked_mul, round_half_up};
use super::summary::IncomeSummary;
use crate::models::{CurrencyCode, CurrencyRateTable, UnknownCurrencyError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error(transparent)]
    UnknownCurrency(#[from] UnknownCurrencyError),

    /// The converted amount does not fit in a `Decimal`.
    #[error(transparent)]
    Overflow(#[from] OverflowError),
}

/// Income figures re-expressed in one display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyView {
    pub currency: CurrencyCode,
    pub symbol: String,
    pub net_monthly_income: Decimal,
    pub daily_income: Decimal,
    pub hourly_income: Decimal,
}

/// Converts amounts between currencies of one rate table.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use wtb_core::calculations::CurrencyConverter;
/// use wtb_core::{CurrencyCode, CurrencyRate, CurrencyRateTable};
///
/// let inr = CurrencyCode::parse("INR").unwrap();
/// let usd = CurrencyCode::parse("USD").unwrap();
/// let rates = CurrencyRateTable::new(
///     inr.clone(),
///     vec![
///         CurrencyRate::new(inr.clone(), None, dec!(1)),
///         CurrencyRate::new(usd.clone(), None, dec!(83.5)),
///     ],
/// )
/// .unwrap();
///
/// let converter = CurrencyConverter::new(&rates);
///
/// assert_eq!(converter.convert(dec!(2), &usd, &inr), Ok(dec!(167.0)));
/// assert_eq!(converter.convert(dec!(167), &inr, &usd), Ok(dec!(2)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrencyConverter<'a> {
    rates: &'a CurrencyRateTable,
}

impl<'a> CurrencyConverter<'a> {
    pub fn new(rates: &'a CurrencyRateTable) -> Self {
        Self { rates }
    }

    /// Converts `amount` of `from` into `to`: `amount × rate[from] / rate[to]`.
    ///
    /// Converting a currency into itself returns `amount` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::UnknownCurrency`] if either code is not in
    /// the table, including when `from == to`, and
    /// [`ConversionError::Overflow`] if the result exceeds the `Decimal` range.
    pub fn convert(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<Decimal, ConversionError> {
        let from_rate = self.rates.rate(from)?;
        let to_rate = self.rates.rate(to)?;
        if from == to {
            return Ok(amount);
        }
        let scaled = checked_mul(amount, from_rate, "converted amount")?;
        Ok(checked_div(scaled, to_rate, "converted amount")?)
    }

    pub fn to_base(
        &self,
        amount: Decimal,
        from: &CurrencyCode,
    ) -> Result<Decimal, ConversionError> {
        self.convert(amount, from, self.rates.base())
    }

    pub fn from_base(
        &self,
        amount: Decimal,
        to: &CurrencyCode,
    ) -> Result<Decimal, ConversionError> {
        self.convert(amount, self.rates.base(), to)
    }

    /// Expresses the summary's income figures in each of `currencies`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError`] for the first display currency that is not
    /// in the table or whose figures do not fit in a `Decimal`.
    pub fn present(
        &self,
        summary: &IncomeSummary,
        currencies: &[CurrencyCode],
    ) -> Result<Vec<CurrencyView>, ConversionError> {
        currencies
            .iter()
            .map(|currency| -> Result<CurrencyView, ConversionError> {
                let convert = |amount: Decimal| {
                    self.convert(amount, &summary.base_currency, currency)
                        .map(round_half_up)
                };
                Ok(CurrencyView {
                    currency: currency.clone(),
                    symbol: self.rates.symbol(currency).to_string(),
                    net_monthly_income: convert(summary.net_monthly_income)?,
                    daily_income: convert(summary.daily_income)?,
                    hourly_income: convert(summary.hourly_income)?,
                })
            })
            .collect()
    }
}
