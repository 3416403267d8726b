use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a three-letter currency code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid currency code '{0}', expected three ASCII letters")]
pub struct InvalidCurrencyCode(pub String);

/// A currency referenced by a rate table that does not contain it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown currency '{0}'")]
pub struct UnknownCurrencyError(pub CurrencyCode);

/// Errors raised while building a [`CurrencyRateTable`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("rate for {code} must be positive, got {rate}")]
    NonPositiveRate { code: CurrencyCode, rate: Decimal },

    #[error("base currency {0} is not in the rate table")]
    MissingBase(CurrencyCode),

    #[error("base currency {code} must have a rate of 1, got {rate}")]
    BaseRateNotOne { code: CurrencyCode, rate: Decimal },

    #[error("currency {0} is listed more than once")]
    DuplicateCode(CurrencyCode),
}

/// Upper-cased ISO 4217 style currency code, e.g. `INR` or `USD`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn parse(code: &str) -> Result<Self, InvalidCurrencyCode> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = InvalidCurrencyCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = InvalidCurrencyCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of a rate table: how many base-currency units one unit of `code` is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub code: CurrencyCode,
    pub symbol: Option<String>,
    pub rate: Decimal,
}

impl CurrencyRate {
    pub fn new(
        code: CurrencyCode,
        symbol: Option<&str>,
        rate: Decimal,
    ) -> Self {
        Self {
            code,
            symbol: symbol.map(str::to_string),
            rate,
        }
    }
}

/// Static mapping from currency code to its value relative to a base currency.
///
/// The table is immutable once built. Entries keep the order they were
/// supplied in, which is the order currencies are offered for display.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use wtb_core::{CurrencyCode, CurrencyRate, CurrencyRateTable};
///
/// let inr = CurrencyCode::parse("INR").unwrap();
/// let usd = CurrencyCode::parse("usd").unwrap();
///
/// let table = CurrencyRateTable::new(
///     inr.clone(),
///     vec![
///         CurrencyRate::new(inr.clone(), Some("₹"), dec!(1)),
///         CurrencyRate::new(usd.clone(), Some("$"), dec!(83.5)),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(table.rate(&usd), Ok(dec!(83.5)));
/// assert_eq!(table.symbol(&usd), "$");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyRateTable {
    base: CurrencyCode,
    rates: Vec<CurrencyRate>,
}

impl CurrencyRateTable {
    /// Builds a table, checking that every rate is positive, that no code
    /// repeats and that `base` is present with a rate of exactly 1.
    pub fn new(
        base: CurrencyCode,
        entries: impl IntoIterator<Item = CurrencyRate>,
    ) -> Result<Self, RateTableError> {
        let mut rates: Vec<CurrencyRate> = Vec::new();

        for entry in entries {
            if entry.rate <= Decimal::ZERO {
                return Err(RateTableError::NonPositiveRate {
                    code: entry.code,
                    rate: entry.rate,
                });
            }
            if rates.iter().any(|r| r.code == entry.code) {
                return Err(RateTableError::DuplicateCode(entry.code));
            }
            rates.push(entry);
        }

        let base_rate = rates
            .iter()
            .find(|r| r.code == base)
            .map(|r| r.rate)
            .ok_or_else(|| RateTableError::MissingBase(base.clone()))?;
        if base_rate != Decimal::ONE {
            return Err(RateTableError::BaseRateNotOne {
                code: base,
                rate: base_rate,
            });
        }

        Ok(Self { base, rates })
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn get(
        &self,
        code: &CurrencyCode,
    ) -> Option<&CurrencyRate> {
        self.rates.iter().find(|r| &r.code == code)
    }

    pub fn contains(
        &self,
        code: &CurrencyCode,
    ) -> bool {
        self.get(code).is_some()
    }

    /// Value of one unit of `code` in the base currency.
    pub fn rate(
        &self,
        code: &CurrencyCode,
    ) -> Result<Decimal, UnknownCurrencyError> {
        self.get(code)
            .map(|r| r.rate)
            .ok_or_else(|| UnknownCurrencyError(code.clone()))
    }

    /// Display symbol for `code`, falling back to the code itself.
    pub fn symbol<'a>(
        &'a self,
        code: &'a CurrencyCode,
    ) -> &'a str {
        self.get(code)
            .and_then(|r| r.symbol.as_deref())
            .unwrap_or(code.as_str())
    }

    pub fn codes(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.rates.iter().map(|r| &r.code)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
