use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use wtb_core::{CurrencyCode, CurrencyRate, CurrencyRateTable, RateTableError};

/// Base currency of the built-in rate table.
pub const BUILTIN_BASE: &str = "INR";

const BUILTIN_CSV: &str = include_str!("../data/rates.csv");

/// Errors that can occur when loading currency rate data.
#[derive(Debug, Error)]
pub enum RateTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid currency code '{code}' on row {row}")]
    InvalidCode { code: String, row: usize },

    #[error("invalid rate table: {0}")]
    Table(#[from] RateTableError),

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for RateTableLoaderError {
    fn from(err: csv::Error) -> Self {
        RateTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a currency rates CSV file.
///
/// - `code`: three-letter currency code, any case (e.g. `usd`)
/// - `symbol`: display symbol (empty to display the code instead)
/// - `rate`: value of one unit in the base currency (e.g. `83.5`)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CurrencyRateRecord {
    pub code: String,
    #[serde(default, deserialize_with = "deserialize_optional_symbol")]
    pub symbol: Option<String>,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub rate: Decimal,
}

fn deserialize_optional_symbol<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim()
        .parse::<Decimal>()
        .map_err(serde::de::Error::custom)
}

/// Loader for currency rate tables from CSV files.
///
/// Headers are matched by name, so column order does not matter:
///
/// ```csv
/// code,symbol,rate
/// INR,₹,1
/// USD,$,83.5
/// ```
pub struct RateTableLoader;

impl RateTableLoader {
    /// Parse rate records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<CurrencyRateRecord>, RateTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: CurrencyRateRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a validated table from parsed records.
    ///
    /// Rows are numbered from 1 (the header is row 0) in error messages.
    pub fn build(
        records: &[CurrencyRateRecord],
        base: &CurrencyCode,
    ) -> Result<CurrencyRateTable, RateTableLoaderError> {
        let entries = records
            .iter()
            .enumerate()
            .map(|(idx, record)| -> Result<CurrencyRate, RateTableLoaderError> {
                let code = CurrencyCode::parse(&record.code).map_err(|_| {
                    RateTableLoaderError::InvalidCode {
                        code: record.code.clone(),
                        row: idx + 1,
                    }
                })?;
                Ok(CurrencyRate::new(code, record.symbol.as_deref(), record.rate))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CurrencyRateTable::new(base.clone(), entries)?)
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(
        reader: R,
        base: &CurrencyCode,
    ) -> Result<CurrencyRateTable, RateTableLoaderError> {
        let records = Self::parse(reader)?;
        let table = Self::build(&records, base)?;
        debug!(base = %base, currencies = table.len(), "loaded rate table");
        Ok(table)
    }

    /// Read a rate table from disk.
    pub fn load_from_file(
        path: &Path,
        base: &CurrencyCode,
    ) -> Result<CurrencyRateTable, RateTableLoaderError> {
        let file = std::fs::File::open(path).map_err(|source| RateTableLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load(file, base)
    }

    /// The rate table shipped with the crate: INR base with USD, EUR, GBP and ILS.
    pub fn builtin() -> Result<CurrencyRateTable, RateTableLoaderError> {
        let base = CurrencyCode::parse(BUILTIN_BASE).map_err(|_| RateTableLoaderError::InvalidCode {
            code: BUILTIN_BASE.to_string(),
            row: 0,
        })?;
        Self::load(BUILTIN_CSV.as_bytes(), &base)
    }
}
