pub mod loader;

pub use loader::{BUILTIN_BASE, CurrencyRateRecord, RateTableLoader, RateTableLoaderError};
