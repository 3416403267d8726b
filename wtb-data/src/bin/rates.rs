use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use wtb_core::CurrencyCode;
use wtb_data::{BUILTIN_BASE, RateTableLoader};

/// Check a currency rate CSV file and print the table it defines.
///
/// The CSV file should have the following columns:
/// - code: Three-letter currency code (e.g., USD)
/// - symbol: Display symbol (may be empty)
/// - rate: Value of one unit in the base currency (e.g., 83.5)
///
/// Without `--file`, the built-in table is printed.
#[derive(Parser, Debug)]
#[command(name = "wtb-rates")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing currency rates
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Base currency code; its rate must be exactly 1
    #[arg(short, long, default_value = BUILTIN_BASE)]
    base: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let table = match &args.file {
        Some(path) => {
            let base = CurrencyCode::parse(&args.base)
                .with_context(|| format!("Invalid base currency: {}", args.base))?;
            println!("Loading currency rates from: {}", path.display());
            RateTableLoader::load_from_file(path, &base)
                .with_context(|| format!("Failed to load rates: {}", path.display()))?
        }
        None => RateTableLoader::builtin().context("Failed to load built-in rates")?,
    };

    println!(
        "{} currencies, base {}:",
        table.len(),
        table.base()
    );
    for code in table.codes() {
        let rate = table.rate(code)?;
        println!("  {:<4} {:<3} {}", code.as_str(), table.symbol(code), rate);
    }

    Ok(())
}
