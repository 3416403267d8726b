use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use wtb_core::calculations::common::round_half_up;
use wtb_core::calculations::{
    BreakdownEntry, CurrencyConverter, Evaluation, IncomeCalculator, IncomeCalculatorError,
    IncomeSummary, NonViableIncome,
};
use wtb_core::{CurrencyCode, CurrencyRateTable, IncomeInput};
use wtb_data::{BUILTIN_BASE, RateTableLoader};

use crate::cli::{Cli, OutputFormat};
use crate::config::{AppConfig, RatesConfig};
use crate::links::LinkOpener;
use crate::report::{self, Distribution, JsonReport, Shortfall};

/// How a run ended, mapped to the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Estimated,
    NonViable,
    Invalid,
}

impl RunStatus {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Estimated | Self::NonViable => ExitCode::SUCCESS,
            Self::Invalid => ExitCode::from(2),
        }
    }
}

/// The configured rate table, or the built-in one.
pub fn load_rates(config: &RatesConfig) -> Result<CurrencyRateTable> {
    let builtin_base =
        CurrencyCode::parse(BUILTIN_BASE).context("Parsing built-in base currency")?;

    match &config.file {
        Some(path) => {
            let base = config.base.clone().unwrap_or(builtin_base);
            RateTableLoader::load_from_file(path, &base)
                .with_context(|| format!("Loading rate table: {}", path.display()))
        }
        None => match &config.base {
            Some(base) if *base != builtin_base => {
                bail!(
                    "rates.base = {base} requires rates.file; \
                     the built-in table is {BUILTIN_BASE}-based"
                )
            }
            _ => RateTableLoader::builtin().context("Loading built-in rate table"),
        },
    }
}

/// Evaluates the input described by `cli` and writes the report to `out`.
///
/// With `--format json`, `out` carries only the JSON document; the link
/// opener writes to stderr instead.
///
/// Validation failures and non-viable incomes are reported, not returned as
/// errors. Configuration faults such as an unknown currency are errors.
pub fn run(
    cli: &Cli,
    config: &AppConfig,
    opener: &dyn LinkOpener,
    out: &mut dyn Write,
) -> Result<RunStatus> {
    let rates = load_rates(&config.rates)?;
    let input = cli.income_input()?;
    let calculator = IncomeCalculator::new(&rates, config.calculator);
    let converter = CurrencyConverter::new(&rates);

    debug!(config = ?config.calculator, currencies = rates.len(), "evaluating");

    match calculator.evaluate(&input) {
        Ok(Evaluation::Summary(summary)) => {
            let currencies = display_currencies(cli, config, &summary);
            let views = converter
                .present(&summary, &currencies)
                .context("Presenting results")?;
            let distribution = distribution(&converter, &rates, &summary)?;

            match cli.format {
                OutputFormat::Text => {
                    report::write_summary(out, &summary, &views, &distribution)?;
                    if !cli.open_link {
                        report::write_link_hint(out, &config.links.label)?;
                    }
                }
                OutputFormat::Json => report::write_json(
                    out,
                    &JsonReport::Summary {
                        summary: &summary,
                        currencies: &views,
                        distribution: &distribution,
                    },
                )?,
            }

            if cli.open_link {
                let mut stderr = io::stderr();
                let link_out: &mut dyn Write = match cli.format {
                    OutputFormat::Text => &mut *out,
                    OutputFormat::Json => &mut stderr,
                };
                opener
                    .open(&config.links.url, link_out)
                    .with_context(|| format!("Opening {}", config.links.url))?;
            }
            info!(hours = %summary.hours_to_afford, "estimate complete");
            Ok(RunStatus::Estimated)
        }
        Ok(Evaluation::NonViable(details)) => {
            let shortfall = shortfall(&converter, &rates, &input, &details)?;
            match cli.format {
                OutputFormat::Text => report::write_non_viable(out, &shortfall)?,
                OutputFormat::Json => report::write_json(
                    out,
                    &JsonReport::NonViable {
                        shortfall: &shortfall,
                    },
                )?,
            }
            info!(net = %details.net_monthly_income, "income not viable");
            Ok(RunStatus::NonViable)
        }
        Err(IncomeCalculatorError::Validation(err)) => {
            warn!(%err, "input rejected");
            match cli.format {
                OutputFormat::Text => report::write_invalid(out, err.issues())?,
                OutputFormat::Json => report::write_json(
                    out,
                    &JsonReport::Invalid {
                        issues: err.issues(),
                    },
                )?,
            }
            Ok(RunStatus::Invalid)
        }
        Err(err) => Err(err).context("Evaluating input"),
    }
}

/// `--display` flags, else `[display] currencies`, else the input currency.
fn display_currencies(
    cli: &Cli,
    config: &AppConfig,
    summary: &IncomeSummary,
) -> Vec<CurrencyCode> {
    if !cli.display.is_empty() {
        cli.display.clone()
    } else if !config.display.currencies.is_empty() {
        config.display.currencies.clone()
    } else {
        vec![summary.input_currency.clone()]
    }
}

/// The breakdown in the input currency; shares are unchanged by conversion.
fn distribution(
    converter: &CurrencyConverter<'_>,
    rates: &CurrencyRateTable,
    summary: &IncomeSummary,
) -> Result<Distribution> {
    let currency = &summary.input_currency;
    let entries = summary
        .breakdown
        .entries()
        .into_iter()
        .map(|entry| -> Result<BreakdownEntry> {
            Ok(BreakdownEntry {
                amount: round_half_up(converter.from_base(entry.amount, currency)?),
                ..entry
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Distribution {
        currency: currency.clone(),
        symbol: rates.symbol(currency).to_string(),
        entries,
    })
}

fn shortfall(
    converter: &CurrencyConverter<'_>,
    rates: &CurrencyRateTable,
    input: &IncomeInput,
    details: &NonViableIncome,
) -> Result<Shortfall> {
    let currency = input
        .salary
        .currency
        .clone()
        .unwrap_or_else(|| details.base_currency.clone());
    let in_currency = |amount: Decimal| -> Result<Decimal> {
        Ok(round_half_up(converter.from_base(amount, &currency)?))
    };

    Ok(Shortfall {
        symbol: rates.symbol(&currency).to_string(),
        net_monthly_income: in_currency(details.net_monthly_income)?,
        total_deductions: in_currency(details.total_deductions)?,
        currency: currency.clone(),
    })
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use wtb_core::calculations::{DayLengthPolicy, WorkingDaysPolicy};

    use super::*;
    use crate::links::RecordingLinkOpener;

    const WFH_ARGS: [&str; 12] = [
        "--currency",
        "INR",
        "--income",
        "50000",
        "--work-hours",
        "8",
        "--days-per-week",
        "5",
        "--product",
        "Phone",
        "--cost",
        "20000",
    ];

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wtb").chain(args.iter().copied())).unwrap()
    }

    fn run_to_string(
        cli: &Cli,
        config: &AppConfig,
        opener: &RecordingLinkOpener,
    ) -> (Result<RunStatus>, String) {
        let mut out: Vec<u8> = Vec::new();
        let status = run(cli, config, opener, &mut out);
        (status, String::from_utf8(out).unwrap())
    }

    #[test]
    fn builtin_rates_by_default() {
        let rates = load_rates(&RatesConfig::default()).unwrap();

        assert_eq!(rates.base().as_str(), "INR");
        assert_eq!(rates.len(), 5);
    }

    #[test]
    fn foreign_base_without_file_is_rejected() {
        let config = RatesConfig {
            file: None,
            base: Some(CurrencyCode::parse("EUR").unwrap()),
        };

        let err = load_rates(&config).unwrap_err();

        assert!(err.to_string().contains("requires rates.file"));
    }

    #[test]
    fn work_from_home_text_report() {
        let opener = RecordingLinkOpener::default();

        let (status, text) = run_to_string(&cli(&WFH_ARGS), &AppConfig::default(), &opener);

        assert_eq!(status.unwrap(), RunStatus::Estimated);
        assert!(text.contains("Results (INR)"));
        assert!(text.contains("₹50,000.00"));
        assert!(text.contains("₹2,500.00"));
        assert!(text.contains("₹312.50"));
        assert!(text.contains("approximately 64.0 hours (2.7 days)"));
        assert!(text.contains("Find a better job on LinkedIn"));
        assert!(opener.opened().is_empty());
    }

    #[test]
    fn flat_thirty_day_policy_from_config() {
        let mut config = AppConfig::default();
        config.calculator.working_days = WorkingDaysPolicy::Flat(30);
        config.calculator.day_length = DayLengthPolicy::Calendar;

        let opener = RecordingLinkOpener::default();

        let (status, text) = run_to_string(&cli(&WFH_ARGS), &config, &opener);

        assert_eq!(status.unwrap(), RunStatus::Estimated);
        assert!(text.contains("₹208.33"));
        assert!(text.contains("approximately 96.0 hours (4.0 days)"));
    }

    #[test]
    fn display_flags_add_currency_sections() {
        let mut args = WFH_ARGS.to_vec();
        args.extend(["--display", "INR", "--display", "USD"]);

        let opener = RecordingLinkOpener::default();

        let (_, text) = run_to_string(&cli(&args), &AppConfig::default(), &opener);

        assert!(text.contains("Results (INR)"));
        assert!(text.contains("Results (USD)"));
        assert!(text.contains("$598.80"));
    }

    #[test]
    fn open_link_uses_configured_url() {
        let mut args = WFH_ARGS.to_vec();
        args.push("--open-link");
        let mut config = AppConfig::default();
        config.links.url = "https://jobs.example".to_string();
        let opener = RecordingLinkOpener::default();

        let (status, text) = run_to_string(&cli(&args), &config, &opener);

        assert_eq!(status.unwrap(), RunStatus::Estimated);
        assert_eq!(opener.opened(), vec!["https://jobs.example".to_string()]);
        assert!(!text.contains("rerun with --open-link"));
    }

    #[test]
    fn non_viable_income_is_reported_in_input_currency() {
        let args = [
            "--currency", "USD", "--income", "600", "--work-hours", "8", "--days-per-week", "5",
            "--emi", "610", "--product", "Phone", "--cost", "200",
        ];
        let opener = RecordingLinkOpener::default();

        let (status, text) = run_to_string(&cli(&args), &AppConfig::default(), &opener);

        assert_eq!(status.unwrap(), RunStatus::NonViable);
        assert!(text.contains("$-10.00 left after $610.00 of deductions"));
        assert!(opener.opened().is_empty());
    }

    #[test]
    fn missing_fields_are_listed() {
        let (status, text) = run_to_string(
            &cli(&["--currency", "INR"]),
            &AppConfig::default(),
            &RecordingLinkOpener::default(),
        );

        assert_eq!(status.unwrap(), RunStatus::Invalid);
        assert!(text.contains("Monthly Salary is required"));
        assert!(text.contains("Working Hours Per Day is required"));
        assert!(text.contains("Working Days Per Week is required"));
        assert!(text.contains("Product Name is required"));
        assert!(text.contains("Product Cost is required"));
    }

    #[test]
    fn unknown_currency_is_an_error() {
        let mut args = WFH_ARGS.to_vec();
        args[1] = "JPY";

        let opener = RecordingLinkOpener::default();

        let (status, text) = run_to_string(&cli(&args), &AppConfig::default(), &opener);

        let err = status.unwrap_err();
        assert!(format!("{err:#}").contains("unknown currency 'JPY'"));
        assert!(text.is_empty());
    }

    #[test]
    fn json_summary_is_parseable() {
        let mut args = WFH_ARGS.to_vec();
        args.extend(["--format", "json"]);

        let opener = RecordingLinkOpener::default();

        let (status, text) = run_to_string(&cli(&args), &AppConfig::default(), &opener);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(status.unwrap(), RunStatus::Estimated);
        assert_eq!(value["outcome"], "summary");
        assert_eq!(value["summary"]["product_name"], "Phone");
        assert_eq!(value["currencies"][0]["currency"], "INR");
        assert_eq!(value["distribution"]["entries"][4]["label"], "Remaining");
    }

    #[test]
    fn json_summary_stays_parseable_with_open_link() {
        let mut args = WFH_ARGS.to_vec();
        args.extend(["--format", "json", "--open-link"]);
        let opener = RecordingLinkOpener::default();

        let (status, text) = run_to_string(&cli(&args), &AppConfig::default(), &opener);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(status.unwrap(), RunStatus::Estimated);
        assert_eq!(value["outcome"], "summary");
        assert_eq!(opener.opened().len(), 1);
    }

    #[test]
    fn overflowing_income_is_an_error() {
        let args = [
            "--currency", "USD", "--income", "1000000000000000000000000000", "--work-hours", "8",
            "--days-per-week", "5", "--product", "Pen", "--cost", "1",
        ];
        let opener = RecordingLinkOpener::default();

        let (status, text) = run_to_string(&cli(&args), &AppConfig::default(), &opener);

        let err = status.unwrap_err();
        assert!(format!("{err:#}").contains("monthly income is too large to compute"));
        assert!(text.is_empty());
    }
}
