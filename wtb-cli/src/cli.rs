use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, ValueEnum};
use rust_decimal::Decimal;
use wtb_core::{
    CommuteInput, CommuteTime, CurrencyCode, HousingInput, IncomeInput, ObligationsInput,
    OfficeCommute, ProductGoal, SalaryInput,
};

use crate::utils::parse_decimal;

/// Work-to-buy estimator: how many hours of work does a purchase cost?
#[derive(Debug, Parser)]
#[command(name = "wtb", version)]
pub struct Cli {
    /// TOML configuration file (defaults to ./wtb.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read the whole input from a TOML file instead of flags
    #[arg(long, value_name = "FILE", conflicts_with = "form")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub form: FormArgs,

    /// Currency to present results in (repeatable; defaults to the input currency)
    #[arg(long = "display", value_name = "CODE")]
    pub display: Vec<CurrencyCode>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Open the configured link after a successful estimate
    #[arg(long)]
    pub open_link: bool,

    /// Log level or filter directive (overrides the config file; RUST_LOG wins)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

/// Input fields given on the command line.
#[derive(Debug, Default, Args)]
#[group(id = "form", multiple = true)]
pub struct FormArgs {
    /// Currency the amounts are entered in (e.g. INR, USD)
    #[arg(long, value_name = "CODE")]
    pub currency: Option<CurrencyCode>,

    /// Monthly salary
    #[arg(long, value_name = "AMOUNT", value_parser = parse_decimal)]
    pub income: Option<Decimal>,

    /// Working hours per day
    #[arg(long, value_name = "HOURS", value_parser = parse_decimal)]
    pub work_hours: Option<Decimal>,

    /// Working days per week
    #[arg(long, value_name = "DAYS")]
    pub days_per_week: Option<u8>,

    #[arg(long, value_enum, default_value_t = Housing::Own)]
    pub housing: Housing,

    /// Monthly rent, only used with `--housing rent`
    #[arg(long, value_name = "AMOUNT", value_parser = parse_decimal)]
    pub rent: Option<Decimal>,

    #[arg(long, value_enum, default_value_t = Attendance::Wfh)]
    pub attendance: Attendance,

    /// Office days per week, only used with `--attendance wfo`
    #[arg(long, value_name = "DAYS")]
    pub office_days: Option<u8>,

    /// Travel cost per office day
    #[arg(long, value_name = "AMOUNT", value_parser = parse_decimal)]
    pub commute_expense: Option<Decimal>,

    #[arg(long, value_name = "HOURS", default_value_t = 0)]
    pub commute_hours: u8,

    #[arg(long, value_name = "MINUTES", default_value_t = 0)]
    pub commute_minutes: u8,

    /// Monthly loan installment
    #[arg(long, value_name = "AMOUNT", value_parser = parse_decimal)]
    pub emi: Option<Decimal>,

    /// Desired monthly saving
    #[arg(long, value_name = "AMOUNT", value_parser = parse_decimal)]
    pub savings: Option<Decimal>,

    /// What you want to buy
    #[arg(long, value_name = "NAME")]
    pub product: Option<String>,

    /// Price of the product
    #[arg(long, value_name = "AMOUNT", value_parser = parse_decimal)]
    pub cost: Option<Decimal>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Housing {
    #[default]
    Own,
    Rent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Attendance {
    #[default]
    Wfh,
    Wfo,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FormArgs {
    /// Builds the input snapshot. Absent amounts become zero so validation
    /// reports them as missing.
    pub fn to_input(&self) -> IncomeInput {
        let amount = |value: Option<Decimal>| value.unwrap_or(Decimal::ZERO);

        let housing = match self.housing {
            Housing::Own => HousingInput::owned(),
            Housing::Rent => HousingInput::rented(amount(self.rent)),
        };

        let commute = match self.attendance {
            Attendance::Wfh => CommuteInput::WorkFromHome,
            Attendance::Wfo => CommuteInput::WorkFromOffice(OfficeCommute {
                days_per_week: self.office_days.unwrap_or(0),
                daily_expense: amount(self.commute_expense),
                commute_time: CommuteTime::new(self.commute_hours, self.commute_minutes),
            }),
        };

        IncomeInput {
            salary: SalaryInput {
                monthly_income: amount(self.income),
                daily_work_hours: amount(self.work_hours),
                working_days_per_week: self.days_per_week,
                currency: self.currency.clone(),
            },
            housing,
            commute,
            obligations: ObligationsInput {
                monthly_emi: amount(self.emi),
                monthly_savings: amount(self.savings),
            },
            product: ProductGoal::new(self.product.clone().unwrap_or_default(), amount(self.cost)),
        }
    }
}

impl Cli {
    /// The input from `--input` when given, else from the flags.
    pub fn income_input(&self) -> Result<IncomeInput> {
        match &self.input {
            Some(path) => load_input_file(path),
            None => Ok(self.form.to_input()),
        }
    }
}

pub fn load_input_file(path: &Path) -> Result<IncomeInput> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Reading input file: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Parsing input file: {}", path.display()))
}
