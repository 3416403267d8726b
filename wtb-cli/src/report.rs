//! Text and JSON renderings of an evaluation.

use std::io::{self, Write};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use wtb_core::CurrencyCode;
use wtb_core::calculations::{BreakdownEntry, CurrencyView, FieldIssue, IncomeSummary};

use crate::utils::{format_money, group_thousands, one_place};

const BAR_WIDTH: u32 = 30;
const BAR_CHAR: char = '#';

/// Breakdown of monthly income re-expressed in one currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub currency: CurrencyCode,
    pub symbol: String,
    pub entries: Vec<BreakdownEntry>,
}

/// Net income and deductions of a non-viable evaluation, in one currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortfall {
    pub currency: CurrencyCode,
    pub symbol: String,
    pub net_monthly_income: Decimal,
    pub total_deductions: Decimal,
}

/// Machine-readable output for `--format json`.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JsonReport<'a> {
    Summary {
        summary: &'a IncomeSummary,
        currencies: &'a [CurrencyView],
        distribution: &'a Distribution,
    },
    NonViable {
        #[serde(flatten)]
        shortfall: &'a Shortfall,
    },
    Invalid {
        issues: &'a [FieldIssue],
    },
}

pub fn write_json(
    out: &mut dyn Write,
    report: &JsonReport<'_>,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}

/// Full text report for a viable evaluation.
pub fn write_summary(
    out: &mut dyn Write,
    summary: &IncomeSummary,
    currencies: &[CurrencyView],
    distribution: &Distribution,
) -> io::Result<()> {
    for view in currencies {
        writeln!(out, "Results ({})", view.currency)?;
        let net = format_money(&view.symbol, view.net_monthly_income);
        write_row(out, "Net monthly income", &net)?;
        write_row(out, "Daily income", &format_money(&view.symbol, view.daily_income))?;
        write_row(out, "Hourly income", &format_money(&view.symbol, view.hourly_income))?;
        writeln!(out)?;
    }

    writeln!(
        out,
        "To buy {}, you need to work for approximately {} hours ({} days) straight!",
        product_label(&summary.product_name),
        one_place(summary.hours_to_afford),
        one_place(summary.days_to_afford),
    )?;
    if summary.monthly_commute_hours > Decimal::ZERO {
        writeln!(
            out,
            "You also spend {} hours a month commuting.",
            one_place(summary.monthly_commute_hours)
        )?;
    }
    writeln!(out)?;

    write_distribution(out, distribution)?;
    writeln!(out)?;

    writeln!(out, "Final Thought")?;
    writeln!(
        out,
        "  If your salary can't afford your dreams, don't drop the dream. Drop the job."
    )
}

/// Closing pointer to the configured link.
pub fn write_link_hint(
    out: &mut dyn Write,
    label: &str,
) -> io::Result<()> {
    writeln!(out, "  Find a better job on {label} (rerun with --open-link).")
}

fn write_row(
    out: &mut dyn Write,
    label: &str,
    value: &str,
) -> io::Result<()> {
    writeln!(out, "  {label:<20}{value:>16}")
}

fn product_label(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() { "it" } else { trimmed }
}

/// One line per breakdown entry: amount, share and a bar scaled to the share.
pub fn write_distribution(
    out: &mut dyn Write,
    distribution: &Distribution,
) -> io::Result<()> {
    writeln!(out, "Monthly Income Distribution ({})", distribution.currency)?;
    for entry in &distribution.entries {
        let amount = format_money(&distribution.symbol, entry.amount);
        let percent = format!("{}%", group_thousands(entry.percent));
        writeln!(
            out,
            "  {:<10}{:>16}{:>9}  {}",
            entry.label,
            amount,
            percent,
            bar(entry.percent)
        )?;
    }
    Ok(())
}

/// `BAR_WIDTH` characters at 100%, none at or below 0%.
fn bar(percent: Decimal) -> String {
    let clamped = percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let len = (clamped * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0);
    BAR_CHAR.to_string().repeat(len)
}

pub fn write_non_viable(
    out: &mut dyn Write,
    shortfall: &Shortfall,
) -> io::Result<()> {
    writeln!(
        out,
        "Your net income is zero or negative after deductions: {} left after {} of deductions.",
        format_money(&shortfall.symbol, shortfall.net_monthly_income),
        format_money(&shortfall.symbol, shortfall.total_deductions),
    )?;
    writeln!(
        out,
        "Maybe rob a bank? (Just kidding, please revise your inputs!)"
    )
}

pub fn write_invalid(
    out: &mut dyn Write,
    issues: &[FieldIssue],
) -> io::Result<()> {
    writeln!(out, "Please fix the following fields:")?;
    for issue in issues {
        writeln!(out, "  - {issue}")?;
    }
    Ok(())
}
