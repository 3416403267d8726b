use rust_decimal::Decimal;
use serde::Serialize;

use super::common::percent_of;
use crate::models::CurrencyCode;

/// Where a month's income goes. Entries sum to the monthly income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseBreakdown {
    pub rent: Decimal,
    pub emi: Decimal,
    pub savings: Decimal,
    pub commute: Decimal,
    pub remaining: Decimal,
}

/// A labelled slice of the breakdown with its share of monthly income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    pub label: &'static str,
    pub amount: Decimal,
    pub percent: Decimal,
}

impl ExpenseBreakdown {
    pub fn total(&self) -> Decimal {
        self.rent + self.emi + self.savings + self.commute + self.remaining
    }

    /// Entries in display order: rent, EMI, savings, commute, remaining.
    pub fn entries(&self) -> Vec<BreakdownEntry> {
        let total = self.total();
        [
            ("Rent", self.rent),
            ("EMI", self.emi),
            ("Savings", self.savings),
            ("Commute", self.commute),
            ("Remaining", self.remaining),
        ]
        .into_iter()
        .map(|(label, amount)| BreakdownEntry {
            label,
            amount,
            percent: percent_of(amount, total),
        })
        .collect()
    }
}

/// Derived figures for one evaluation.
///
/// Monetary values are in the rate table's base currency and rounded to two
/// decimal places; hours and days are rounded the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncomeSummary {
    /// Currency the figures below are expressed in.
    pub base_currency: CurrencyCode,
    /// Currency the user entered amounts in.
    pub input_currency: CurrencyCode,
    pub product_name: String,

    pub working_days_per_month: Decimal,
    pub monthly_office_expense: Decimal,
    pub monthly_commute_hours: Decimal,
    pub total_deductions: Decimal,
    pub net_monthly_income: Decimal,
    pub daily_income: Decimal,
    pub effective_work_hours: Decimal,
    pub hourly_income: Decimal,
    pub product_cost_in_base: Decimal,
    pub hours_to_afford: Decimal,
    pub days_to_afford: Decimal,

    pub breakdown: ExpenseBreakdown,
}

/// Deductions consume the whole income; no summary is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NonViableIncome {
    pub base_currency: CurrencyCode,
    pub net_monthly_income: Decimal,
    pub total_deductions: Decimal,
}

/// Result of a successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Evaluation {
    Summary(IncomeSummary),
    NonViable(NonViableIncome),
}

impl Evaluation {
    pub fn summary(&self) -> Option<&IncomeSummary> {
        match self {
            Self::Summary(summary) => Some(summary),
            Self::NonViable(_) => None,
        }
    }

    pub fn is_viable(&self) -> bool {
        matches!(self, Self::Summary(_))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn breakdown_entries_carry_shares() {
        let breakdown = ExpenseBreakdown {
            rent: dec!(10000),
            emi: dec!(0),
            savings: dec!(0),
            commute: dec!(4000),
            remaining: dec!(46000),
        };

        let entries = breakdown.entries();

        assert_eq!(breakdown.total(), dec!(60000));
        assert_eq!(
            entries.iter().map(|e| e.label).collect::<Vec<_>>(),
            vec!["Rent", "EMI", "Savings", "Commute", "Remaining"]
        );
        assert_eq!(entries[0].percent, dec!(16.67));
        assert_eq!(entries[1].percent, dec!(0));
        assert_eq!(entries[3].percent, dec!(6.67));
        assert_eq!(entries[4].percent, dec!(76.67));
    }
}
