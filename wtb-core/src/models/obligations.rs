use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Recurring monthly commitments taken out of income before it counts as disposable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationsInput {
    /// Loan installment (EMI).
    #[serde(default)]
    pub monthly_emi: Decimal,
    #[serde(default)]
    pub monthly_savings: Decimal,
}
