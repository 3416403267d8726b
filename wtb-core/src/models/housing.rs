use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingInput {
    pub owned: bool,
    #[serde(default)]
    pub monthly_rent: Decimal,
}

impl HousingInput {
    pub fn owned() -> Self {
        Self {
            owned: true,
            monthly_rent: Decimal::ZERO,
        }
    }

    pub fn rented(monthly_rent: Decimal) -> Self {
        Self {
            owned: false,
            monthly_rent,
        }
    }

    /// Rent that counts towards deductions; owners pay none.
    pub fn effective_rent(&self) -> Decimal {
        if self.owned {
            Decimal::ZERO
        } else {
            self.monthly_rent
        }
    }
}

impl Default for HousingInput {
    fn default() -> Self {
        Self::owned()
    }
}
