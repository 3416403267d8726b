use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The purchase being priced in working time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductGoal {
    pub name: String,
    /// Price in the selected currency.
    pub cost: Decimal,
}

impl ProductGoal {
    pub fn new(
        name: impl Into<String>,
        cost: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
        }
    }
}
