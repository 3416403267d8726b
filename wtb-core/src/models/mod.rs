mod commute;
mod currency;
mod housing;
mod income_input;
mod obligations;
mod product_goal;
mod salary;

pub use commute::{AttendanceMode, CommuteInput, CommuteTime, OfficeCommute};
pub use currency::{
    CurrencyCode, CurrencyRate, CurrencyRateTable, InvalidCurrencyCode, RateTableError,
    UnknownCurrencyError,
};
pub use housing::HousingInput;
pub use income_input::IncomeInput;
pub use obligations::ObligationsInput;
pub use product_goal::ProductGoal;
pub use salary::SalaryInput;
