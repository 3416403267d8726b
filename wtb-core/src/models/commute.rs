use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const MINUTES_PER_HOUR: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceMode {
    WorkFromHome,
    WorkFromOffice,
}

/// Door-to-door commute duration for one office day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommuteTime {
    #[serde(default)]
    pub hours: u8,
    #[serde(default)]
    pub minutes: u8,
}

impl CommuteTime {
    pub fn new(
        hours: u8,
        minutes: u8,
    ) -> Self {
        Self { hours, minutes }
    }

    /// Combined duration as fractional hours (`1h 30m` is `1.5`).
    pub fn as_hours(&self) -> Decimal {
        Decimal::from(self.hours) + Decimal::from(self.minutes) / Decimal::from(MINUTES_PER_HOUR)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeCommute {
    pub days_per_week: u8,
    /// Travel cost for one office day, in the selected currency.
    pub daily_expense: Decimal,
    #[serde(default)]
    pub commute_time: CommuteTime,
}

/// How the user attends work. Commute details only exist for office attendance,
/// so working from home contributes no expense and no travel time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CommuteInput {
    #[default]
    WorkFromHome,
    WorkFromOffice(OfficeCommute),
}

impl CommuteInput {
    pub fn mode(&self) -> AttendanceMode {
        match self {
            Self::WorkFromHome => AttendanceMode::WorkFromHome,
            Self::WorkFromOffice(_) => AttendanceMode::WorkFromOffice,
        }
    }

    pub fn office(&self) -> Option<&OfficeCommute> {
        match self {
            Self::WorkFromHome => None,
            Self::WorkFromOffice(office) => Some(office),
        }
    }

    /// Office days attended per week, zero when working from home.
    pub fn office_days_per_week(&self) -> u8 {
        self.office().map_or(0, |o| o.days_per_week)
    }

    /// Per-day commute expense, zero when working from home.
    pub fn daily_expense(&self) -> Decimal {
        self.office().map_or(Decimal::ZERO, |o| o.daily_expense)
    }

    /// Per-day commute hours, zero when working from home.
    pub fn daily_hours(&self) -> Decimal {
        self.office()
            .map_or(Decimal::ZERO, |o| o.commute_time.as_hours())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn commute_time_combines_hours_and_minutes() {
        assert_eq!(CommuteTime::new(1, 30).as_hours(), dec!(1.5));
        assert_eq!(CommuteTime::new(0, 45).as_hours(), dec!(0.75));
        assert_eq!(CommuteTime::default().as_hours(), dec!(0));
    }

    #[test]
    fn work_from_home_contributes_nothing() {
        let commute = CommuteInput::WorkFromHome;

        assert_eq!(commute.mode(), AttendanceMode::WorkFromHome);
        assert_eq!(commute.office_days_per_week(), 0);
        assert_eq!(commute.daily_expense(), Decimal::ZERO);
        assert_eq!(commute.daily_hours(), Decimal::ZERO);
    }

    #[test]
    fn work_from_office_exposes_details() {
        let commute = CommuteInput::WorkFromOffice(OfficeCommute {
            days_per_week: 3,
            daily_expense: dec!(150),
            commute_time: CommuteTime::new(2, 15),
        });

        assert_eq!(commute.mode(), AttendanceMode::WorkFromOffice);
        assert_eq!(commute.office_days_per_week(), 3);
        assert_eq!(commute.daily_expense(), dec!(150));
        assert_eq!(commute.daily_hours(), dec!(2.25));
    }

    #[test]
    fn commute_deserializes_from_tagged_toml() {
        let commute: CommuteInput = toml::from_str(
            r#"
            mode = "work_from_office"
            days_per_week = 5
            daily_expense = 200

            [commute_time]
            hours = 1
            minutes = 30
            "#,
        )
        .unwrap();

        assert_eq!(commute.office_days_per_week(), 5);
        assert_eq!(commute.daily_hours(), dec!(1.5));

        let home: CommuteInput = toml::from_str(r#"mode = "work_from_home""#).unwrap();
        assert_eq!(home, CommuteInput::WorkFromHome);
    }
}
