use crate::core::types::DayOfWeek;
use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub trait WeekdayExt {
    fn to_day_of_week(self) -> DayOfWeek;
}

impl WeekdayExt for Weekday {
    fn to_day_of_week(self) -> DayOfWeek {
        match self {
            Weekday::Sun => DayOfWeek::Sun,
            Weekday::Mon => DayOfWeek::Mon,
            Weekday::Tue => DayOfWeek::Tue,
            Weekday::Wed => DayOfWeek::Wed,
            Weekday::Thu => DayOfWeek::Thu,
            Weekday::Fri => DayOfWeek::Fri,
            Weekday::Sat => DayOfWeek::Sat,
        }
    }
}

pub trait NaiveDateExt {
    /// The Sunday on or before this date.
    fn sunday_on_or_before(self) -> NaiveDate;
}

impl NaiveDateExt for NaiveDate {
    fn sunday_on_or_before(self) -> NaiveDate {
        self - Duration::days(self.weekday().num_days_from_sunday() as i64)
    }
}
