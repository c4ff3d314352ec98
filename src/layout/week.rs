use crate::core::types::{DayOfWeek, WeekStep};
use crate::errors::Result;
use crate::extensions::chrono::{NaiveDateExt, WeekdayExt};
use chrono::{Datelike, Duration, Local, NaiveDate};
use std::fmt;
use strum::IntoEnumIterator;

/// `weekStart`: the Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date.sunday_on_or_before()
}

/// The Sunday-to-Saturday range on screen. `start` is always a Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekWindow {
    start: NaiveDate,
}

impl WeekWindow {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: week_start(date),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    pub fn date_of(&self, day: DayOfWeek) -> NaiveDate {
        self.start + Duration::days(day.index() as i64)
    }

    pub fn days(&self) -> Vec<(DayOfWeek, NaiveDate)> {
        DayOfWeek::iter().map(|d| (d, self.date_of(d))).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end()
    }

    /// Calendar-date comparison only; time of day never matters.
    pub fn is_today(&self, day: DayOfWeek, today: NaiveDate) -> bool {
        self.date_of(day) == today
    }

    pub fn today_column(&self, today: NaiveDate) -> Option<DayOfWeek> {
        self.contains(today)
            .then(|| today.weekday().to_day_of_week())
    }

    pub fn shifted(&self, step: WeekStep) -> Self {
        Self {
            start: self.start + Duration::days(step.days()),
        }
    }

    /// `Oct 18 - Oct 24, 2026`, or with both years when the week spans New Year.
    pub fn label(&self) -> String {
        let end = self.end();
        if self.start.year() == end.year() {
            format!(
                "{} - {}",
                self.start.format("%b %-d"),
                end.format("%b %-d, %Y")
            )
        } else {
            format!(
                "{} - {}",
                self.start.format("%b %-d, %Y"),
                end.format("%b %-d, %Y")
            )
        }
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Source of "today" for the navigator.
pub trait Clock: fmt::Debug {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Holds the displayed week and pages it.
#[derive(Debug)]
pub struct WeekNavigator {
    window: WeekWindow,
    clock: Box<dyn Clock>,
}

impl WeekNavigator {
    /// Starts on the week containing the clock's today.
    pub fn new(clock: Box<dyn Clock>) -> Self {
        let window = WeekWindow::containing(clock.today());
        Self { window, clock }
    }

    pub fn system() -> Self {
        Self::new(Box::new(SystemClock))
    }

    pub fn window(&self) -> WeekWindow {
        self.window
    }

    pub fn navigate(&mut self, step: WeekStep) -> WeekWindow {
        self.window = self.window.shifted(step);
        self.window
    }

    /// `navigate(-1 | +1)`; any other direction is rejected.
    pub fn navigate_by(&mut self, direction: i32) -> Result<WeekWindow> {
        let step = WeekStep::from_direction(direction)?;
        Ok(self.navigate(step))
    }

    pub fn jump_to(&mut self, date: NaiveDate) -> WeekWindow {
        self.window = WeekWindow::containing(date);
        self.window
    }

    pub fn today(&mut self) -> WeekWindow {
        let today = self.clock.today();
        self.jump_to(today)
    }

    pub fn current_date(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn is_today(&self, day: DayOfWeek) -> bool {
        self.window.is_today(day, self.clock.today())
    }
}
