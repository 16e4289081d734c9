use std::fmt;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

/// A displayed calendar page: one month of one year.
///
/// Only months that `time::Date` can represent can be constructed, so every
/// `YearMonth` has a valid first day.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct YearMonth {
    first: Date,
}

impl YearMonth {
    pub(crate) fn new(year: i32, month: Month) -> Result<YearMonth, OutOfTimeError> {
        Date::from_calendar_date(year, month, 1)
            .map(|first| YearMonth { first })
            .map_err(|_| OutOfTimeError)
    }

    pub(crate) fn containing(date: Date) -> YearMonth {
        let first = date.replace_day(1).unwrap_or(date);
        YearMonth { first }
    }

    pub(crate) fn year(self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(self) -> Month {
        self.first.month()
    }

    pub(crate) fn first_day(self) -> Date {
        self.first
    }

    pub(crate) fn days_in_month(self) -> u8 {
        self.month().length(self.year())
    }

    /// Number of empty cells before the 1st in a Sunday-first week row
    pub(crate) fn leading_blanks(self) -> u16 {
        self.first.weekday().index0()
    }

    /// Returns the date in this month with the given day number, clamped to
    /// the length of the month
    pub(crate) fn clamped_day(self, day: u8) -> Date {
        let day = day.clamp(1, self.days_in_month());
        self.first.replace_day(day).unwrap_or(self.first)
    }

    pub(crate) fn previous_month(self) -> Result<YearMonth, OutOfTimeError> {
        self.first
            .previous_day()
            .map(YearMonth::containing)
            .ok_or(OutOfTimeError)
    }

    pub(crate) fn next_month(self) -> Result<YearMonth, OutOfTimeError> {
        let (year, month) = match self.month() {
            Month::December => (self.year().checked_add(1).ok_or(OutOfTimeError)?, Month::January),
            m => (self.year(), m.next()),
        };
        YearMonth::new(year, month)
    }

    pub(crate) fn previous_year(self) -> Result<YearMonth, OutOfTimeError> {
        YearMonth::new(
            self.year().checked_sub(1).ok_or(OutOfTimeError)?,
            self.month(),
        )
    }

    pub(crate) fn next_year(self) -> Result<YearMonth, OutOfTimeError> {
        YearMonth::new(
            self.year().checked_add(1).ok_or(OutOfTimeError)?,
            self.month(),
        )
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month(), self.year())
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

/// The cells of one month laid out Sunday-first: `leading_blanks()` empty
/// cells followed by every day of the month in order
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    page: YearMonth,
    cells: Vec<Option<Date>>,
}

impl MonthGrid {
    pub(crate) fn new(page: YearMonth) -> MonthGrid {
        let blanks = usize::from(page.leading_blanks());
        let days = usize::from(page.days_in_month());
        let mut cells = Vec::with_capacity(blanks + days);
        cells.resize(blanks, None);
        cells.extend(
            successors(Some(page.first_day()), |d| d.next_day())
                .take(days)
                .map(Some),
        );
        MonthGrid { page, cells }
    }

    pub(crate) fn page(&self) -> YearMonth {
        self.page
    }

    pub(crate) fn cells(&self) -> &[Option<Date>] {
        &self.cells
    }

    /// Iterate over the grid one Sunday-to-Saturday row at a time.  The last
    /// row is padded with blanks.
    pub(crate) fn weeks(&self) -> impl Iterator<Item = [Option<Date>; DAYS_IN_WEEK]> + '_ {
        self.cells().chunks(DAYS_IN_WEEK).map(|chunk| {
            let mut week = [None; DAYS_IN_WEEK];
            for (slot, &cell) in std::iter::zip(&mut week, chunk) {
                *slot = cell;
            }
            week
        })
    }

    pub(crate) fn week_count(&self) -> usize {
        self.cells.len().div_ceil(DAYS_IN_WEEK)
    }
}
