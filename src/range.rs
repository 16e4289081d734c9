use std::fmt;
use std::iter::successors;
use thiserror::Error;
use time::{Date, Weekday};

/// Longest span, in days, over which weekends will be computed (ten years)
pub(crate) const MAX_RANGE_DAYS: i64 = 3653;

pub(crate) fn is_weekend(date: Date) -> bool {
    matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// An inclusive span of calendar days.
///
/// Invariant: `start <= end`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    pub(crate) fn new(start: Date, end: Date) -> Result<DateRange, RangeError> {
        if end < start {
            Err(RangeError::InvalidRangeOrder { start, end })
        } else {
            Ok(DateRange { start, end })
        }
    }

    pub(crate) fn start(&self) -> Date {
        self.start
    }

    pub(crate) fn end(&self) -> Date {
        self.end
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, counting both ends
    pub(crate) fn len_days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    pub(crate) fn ensure_bounded(&self) -> Result<(), RangeError> {
        let days = self.len_days();
        if days > MAX_RANGE_DAYS {
            Err(RangeError::RangeTooLarge {
                start: self.start,
                end: self.end,
                days,
            })
        } else {
            Ok(())
        }
    }

    pub(crate) fn days(&self) -> impl Iterator<Item = Date> {
        let end = self.end;
        successors(Some(self.start), |d| d.next_day()).take_while(move |&d| d <= end)
    }

    /// Every Saturday and Sunday in the range, in ascending order
    pub(crate) fn weekends(&self) -> Result<Vec<Date>, RangeError> {
        self.ensure_bounded()?;
        Ok(self.days().filter(|&d| is_weekend(d)).collect())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.start, self.end)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum RangeError {
    #[error("range end {end} is before its start {start}")]
    InvalidRangeOrder { start: Date, end: Date },
    #[error(
        "range from {start} to {end} spans {days} days; at most {} are allowed",
        MAX_RANGE_DAYS
    )]
    RangeTooLarge { start: Date, end: Date, days: i64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_weekends_sat_to_sun() {
        let range = DateRange::new(date!(2024 - 06 - 01), date!(2024 - 06 - 09)).unwrap();
        assert_eq!(
            range.weekends().unwrap(),
            [
                date!(2024 - 06 - 01),
                date!(2024 - 06 - 02),
                date!(2024 - 06 - 08),
                date!(2024 - 06 - 09),
            ]
        );
    }

    #[test]
    fn test_weekends_none() {
        let range = DateRange::new(date!(2024 - 06 - 03), date!(2024 - 06 - 07)).unwrap();
        assert!(range.weekends().unwrap().is_empty());
    }

    #[test]
    fn test_weekends_single_day() {
        let saturday = date!(2024 - 06 - 08);
        let range = DateRange::new(saturday, saturday).unwrap();
        assert_eq!(range.weekends().unwrap(), [saturday]);
        let monday = date!(2024 - 06 - 10);
        let range = DateRange::new(monday, monday).unwrap();
        assert!(range.weekends().unwrap().is_empty());
    }

    #[test]
    fn test_weekends_properties() {
        let range = DateRange::new(date!(2023 - 12 - 14), date!(2024 - 03 - 05)).unwrap();
        let weekends = range.weekends().unwrap();
        assert!(weekends.iter().all(|&d| is_weekend(d)));
        assert!(weekends.windows(2).all(|w| w[0] < w[1]));
        let expected = range.days().filter(|&d| is_weekend(d)).count();
        assert_eq!(weekends.len(), expected);
        assert!(weekends.iter().all(|&d| range.contains(d)));
        // Pure: a second call gives the same answer
        assert_eq!(range.weekends().unwrap(), weekends);
    }

    #[test]
    fn test_weekends_across_leap_day() {
        let range = DateRange::new(date!(2024 - 02 - 28), date!(2024 - 03 - 03)).unwrap();
        assert_eq!(
            range.weekends().unwrap(),
            [date!(2024 - 03 - 02), date!(2024 - 03 - 03)]
        );
        assert_eq!(range.len_days(), 5);
    }

    #[test]
    fn test_invalid_order() {
        let r = DateRange::new(date!(2024 - 06 - 03), date!(2024 - 06 - 01));
        assert_eq!(
            r,
            Err(RangeError::InvalidRangeOrder {
                start: date!(2024 - 06 - 03),
                end: date!(2024 - 06 - 01),
            })
        );
    }

    #[test]
    fn test_too_large() {
        let range = DateRange::new(date!(2000 - 01 - 01), date!(2010 - 01 - 01)).unwrap();
        assert_eq!(range.len_days(), 3654);
        assert_eq!(
            range.weekends(),
            Err(RangeError::RangeTooLarge {
                start: date!(2000 - 01 - 01),
                end: date!(2010 - 01 - 01),
                days: 3654,
            })
        );
        let range = DateRange::new(date!(2000 - 01 - 01), date!(2009 - 12 - 31)).unwrap();
        assert!(range.weekends().is_ok());
    }

    #[test]
    fn test_days_at_end_of_time() {
        let range = DateRange::new(Date::MAX.previous_day().unwrap(), Date::MAX).unwrap();
        assert_eq!(range.days().count(), 2);
    }

    #[test]
    fn test_display() {
        let range = DateRange::new(date!(2024 - 06 - 01), date!(2024 - 06 - 09)).unwrap();
        assert_eq!(range.to_string(), "2024-06-01 2024-06-09");
    }
}
