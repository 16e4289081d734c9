use crate::range::DateRange;
use time::Date;

/// What is on display while no second click is pending
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Committed {
    #[default]
    Nothing,
    /// A lone start date set by the "Today" shortcut
    Day(Date),
    Range(DateRange),
}

/// The two-click range selection machine
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Selection {
    /// The next click picks a start date
    AwaitingStart(Committed),
    /// A start has been picked and the next click picks the end
    AwaitingEnd { start: Date },
}

impl Default for Selection {
    fn default() -> Selection {
        Selection::AwaitingStart(Committed::Nothing)
    }
}

impl Selection {
    /// Selection holding only a start date, with a fresh selection to follow
    pub(crate) fn day(date: Date) -> Selection {
        Selection::AwaitingStart(Committed::Day(date))
    }

    pub(crate) fn finalized(range: DateRange) -> Selection {
        Selection::AwaitingStart(Committed::Range(range))
    }

    pub(crate) fn start(&self) -> Option<Date> {
        match self {
            Selection::AwaitingStart(Committed::Nothing) => None,
            Selection::AwaitingStart(Committed::Day(d)) => Some(*d),
            Selection::AwaitingStart(Committed::Range(r)) => Some(r.start()),
            Selection::AwaitingEnd { start } => Some(*start),
        }
    }

    pub(crate) fn end(&self) -> Option<Date> {
        self.range().map(|r| r.end())
    }

    /// Returns the finalized range, if any
    pub(crate) fn range(&self) -> Option<DateRange> {
        match self {
            Selection::AwaitingStart(Committed::Range(r)) => Some(*r),
            _ => None,
        }
    }

    pub(crate) fn awaiting_end(&self) -> bool {
        matches!(self, Selection::AwaitingEnd { .. })
    }

    /// Apply a click on `date`.  Whether the date may be clicked at all is up
    /// to the caller.
    ///
    /// A second click before the start date discards that start and begins a
    /// new selection at the clicked date.
    pub(crate) fn click(self, date: Date) -> Selection {
        match self {
            Selection::AwaitingStart(_) => Selection::AwaitingEnd { start: date },
            Selection::AwaitingEnd { start } => match DateRange::new(start, date) {
                Ok(range) => Selection::finalized(range),
                Err(_) => Selection::AwaitingEnd { start: date },
            },
        }
    }
}
