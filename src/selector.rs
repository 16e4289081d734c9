use crate::calendar::{MonthGrid, OutOfTimeError, YearMonth};
use crate::range::{is_weekend, DateRange, RangeError};
use crate::selection::Selection;
use thiserror::Error;
use time::{Date, Duration};

/// Receives every finalized range together with the weekends inside it
pub(crate) trait RangeObserver {
    fn on_range_change(&mut self, range: DateRange, weekends: &[Date]);
}

/// A named shortcut range
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PredefinedRange {
    label: String,
    range: DateRange,
}

impl PredefinedRange {
    pub(crate) fn new<S: Into<String>>(label: S, range: DateRange) -> PredefinedRange {
        PredefinedRange {
            label: label.into(),
            range,
        }
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn range(&self) -> DateRange {
        self.range
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Action {
    PreviousYear,
    NextYear,
    PreviousMonth,
    NextMonth,
    Click(Date),
    Today,
    /// Apply the predefined range at the given zero-based position
    Shortcut(usize),
    Refresh,
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum SelectError {
    #[error("weekend date {0} cannot be selected")]
    Weekend(Date),
    #[error("shortcuts are not enabled")]
    NoShortcuts,
    #[error("there is no shortcut at position {0}")]
    NoSuchShortcut(usize),
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    OutOfTime(#[from] OutOfTimeError),
}

/// The date-range selector: displayed page, keyboard cursor, selection state
/// and the weekends of the last finalized range.
///
/// Invariant: `cursor` always lies within `page`
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RangeSelector<O> {
    today: Date,
    page: YearMonth,
    cursor: Date,
    selection: Selection,
    weekends: Vec<Date>,
    shortcuts: Option<Vec<PredefinedRange>>,
    observer: O,
}

impl<O: RangeObserver> RangeSelector<O> {
    pub(crate) fn new(today: Date, observer: O) -> Self {
        RangeSelector {
            today,
            page: YearMonth::containing(today),
            cursor: today,
            selection: Selection::default(),
            weekends: Vec::new(),
            shortcuts: None,
            observer,
        }
    }

    pub(crate) fn shortcuts(mut self, shortcuts: Option<Vec<PredefinedRange>>) -> Self {
        self.shortcuts = shortcuts;
        self
    }

    /// Display the month containing `date` with the cursor on `date`
    pub(crate) fn show_date(mut self, date: Date) -> Self {
        self.page = YearMonth::containing(date);
        self.cursor = date;
        self
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn cursor(&self) -> Date {
        self.cursor
    }

    pub(crate) fn selection(&self) -> Selection {
        self.selection
    }

    /// Weekends of the finalized range; empty while no range is finalized
    pub(crate) fn weekends(&self) -> &[Date] {
        &self.weekends
    }

    pub(crate) fn predefined(&self) -> Option<&[PredefinedRange]> {
        self.shortcuts.as_deref()
    }

    pub(crate) fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.page)
    }

    pub(crate) fn into_observer(self) -> O {
        self.observer
    }

    pub(crate) fn apply(&mut self, action: Action) -> Result<(), SelectError> {
        match action {
            Action::PreviousYear => self.turn_to(self.page.previous_year()?),
            Action::NextYear => self.turn_to(self.page.next_year()?),
            Action::PreviousMonth => self.turn_to(self.page.previous_month()?),
            Action::NextMonth => self.turn_to(self.page.next_month()?),
            Action::Click(date) => {
                if is_weekend(date) {
                    return Err(SelectError::Weekend(date));
                }
                let next = self.selection.click(date);
                match next.range() {
                    Some(range) => self.finalize(range)?,
                    None => {
                        self.selection = next;
                        self.weekends.clear();
                    }
                }
            }
            Action::Today => {
                self.require_shortcuts()?;
                self.selection = Selection::day(self.today);
                self.weekends.clear();
                self.return_to_today();
            }
            Action::Shortcut(i) => {
                let range = self
                    .require_shortcuts()?
                    .get(i)
                    .map(PredefinedRange::range)
                    .ok_or(SelectError::NoSuchShortcut(i))?;
                self.finalize(range)?;
                self.return_to_today();
            }
            Action::Refresh => {
                self.require_shortcuts()?;
                self.selection = Selection::default();
                self.weekends.clear();
                self.return_to_today();
            }
        }
        Ok(())
    }

    /// Move the cursor by `days` days, turning the page if the cursor leaves
    /// the displayed month
    pub(crate) fn move_cursor(&mut self, days: i64) -> Result<(), OutOfTimeError> {
        let target = self
            .cursor
            .checked_add(Duration::days(days))
            .ok_or(OutOfTimeError)?;
        self.cursor = target;
        self.page = YearMonth::containing(target);
        Ok(())
    }

    // Commits a finalized range, computes its weekends, and notifies the
    // observer.  On error, nothing changes.
    fn finalize(&mut self, range: DateRange) -> Result<(), RangeError> {
        let weekends = range.weekends()?;
        log::info!(
            "Selected {} through {} ({} weekend days)",
            range.start(),
            range.end(),
            weekends.len()
        );
        self.selection = Selection::finalized(range);
        self.weekends = weekends;
        self.observer.on_range_change(range, &self.weekends);
        Ok(())
    }

    fn turn_to(&mut self, page: YearMonth) {
        self.page = page;
        self.cursor = page.clamped_day(self.cursor.day());
    }

    fn return_to_today(&mut self) {
        self.page = YearMonth::containing(self.today);
        self.cursor = self.today;
    }

    fn require_shortcuts(&self) -> Result<&[PredefinedRange], SelectError> {
        self.shortcuts.as_deref().ok_or(SelectError::NoShortcuts)
    }
}
