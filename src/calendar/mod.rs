mod grid;
mod widget;
pub(crate) use self::grid::{MonthGrid, OutOfTimeError, YearMonth};
pub(crate) use self::widget::MonthView;
