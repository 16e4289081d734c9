use super::grid::{MonthGrid, WeekdayExt, DAYS_IN_WEEK};
use crate::range::is_weekend;
use crate::selection::Selection;
use crate::theme::{
    CURSOR_STYLE, ENDPOINT_STYLE, IN_RANGE_STYLE, TITLE_STYLE, WEEKDAY_STYLE, WEEKEND_STYLE,
};
use ratatui::{layout::Flex, prelude::*, widgets::*};
use time::Date;

static HEADER: &str = " Su   Mo   Tu   We   Th   Fr   Sa ";

const PREV_BUTTONS: &str = "<< <";

const NEXT_BUTTONS: &str = "> >>";

/// Width of the month view in columns
pub(crate) const MAIN_WIDTH: u16 = 34;

/// Lines above the first week: title, weekday header, and rule
const HEADER_LINES: u16 = 3;

/// Number of columns per day of week, including the gap after the day
const DAY_WIDTH: u16 = 5;

const ACS_HLINE: char = '─';

/// One month of the calendar with the current selection drawn over it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    grid: &'a MonthGrid,
    today: Date,
    selection: Selection,
    cursor: Option<Date>,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(grid: &'a MonthGrid, today: Date) -> Self {
        MonthView {
            grid,
            today,
            selection: Selection::default(),
            cursor: None,
        }
    }

    pub(crate) fn selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub(crate) fn cursor(mut self, cursor: Date) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Number of lines needed to draw the month
    pub(crate) fn height(&self) -> u16 {
        HEADER_LINES + u16::try_from(self.grid.week_count()).unwrap_or(u16::MAX)
    }

    fn day_style(&self, date: Date) -> Style {
        let mut style = Style::new();
        if is_weekend(date) {
            style = style.patch(WEEKEND_STYLE);
        }
        if self.selection.range().is_some_and(|r| r.contains(date)) {
            style = style.patch(IN_RANGE_STYLE);
        }
        if self.selection.start() == Some(date) || self.selection.end() == Some(date) {
            style = style.patch(ENDPOINT_STYLE);
        }
        if self.cursor == Some(date) {
            style = style.patch(CURSOR_STYLE);
        }
        style
    }

    fn show_day(&self, date: Date) -> Span<'static> {
        let s = if date == self.today {
            format!("[{:2}]", date.day())
        } else {
            format!(" {:2} ", date.day())
        };
        Span::styled(s, self.day_style(date))
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([MAIN_WIDTH.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(&self.grid.page().to_string());
        canvas.draw_header();
        for (i, week) in std::iter::zip(0u16.., self.grid.weeks()) {
            for date in week.into_iter().flatten() {
                canvas.draw_day(i, date, self.show_day(date));
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        self.mvprint(0, 0, PREV_BUTTONS, None);
        self.mvprint(
            0,
            MAIN_WIDTH.saturating_sub(width) / 2,
            title,
            Some(TITLE_STYLE),
        );
        self.mvprint(0, MAIN_WIDTH - 4, NEXT_BUTTONS, None);
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, date: Date, s: Span<'_>) {
        let column = date.weekday().index0();
        debug_assert!(
            usize::from(column) < DAYS_IN_WEEK,
            "weekday index should be less than seven"
        );
        self.mvprint(
            week_no + HEADER_LINES,
            DAY_WIDTH * column,
            s.content,
            Some(s.style),
        );
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // A Paragraph truncates text running past the right edge; the
            // Rect handed to it must stay inside the buffer.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::YearMonth;
    use crate::range::DateRange;
    use crate::theme::BASE_STYLE;
    use time::macros::date;

    fn june_2024() -> MonthGrid {
        MonthGrid::new(YearMonth::containing(date!(2024 - 06 - 01)))
    }

    fn expected_june() -> Buffer {
        let mut expected = Buffer::with_lines([
            "<< <        June 2024         > >>",
            " Su   Mo   Tu   We   Th   Fr   Sa ",
            "──────────────────────────────────",
            "                                1 ",
            "  2    3    4    5    6    7    8 ",
            "  9   10   11  [12]  13   14   15 ",
            " 16   17   18   19   20   21   22 ",
            " 23   24   25   26   27   28   29 ",
            " 30                               ",
        ]);
        expected.set_style(*expected.area(), BASE_STYLE);
        expected.set_style(Rect::new(12, 0, 9, 1), TITLE_STYLE);
        expected.set_style(Rect::new(0, 1, 34, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(30, 3, 4, 1), WEEKEND_STYLE);
        for y in 4..8 {
            expected.set_style(Rect::new(0, y, 4, 1), WEEKEND_STYLE);
            expected.set_style(Rect::new(30, y, 4, 1), WEEKEND_STYLE);
        }
        expected.set_style(Rect::new(0, 8, 4, 1), WEEKEND_STYLE);
        expected
    }

    #[test]
    fn test_render_month() {
        let grid = june_2024();
        let view = MonthView::new(&grid, date!(2024 - 06 - 12)).cursor(date!(2024 - 06 - 12));
        assert_eq!(view.height(), 9);
        let area = Rect::new(0, 0, MAIN_WIDTH, view.height());
        let mut buffer = Buffer::empty(area);
        buffer.set_style(area, BASE_STYLE);
        view.render(area, &mut buffer);
        let mut expected = expected_june();
        expected.set_style(Rect::new(15, 5, 4, 1), CURSOR_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_render_selection() {
        let grid = june_2024();
        let range = DateRange::new(date!(2024 - 06 - 13), date!(2024 - 06 - 17)).unwrap();
        let view =
            MonthView::new(&grid, date!(2024 - 06 - 12)).selection(Selection::finalized(range));
        let area = Rect::new(0, 0, MAIN_WIDTH, view.height());
        let mut buffer = Buffer::empty(area);
        buffer.set_style(area, BASE_STYLE);
        view.render(area, &mut buffer);
        let mut expected = expected_june();
        // 13, 14, 15 on the third row; 16 and 17 on the fourth
        for x in [20, 25, 30] {
            expected.set_style(Rect::new(x, 5, 4, 1), IN_RANGE_STYLE);
        }
        for x in [0, 5] {
            expected.set_style(Rect::new(x, 6, 4, 1), IN_RANGE_STYLE);
        }
        expected.set_style(Rect::new(20, 5, 4, 1), ENDPOINT_STYLE);
        expected.set_style(Rect::new(5, 6, 4, 1), ENDPOINT_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_render_centered() {
        let grid = june_2024();
        let view = MonthView::new(&grid, date!(2024 - 06 - 12));
        let area = Rect::new(0, 0, 40, view.height());
        let mut buffer = Buffer::empty(area);
        view.render(area, &mut buffer);
        assert_eq!(buffer[(3, 2)].symbol(), "─");
        assert_eq!(buffer[(2, 2)].symbol(), " ");
        assert_eq!(buffer[(36, 2)].symbol(), "─");
        assert_eq!(buffer[(37, 2)].symbol(), " ");
    }
}
