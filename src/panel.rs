use crate::selection::Selection;
use crate::selector::PredefinedRange;
use crate::theme::{
    panel::{KEY_STYLE, PROMPT_STYLE, WEEKEND_LIST_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget, Wrap},
};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

static LONG_DATE_FMT: &[BorrowedFormatItem<'_>] =
    format_description!("[weekday repr:short] [month repr:short] [day] [year]");

/// Format a date like "Sat Jun 01 2024"
pub(crate) fn long_date(date: Date) -> String {
    date.format(&LONG_DATE_FMT).unwrap_or_else(|_| date.to_string())
}

/// Row of shortcut "buttons": Today, each predefined range, and Refresh
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ShortcutBar<'a>(pub(crate) &'a [PredefinedRange]);

impl ShortcutBar<'_> {
    pub(crate) const HEIGHT: u16 = 2;

    fn button(key: &str, label: &str) -> [Span<'static>; 2] {
        [
            Span::styled(format!("[{key}]"), KEY_STYLE),
            Span::styled(format!(" {label}  "), BASE_STYLE),
        ]
    }
}

impl Widget for ShortcutBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        spans.extend(ShortcutBar::button("t", "Today"));
        for (i, shortcut) in std::iter::zip(1.., self.0) {
            spans.extend(ShortcutBar::button(&i.to_string(), shortcut.label()));
        }
        spans.extend(ShortcutBar::button("r", "Refresh"));
        Paragraph::new(Line::from(spans))
            .centered()
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}

/// Text description of the current selection and its weekends
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Summary<'a> {
    pub(crate) selection: Selection,
    pub(crate) weekends: &'a [Date],
}

impl Summary<'_> {
    fn to_text(self) -> Text<'static> {
        let mut lines = Vec::new();
        match (self.selection.start(), self.selection.end()) {
            (Some(start), Some(end)) => {
                lines.push(Line::styled(
                    format!("Selected Range: {} - {}", long_date(start), long_date(end)),
                    BASE_STYLE,
                ));
                if !self.weekends.is_empty() {
                    let dates = self
                        .weekends
                        .iter()
                        .map(|&d| long_date(d))
                        .collect::<Vec<_>>()
                        .join(", ");
                    lines.push(Line::styled(
                        format!("Weekend Dates: {dates}"),
                        WEEKEND_LIST_STYLE,
                    ));
                }
            }
            (Some(start), None) => {
                lines.push(Line::styled(
                    format!("Selected Start Date: {}", long_date(start)),
                    BASE_STYLE,
                ));
                if self.selection.awaiting_end() {
                    lines.push(Line::styled("Pick an end date", PROMPT_STYLE));
                }
            }
            _ => lines.push(Line::styled("No date selected", BASE_STYLE)),
        }
        Text::from(lines).centered()
    }
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.to_text())
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
