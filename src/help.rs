use ratatui::{
    buffer::Buffer,
    layout::{Flex, HorizontalAlignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "h, LEFT         Previous day\n",
    "l, RIGHT        Next day\n",
    "k, UP           Previous week\n",
    "j, DOWN         Next week\n",
    "ENTER, SPACE    Pick the day under the cursor\n",
    "<  ,  PAGE UP   Previous month\n",
    ">  .  PAGE DOWN Next month\n",
    "{  [            Previous year\n",
    "}  ]            Next year\n",
    "t               Start a selection at today\n",
    "1-9             Apply a shortcut range\n",
    "r               Clear the selection\n",
    "?               Show this help\n",
    "q, ESC, CTRL-C  Quit\n",
    "\n",
    "Weekends cannot be picked.\n",
    "Press the Any Key to dismiss.\n",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = TEXT.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>();
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(HorizontalAlignment::Center),
            )
            .style(self.0);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2).min(area.width),
            height: help_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        para.render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::BASE_STYLE;

    #[test]
    fn test_help_box() {
        let area = Rect::new(0, 0, 60, 22);
        let mut buffer = Buffer::empty(area);
        Help(BASE_STYLE).render(area, &mut buffer);
        let rows = buffer
            .content()
            .chunks(60)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>();
        let top = rows
            .iter()
            .position(|r| r.contains(" Commands "))
            .unwrap();
        assert!(rows[top].trim().starts_with('┌'));
        assert!(rows[top + 1].contains("│h, LEFT         Previous day"));
        assert!(rows[top + 6].contains("│<  ,  PAGE UP   Previous month"));
        assert!(rows[top + 7].contains("│>  .  PAGE DOWN Next month"));
        assert!(rows[top + 8].contains("│{  [            Previous year"));
        assert!(rows[top + 9].contains("│}  ]            Next year"));
        assert!(rows[top + 14].contains("│q, ESC, CTRL-C  Quit"));
        assert!(rows[top + 17].contains("│Press the Any Key to dismiss."));
        assert!(rows[top + 18].trim().starts_with('└'));
    }
}
