use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKEND_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const IN_RANGE_STYLE: Style = Style::new().bg(Color::Blue);

pub(crate) const ENDPOINT_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

pub(crate) const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub(crate) mod panel {
    use super::*;

    pub(crate) const KEY_STYLE: Style = BASE_STYLE
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD);

    pub(crate) const WEEKEND_LIST_STYLE: Style = BASE_STYLE.fg(Color::Gray);

    pub(crate) const PROMPT_STYLE: Style = BASE_STYLE
        .fg(Color::LightGreen)
        .add_modifier(Modifier::ITALIC);
}
