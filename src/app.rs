use crate::calendar::MonthView;
use crate::help::Help;
use crate::panel::{ShortcutBar, Summary};
use crate::selector::{Action, RangeObserver, RangeSelector};
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
    Terminal,
};
use std::io::{self, Write};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<O> {
    selector: RangeSelector<O>,
    state: AppState,
}

impl<O: RangeObserver> App<O> {
    pub(crate) fn new(selector: RangeSelector<O>) -> App<O> {
        App {
            selector,
            state: AppState::Picking,
        }
    }

    /// Run the event loop until the user quits, then hand back the observer
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<O>
    where
        io::Error: From<B::Error>,
    {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.selector.into_observer())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        io::Error: From<B::Error>,
    {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the key's action
    // was refused
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let cursor = self.selector.cursor();
                    self.act(Action::Click(cursor))
                }
                KeyCode::Char('<' | ',') | KeyCode::PageUp => self.act(Action::PreviousMonth),
                KeyCode::Char('>' | '.') | KeyCode::PageDown => self.act(Action::NextMonth),
                KeyCode::Char('{' | '[') => self.act(Action::PreviousYear),
                KeyCode::Char('}' | ']') => self.act(Action::NextYear),
                KeyCode::Char('t') => self.act(Action::Today),
                KeyCode::Char('r') => self.act(Action::Refresh),
                KeyCode::Char(c @ '1'..='9') => c
                    .to_digit(10)
                    .and_then(|d| usize::try_from(d).ok())
                    .is_some_and(|n| self.act(Action::Shortcut(n - 1))),
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn act(&mut self, action: Action) -> bool {
        match self.selector.apply(action) {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Refused {action:?}: {e}");
                false
            }
        }
    }

    fn move_cursor(&mut self, days: i64) -> bool {
        self.selector.move_cursor(days).is_ok()
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl<O: RangeObserver> Widget for &App<O> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let grid = self.selector.grid();
        let selection = self.selector.selection();
        let view = MonthView::new(&grid, self.selector.today())
            .selection(selection)
            .cursor(self.selector.cursor());
        let bar_height = if self.selector.predefined().is_some() {
            ShortcutBar::HEIGHT
        } else {
            0
        };
        let [calendar_area, _, bar_area, summary_area] = Layout::vertical([
            Constraint::Length(view.height()),
            Constraint::Length(1),
            Constraint::Length(bar_height),
            Constraint::Fill(1),
        ])
        .areas(area);
        view.render(calendar_area, buf);
        if let Some(shortcuts) = self.selector.predefined() {
            ShortcutBar(shortcuts).render(bar_area, buf);
        }
        Summary {
            selection,
            weekends: self.selector.weekends(),
        }
        .render(summary_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}
