mod app;
mod calendar;
mod config;
mod help;
mod logging;
mod panel;
mod range;
mod selection;
mod selector;
mod theme;
use crate::app::App;
use crate::config::{parse_ymd, Config};
use crate::range::DateRange;
use crate::selector::{RangeObserver, RangeSelector};
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use log::LevelFilter;
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        date: Option<Date>,
        config: Option<PathBuf>,
        shortcuts: bool,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut config = None;
        let mut shortcuts = true;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("no-shortcuts") => shortcuts = false,
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match parse_ymd(&value) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            date,
            config,
            shortcuts,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                date,
                config,
                shortcuts,
                log_file,
            } => {
                if let Some(path) = log_file {
                    logging::init(&path, LevelFilter::Debug)?;
                }
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let predefined = if shortcuts {
                    let config = match config {
                        Some(path) => Config::load(&path)?,
                        None => Config::builtin(),
                    };
                    Some(config.predefined_ranges(today)?)
                } else {
                    None
                };
                let mut selector =
                    RangeSelector::new(today, LastRange::default()).shortcuts(predefined);
                if let Some(date) = date {
                    selector = selector.show_date(date);
                }
                log::info!("Starting with today = {today}");
                let last = with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    App::new(selector)
                        .run(terminal)
                        .context("failed to run calendar")
                })?;
                if let Some(report) = last.report() {
                    print!("{report}");
                }
                Ok(())
            }
            Command::Help => {
                println!("Usage: rangepick [options] [YYYY-MM-DD]");
                println!();
                println!("Pick a date range from a terminal calendar and list its weekends");
                println!();
                println!("Options:");
                println!("  -c, --config FILE   Read shortcut ranges from FILE");
                println!("      --no-shortcuts  Hide the Today/shortcut/Refresh bar");
                println!("      --log-file FILE Append log messages to FILE");
                println!("  -h, --help          Display this help message and exit");
                println!("  -V, --version       Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Remembers the most recently finalized range for printing on exit
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct LastRange(Option<(DateRange, Vec<Date>)>);

impl LastRange {
    fn report(&self) -> Option<String> {
        let (range, weekends) = self.0.as_ref()?;
        let weekends = if weekends.is_empty() {
            String::from("none")
        } else {
            weekends
                .iter()
                .map(Date::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        Some(format!("{range}\nweekends: {weekends}\n"))
    }
}

impl RangeObserver for LastRange {
    fn on_range_change(&mut self, range: DateRange, weekends: &[Date]) {
        self.0 = Some((range, weekends.to_vec()));
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_args(args))
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(
            parse(&[]).unwrap(),
            Command::Run {
                date: None,
                config: None,
                shortcuts: true,
                log_file: None,
            }
        );
    }

    #[test]
    fn test_parse_all() {
        assert_eq!(
            parse(&[
                "--config",
                "ranges.toml",
                "--no-shortcuts",
                "--log-file=pick.log",
                "2024-06-03",
            ])
            .unwrap(),
            Command::Run {
                date: Some(date!(2024 - 06 - 03)),
                config: Some(PathBuf::from("ranges.toml")),
                shortcuts: false,
                log_file: Some(PathBuf::from("pick.log")),
            }
        );
    }

    #[test]
    fn test_parse_help_and_version() {
        assert_eq!(parse(&["-c", "x.toml", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["2024-13-01"]).is_err());
        assert!(parse(&["2024-06-01", "2024-06-02"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--config"]).is_err());
    }

    #[test]
    fn test_report() {
        let mut last = LastRange::default();
        assert_eq!(last.report(), None);
        let range = DateRange::new(date!(2024 - 06 - 01), date!(2024 - 06 - 09)).unwrap();
        last.on_range_change(
            range,
            &[
                date!(2024 - 06 - 01),
                date!(2024 - 06 - 02),
                date!(2024 - 06 - 08),
                date!(2024 - 06 - 09),
            ],
        );
        assert_eq!(
            last.report().unwrap(),
            "2024-06-01 2024-06-09\nweekends: 2024-06-01, 2024-06-02, 2024-06-08, 2024-06-09\n"
        );
        let range = DateRange::new(date!(2024 - 06 - 03), date!(2024 - 06 - 07)).unwrap();
        last.on_range_change(range, &[]);
        assert_eq!(
            last.report().unwrap(),
            "2024-06-03 2024-06-07\nweekends: none\n"
        );
    }
}
