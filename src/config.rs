use crate::range::{DateRange, RangeError};
use crate::selector::PredefinedRange;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Duration};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Shortcuts are bound to the keys 1 through 9
pub(crate) const MAX_SHORTCUTS: usize = 9;

pub(crate) fn parse_ymd(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, &YMD_FMT)
}

/// Contents of a configuration file:
///
/// ```toml
/// [[shortcut]]
/// label = "Last 7 Days"
/// last_days = 7
///
/// [[shortcut]]
/// label = "Q1 2024"
/// start = "2024-01-01"
/// end = "2024-03-31"
/// ```
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default, rename = "shortcut")]
    shortcuts: Vec<ShortcutEntry>,
}

impl Config {
    /// The shortcuts used when no configuration file is given
    pub(crate) fn builtin() -> Config {
        Config {
            shortcuts: vec![
                ShortcutEntry::last_days("Last 7 Days", 7),
                ShortcutEntry::last_days("Last 30 Days", 30),
            ],
        }
    }

    pub(crate) fn load(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Config::parse_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub(crate) fn parse_toml(s: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(s)
    }

    /// Resolve the configured shortcuts against the given current date
    pub(crate) fn predefined_ranges(
        &self,
        today: Date,
    ) -> Result<Vec<PredefinedRange>, ConfigError> {
        if self.shortcuts.len() > MAX_SHORTCUTS {
            return Err(ConfigError::TooManyShortcuts(self.shortcuts.len()));
        }
        self.shortcuts
            .iter()
            .map(|entry| {
                entry
                    .resolve(today)
                    .map_err(|problem| ConfigError::Shortcut {
                        label: entry.label.clone(),
                        problem,
                    })
            })
            .collect()
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
struct ShortcutEntry {
    label: String,
    last_days: Option<u32>,
    start: Option<String>,
    end: Option<String>,
}

impl ShortcutEntry {
    fn last_days(label: &str, days: u32) -> ShortcutEntry {
        ShortcutEntry {
            label: label.to_owned(),
            last_days: Some(days),
            start: None,
            end: None,
        }
    }

    fn resolve(&self, today: Date) -> Result<PredefinedRange, ShortcutProblem> {
        let range = match (self.last_days, &self.start, &self.end) {
            (Some(days), None, None) => {
                let start = today
                    .checked_sub(Duration::days(days.into()))
                    .ok_or(ShortcutProblem::OutOfTime)?;
                DateRange::new(start, today)?
            }
            (None, Some(start), Some(end)) => {
                DateRange::new(parse_date(start)?, parse_date(end)?)?
            }
            _ => return Err(ShortcutProblem::Ambiguous),
        };
        range.ensure_bounded()?;
        Ok(PredefinedRange::new(self.label.clone(), range))
    }
}

fn parse_date(s: &str) -> Result<Date, ShortcutProblem> {
    parse_ymd(s).map_err(|_| ShortcutProblem::BadDate(s.to_owned()))
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read configuration file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0} shortcuts configured; at most {max} are supported", max = MAX_SHORTCUTS)]
    TooManyShortcuts(usize),
    #[error("invalid shortcut {label:?}")]
    Shortcut {
        label: String,
        #[source]
        problem: ShortcutProblem,
    },
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ShortcutProblem {
    #[error("exactly one of `last_days` or `start` and `end` must be given")]
    Ambiguous,
    #[error("invalid date {0:?}; expected YYYY-MM-DD")]
    BadDate(String),
    #[error("range reaches before the earliest supported date")]
    OutOfTime,
    #[error(transparent)]
    Range(#[from] RangeError),
}
