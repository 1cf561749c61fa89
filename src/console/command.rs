//! Console commands (the dashboard's controls)

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show Data: grow the window by the current increment after a delay
    Show,
    /// Set the show-more increment
    Increment(usize),
    /// Run Predictions
    Predict,
    /// Back to the top: summary, chart and table from the first row
    Top,
    Table,
    Summary,
    Help,
    Quit,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`increment` expects a non-negative number, got: {0}")]
    BadIncrement(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next();

        match (name.as_str(), arg) {
            ("show" | "s", _) => Ok(Command::Show),
            ("increment" | "inc" | "i", Some(n)) => n
                .parse()
                .map(Command::Increment)
                .map_err(|_| CommandError::BadIncrement(n.to_string())),
            ("increment" | "inc" | "i", None) => Err(CommandError::BadIncrement(String::new())),
            ("predict" | "run" | "p", _) => Ok(Command::Predict),
            ("top" | "t", _) => Ok(Command::Top),
            ("table", _) => Ok(Command::Table),
            ("summary", _) => Ok(Command::Summary),
            ("help" | "?", _) => Ok(Command::Help),
            ("quit" | "exit" | "q", _) => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(line.trim().to_string())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  show              Show Data (adds the current increment after a short delay)
  increment <n>     Set the show-more increment
  predict           Run Predictions over the visible rows
  top               Summary, chart and table from the first row
  table             Table of the visible rows
  summary           Summary cards and chart
  help              This text
  quit              Exit";
