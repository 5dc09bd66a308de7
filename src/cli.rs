use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::calendar::{GridCell, MonthGrid, WEEKDAY_LABELS};
use crate::roster::Roster;
use crate::utils::{parse_date, today};

#[derive(Parser)]
#[command(name = "famboard")]
#[command(about = "Family task and calendar dashboard for the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (separate dev config and log directory)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Print the family roster as JSON
    Roster,
    /// Print the calendar grid for a month
    Month {
        /// Any date in the month to show (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Failed to serialize roster: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Handle the roster command
pub fn handle_roster(roster: &Roster) -> Result<(), CliError> {
    println!("{}", roster_json(roster)?);
    Ok(())
}

/// Members as pretty JSON; passwords are never serialized
pub fn roster_json(roster: &Roster) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(roster.members())?)
}

/// Handle the month command
pub fn handle_month(date: Option<String>) -> Result<(), CliError> {
    let selected = match date {
        Some(date_str) => parse_date(&date_str)
            .map_err(|e| CliError::DateParseError(format!("Invalid date format '{}': {}", date_str, e)))?,
        None => today(),
    };
    // No viewer and no tasks: the command shows the bare month layout
    let grid = MonthGrid::build(&[], selected, "", today());
    print!("{}", format_month(&grid));
    Ok(())
}

/// Plain-text month grid. The selected day is wrapped in brackets and
/// today is marked with `*`.
pub fn format_month(grid: &MonthGrid) -> String {
    let mut out = format!("{:^35}\n", grid.title);
    for label in WEEKDAY_LABELS {
        out.push_str(&format!("{:>5}", label));
    }
    out.push('\n');

    for week in grid.weeks() {
        for cell in week {
            let text = match cell {
                GridCell::Blank => String::new(),
                GridCell::Day(day) if day.selected => format!("[{}]", day.day),
                GridCell::Day(day) if day.today => format!("{}*", day.day),
                GridCell::Day(day) => day.day.to_string(),
            };
            out.push_str(&format!("{:>5}", text));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn roster_json_has_no_passwords() {
        let json = roster_json(&Roster::seeded()).unwrap();
        assert!(json.contains("\"parent@example.com\""));
        assert!(json.contains("\"family1\""));
        assert!(!json.contains("password"));
    }

    #[test]
    fn month_text_marks_selected_day() {
        let selected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let grid = MonthGrid::build(&[], selected, "", today);
        let text = format_month(&grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "March 2024");
        assert_eq!(lines[1], "  Sun  Mon  Tue  Wed  Thu  Fri  Sat");
        // March 2024 starts on a Friday
        assert_eq!(lines[2], format!("{}{}", " ".repeat(28), "1*    2"));
        assert!(lines[4].contains("[15]"));
        assert_eq!(lines.len(), 2 + 6);
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(matches!(handle_month(Some("2024-13-01".to_string())), Err(CliError::DateParseError(_))));
    }
}
