use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::calendar::date_key;
use crate::models::Task;
use crate::roster::Roster;

/// One line of the selected day's task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaRow {
    pub task: Task,
    pub owner_name: String,
    pub is_own: bool,
}

/// Tasks due on `date`, earliest time first.
///
/// Times compare as strings, which orders correctly for zero-padded `HH:MM`.
/// The sort is stable, so equal times keep insertion order.
pub fn tasks_for_date(tasks: &[Task], date: NaiveDate, viewer_id: &str, roster: &Roster) -> Vec<AgendaRow> {
    let key = date_key(date);
    let mut rows: Vec<AgendaRow> = tasks
        .iter()
        .filter(|t| t.date == key)
        .map(|t| AgendaRow {
            owner_name: roster.display_name(&t.user_id).to_string(),
            is_own: t.is_owned_by(viewer_id),
            task: t.clone(),
        })
        .collect();
    rows.sort_by(|a, b| a.task.time.cmp(&b.task.time));
    rows
}

/// `"14:05"` -> `"2:05 PM"`. Anything that is not `HH:MM` comes back unchanged.
pub fn format_time(time: &str) -> String {
    match NaiveTime::parse_from_str(time, "%H:%M") {
        Ok(t) => {
            let (is_pm, hour) = t.hour12();
            format!("{}:{:02} {}", hour, t.minute(), if is_pm { "PM" } else { "AM" })
        }
        Err(_) => time.to_string(),
    }
}

pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{} tasks", count)
    }
}
