//! Month grid derivation for the calendar pane.
//!
//! Everything here is a pure function of the task snapshot, the selected
//! date, the viewing user and "today". Dates are `chrono::NaiveDate`
//! (proleptic Gregorian, no timezone) and are formatted explicitly, so the
//! grid is identical on every host.

use chrono::{Datelike, Months, NaiveDate};

use crate::models::Task;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Most task labels a single day cell shows before collapsing into "+N more".
pub const MAX_LABELS_PER_DAY: usize = 3;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// `YYYY-MM-DD`, the form task dates are stored in.
pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Weekday index of the 1st of the month, 0 = Sunday.
pub fn first_weekday(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// Same day one month earlier, clamped to the end of the shorter month.
pub fn prev_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// Same day one month later, clamped to the end of the shorter month.
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

/// Move to `day` within the month of `date`, clamped to the month length.
pub fn with_day(date: NaiveDate, day: u32) -> NaiveDate {
    let last = days_in_month(date.year(), date.month());
    date.with_day(day.clamp(1, last)).unwrap_or(date)
}

pub fn month_title(date: NaiveDate) -> String {
    format!("{} {}", MONTH_NAMES[date.month0() as usize], date.year())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLabel {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Own,
    Family,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: String,
    pub own: Vec<TaskLabel>,
    pub family: Vec<TaskLabel>,
    pub selected: bool,
    pub today: bool,
}

impl DayCell {
    pub fn total(&self) -> usize {
        self.own.len() + self.family.len()
    }

    /// Labels to draw: own tasks first, then family, capped at
    /// [`MAX_LABELS_PER_DAY`].
    pub fn visible_labels(&self) -> Vec<(Bucket, &TaskLabel)> {
        self.fit(MAX_LABELS_PER_DAY + 1).0
    }

    /// Count for the "+N more" indicator, zero when everything fits.
    pub fn overflow(&self) -> usize {
        self.fit(MAX_LABELS_PER_DAY + 1).1
    }

    /// Labels and overflow count for a cell with `lines` rows below the day
    /// number. When not every task fits, one row is kept for "+N more" and N
    /// counts exactly the labels left out.
    pub fn fit(&self, lines: usize) -> (Vec<(Bucket, &TaskLabel)>, usize) {
        let total = self.total();
        let shown = if total <= MAX_LABELS_PER_DAY.min(lines) {
            total
        } else {
            MAX_LABELS_PER_DAY.min(lines.saturating_sub(1))
        };
        let labels = self
            .own
            .iter()
            .map(|l| (Bucket::Own, l))
            .chain(self.family.iter().map(|l| (Bucket::Family, l)))
            .take(shown)
            .collect();
        (labels, total - shown)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub leading_blanks: u32,
    pub days_in_month: u32,
    pub cells: Vec<GridCell>,
}

impl MonthGrid {
    pub fn build(tasks: &[Task], selected: NaiveDate, viewer_id: &str, today: NaiveDate) -> Self {
        let year = selected.year();
        let month = selected.month();
        let leading_blanks = first_weekday(year, month);
        let days_in_month = days_in_month(year, month);

        let mut cells: Vec<GridCell> = (0..leading_blanks).map(|_| GridCell::Blank).collect();
        for day in 1..=days_in_month {
            let Some(day_date) = NaiveDate::from_ymd_opt(year, month, day) else {
                continue;
            };
            let date = date_key(day_date);
            let (own, family): (Vec<&Task>, Vec<&Task>) = tasks
                .iter()
                .filter(|t| t.date == date)
                .partition(|t| t.is_owned_by(viewer_id));

            cells.push(GridCell::Day(DayCell {
                day,
                date,
                own: own.into_iter().map(label).collect(),
                family: family.into_iter().map(label).collect(),
                selected: day == selected.day(),
                today: today == day_date,
            }));
        }

        Self {
            year,
            month,
            title: month_title(selected),
            leading_blanks,
            days_in_month,
            cells,
        }
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.cells.iter().find_map(|c| match c {
            GridCell::Day(cell) if cell.day == day => Some(cell),
            _ => None,
        })
    }

    /// Cells grouped into calendar rows of seven; the last row may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[GridCell]> {
        self.cells.chunks(7)
    }
}

fn label(task: &Task) -> TaskLabel {
    TaskLabel {
        id: task.id.clone(),
        title: task.title.clone(),
        completed: task.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn first_weekday_is_sunday_based() {
        // 2024-03-01 was a Friday, 2024-09-01 a Sunday.
        assert_eq!(first_weekday(2024, 3), 5);
        assert_eq!(first_weekday(2024, 9), 0);
    }

    #[test]
    fn month_shift_clamps_to_month_end() {
        assert_eq!(prev_month(ymd(2024, 3, 31)), ymd(2024, 2, 29));
        assert_eq!(next_month(ymd(2024, 1, 31)), ymd(2024, 2, 29));
        assert_eq!(next_month(ymd(2023, 12, 15)), ymd(2024, 1, 15));
        assert_eq!(prev_month(ymd(2024, 1, 10)), ymd(2023, 12, 10));
    }

    #[test]
    fn title_uses_english_month_names() {
        assert_eq!(month_title(ymd(2024, 3, 15)), "March 2024");
        assert_eq!(date_key(ymd(987, 1, 2)), "0987-01-02");
    }

    fn cell(own: usize, family: usize) -> DayCell {
        let labels = |prefix: &str, n: usize| {
            (0..n)
                .map(|i| TaskLabel {
                    id: format!("{prefix}{i}"),
                    title: format!("{prefix}{i}"),
                    completed: false,
                })
                .collect()
        };
        DayCell {
            day: 13,
            date: "2024-03-13".to_string(),
            own: labels("o", own),
            family: labels("f", family),
            selected: false,
            today: false,
        }
    }

    #[test]
    fn fit_keeps_a_row_for_the_overflow_line() {
        let busy = cell(2, 3);
        let (labels, more) = busy.fit(4);
        assert_eq!(labels.len(), 3);
        assert_eq!(more, 2);

        let (labels, more) = busy.fit(1);
        assert!(labels.is_empty());
        assert_eq!(more, 5);

        let three = cell(1, 2);
        let (labels, more) = three.fit(1);
        assert!(labels.is_empty());
        assert_eq!(more, 3);
        let (labels, more) = three.fit(2);
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].0, Bucket::Own);
        assert_eq!(more, 2);
        let (labels, more) = three.fit(3);
        assert_eq!(labels.len(), 3);
        assert_eq!(more, 0);
    }

    #[test]
    fn with_day_clamps() {
        assert_eq!(with_day(ymd(2023, 2, 1), 31), ymd(2023, 2, 28));
        assert_eq!(with_day(ymd(2023, 2, 10), 0), ymd(2023, 2, 1));
    }
}
