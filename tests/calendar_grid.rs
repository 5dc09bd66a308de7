use chrono::NaiveDate;

use famboard::calendar::{self, Bucket, GridCell, MAX_LABELS_PER_DAY, MonthGrid, WEEKDAY_LABELS};
use famboard::{Roster, TaskDraft, TaskStore, User};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn member(id: &str) -> User {
    Roster::seeded().find_by_id(id).cloned().unwrap()
}

#[test]
fn weekday_labels_start_on_sunday() {
    assert_eq!(WEEKDAY_LABELS.len(), 7);
    assert_eq!(WEEKDAY_LABELS[0], "Sun");
    assert_eq!(WEEKDAY_LABELS[6], "Sat");
}

#[test]
fn cell_count_is_blanks_plus_days() {
    for (year, month, blanks, days) in [(2024, 2, 4, 29), (2023, 2, 3, 28), (2024, 3, 5, 31), (2024, 9, 0, 30)] {
        let grid = MonthGrid::build(&[], ymd(year, month, 1), "1", ymd(2000, 1, 1));
        assert_eq!(grid.leading_blanks, blanks, "{}-{}", year, month);
        assert_eq!(grid.days_in_month, days, "{}-{}", year, month);
        assert_eq!(grid.cells.len() as u32, blanks + days);
        assert!(grid.cells[..blanks as usize].iter().all(|c| *c == GridCell::Blank));
    }
}

#[test]
fn own_and_family_tasks_land_in_separate_buckets() {
    let parent = member("1");
    let child = member("2");
    let mut store = TaskStore::with_seed(9);
    let own = store.add_task(&parent, TaskDraft::new("Clean room", "2024-03-15", "09:00"));
    let family = store.add_task(&child, TaskDraft::new("Soccer practice", "2024-03-15", "16:00"));
    store.add_task(&child, TaskDraft::new("Next month", "2024-04-15", "16:00"));

    let grid = MonthGrid::build(store.tasks(), ymd(2024, 3, 15), &parent.id, ymd(2024, 3, 1));
    let day = grid.day(15).unwrap();
    assert_eq!(day.own.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec![own.id.as_str()]);
    assert_eq!(day.family.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec![family.id.as_str()]);
    assert!(day.selected);
    assert!(!day.today);
    assert!(grid.day(1).unwrap().today);

    // The same data seen by the child flips the buckets
    let grid = MonthGrid::build(store.tasks(), ymd(2024, 3, 15), &child.id, ymd(2024, 3, 1));
    let day = grid.day(15).unwrap();
    assert_eq!(day.own[0].title, "Soccer practice");
    assert_eq!(day.family[0].title, "Clean room");
}

#[test]
fn busy_day_shows_three_labels_and_overflow() {
    let parent = member("1");
    let spouse = member("3");
    let mut store = TaskStore::with_seed(10);
    store.add_task(&spouse, TaskDraft::new("Dentist", "2024-03-20", "08:00"));
    for title in ["Laundry", "Bills", "Garden", "Car wash"] {
        store.add_task(&parent, TaskDraft::new(title, "2024-03-20", "10:00"));
    }

    let grid = MonthGrid::build(store.tasks(), ymd(2024, 3, 1), &parent.id, ymd(2024, 3, 1));
    let day = grid.day(20).unwrap();
    assert_eq!(day.total(), 5);
    let visible = day.visible_labels();
    assert_eq!(visible.len(), MAX_LABELS_PER_DAY);
    assert!(visible.iter().all(|(bucket, _)| *bucket == Bucket::Own));
    assert_eq!(day.overflow(), 2);
    assert!(!day.selected);
}

#[test]
fn month_navigation_clamps_to_month_end() {
    assert_eq!(calendar::next_month(ymd(2024, 1, 31)), ymd(2024, 2, 29));
    assert_eq!(calendar::prev_month(ymd(2024, 3, 31)), ymd(2024, 2, 29));
    assert_eq!(calendar::next_month(ymd(2024, 12, 10)), ymd(2025, 1, 10));
    assert_eq!(calendar::prev_month(ymd(2024, 1, 10)), ymd(2023, 12, 10));
    assert_eq!(calendar::month_title(ymd(2024, 3, 15)), "March 2024");
}
