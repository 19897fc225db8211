use chrono::{NaiveDate, NaiveTime};
use nudge_core::{is_valid_time, parse_date, parse_time, Task, TaskValidationError};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn new_task_parses_and_sets_fields() {
    let task = Task::new("dentist", "02/01/2025", "09:30").unwrap();

    assert!(!task.id.is_nil());
    assert_eq!(task.title, "dentist");
    assert_eq!(task.date, date(2025, 1, 2));
    assert_eq!(task.time, time(9, 30));
}

#[test]
fn new_task_rejects_unusable_titles() {
    assert_eq!(
        Task::new("", "02/01/2025", "09:30"),
        Err(TaskValidationError::EmptyTitle)
    );
    assert_eq!(
        Task::new("   ", "02/01/2025", "09:30"),
        Err(TaskValidationError::EmptyTitle)
    );
    assert!(matches!(
        Task::new("pay rent, urgent", "02/01/2025", "09:30"),
        Err(TaskValidationError::TitleContainsDelimiter(_))
    ));
}

#[test]
fn valid_time_accepts_24_hour_hh_mm() {
    for accepted in ["0:00", "9:05", "09:05", "12:30", "19:59", "20:00", "23:59"] {
        assert!(is_valid_time(accepted), "expected `{accepted}` to pass");
    }
}

#[test]
fn valid_time_rejects_out_of_range_and_malformed_text() {
    for rejected in [
        "24:00", "12:60", "9:5", "09:5", "123:00", ":30", "12:", "12-30", "12:30 ", " 12:30",
        "ab:cd", "",
    ] {
        assert!(!is_valid_time(rejected), "expected `{rejected}` to fail");
    }
}

#[test]
fn parse_time_builds_minute_precise_times() {
    assert_eq!(parse_time("7:05").unwrap(), time(7, 5));
    assert_eq!(parse_time("23:59").unwrap(), time(23, 59));
    assert!(matches!(
        parse_time("24:00"),
        Err(TaskValidationError::InvalidTimeFormat(_))
    ));
}

#[test]
fn parse_date_rejects_impossible_calendar_days() {
    assert_eq!(parse_date("29/02/2024").unwrap(), date(2024, 2, 29));
    for rejected in ["29/02/2025", "31/04/2025", "00/01/2025", "2025-01-02", "nonsense"] {
        assert!(
            matches!(
                parse_date(rejected),
                Err(TaskValidationError::InvalidDateFormat(_))
            ),
            "expected `{rejected}` to fail"
        );
    }
}

#[test]
fn schedule_key_orders_by_date_then_time() {
    let mut tasks = vec![
        Task::new("second-day", "02/01/2025", "09:00").unwrap(),
        Task::new("first-day-late", "01/01/2025", "23:00").unwrap(),
        Task::new("first-day-early", "01/01/2025", "08:00").unwrap(),
    ];

    tasks.sort_by_key(Task::schedule_key);

    let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, ["first-day-early", "first-day-late", "second-day"]);
}

#[test]
fn due_matching_is_exact_to_the_minute() {
    let task = Task::new("standup", "05/03/2025", "10:15").unwrap();

    assert!(task.is_due_at(date(2025, 3, 5), time(10, 15)));
    assert!(!task.is_due_at(date(2025, 3, 5), time(10, 14)));
    assert!(!task.is_due_at(date(2025, 3, 5), time(10, 16)));
    assert!(!task.is_due_at(date(2025, 3, 6), time(10, 15)));
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task = Task::new("ship release", "02/01/2025", "09:00").unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], task.id.to_string());
    assert_eq!(json["title"], "ship release");
    assert_eq!(json["date"], "2025-01-02");
    assert_eq!(json["time"], "09:00:00");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}
