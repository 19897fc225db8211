//! Interactive menu front-end for the nudge task scheduler.
//!
//! # Responsibility
//! - Drive the core task store from a line-based menu loop.
//! - Wire startup (logging, persisted load, reminder worker) and shutdown
//!   (worker join, final save).

use log::warn;
use nudge_core::{
    default_log_level, init_logging, is_valid_time, parse_date, FileTaskRepository, Notifier,
    NotifyError, ReminderConfig, ReminderLoop, SystemClock, TaskStore, DATE_FORMAT,
    FIELD_DELIMITER, TIME_FORMAT,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

const DEFAULT_TASK_FILE: &str = "tasks.txt";

/// Prints due-task reminders to the terminal.
///
/// Stands in for a desktop notification backend; delivery is best-effort
/// either way, so printing never fails the worker.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        println!("\nReminder: {title} ({message})");
        Ok(())
    }
}

fn main() {
    let task_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_TASK_FILE.to_string());

    let log_dir = std::env::current_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|_| std::env::temp_dir().join("nudge-logs"));
    if let Err(err) = init_logging(default_log_level(), &log_dir) {
        eprintln!("Warning: logging disabled: {err}");
    }

    let store = Arc::new(TaskStore::open(FileTaskRepository::new(&task_file)));
    let reminder = match ReminderLoop::start(
        Arc::clone(&store),
        SystemClock,
        ConsoleNotifier,
        ReminderConfig::default(),
    ) {
        Ok(reminder) => Some(reminder),
        Err(err) => {
            warn!("event=cli_start module=cli status=reminder_spawn_failed error={err}");
            eprintln!("Warning: reminders disabled: {err}");
            None
        }
    };

    run_menu(&store);

    if let Some(reminder) = reminder {
        reminder.stop();
    }
    if let Err(err) = store.persist() {
        warn!("event=cli_exit module=cli status=final_save_failed error={err}");
        eprintln!("Warning: could not save tasks: {err}");
    }
    println!("\nExiting the program. Goodbye!");
}

fn run_menu(store: &TaskStore<FileTaskRepository>) {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        prompt(
            "\nScheduler Menu:\n\
             1. Add Task\n\
             2. View Tasks\n\
             3. Delete Task\n\
             4. Exit\n\
             Enter your choice: ",
        );
        let Some(choice) = read_line(&mut input) else {
            return;
        };
        match choice.trim() {
            "1" => add_task(store, &mut input),
            "2" => view_tasks(store),
            "3" => delete_task(store, &mut input),
            "4" => return,
            _ => println!("\nInvalid choice. Please try again."),
        }
    }
}

fn add_task(store: &TaskStore<FileTaskRepository>, input: &mut impl BufRead) {
    let Some(title) = prompt_field(
        input,
        "Enter task title: ",
        "Error: title must be non-empty and contain no commas.",
        |text| !text.is_empty() && !text.contains(FIELD_DELIMITER),
    ) else {
        return;
    };
    let Some(date) = prompt_field(
        input,
        "Enter task date (DD/MM/YYYY): ",
        "Error: invalid date. Please use DD/MM/YYYY.",
        |text| parse_date(text).is_ok(),
    ) else {
        return;
    };
    let Some(time) = prompt_field(
        input,
        "Enter task time (HH:MM): ",
        "Error: Invalid time format. Please use HH:MM (24-hour format).",
        is_valid_time,
    ) else {
        return;
    };

    match store.add(&title, &date, &time) {
        Ok(_) => println!("\nTask added successfully!"),
        Err(err) => println!("\nError: {err}"),
    }
}

fn view_tasks(store: &TaskStore<FileTaskRepository>) {
    let tasks = store.list();
    if tasks.is_empty() {
        println!("\nNo tasks scheduled.");
        return;
    }
    println!("\nScheduled Tasks:");
    for (position, task) in tasks.iter().enumerate() {
        println!(
            "{}. Title: {}, Date: {}, Time: {}",
            position + 1,
            task.title,
            task.date.format(DATE_FORMAT),
            task.time.format(TIME_FORMAT)
        );
    }
}

fn delete_task(store: &TaskStore<FileTaskRepository>, input: &mut impl BufRead) {
    view_tasks(store);
    prompt("Enter the task number to delete (0 to cancel): ");
    let Some(line) = read_line(input) else {
        return;
    };
    let Ok(position) = line.trim().parse::<usize>() else {
        println!("\nError: please enter a task number.");
        return;
    };
    if position == 0 {
        println!("Returning to the main menu...");
        return;
    }
    match store.delete(position) {
        Ok(()) => println!("\nTask deleted successfully."),
        Err(err) => println!("\nError: {err}"),
    }
}

/// Re-prompts until `accept` passes, returning the trimmed value.
/// Returns `None` when input is exhausted.
fn prompt_field(
    input: &mut impl BufRead,
    prompt_text: &str,
    error_text: &str,
    accept: impl Fn(&str) -> bool,
) -> Option<String> {
    loop {
        prompt(prompt_text);
        let line = read_line(input)?;
        let value = line.trim().to_string();
        if accept(&value) {
            return Some(value);
        }
        println!("{error_text}");
    }
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}

fn read_line(input: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}
