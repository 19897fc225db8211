//! Task persistence over a line-oriented text file.
//!
//! # Responsibility
//! - Provide the durable save/load contract behind the task store.
//! - Own the `<title>,<date>,<time>` line format.
//!
//! # Invariants
//! - Save rewrites the whole file; every confirmed mutation is on disk.
//! - Load never fails on individual bad lines; it skips them with a
//!   warning and keeps the rest.
//! - The format is unescaped: a title containing the delimiter shears the
//!   line on load. Write paths refuse such titles; foreign writers are not
//!   guarded against (known data-integrity gap).

use crate::model::task::{parse_date, parse_time, Task, DATE_FORMAT, FIELD_DELIMITER, TIME_FORMAT};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence-layer error for task storage.
#[derive(Debug)]
pub enum RepoError {
    Io(std::io::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "task file I/O failed: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RepoError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Durable storage contract for the task collection.
pub trait TaskRepository {
    /// Replaces the persisted collection with `tasks`.
    fn save(&self, tasks: &[Task]) -> RepoResult<()>;
    /// Reads the persisted collection; missing storage yields an empty one.
    fn load(&self) -> RepoResult<Vec<Task>>;
}

/// File-backed task repository, one task per line.
pub struct FileTaskRepository {
    path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskRepository for FileTaskRepository {
    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        for task in tasks {
            writeln!(
                writer,
                "{}{FIELD_DELIMITER}{}{FIELD_DELIMITER}{}",
                task.title,
                task.date.format(DATE_FORMAT),
                task.time.format(TIME_FORMAT)
            )?;
        }
        writer.flush()?;
        info!(
            "event=tasks_save module=repo status=ok path={} count={}",
            self.path.display(),
            tasks.len()
        );
        Ok(())
    }

    fn load(&self) -> RepoResult<Vec<Task>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "event=tasks_load module=repo status=missing path={}; starting with no tasks",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut tasks = Vec::new();
        let mut skipped = 0usize;
        for (line_number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            match parse_line(&line) {
                Some(task) => tasks.push(task),
                None => {
                    skipped += 1;
                    warn!(
                        "event=tasks_load module=repo status=skipped_line path={} line={}",
                        self.path.display(),
                        line_number + 1
                    );
                }
            }
        }
        info!(
            "event=tasks_load module=repo status=ok path={} count={} skipped={}",
            self.path.display(),
            tasks.len(),
            skipped
        );
        Ok(tasks)
    }
}

/// Splits one persisted line on its first two delimiters and parses the
/// date/time fields. Returns `None` for any line that cannot yield a task.
fn parse_line(line: &str) -> Option<Task> {
    let mut fields = line.splitn(3, FIELD_DELIMITER);
    let title = fields.next()?;
    let date = fields.next()?;
    let time = fields.next()?;
    let date = parse_date(date).ok()?;
    let time = parse_time(time).ok()?;
    Some(Task::from_parts(title, date, time))
}
