use std::path::{Path, PathBuf};

mod bank_repo;
mod mapping;
mod progress_repo;
mod schedule_repo;

pub const DEFAULT_BANK_FILE: &str = "problems.json";
pub const DEFAULT_PROGRESS_FILE: &str = "daily_progress.json";
pub const DEFAULT_SCHEDULE_FILE: &str = "weekly_schedule.json";

/// Locations of the three JSON documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPaths {
    pub bank: PathBuf,
    pub progress: PathBuf,
    pub schedule: PathBuf,
}

impl JsonPaths {
    /// Default file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            bank: dir.join(DEFAULT_BANK_FILE),
            progress: dir.join(DEFAULT_PROGRESS_FILE),
            schedule: dir.join(DEFAULT_SCHEDULE_FILE),
        }
    }
}

/// File-backed repository storing each document as pretty-printed JSON.
///
/// Every write replaces the whole file. There is no locking; callers keep a
/// single writer per file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    paths: JsonPaths,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(paths: JsonPaths) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &JsonPaths {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_dir_uses_default_file_names() {
        let paths = JsonPaths::in_dir("/data");
        assert_eq!(paths.bank, PathBuf::from("/data/problems.json"));
        assert_eq!(paths.progress, PathBuf::from("/data/daily_progress.json"));
        assert_eq!(paths.schedule, PathBuf::from("/data/weekly_schedule.json"));
    }
}
