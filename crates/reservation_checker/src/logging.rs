//! Logger setup: a daily log file, or stderr when the file cannot be opened.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use env_logger::{Env, Target};

/// `{log_dir}/reservation_checker_YYYYMMDD.log`
pub fn log_file_path(log_dir: &Path, day: NaiveDate) -> PathBuf {
    log_dir.join(format!("reservation_checker_{}.log", day.format("%Y%m%d")))
}

/// Log everything at `info` and above (or `RUST_LOG`) to today's log file.
pub fn init_file_logging(log_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let path = log_file_path(log_dir, Local::now().date_naive());
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .try_init()
        .context("logger already initialised")?;

    Ok(path)
}

/// Errors only, on stderr.
pub fn init_stderr_logging() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("error"))
        .try_init()
        .context("logger already initialised")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path() {
        let day = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
        assert_eq!(
            log_file_path(Path::new("logs"), day),
            PathBuf::from("logs/reservation_checker_20250805.log")
        );
    }

    #[test]
    fn test_init_file_logging_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        // Another test may have installed the global logger first; the directory
        // and file are created before that matters.
        let _ = init_file_logging(&log_dir);

        let expected = log_file_path(&log_dir, Local::now().date_naive());
        assert!(expected.exists());
    }

    #[test]
    fn test_second_logger_init_is_reported() {
        // Whichever call installs the global logger, the next one must fail loudly
        let _ = init_stderr_logging();
        let err = init_stderr_logging().unwrap_err();
        assert!(err.to_string().contains("already initialised"));
    }
}
