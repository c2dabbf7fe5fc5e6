use std::{
    env,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, Local};

use crate::DATA_DIR_NAME;

static LOG_WRITE_LOCK: Mutex<()> = Mutex::new(());

pub fn resolve_desktop_log_path(data_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    let base = data_dir.unwrap_or_else(|| env::temp_dir().join(DATA_DIR_NAME));
    base.join("logs").join(file_name)
}

pub(crate) fn format_log_line(category: &str, message: &str, timestamp: DateTime<Local>) -> String {
    format!(
        "[{}] [{}] {}\n",
        timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
        category,
        message.trim_end()
    )
}

fn rotated_path(path: &Path) -> PathBuf {
    let mut rotated = path.as_os_str().to_owned();
    rotated.push(".1");
    PathBuf::from(rotated)
}

/// Moves the log aside once it reaches `max_bytes`; a single `.1` backup is kept.
pub(crate) fn rotate_if_needed(path: &Path, max_bytes: u64) -> Result<bool, String> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(error) => {
            return Err(format!(
                "Failed to stat log file {}: {}",
                path.display(),
                error
            ))
        }
    };
    if size < max_bytes {
        return Ok(false);
    }

    let backup = rotated_path(path);
    if backup.exists() {
        fs::remove_file(&backup).map_err(|error| {
            format!("Failed to remove old log backup {}: {}", backup.display(), error)
        })?;
    }
    fs::rename(path, &backup).map_err(|error| {
        format!("Failed to rotate log file {}: {}", path.display(), error)
    })?;
    Ok(true)
}

pub(crate) fn append_log_line(path: &Path, line: &str, max_bytes: u64) -> Result<(), String> {
    let _guard = LOG_WRITE_LOCK
        .lock()
        .map_err(|_| "Log write lock poisoned.".to_string())?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!("Failed to create log directory {}: {}", parent.display(), error)
        })?;
    }
    rotate_if_needed(path, max_bytes)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log file {}: {}", path.display(), error))?;
    file.write_all(line.as_bytes())
        .map_err(|error| format!("Failed to write log file {}: {}", path.display(), error))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::{Local, TimeZone};

    use super::*;

    #[test]
    fn format_log_line_includes_timestamp_and_category() {
        let timestamp = Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let line = format_log_line("hardware", "sc stop finished\n", timestamp);
        assert_eq!(line, "[2025-03-14 09:26:53.000] [hardware] sc stop finished\n");
    }

    #[test]
    fn append_log_line_creates_parent_directories() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("logs").join("desktop.log");

        append_log_line(&path, "first\n", 1024).unwrap();
        append_log_line(&path, "second\n", 1024).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn append_log_line_rotates_when_limit_reached() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("desktop.log");
        fs::write(&path, "0123456789").unwrap();

        append_log_line(&path, "fresh\n", 10).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
        assert_eq!(
            fs::read_to_string(temp.path().join("desktop.log.1")).unwrap(),
            "0123456789"
        );
    }

    #[test]
    fn rotate_if_needed_ignores_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(rotate_if_needed(&temp.path().join("absent.log"), 1), Ok(false));
    }

    #[test]
    fn resolve_desktop_log_path_uses_logs_subdirectory() {
        let path = resolve_desktop_log_path(Some(PathBuf::from("/data")), "desktop.log");
        assert_eq!(path, PathBuf::from("/data").join("logs").join("desktop.log"));
    }
}
