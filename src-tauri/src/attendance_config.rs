use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{ATTENDANCE_CONFIG_FILE, ATTENDANCE_URL_TEMPLATE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceConfig {
    pub ip: String,
}

#[derive(Debug, Default, Deserialize)]
struct StoredAttendanceConfig {
    ip: Option<String>,
    /// Older builds stored the full address under `url`.
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct PersistedAttendanceConfig<'a> {
    ip: &'a str,
}

pub fn attendance_config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(ATTENDANCE_CONFIG_FILE)
}

/// Any unreadable, malformed or blank file reads as "not configured". `url`
/// is only consulted when `ip` is missing or empty.
pub fn read_attendance_config(config_dir: Option<&Path>) -> Option<AttendanceConfig> {
    let path = attendance_config_path(config_dir?);
    let raw = fs::read_to_string(path).ok()?;
    let stored: StoredAttendanceConfig = serde_json::from_str(&raw).ok()?;

    let raw = stored
        .ip
        .filter(|value| !value.is_empty())
        .or(stored.url)
        .unwrap_or_default();
    let ip = raw.trim();
    if ip.is_empty() {
        return None;
    }
    Some(AttendanceConfig { ip: ip.to_string() })
}

pub fn write_attendance_config(config_dir: Option<&Path>, raw_value: &str) -> Result<(), String> {
    let value = raw_value.trim();
    if value.is_empty() {
        return Err("Attendance address is empty.".to_string());
    }
    let config_dir =
        config_dir.ok_or_else(|| "Attendance config directory is unavailable.".to_string())?;

    fs::create_dir_all(config_dir).map_err(|error| {
        format!(
            "Failed to create attendance config directory {}: {}",
            config_dir.display(),
            error
        )
    })?;

    let path = attendance_config_path(config_dir);
    let serialized = serde_json::to_string_pretty(&PersistedAttendanceConfig { ip: value })
        .map_err(|error| format!("Failed to serialize attendance config: {error}"))?;
    fs::write(&path, serialized).map_err(|error| {
        format!(
            "Failed to write attendance config {}: {}",
            path.display(),
            error
        )
    })
}

/// Full `http(s)://` addresses are used as-is; anything else is treated as
/// the host of the counter page.
pub fn build_attendance_url(value: &str) -> String {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        return value.to_string();
    }
    ATTENDANCE_URL_TEMPLATE.replace("{IP}", value)
}
