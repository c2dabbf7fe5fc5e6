use tauri::{AppHandle, Emitter, Manager, WebviewUrl, WebviewWindowBuilder};
use url::Url;

use crate::{
    main_window, portals, runtime_paths, ATTENDANCE_SESSION_DIR, ATTENDANCE_WINDOW_CLOSED_EVENT,
    ATTENDANCE_WINDOW_HEIGHT, ATTENDANCE_WINDOW_LABEL, ATTENDANCE_WINDOW_MIN_HEIGHT,
    ATTENDANCE_WINDOW_MIN_WIDTH, ATTENDANCE_WINDOW_OPENED_EVENT, ATTENDANCE_WINDOW_WIDTH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceWindowOutcome {
    Focused,
    Created,
}

pub fn is_attendance_window_open(app_handle: &AppHandle) -> bool {
    app_handle
        .get_webview_window(ATTENDANCE_WINDOW_LABEL)
        .is_some()
}

/// Shows the attendance window, creating it on first use. The page keeps its
/// own session so clearing the portal cache does not log the counter out.
pub fn open_or_focus_attendance_window(
    app_handle: &AppHandle,
    raw_url: &str,
) -> Result<AttendanceWindowOutcome, String> {
    if let Some(window) = app_handle.get_webview_window(ATTENDANCE_WINDOW_LABEL) {
        window
            .show()
            .map_err(|error| format!("Failed to show attendance window: {error}"))?;
        window
            .set_focus()
            .map_err(|error| format!("Failed to focus attendance window: {error}"))?;
        return Ok(AttendanceWindowOutcome::Focused);
    }

    let url = Url::parse(raw_url)
        .map_err(|error| format!("Invalid attendance url {raw_url}: {error}"))?;
    let version = app_handle.package_info().version.to_string();
    let title = main_window::window_title(&version, Some(portals::ATTENDANCE_PORTAL_LABEL));

    let mut builder =
        WebviewWindowBuilder::new(app_handle, ATTENDANCE_WINDOW_LABEL, WebviewUrl::External(url))
            .title(title)
            .inner_size(ATTENDANCE_WINDOW_WIDTH, ATTENDANCE_WINDOW_HEIGHT)
            .min_inner_size(ATTENDANCE_WINDOW_MIN_WIDTH, ATTENDANCE_WINDOW_MIN_HEIGHT);
    if let Some(data_dir) = runtime_paths::webview_data_dir(ATTENDANCE_SESSION_DIR) {
        builder = builder.data_directory(data_dir);
    }
    builder
        .build()
        .map_err(|error| format!("Failed to create attendance window: {error}"))?;

    app_handle
        .emit(ATTENDANCE_WINDOW_OPENED_EVENT, ())
        .map_err(|error| format!("Failed to emit attendance window opened: {error}"))?;
    Ok(AttendanceWindowOutcome::Created)
}

pub fn reload_attendance_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(ATTENDANCE_WINDOW_LABEL) else {
        return;
    };
    if let Err(error) = window.reload() {
        log(&format!("failed to reload attendance window: {error}"));
    }
}

pub fn notify_attendance_window_closed<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    if let Err(error) = app_handle.emit(ATTENDANCE_WINDOW_CLOSED_EVENT, ()) {
        log(&format!("failed to emit attendance window closed: {error}"));
    }
}
