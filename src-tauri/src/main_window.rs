use tauri::{
    webview::WebviewBuilder, window::WindowBuilder, AppHandle, LogicalPosition, Manager,
    WebviewUrl,
};

use crate::{
    content_view, desktop_bridge, portals, ViewState, APP_NAME, MAIN_WINDOW_HEIGHT,
    MAIN_WINDOW_LABEL, MAIN_WINDOW_MIN_HEIGHT, MAIN_WINDOW_MIN_WIDTH, MAIN_WINDOW_WIDTH,
    SHELL_WEBVIEW_LABEL,
};

pub(crate) fn window_title(version: &str, view_label: Option<&str>) -> String {
    match view_label {
        Some(label) => format!("{APP_NAME} v{version} — {label}"),
        None => format!("{APP_NAME} v{version}"),
    }
}

/// Builds the main window: the sidebar shell fills it and the content view
/// is stacked on top, right of the sidebar.
pub fn create_main_window(app_handle: &AppHandle) -> Result<(), String> {
    let version = app_handle.package_info().version.to_string();
    let window = WindowBuilder::new(app_handle, MAIN_WINDOW_LABEL)
        .title(window_title(&version, None))
        .inner_size(MAIN_WINDOW_WIDTH, MAIN_WINDOW_HEIGHT)
        .min_inner_size(MAIN_WINDOW_MIN_WIDTH, MAIN_WINDOW_MIN_HEIGHT)
        .visible(false)
        .build()
        .map_err(|error| format!("Failed to create main window: {error}"))?;

    let size = window
        .inner_size()
        .map_err(|error| format!("Failed to read main window size: {error}"))?;
    let scale_factor = window
        .scale_factor()
        .map_err(|error| format!("Failed to read main window scale factor: {error}"))?;

    let shell = WebviewBuilder::new(SHELL_WEBVIEW_LABEL, WebviewUrl::App("index.html".into()))
        .initialization_script(desktop_bridge::DESKTOP_BRIDGE_SCRIPT)
        .auto_resize();
    window
        .add_child(
            shell,
            LogicalPosition::new(0.0, 0.0),
            size.to_logical::<f64>(scale_factor),
        )
        .map_err(|error| format!("Failed to create shell view: {error}"))?;

    let sidebar_width = app_handle.state::<ViewState>().sidebar_width();
    content_view::create_content_view(&window, sidebar_width)?;

    window
        .maximize()
        .map_err(|error| format!("Failed to maximize main window: {error}"))?;
    window
        .show()
        .map_err(|error| format!("Failed to show main window: {error}"))
}

pub fn update_main_window_title<F>(app_handle: &AppHandle, view_id: Option<&str>, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    let version = app_handle.package_info().version.to_string();
    let label = view_id.and_then(portals::label_for_view_id);
    if let Err(error) = window.set_title(&window_title(&version, label)) {
        log(&format!("failed to update main window title: {error}"));
    }
}

/// Brings the existing main window forward, e.g. when a second instance starts.
pub fn focus_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_window(MAIN_WINDOW_LABEL) else {
        log("focus skipped: main window not found");
        return;
    };

    if let Ok(true) = window.is_minimized() {
        if let Err(error) = window.unminimize() {
            log(&format!("failed to restore main window: {error}"));
        }
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::window_title;

    #[test]
    fn window_title_without_active_view() {
        assert_eq!(window_title("2.4.0", None), "Captura Unificada v2.4.0");
    }

    #[test]
    fn window_title_with_active_view() {
        assert_eq!(
            window_title("2.4.0", Some("SMART (CIN)")),
            "Captura Unificada v2.4.0 — SMART (CIN)"
        );
    }
}
