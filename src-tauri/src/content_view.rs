use tauri::{
    webview::WebviewBuilder, AppHandle, LogicalPosition, LogicalSize, Manager, Webview, WebviewUrl,
    Window,
};
use url::Url;

use crate::{
    runtime_paths, ViewState, BLANK_PAGE_URL, CONTENT_SESSION_DIR, CONTENT_WEBVIEW_LABEL,
    MAIN_WINDOW_LABEL, TOPBAR_HEIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ContentBounds {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

/// Area right of the sidebar and below the top bar, in logical pixels.
pub(crate) fn content_bounds(
    window_width: f64,
    window_height: f64,
    sidebar_width: f64,
    topbar_height: f64,
) -> ContentBounds {
    ContentBounds {
        x: sidebar_width,
        y: topbar_height,
        width: (window_width - sidebar_width).max(0.0),
        height: (window_height - topbar_height).max(0.0),
    }
}

/// Bounds to push to the content view, or `None` while no portal has started.
pub(crate) fn bounds_for_state(
    state: &ViewState,
    window_width: f64,
    window_height: f64,
) -> Option<ContentBounds> {
    if !state.is_started() {
        return None;
    }
    Some(content_bounds(
        window_width,
        window_height,
        state.sidebar_width(),
        TOPBAR_HEIGHT,
    ))
}

fn window_logical_size(window: &Window) -> Result<(f64, f64), String> {
    let size = window
        .inner_size()
        .map_err(|error| format!("Failed to read main window size: {error}"))?;
    let scale_factor = window
        .scale_factor()
        .map_err(|error| format!("Failed to read main window scale factor: {error}"))?;
    let logical = size.to_logical::<f64>(scale_factor);
    Ok((logical.width, logical.height))
}

fn content_webview(app_handle: &AppHandle) -> Option<Webview> {
    app_handle.get_webview(CONTENT_WEBVIEW_LABEL)
}

/// Adds the portal surface on top of the shell webview. It starts hidden on
/// `about:blank` with its own data directory, separate from the attendance
/// window.
pub fn create_content_view(window: &Window, sidebar_width: f64) -> Result<(), String> {
    let blank = Url::parse(BLANK_PAGE_URL)
        .map_err(|error| format!("Invalid blank page url: {error}"))?;
    let mut builder = WebviewBuilder::new(CONTENT_WEBVIEW_LABEL, WebviewUrl::External(blank));
    if let Some(data_dir) = runtime_paths::webview_data_dir(CONTENT_SESSION_DIR) {
        builder = builder.data_directory(data_dir);
    }

    let (width, height) = window_logical_size(window)?;
    let bounds = content_bounds(width, height, sidebar_width, TOPBAR_HEIGHT);
    let webview = window
        .add_child(
            builder,
            LogicalPosition::new(bounds.x, bounds.y),
            LogicalSize::new(bounds.width, bounds.height),
        )
        .map_err(|error| format!("Failed to create content view: {error}"))?;
    webview
        .hide()
        .map_err(|error| format!("Failed to hide content view: {error}"))
}

/// Re-applies content bounds after a window resize or sidebar toggle. No-op
/// until a portal has been opened.
pub fn adjust_content_view<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let state = app_handle.state::<ViewState>();
    let Some(window) = app_handle.get_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    let Some(webview) = content_webview(app_handle) else {
        return;
    };

    let (width, height) = match window_logical_size(&window) {
        Ok(size) => size,
        Err(error) => {
            log(&error);
            return;
        }
    };
    let Some(bounds) = bounds_for_state(&state, width, height) else {
        return;
    };
    if let Err(error) = webview.set_position(LogicalPosition::new(bounds.x, bounds.y)) {
        log(&format!("failed to move content view: {error}"));
    }
    if let Err(error) = webview.set_size(LogicalSize::new(bounds.width, bounds.height)) {
        log(&format!("failed to resize content view: {error}"));
    }
}

pub fn set_content_visible<F>(app_handle: &AppHandle, visible: bool, log: F)
where
    F: Fn(&str),
{
    let Some(webview) = content_webview(app_handle) else {
        log("content view not found");
        return;
    };
    let result = if visible {
        webview.show()
    } else {
        webview.hide()
    };
    if let Err(error) = result {
        log(&format!("failed to set content view visibility to {visible}: {error}"));
    }
}

pub fn load_content_url(app_handle: &AppHandle, raw_url: &str) -> Result<(), String> {
    let url =
        Url::parse(raw_url).map_err(|error| format!("Invalid portal url {raw_url}: {error}"))?;
    let webview =
        content_webview(app_handle).ok_or_else(|| "Content view not found.".to_string())?;
    webview
        .navigate(url)
        .map_err(|error| format!("Failed to navigate content view to {raw_url}: {error}"))
}

pub fn reload_content_view<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    match content_webview(app_handle) {
        Some(webview) => {
            if let Err(error) = webview.reload() {
                log(&format!("failed to reload content view: {error}"));
            }
        }
        None => log("reload skipped: content view not found"),
    }
}

/// Clears cookies, storage and cache of the content view only; the
/// attendance window keeps its own session.
pub fn clear_content_browsing_data(app_handle: &AppHandle) -> Result<(), String> {
    let webview =
        content_webview(app_handle).ok_or_else(|| "Content view not found.".to_string())?;
    webview
        .clear_all_browsing_data()
        .map_err(|error| format!("Failed to clear content view data: {error}"))
}
