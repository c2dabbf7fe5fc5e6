use tauri::{AppHandle, Manager};

use crate::{
    append_desktop_log, append_hardware_log, attendance_config, attendance_window, content_view,
    hardware_plan, portals::Portal, runtime_paths, system_info, updater_flow, view_switch,
    AtomicFlagGuard, AttendanceOpenResult, BridgeResult, ViewState,
};

#[tauri::command]
pub(crate) async fn desktop_bridge_open_portal(
    app_handle: AppHandle,
    portal: String,
) -> BridgeResult {
    let Some(portal) = Portal::from_id(&portal) else {
        return BridgeResult::failed(format!("Unknown portal '{portal}'."));
    };
    view_switch::open_portal(app_handle, portal).await
}

#[tauri::command]
pub(crate) async fn desktop_bridge_open_attendance(app_handle: AppHandle) -> AttendanceOpenResult {
    let config_dir = runtime_paths::attendance_config_dir();
    let Some(config) = attendance_config::read_attendance_config(config_dir.as_deref()) else {
        return AttendanceOpenResult { needs_config: true };
    };

    let url = attendance_config::build_attendance_url(&config.ip);
    match attendance_window::open_or_focus_attendance_window(&app_handle, &url) {
        Ok(outcome) => append_desktop_log(&format!("attendance window {outcome:?}: {url}")),
        Err(error) => append_desktop_log(&error),
    }
    AttendanceOpenResult {
        needs_config: false,
    }
}

#[tauri::command]
pub(crate) fn desktop_bridge_get_attendance_config(
) -> Option<attendance_config::AttendanceConfig> {
    let config_dir = runtime_paths::attendance_config_dir();
    attendance_config::read_attendance_config(config_dir.as_deref())
}

#[tauri::command]
pub(crate) fn desktop_bridge_set_attendance_config(ip: String) -> bool {
    let config_dir = runtime_paths::attendance_config_dir();
    match attendance_config::write_attendance_config(config_dir.as_deref(), &ip) {
        Ok(()) => true,
        Err(error) => {
            append_desktop_log(&format!("failed to save attendance config: {error}"));
            false
        }
    }
}

#[tauri::command]
pub(crate) fn desktop_bridge_set_attendance_modal_visible(app_handle: AppHandle, hide: bool) {
    let visibility = app_handle
        .state::<ViewState>()
        .content_visibility_for_modal(hide);
    if let Some(visible) = visibility {
        content_view::set_content_visible(&app_handle, visible, append_desktop_log);
    }
}

/// Returns `false` when no portal has been opened yet; `about:blank` never
/// reports `load-finished`.
#[tauri::command]
pub(crate) fn desktop_bridge_reload_page(app_handle: AppHandle) -> bool {
    if !app_handle.state::<ViewState>().is_started() {
        append_desktop_log("reload skipped: no portal opened yet");
        return false;
    }
    content_view::reload_content_view(&app_handle, append_desktop_log);
    true
}

#[tauri::command]
pub(crate) fn desktop_bridge_reload_attendance_window(app_handle: AppHandle) {
    attendance_window::reload_attendance_window(&app_handle, append_desktop_log);
}

#[tauri::command]
pub(crate) fn desktop_bridge_attendance_window_open_state(app_handle: AppHandle) -> bool {
    attendance_window::is_attendance_window_open(&app_handle)
}

#[tauri::command]
pub(crate) fn desktop_bridge_clear_cache(app_handle: AppHandle) -> bool {
    match content_view::clear_content_browsing_data(&app_handle) {
        Ok(()) => {
            append_desktop_log("content view browsing data cleared");
            content_view::set_content_visible(&app_handle, false, append_desktop_log);
            content_view::reload_content_view(&app_handle, append_desktop_log);
            true
        }
        Err(error) => {
            append_desktop_log(&error);
            false
        }
    }
}

#[tauri::command]
pub(crate) async fn desktop_bridge_get_system_info(
    app_handle: AppHandle,
) -> system_info::SystemInfo {
    let version = app_handle.package_info().version.to_string();
    let fallback_version = version.clone();
    match tauri::async_runtime::spawn_blocking(move || system_info::collect_system_info(version))
        .await
    {
        Ok(info) => info,
        Err(error) => {
            append_desktop_log(&format!("system info worker failed: {error}"));
            system_info::SystemInfo::placeholder(fallback_version)
        }
    }
}

#[tauri::command]
pub(crate) fn desktop_bridge_resize_sidebar(app_handle: AppHandle, width: f64) {
    app_handle.state::<ViewState>().set_sidebar_width(width);
    content_view::adjust_content_view(&app_handle, append_desktop_log);
}

#[tauri::command]
pub(crate) async fn desktop_bridge_apply_update_now(app_handle: AppHandle) -> BridgeResult {
    updater_flow::apply_pending_update(app_handle).await
}

async fn run_manual_hardware_action(
    app_handle: &AppHandle,
    action: &str,
    plan: Vec<hardware_plan::HardwareStep>,
) -> BridgeResult {
    let state = app_handle.state::<ViewState>();
    let Some(_busy) = AtomicFlagGuard::try_set(&state.hardware_busy) else {
        return BridgeResult::failed("Hardware action already in progress.");
    };

    append_hardware_log(&format!("{action} requested"));
    view_switch::run_hardware_plan(plan).await;
    append_hardware_log(&format!("{action} finished"));
    BridgeResult::ok()
}

#[tauri::command]
pub(crate) async fn desktop_bridge_restart_validation(app_handle: AppHandle) -> BridgeResult {
    let result = run_manual_hardware_action(
        &app_handle,
        "restart validation app",
        hardware_plan::restart_validation_plan(),
    )
    .await;
    if result.ok && app_handle.state::<ViewState>().current() == Some(Portal::Validation) {
        content_view::reload_content_view(&app_handle, append_desktop_log);
    }
    result
}

#[tauri::command]
pub(crate) async fn desktop_bridge_restart_hardware_service(app_handle: AppHandle) -> BridgeResult {
    run_manual_hardware_action(
        &app_handle,
        "restart hardware service",
        hardware_plan::restart_hardware_service_plan(),
    )
    .await
}

#[tauri::command]
pub(crate) async fn desktop_bridge_restart_bcc(app_handle: AppHandle) -> BridgeResult {
    run_manual_hardware_action(&app_handle, "restart BCC", hardware_plan::restart_bcc_plan())
        .await
}
