#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_helpers;
mod app_runtime;
mod app_types;
mod attendance_config;
mod attendance_window;
mod content_view;
mod desktop_bridge;
mod desktop_bridge_commands;
mod hardware_plan;
mod logging;
mod main_window;
mod portals;
mod process_control;
mod runtime_paths;
mod system_info;
mod updater_flow;
mod view_switch;

pub(crate) use app_constants::*;
pub(crate) use app_helpers::{
    append_desktop_log, append_hardware_log, append_startup_log, append_update_log,
};
pub(crate) use app_types::{AtomicFlagGuard, AttendanceOpenResult, BridgeResult, ViewState};
pub(crate) use updater_flow::UpdateState;

fn main() {
    app_runtime::run();
}
