use tauri::{webview::PageLoadEvent, Manager, RunEvent, WindowEvent};

use crate::{
    append_desktop_log, append_startup_log, attendance_window, content_view, logging,
    main_window, runtime_paths, system_info, updater_flow, view_switch, UpdateState, ViewState,
    ATTENDANCE_WINDOW_LABEL, CONTENT_WEBVIEW_LABEL, DESKTOP_LOG_FILE, MAIN_WINDOW_LABEL,
};

pub(crate) fn run() {
    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        logging::resolve_desktop_log_path(runtime_paths::default_data_dir(), DESKTOP_LOG_FILE)
            .display()
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
            append_desktop_log("second instance launched; focusing main window");
            main_window::focus_main_window(app, append_desktop_log);
        }))
        .plugin(tauri_plugin_updater::Builder::new().build())
        .plugin(tauri_plugin_dialog::init())
        .manage(ViewState::default())
        .manage(UpdateState::default())
        .invoke_handler(tauri::generate_handler![
            crate::desktop_bridge_commands::desktop_bridge_open_portal,
            crate::desktop_bridge_commands::desktop_bridge_open_attendance,
            crate::desktop_bridge_commands::desktop_bridge_get_attendance_config,
            crate::desktop_bridge_commands::desktop_bridge_set_attendance_config,
            crate::desktop_bridge_commands::desktop_bridge_set_attendance_modal_visible,
            crate::desktop_bridge_commands::desktop_bridge_reload_page,
            crate::desktop_bridge_commands::desktop_bridge_reload_attendance_window,
            crate::desktop_bridge_commands::desktop_bridge_attendance_window_open_state,
            crate::desktop_bridge_commands::desktop_bridge_clear_cache,
            crate::desktop_bridge_commands::desktop_bridge_get_system_info,
            crate::desktop_bridge_commands::desktop_bridge_resize_sidebar,
            crate::desktop_bridge_commands::desktop_bridge_apply_update_now,
            crate::desktop_bridge_commands::desktop_bridge_restart_validation,
            crate::desktop_bridge_commands::desktop_bridge_restart_hardware_service,
            crate::desktop_bridge_commands::desktop_bridge_restart_bcc,
        ])
        .on_window_event(|window, event| match window.label() {
            MAIN_WINDOW_LABEL => match event {
                WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                    content_view::adjust_content_view(window.app_handle(), append_desktop_log);
                }
                WindowEvent::Destroyed => {
                    append_desktop_log("main window closed, exiting desktop process");
                    window.app_handle().exit(0);
                }
                _ => {}
            },
            ATTENDANCE_WINDOW_LABEL => {
                if let WindowEvent::Destroyed = event {
                    attendance_window::notify_attendance_window_closed(
                        window.app_handle(),
                        append_desktop_log,
                    );
                }
            }
            _ => {}
        })
        .on_page_load(|webview, payload| {
            if webview.label() != CONTENT_WEBVIEW_LABEL {
                return;
            }
            match payload.event() {
                PageLoadEvent::Started => {
                    append_desktop_log(&format!("page-load started: {}", payload.url()));
                }
                PageLoadEvent::Finished => {
                    append_desktop_log(&format!("page-load finished: {}", payload.url()));
                    view_switch::handle_content_page_finished(
                        webview.app_handle(),
                        payload.url().as_str(),
                    );
                }
            }
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            if let Err(error) = main_window::create_main_window(&app_handle) {
                append_startup_log(&format!("failed to create main window: {error}"));
                return Err(error.into());
            }

            system_info::spawn_ip_watch(app_handle.clone());
            updater_flow::spawn_update_checks(app_handle);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let RunEvent::Exit = event {
                append_desktop_log("desktop process exiting");
                updater_flow::install_pending_on_exit(app_handle);
            }
        });
}
