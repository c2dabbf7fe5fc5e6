/// `window.api` for the sidebar shell. Injected only into the local shell
/// webview; portal pages never see it.
pub const DESKTOP_BRIDGE_SCRIPT: &str = include_str!("bridge/desktop_bridge.js");

#[cfg(test)]
mod tests {
    use super::DESKTOP_BRIDGE_SCRIPT;

    #[test]
    fn bridge_script_exposes_every_registered_command() {
        for command in [
            "desktop_bridge_open_portal",
            "desktop_bridge_open_attendance",
            "desktop_bridge_get_attendance_config",
            "desktop_bridge_set_attendance_config",
            "desktop_bridge_set_attendance_modal_visible",
            "desktop_bridge_reload_page",
            "desktop_bridge_reload_attendance_window",
            "desktop_bridge_attendance_window_open_state",
            "desktop_bridge_clear_cache",
            "desktop_bridge_get_system_info",
            "desktop_bridge_resize_sidebar",
            "desktop_bridge_apply_update_now",
            "desktop_bridge_restart_validation",
            "desktop_bridge_restart_hardware_service",
            "desktop_bridge_restart_bcc",
        ] {
            assert!(
                DESKTOP_BRIDGE_SCRIPT.contains(&format!("\"{command}\"")),
                "bridge script is missing {command}"
            );
        }
    }

    #[test]
    fn bridge_script_opens_every_portal_id() {
        for portal in crate::portals::Portal::ALL {
            assert!(DESKTOP_BRIDGE_SCRIPT.contains(&format!("openPortal(\"{}\")", portal.id())));
        }
    }

    #[test]
    fn shell_ui_reaches_every_bridge_method() {
        const SHELL_SCRIPT: &str = include_str!("../../ui/app.js");
        const SHELL_PAGE: &str = include_str!("../../ui/index.html");

        for method in [
            "abrirCaptura",
            "abrirSmart",
            "abrirDocAvulsos",
            "abrirValidacao",
            "abrirPontoValid",
            "abrirPontoRenova",
            "abrirAtende",
            "getAtendeConfig",
            "setAtendeConfig",
            "setAtendeModalVisible",
            "reloadPage",
            "reloadAtendeWindow",
            "isAtendeWindowOpen",
            "clearCache",
            "getSystemInfo",
            "resizeSidebar",
            "applyUpdateNow",
            "reiniciarValidacao",
            "reiniciarServicoHardware",
            "reiniciarBcc",
            "onLoadFinished",
            "onUpdateIP",
            "onUpdateReady",
            "onAtendeWindowOpened",
            "onAtendeWindowClosed",
        ] {
            assert!(
                DESKTOP_BRIDGE_SCRIPT.contains(&format!("{method}:")),
                "bridge script does not define {method}"
            );
            assert!(
                SHELL_SCRIPT.contains(&format!("api.{method}(")),
                "shell ui never calls {method}"
            );
        }
        assert!(SHELL_PAGE.contains(r#"data-reload-target="atende""#));
        assert!(SHELL_PAGE.contains(r#"id="theme-toggle""#));
    }
}
