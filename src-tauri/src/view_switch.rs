use tauri::{AppHandle, Emitter, Manager};

use crate::{
    append_desktop_log, append_hardware_log, content_view, hardware_plan, main_window,
    portals::Portal,
    process_control::{self, SystemCommandRunner},
    AtomicFlagGuard, BridgeResult, ViewState, BLANK_PAGE_URL, LOAD_FINISHED_EVENT,
};

/// Runs a reset plan on the blocking pool so the fixed pauses never stall
/// the event loop.
pub(crate) async fn run_hardware_plan(plan: Vec<hardware_plan::HardwareStep>) {
    if plan.is_empty() {
        return;
    }
    let result = tauri::async_runtime::spawn_blocking(move || {
        process_control::execute_plan(&SystemCommandRunner, &plan, append_hardware_log);
    })
    .await;
    if let Err(error) = result {
        append_hardware_log(&format!("hardware plan worker failed: {error}"));
    }
}

/// Claims the switch slot and the hardware slot for `portal`. A manual
/// hardware action in flight rejects the switch and releases the slot again.
pub(crate) fn begin_portal_switch(
    state: &ViewState,
    portal: Portal,
) -> Result<AtomicFlagGuard<'_>, BridgeResult> {
    if !state.try_begin_switch() {
        return Err(BridgeResult::failed("View switch already in progress."));
    }
    let Some(hardware) = AtomicFlagGuard::try_set(&state.hardware_busy) else {
        state.finish_switch();
        return Err(BridgeResult::failed("Hardware action already in progress."));
    };

    state.mark_started();
    state.set_current(Some(portal));
    Ok(hardware)
}

/// Maps the navigation request result; a failed request ends the switch
/// because no page load will ever complete it.
pub(crate) fn finish_navigation_request(
    state: &ViewState,
    result: Result<(), String>,
) -> BridgeResult {
    match result {
        Ok(()) => BridgeResult::ok(),
        Err(error) => {
            state.finish_switch();
            BridgeResult::failed(error)
        }
    }
}

/// Hides the content view, resets the portal's hardware and starts loading
/// its page. The switch completes in `handle_content_page_finished`.
pub async fn open_portal(app_handle: AppHandle, portal: Portal) -> BridgeResult {
    let state = app_handle.state::<ViewState>();
    let hardware = match begin_portal_switch(&state, portal) {
        Ok(hardware) => hardware,
        Err(rejected) => {
            append_desktop_log(&format!(
                "open {} ignored: {}",
                portal.id(),
                rejected.reason.as_deref().unwrap_or("busy")
            ));
            return rejected;
        }
    };

    append_desktop_log(&format!("switching content view to {}", portal.id()));
    content_view::set_content_visible(&app_handle, false, append_desktop_log);

    run_hardware_plan(hardware_plan::plan_for_profile(portal.hardware_profile())).await;
    drop(hardware);

    let navigation = content_view::load_content_url(&app_handle, portal.url());
    if let Err(error) = &navigation {
        append_desktop_log(error);
    }
    let result = finish_navigation_request(&state, navigation);
    if result.ok {
        content_view::adjust_content_view(&app_handle, append_desktop_log);
    }
    result
}

pub(crate) fn is_portal_page(url: &str) -> bool {
    url != BLANK_PAGE_URL
}

/// Page-load hook for the content view: reveal it, release the switch and
/// tell the sidebar which portal is now active.
pub fn handle_content_page_finished(app_handle: &AppHandle, url: &str) {
    if !is_portal_page(url) {
        return;
    }

    let state = app_handle.state::<ViewState>();
    content_view::set_content_visible(app_handle, true, append_desktop_log);
    state.finish_switch();

    let current = state.current().map(Portal::id);
    main_window::update_main_window_title(app_handle, current, append_desktop_log);
    if let Err(error) = app_handle.emit(LOAD_FINISHED_EVENT, current) {
        append_desktop_log(&format!("failed to emit load-finished: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;

    #[test]
    fn blank_page_does_not_complete_a_switch() {
        assert!(!is_portal_page("about:blank"));
        assert!(is_portal_page("https://nimba.dpt.ba.gov.br:8100/"));
    }

    #[test]
    fn begin_portal_switch_claims_switch_and_hardware() {
        let state = ViewState::default();

        let hardware = begin_portal_switch(&state, Portal::Capture).expect("switch should start");
        assert!(state.is_started());
        assert_eq!(state.current(), Some(Portal::Capture));
        assert!(state.hardware_busy.load(Ordering::Acquire));

        let rejected = begin_portal_switch(&state, Portal::Smart).err();
        assert!(matches!(rejected, Some(BridgeResult { ok: false, .. })));
        assert_eq!(state.current(), Some(Portal::Capture));

        drop(hardware);
        assert!(!state.hardware_busy.load(Ordering::Acquire));
    }

    #[test]
    fn begin_portal_switch_waits_for_manual_hardware_action() {
        let state = ViewState::default();
        let manual = AtomicFlagGuard::try_set(&state.hardware_busy).expect("manual action slot");

        let rejected = begin_portal_switch(&state, Portal::Smart).err();
        assert_eq!(
            rejected.and_then(|result| result.reason),
            Some("Hardware action already in progress.".to_string())
        );
        assert!(!state.is_started());
        assert_eq!(state.current(), None);

        drop(manual);
        assert!(begin_portal_switch(&state, Portal::Smart).is_ok());
    }

    #[test]
    fn failed_navigation_releases_the_switch() {
        let state = ViewState::default();
        assert!(state.try_begin_switch());

        let result = finish_navigation_request(&state, Err("navigate failed".to_string()));

        assert!(!result.ok);
        assert_eq!(result.reason.as_deref(), Some("navigate failed"));
        assert!(state.try_begin_switch());
    }

    #[test]
    fn issued_navigation_keeps_the_switch_until_page_load() {
        let state = ViewState::default();
        assert!(state.try_begin_switch());

        assert!(finish_navigation_request(&state, Ok(())).ok);
        assert!(!state.try_begin_switch());
    }
}
