use std::{
    env,
    sync::{atomic::AtomicBool, Mutex},
    thread,
    time::Instant,
};

use tauri::{AppHandle, Emitter, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_updater::{Update, UpdaterExt};

use crate::{
    append_update_log, AtomicFlagGuard, BridgeResult, APP_NAME, DISABLE_UPDATER_ENV,
    UPDATE_CHECK_INTERVAL, UPDATE_READY_EVENT,
};

struct PendingUpdate {
    update: Update,
    bytes: Vec<u8>,
}

/// Update downloaded in the background, waiting for the user to apply it.
#[derive(Default)]
pub(crate) struct UpdateState {
    pending: Mutex<Option<PendingUpdate>>,
    checking: AtomicBool,
}

impl UpdateState {
    fn has_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    fn store(&self, pending: PendingUpdate) {
        if let Ok(mut guard) = self.pending.lock() {
            *guard = Some(pending);
        }
    }

    fn take(&self) -> Option<PendingUpdate> {
        self.pending.lock().ok().and_then(|mut guard| guard.take())
    }
}

pub(crate) fn updater_enabled(debug_build: bool, disable_flag: Option<&str>) -> bool {
    if debug_build {
        return false;
    }
    !matches!(
        disable_flag.map(str::trim),
        Some("1") | Some("true") | Some("yes")
    )
}

/// A downloaded update the user never applied goes in when the app quits.
pub(crate) fn should_install_on_exit(debug_build: bool, has_pending: bool) -> bool {
    !debug_build && has_pending
}

/// Checks once at startup and then every few hours on a dedicated thread.
pub fn spawn_update_checks(app_handle: AppHandle) {
    let disable_flag = env::var(DISABLE_UPDATER_ENV).ok();
    if !updater_enabled(cfg!(debug_assertions), disable_flag.as_deref()) {
        append_update_log("automatic update checks disabled for this build");
        return;
    }

    let spawn_result = thread::Builder::new()
        .name("update-check".to_string())
        .spawn(move || loop {
            tauri::async_runtime::block_on(check_and_download(&app_handle));
            thread::sleep(UPDATE_CHECK_INTERVAL);
        });
    if let Err(error) = spawn_result {
        append_update_log(&format!("failed to start update check thread: {error}"));
    }
}

async fn check_and_download(app_handle: &AppHandle) {
    let state = app_handle.state::<UpdateState>();
    if state.has_pending() {
        return;
    }
    let Some(_checking) = AtomicFlagGuard::try_set(&state.checking) else {
        return;
    };

    let current_version = app_handle.package_info().version.to_string();
    let updater = match app_handle.updater() {
        Ok(updater) => updater,
        Err(error) => {
            append_update_log(&format!("failed to initialize updater: {error}"));
            return;
        }
    };

    let check_started = Instant::now();
    let update = match updater.check().await {
        Ok(Some(update)) => update,
        Ok(None) => {
            append_update_log(&format!(
                "check finished: has_update=false current_version={} elapsed_ms={}",
                current_version,
                check_started.elapsed().as_millis()
            ));
            return;
        }
        Err(error) => {
            // A missing release manifest is normal before the first publish.
            append_update_log(&format!(
                "check failed (silent): current_version={} elapsed_ms={} error={}",
                current_version,
                check_started.elapsed().as_millis(),
                error
            ));
            return;
        }
    };

    let new_version = update.version.to_string();
    append_update_log(&format!(
        "check finished: has_update=true current_version={current_version} latest_version={new_version}; downloading"
    ));
    let bytes = match update.download(|_, _| {}, || {}).await {
        Ok(bytes) => bytes,
        Err(error) => {
            append_update_log(&format!("failed to download update {new_version}: {error}"));
            return;
        }
    };

    state.store(PendingUpdate { update, bytes });
    append_update_log(&format!("update {new_version} downloaded and ready"));
    if let Err(error) = app_handle.emit(UPDATE_READY_EVENT, &new_version) {
        append_update_log(&format!("failed to emit update-ready: {error}"));
    }
}

/// Installs the downloaded update after confirmation and restarts the app.
pub async fn apply_pending_update(app_handle: AppHandle) -> BridgeResult {
    let state = app_handle.state::<UpdateState>();
    let Some(pending) = state.take() else {
        return BridgeResult::failed("No downloaded update is waiting to be installed.");
    };

    let version = pending.update.version.to_string();
    let confirmed = app_handle
        .dialog()
        .message("Deseja reiniciar o aplicativo para aplicar a atualização agora?")
        .title(format!("{APP_NAME} — Atualização {version} pronta"))
        .kind(MessageDialogKind::Info)
        .buttons(MessageDialogButtons::YesNo)
        .blocking_show();
    if !confirmed {
        append_update_log(&format!(
            "user postponed installing update {version}; it will be installed on exit"
        ));
        state.store(pending);
        return BridgeResult::failed("user declined");
    }

    if let Err(error) = pending.update.install(&pending.bytes) {
        let reason = format!("Failed to install update {version}: {error}");
        append_update_log(&reason);
        return BridgeResult::failed(reason);
    }

    append_update_log(&format!("update {version} installed; restarting app"));
    app_handle.request_restart();
    BridgeResult::ok()
}

pub fn install_pending_on_exit(app_handle: &AppHandle) {
    let state = app_handle.state::<UpdateState>();
    if !should_install_on_exit(cfg!(debug_assertions), state.has_pending()) {
        return;
    }
    let Some(pending) = state.take() else {
        return;
    };

    let version = pending.update.version.to_string();
    append_update_log(&format!("installing update {version} on exit"));
    if let Err(error) = pending.update.install(&pending.bytes) {
        append_update_log(&format!("failed to install update {version} on exit: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::{should_install_on_exit, updater_enabled};

    #[test]
    fn updater_is_skipped_in_debug_builds() {
        assert!(!updater_enabled(true, None));
    }

    #[test]
    fn updater_respects_disable_flag() {
        assert!(updater_enabled(false, None));
        assert!(updater_enabled(false, Some("0")));
        assert!(!updater_enabled(false, Some(" 1 ")));
        assert!(!updater_enabled(false, Some("true")));
    }

    #[test]
    fn pending_update_is_installed_on_exit_in_release_builds() {
        assert!(should_install_on_exit(false, true));
        assert!(!should_install_on_exit(false, false));
        assert!(!should_install_on_exit(true, true));
    }
}
