use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use serde::Serialize;

use crate::{portals::Portal, SIDEBAR_WIDTH_EXPANDED};

/// State of the embedded content view shared by bridge commands and the
/// page-load hook.
#[derive(Debug)]
pub(crate) struct ViewState {
    switching: AtomicBool,
    started: AtomicBool,
    pub(crate) hardware_busy: AtomicBool,
    current: Mutex<Option<Portal>>,
    sidebar_width: Mutex<f64>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            switching: AtomicBool::new(false),
            started: AtomicBool::new(false),
            hardware_busy: AtomicBool::new(false),
            current: Mutex::new(None),
            sidebar_width: Mutex::new(SIDEBAR_WIDTH_EXPANDED),
        }
    }
}

impl ViewState {
    /// Claims the switch slot. Released by `finish_switch` once the portal
    /// page finished loading, or when the switch is abandoned.
    pub(crate) fn try_begin_switch(&self) -> bool {
        self.switching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn finish_switch(&self) {
        self.switching.store(false, Ordering::Release);
    }

    pub(crate) fn mark_started(&self) {
        self.started.store(true, Ordering::Release);
    }

    pub(crate) fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Visibility the content view should take when the attendance modal
    /// opens (`hide`) or closes. `None` leaves it untouched: before any
    /// portal has started there is nothing to reveal.
    pub(crate) fn content_visibility_for_modal(&self, hide: bool) -> Option<bool> {
        if hide {
            Some(false)
        } else if self.is_started() {
            Some(true)
        } else {
            None
        }
    }

    pub(crate) fn set_current(&self, portal: Option<Portal>) {
        if let Ok(mut guard) = self.current.lock() {
            *guard = portal;
        }
    }

    pub(crate) fn current(&self) -> Option<Portal> {
        self.current.lock().map(|guard| *guard).unwrap_or(None)
    }

    pub(crate) fn set_sidebar_width(&self, width: f64) {
        if let Ok(mut guard) = self.sidebar_width.lock() {
            *guard = width.max(0.0);
        }
    }

    pub(crate) fn sidebar_width(&self) -> f64 {
        self.sidebar_width
            .lock()
            .map(|guard| *guard)
            .unwrap_or(SIDEBAR_WIDTH_EXPANDED)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BridgeResult {
    pub(crate) ok: bool,
    pub(crate) reason: Option<String>,
}

impl BridgeResult {
    pub(crate) fn ok() -> Self {
        Self {
            ok: true,
            reason: None,
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            reason: Some(reason.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttendanceOpenResult {
    pub(crate) needs_config: bool,
}

pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}
