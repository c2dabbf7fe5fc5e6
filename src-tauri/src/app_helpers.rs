use chrono::Local;

use crate::{logging, runtime_paths, DESKTOP_LOG_FILE, LOG_ROTATE_MAX_BYTES};

fn append_log(category: &str, message: &str) {
    let line = logging::format_log_line(category, message, Local::now());
    if cfg!(debug_assertions) {
        eprint!("{line}");
    }

    let path =
        logging::resolve_desktop_log_path(runtime_paths::default_data_dir(), DESKTOP_LOG_FILE);
    if let Err(error) = logging::append_log_line(&path, &line, LOG_ROTATE_MAX_BYTES) {
        eprintln!("failed to append desktop log: {error}");
    }
}

pub fn append_desktop_log(message: &str) {
    append_log("desktop", message);
}

pub fn append_startup_log(message: &str) {
    append_log("startup", message);
}

pub fn append_hardware_log(message: &str) {
    append_log("hardware", message);
}

pub fn append_update_log(message: &str) {
    append_log("update", message);
}
