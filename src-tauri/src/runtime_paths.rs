use std::{env, path::PathBuf};

use crate::{
    ATTENDANCE_CONFIG_DIR_WINDOWS, ATTENDANCE_DIR_ENV, DATA_DIR_ENV, DATA_DIR_NAME,
};

fn non_empty_env_path(key: &str) -> Option<PathBuf> {
    let value = env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

/// Picks the app data directory from an explicit override, the roaming
/// AppData directory (Windows) or the home directory, in that order.
pub(crate) fn resolve_data_dir(
    override_dir: Option<PathBuf>,
    app_data_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        return Some(dir);
    }
    if let Some(app_data) = app_data_dir {
        return Some(app_data.join(DATA_DIR_NAME));
    }
    home_dir.map(|home| home.join(format!(".{DATA_DIR_NAME}")))
}

pub fn default_data_dir() -> Option<PathBuf> {
    let app_data_dir = if cfg!(target_os = "windows") {
        non_empty_env_path("APPDATA")
    } else {
        None
    };
    resolve_data_dir(
        non_empty_env_path(DATA_DIR_ENV),
        app_data_dir,
        home::home_dir(),
    )
}

pub fn webview_data_dir(session: &str) -> Option<PathBuf> {
    default_data_dir().map(|dir| dir.join("webview").join(session))
}

/// The attendance file lives outside the app data directory on Windows so it
/// survives reinstalls and updates.
pub fn attendance_config_dir() -> Option<PathBuf> {
    if let Some(dir) = non_empty_env_path(ATTENDANCE_DIR_ENV) {
        return Some(dir);
    }
    if cfg!(target_os = "windows") {
        return Some(PathBuf::from(ATTENDANCE_CONFIG_DIR_WINDOWS));
    }
    default_data_dir()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::resolve_data_dir;

    #[test]
    fn resolve_data_dir_prefers_explicit_override() {
        let resolved = resolve_data_dir(
            Some(PathBuf::from("/srv/captura")),
            Some(PathBuf::from("/appdata")),
            Some(PathBuf::from("/home/operador")),
        );
        assert_eq!(resolved, Some(PathBuf::from("/srv/captura")));
    }

    #[test]
    fn resolve_data_dir_nests_under_app_data() {
        let resolved = resolve_data_dir(None, Some(PathBuf::from("/appdata")), None);
        assert_eq!(
            resolved,
            Some(PathBuf::from("/appdata").join("captura-unificada-data"))
        );
    }

    #[test]
    fn resolve_data_dir_falls_back_to_hidden_home_dir() {
        let resolved = resolve_data_dir(None, None, Some(PathBuf::from("/home/operador")));
        assert_eq!(
            resolved,
            Some(PathBuf::from("/home/operador").join(".captura-unificada-data"))
        );
        assert_eq!(resolve_data_dir(None, None, None), None);
    }
}
