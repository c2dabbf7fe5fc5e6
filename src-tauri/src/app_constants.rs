use std::time::Duration;

pub const APP_NAME: &str = "Captura Unificada";

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const SHELL_WEBVIEW_LABEL: &str = "shell";
pub const CONTENT_WEBVIEW_LABEL: &str = "content";
pub const ATTENDANCE_WINDOW_LABEL: &str = "attendance";

pub const MAIN_WINDOW_WIDTH: f64 = 1300.0;
pub const MAIN_WINDOW_HEIGHT: f64 = 800.0;
pub const MAIN_WINDOW_MIN_WIDTH: f64 = 900.0;
pub const MAIN_WINDOW_MIN_HEIGHT: f64 = 600.0;

pub const ATTENDANCE_WINDOW_WIDTH: f64 = 1000.0;
pub const ATTENDANCE_WINDOW_HEIGHT: f64 = 700.0;
pub const ATTENDANCE_WINDOW_MIN_WIDTH: f64 = 600.0;
pub const ATTENDANCE_WINDOW_MIN_HEIGHT: f64 = 400.0;

pub const SIDEBAR_WIDTH_EXPANDED: f64 = 220.0;
pub const TOPBAR_HEIGHT: f64 = 0.0;

pub const BLANK_PAGE_URL: &str = "about:blank";

pub const DATA_DIR_ENV: &str = "CAPTURA_UNIFICADA_DATA_DIR";
pub const ATTENDANCE_DIR_ENV: &str = "CAPTURA_UNIFICADA_ATENDE_DIR";
pub const DISABLE_UPDATER_ENV: &str = "CAPTURA_UNIFICADA_DISABLE_UPDATER";
pub const DATA_DIR_NAME: &str = "captura-unificada-data";
pub const CONTENT_SESSION_DIR: &str = "captura";
pub const ATTENDANCE_SESSION_DIR: &str = "atende";

pub const DESKTOP_LOG_FILE: &str = "desktop.log";
pub const LOG_ROTATE_MAX_BYTES: u64 = 5 * 1024 * 1024;

pub const ATTENDANCE_CONFIG_DIR_WINDOWS: &str = "C:/TOOLS";
pub const ATTENDANCE_CONFIG_FILE: &str = "captura-unificada-atende.json";
pub const ATTENDANCE_URL_TEMPLATE: &str = "http://{IP}/guiche.asp?auto=1";

pub const HARDWARE_SERVICE_NAME: &str = "Valid-ServicoIntegracaoHardware";
pub const BCC_IMAGE_NAME: &str = "BCC.exe";
pub const BCC_EXECUTABLE: &str = r"C:\Griaule\BCC\BCC.exe";
pub const JAVAW_IMAGE_NAME: &str = "javaw.exe";
pub const VALIDATION_IMAGE_NAME: &str = "CapturaWeb.exe";
pub const VALIDATION_EXECUTABLE: &str = r"C:\Program Files\Valid\CapturaWeb\Online\CapturaWeb.exe";
pub const SUPREMA_DEVICE_PATTERN: &str = "*Suprema RealScan-D*";

pub const HARDWARE_SWITCH_DELAY: Duration = Duration::from_millis(800);
pub const CAPTURE_ENV_DELAY: Duration = Duration::from_millis(600);
pub const SUPREMA_POWER_CYCLE_DELAY: Duration = Duration::from_millis(1200);
pub const AUX_LAUNCH_SETTLE_DELAY: Duration = Duration::from_millis(1500);

pub const UPDATE_CHECK_INTERVAL: Duration = Duration::from_secs(4 * 60 * 60);
pub const IP_WATCH_INTERVAL: Duration = Duration::from_secs(60);

pub const MISSING_VALUE_PLACEHOLDER: &str = "---";
pub const ANYDESK_READ_ERROR: &str = "Erro";
pub const FALLBACK_IPV4: &str = "127.0.0.1";

pub const LOAD_FINISHED_EVENT: &str = "load-finished";
pub const UPDATE_READY_EVENT: &str = "update-ready";
pub const UPDATE_IP_EVENT: &str = "update-ip";
pub const ATTENDANCE_WINDOW_OPENED_EVENT: &str = "atende-window-opened";
pub const ATTENDANCE_WINDOW_CLOSED_EVENT: &str = "atende-window-closed";
