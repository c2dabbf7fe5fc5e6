use std::{
    env, fs,
    net::{IpAddr, Ipv4Addr},
    path::PathBuf,
    sync::OnceLock,
    thread,
};

use regex::Regex;
use serde::Serialize;
use sysinfo::{Networks, System};
use tauri::{AppHandle, Emitter};

use crate::{
    append_desktop_log, ANYDESK_READ_ERROR, FALLBACK_IPV4, IP_WATCH_INTERVAL,
    MISSING_VALUE_PLACEHOLDER, UPDATE_IP_EVENT,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub ip: String,
    pub anydesk: String,
    pub version: String,
}

impl SystemInfo {
    pub fn placeholder(version: String) -> Self {
        Self {
            hostname: MISSING_VALUE_PLACEHOLDER.to_string(),
            ip: MISSING_VALUE_PLACEHOLDER.to_string(),
            anydesk: MISSING_VALUE_PLACEHOLDER.to_string(),
            version,
        }
    }
}

pub fn collect_system_info(version: String) -> SystemInfo {
    SystemInfo {
        hostname: hostname(),
        ip: current_lan_ipv4(),
        anydesk: read_anydesk_id(&anydesk_config_paths()),
        version,
    }
}

fn hostname() -> String {
    System::host_name()
        .or_else(|| env::var("COMPUTERNAME").ok())
        .or_else(|| env::var("HOSTNAME").ok())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| MISSING_VALUE_PLACEHOLDER.to_string())
}

/// First IPv4 address that is neither loopback nor link-local.
pub(crate) fn pick_lan_ipv4<I>(addresses: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = IpAddr>,
{
    addresses.into_iter().find_map(|address| match address {
        IpAddr::V4(v4) if !v4.is_loopback() && !v4.is_link_local() && !v4.is_unspecified() => {
            Some(v4)
        }
        _ => None,
    })
}

pub fn current_lan_ipv4() -> String {
    let networks = Networks::new_with_refreshed_list();
    let mut interfaces: Vec<_> = networks.list().iter().collect();
    interfaces.sort_by(|(left, _), (right, _)| left.cmp(right));

    let addresses = interfaces.into_iter().flat_map(|(_, data)| {
        data.ip_networks()
            .iter()
            .map(|network| network.addr)
            .collect::<Vec<_>>()
    });
    pick_lan_ipv4(addresses)
        .map(|address| address.to_string())
        .unwrap_or_else(|| FALLBACK_IPV4.to_string())
}

fn anydesk_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:ad\.anydesk\.id|id)=(\d+)").expect("anydesk id pattern is valid")
    })
}

pub(crate) fn parse_anydesk_id(contents: &str) -> Option<String> {
    anydesk_id_pattern()
        .captures(contents)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}

fn anydesk_config_paths() -> Vec<PathBuf> {
    let program_data = env::var("ProgramData").unwrap_or_else(|_| r"C:\ProgramData".to_string());
    let mut paths = vec![PathBuf::from(program_data)
        .join("AnyDesk")
        .join("service.conf")];
    if let Ok(app_data) = env::var("APPDATA") {
        paths.push(PathBuf::from(app_data).join("AnyDesk").join("system.conf"));
    }
    paths.push(PathBuf::from(r"C:\ProgramData\AnyDesk\service.conf"));
    paths
}

/// Returns the AnyDesk ID or a placeholder: `---` when no config file has
/// one, `Erro` when a present file cannot be read.
pub(crate) fn read_anydesk_id(paths: &[PathBuf]) -> String {
    for path in paths {
        match fs::read_to_string(path) {
            Ok(contents) => {
                if let Some(id) = parse_anydesk_id(&contents) {
                    return id;
                }
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
            Err(error) => {
                append_desktop_log(&format!(
                    "failed to read AnyDesk config {}: {}",
                    path.display(),
                    error
                ));
                return ANYDESK_READ_ERROR.to_string();
            }
        }
    }
    MISSING_VALUE_PLACEHOLDER.to_string()
}

pub fn spawn_ip_watch(app_handle: AppHandle) {
    let spawn_result = thread::Builder::new()
        .name("ip-watch".to_string())
        .spawn(move || {
            let mut last_ip = current_lan_ipv4();
            loop {
                thread::sleep(IP_WATCH_INTERVAL);
                let ip = current_lan_ipv4();
                if ip == last_ip {
                    continue;
                }
                append_desktop_log(&format!("local ip changed: {last_ip} -> {ip}"));
                if let Err(error) = app_handle.emit(UPDATE_IP_EVENT, &ip) {
                    append_desktop_log(&format!("failed to emit ip update: {error}"));
                }
                last_ip = ip;
            }
        });
    if let Err(error) = spawn_result {
        append_desktop_log(&format!("failed to start ip watch thread: {error}"));
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv6Addr;

    use super::*;

    #[test]
    fn parse_anydesk_id_reads_service_conf_key() {
        let contents = "ad.anydesk.name=\nad.anydesk.id=123456789\nad.roster.version=2\n";
        assert_eq!(parse_anydesk_id(contents), Some("123456789".to_string()));
    }

    #[test]
    fn parse_anydesk_id_accepts_plain_id_key() {
        assert_eq!(parse_anydesk_id("id=987654321"), Some("987654321".to_string()));
        assert_eq!(parse_anydesk_id("ad.anydesk.id="), None);
    }

    #[test]
    fn read_anydesk_id_skips_missing_files_and_reports_placeholder() {
        let temp = tempfile::tempdir().unwrap();
        let missing = temp.path().join("service.conf");
        let present = temp.path().join("system.conf");
        fs::write(&present, "ad.anydesk.id=42424242\n").unwrap();

        assert_eq!(read_anydesk_id(&[missing.clone(), present]), "42424242");
        assert_eq!(read_anydesk_id(&[missing]), "---");
    }

    #[test]
    fn read_anydesk_id_reports_error_for_unreadable_path() {
        let temp = tempfile::tempdir().unwrap();
        // Reading a directory fails with something other than NotFound.
        assert_eq!(read_anydesk_id(&[temp.path().to_path_buf()]), "Erro");
    }

    #[test]
    fn pick_lan_ipv4_skips_loopback_link_local_and_v6() {
        let addresses = vec![
            IpAddr::V6(Ipv6Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V4(Ipv4Addr::new(169, 254, 10, 20)),
            IpAddr::V4(Ipv4Addr::new(10, 25, 10, 22)),
            IpAddr::V4(Ipv4Addr::new(192, 168, 0, 9)),
        ];
        assert_eq!(pick_lan_ipv4(addresses), Some(Ipv4Addr::new(10, 25, 10, 22)));
        assert_eq!(pick_lan_ipv4(vec![IpAddr::V4(Ipv4Addr::LOCALHOST)]), None);
    }
}
