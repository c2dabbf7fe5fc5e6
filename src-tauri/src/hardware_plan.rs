use std::time::Duration;

use crate::{
    portals::HardwareProfile, AUX_LAUNCH_SETTLE_DELAY, BCC_EXECUTABLE, BCC_IMAGE_NAME,
    CAPTURE_ENV_DELAY, HARDWARE_SERVICE_NAME, HARDWARE_SWITCH_DELAY, JAVAW_IMAGE_NAME,
    SUPREMA_DEVICE_PATTERN, SUPREMA_POWER_CYCLE_DELAY, VALIDATION_EXECUTABLE,
    VALIDATION_IMAGE_NAME,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardwareStep {
    /// Runs a program to completion; its exit status is only logged.
    Run {
        program: &'static str,
        args: Vec<String>,
    },
    Pause(Duration),
    /// Launches `executable` unless a process named `image` is already running.
    EnsureRunning {
        image: &'static str,
        executable: &'static str,
        settle: Option<Duration>,
    },
    Launch {
        executable: &'static str,
        settle: Option<Duration>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ServiceAction {
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PnpAction {
    Disable,
    Enable,
}

fn service_step(action: ServiceAction) -> HardwareStep {
    let verb = match action {
        ServiceAction::Start => "start",
        ServiceAction::Stop => "stop",
    };
    HardwareStep::Run {
        program: "sc",
        args: vec![verb.to_string(), HARDWARE_SERVICE_NAME.to_string()],
    }
}

fn kill_image_step(image: &str) -> HardwareStep {
    HardwareStep::Run {
        program: "taskkill",
        args: vec![
            "/F".to_string(),
            "/IM".to_string(),
            image.to_string(),
            "/T".to_string(),
        ],
    }
}

fn suprema_pnp_step(action: PnpAction) -> HardwareStep {
    let cmdlet = match action {
        PnpAction::Disable => "Disable-PnpDevice",
        PnpAction::Enable => "Enable-PnpDevice",
    };
    HardwareStep::Run {
        program: "powershell",
        args: vec![
            "-NoProfile".to_string(),
            "-NonInteractive".to_string(),
            "-Command".to_string(),
            format!(
                "Get-PnpDevice -FriendlyName '{SUPREMA_DEVICE_PATTERN}' | {cmdlet} -Confirm:$false"
            ),
        ],
    }
}

/// Frees the Suprema reader from BCC/Java, power-cycles it and starts the
/// Valid integration service.
pub fn capture_environment_plan() -> Vec<HardwareStep> {
    vec![
        kill_image_step(BCC_IMAGE_NAME),
        kill_image_step(JAVAW_IMAGE_NAME),
        HardwareStep::Pause(CAPTURE_ENV_DELAY),
        suprema_pnp_step(PnpAction::Disable),
        HardwareStep::Pause(SUPREMA_POWER_CYCLE_DELAY),
        suprema_pnp_step(PnpAction::Enable),
        HardwareStep::Pause(CAPTURE_ENV_DELAY),
        service_step(ServiceAction::Start),
    ]
}

pub fn smart_environment_plan() -> Vec<HardwareStep> {
    vec![
        service_step(ServiceAction::Stop),
        HardwareStep::Pause(HARDWARE_SWITCH_DELAY),
        HardwareStep::EnsureRunning {
            image: BCC_IMAGE_NAME,
            executable: BCC_EXECUTABLE,
            settle: None,
        },
    ]
}

pub fn validation_environment_plan() -> Vec<HardwareStep> {
    let mut plan = vec![HardwareStep::EnsureRunning {
        image: VALIDATION_IMAGE_NAME,
        executable: VALIDATION_EXECUTABLE,
        settle: Some(AUX_LAUNCH_SETTLE_DELAY),
    }];
    plan.extend(capture_environment_plan());
    plan
}

pub fn plan_for_profile(profile: HardwareProfile) -> Vec<HardwareStep> {
    match profile {
        HardwareProfile::Capture => capture_environment_plan(),
        HardwareProfile::Validation => validation_environment_plan(),
        HardwareProfile::Smart => smart_environment_plan(),
        HardwareProfile::None => Vec::new(),
    }
}

pub fn restart_hardware_service_plan() -> Vec<HardwareStep> {
    vec![
        service_step(ServiceAction::Stop),
        HardwareStep::Pause(HARDWARE_SWITCH_DELAY),
        service_step(ServiceAction::Start),
    ]
}

pub fn restart_bcc_plan() -> Vec<HardwareStep> {
    vec![
        kill_image_step(BCC_IMAGE_NAME),
        HardwareStep::Pause(HARDWARE_SWITCH_DELAY),
        HardwareStep::Launch {
            executable: BCC_EXECUTABLE,
            settle: None,
        },
    ]
}

pub fn restart_validation_plan() -> Vec<HardwareStep> {
    vec![
        kill_image_step(VALIDATION_IMAGE_NAME),
        HardwareStep::Pause(HARDWARE_SWITCH_DELAY),
        HardwareStep::Launch {
            executable: VALIDATION_EXECUTABLE,
            settle: Some(AUX_LAUNCH_SETTLE_DELAY),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pauses(plan: &[HardwareStep]) -> Vec<u128> {
        plan.iter()
            .filter_map(|step| match step {
                HardwareStep::Pause(duration) => Some(duration.as_millis()),
                _ => None,
            })
            .collect()
    }

    fn programs(plan: &[HardwareStep]) -> Vec<&'static str> {
        plan.iter()
            .filter_map(|step| match step {
                HardwareStep::Run { program, .. } => Some(*program),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn capture_plan_kills_aux_processes_before_power_cycling_reader() {
        let plan = capture_environment_plan();
        assert_eq!(
            programs(&plan),
            vec!["taskkill", "taskkill", "powershell", "powershell", "sc"]
        );
        assert_eq!(pauses(&plan), vec![600, 1200, 600]);
        assert_eq!(
            plan.last(),
            Some(&HardwareStep::Run {
                program: "sc",
                args: vec![
                    "start".to_string(),
                    "Valid-ServicoIntegracaoHardware".to_string()
                ],
            })
        );
    }

    #[test]
    fn capture_plan_disables_then_enables_suprema_devices() {
        let plan = capture_environment_plan();
        let scripts: Vec<&str> = plan
            .iter()
            .filter_map(|step| match step {
                HardwareStep::Run { program, args } if *program == "powershell" => {
                    args.last().map(String::as_str)
                }
                _ => None,
            })
            .collect();
        assert_eq!(scripts.len(), 2);
        assert!(scripts[0].contains("'*Suprema RealScan-D*' | Disable-PnpDevice"));
        assert!(scripts[1].contains("'*Suprema RealScan-D*' | Enable-PnpDevice"));
    }

    #[test]
    fn smart_plan_stops_service_then_ensures_bcc() {
        let plan = smart_environment_plan();
        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan[0],
            HardwareStep::Run {
                program: "sc",
                args: vec![
                    "stop".to_string(),
                    "Valid-ServicoIntegracaoHardware".to_string()
                ],
            }
        );
        assert_eq!(plan[1], HardwareStep::Pause(Duration::from_millis(800)));
        assert_eq!(
            plan[2],
            HardwareStep::EnsureRunning {
                image: "BCC.exe",
                executable: r"C:\Griaule\BCC\BCC.exe",
                settle: None,
            }
        );
    }

    #[test]
    fn validation_plan_ensures_capturaweb_before_capture_sequence() {
        let plan = validation_environment_plan();
        assert!(matches!(
            plan[0],
            HardwareStep::EnsureRunning {
                image: "CapturaWeb.exe",
                settle: Some(settle),
                ..
            } if settle == Duration::from_millis(1500)
        ));
        assert_eq!(&plan[1..], capture_environment_plan().as_slice());
    }

    #[test]
    fn portals_without_hardware_get_empty_plan() {
        assert!(plan_for_profile(HardwareProfile::None).is_empty());
        assert_eq!(
            plan_for_profile(HardwareProfile::Smart),
            smart_environment_plan()
        );
    }

    #[test]
    fn restart_plans_pause_between_stop_and_start() {
        assert_eq!(pauses(&restart_hardware_service_plan()), vec![800]);
        assert_eq!(pauses(&restart_bcc_plan()), vec![800]);
        assert_eq!(pauses(&restart_validation_plan()), vec![800]);
        assert!(matches!(
            restart_validation_plan().last(),
            Some(HardwareStep::Launch {
                executable,
                settle: Some(_),
            }) if executable.ends_with("CapturaWeb.exe")
        ));
    }
}
