#[cfg(target_os = "windows")]
use std::process::{Command, Stdio};
use std::{thread, time::Duration};

use crate::hardware_plan::HardwareStep;

#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;
#[cfg(target_os = "windows")]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(target_os = "windows")]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

pub trait CommandRunner {
    /// Runs a program to completion and returns its exit code, if any.
    fn run(&self, program: &str, args: &[String]) -> Result<Option<i32>, String>;
    fn is_process_running(&self, image: &str) -> Result<bool, String>;
    fn launch_detached(&self, executable: &str) -> Result<(), String>;
    fn pause(&self, duration: Duration);
}

pub(crate) fn tasklist_reports_image(tasklist_output: &str, image: &str) -> bool {
    tasklist_output
        .to_ascii_lowercase()
        .contains(&image.to_ascii_lowercase())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

#[cfg(target_os = "windows")]
impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<Option<i32>, String> {
        use std::os::windows::process::CommandExt;

        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .creation_flags(CREATE_NO_WINDOW)
            .status()
            .map(|status| status.code())
            .map_err(|error| format!("Failed to run '{program}': {error}"))
    }

    fn is_process_running(&self, image: &str) -> Result<bool, String> {
        use std::os::windows::process::CommandExt;

        let output = Command::new("tasklist")
            .args(["/FI", &format!("IMAGENAME eq {image}")])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .creation_flags(CREATE_NO_WINDOW)
            .output()
            .map_err(|error| format!("Failed to run 'tasklist': {error}"))?;
        Ok(tasklist_reports_image(
            &String::from_utf8_lossy(&output.stdout),
            image,
        ))
    }

    fn launch_detached(&self, executable: &str) -> Result<(), String> {
        use std::os::windows::process::CommandExt;

        Command::new(executable)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP)
            .spawn()
            .map(|_| ())
            .map_err(|error| format!("Failed to launch '{executable}': {error}"))
    }

    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[cfg(not(target_os = "windows"))]
impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, _args: &[String]) -> Result<Option<i32>, String> {
        Err(format!("'{program}' is only available on Windows."))
    }

    fn is_process_running(&self, _image: &str) -> Result<bool, String> {
        Err("Process lookup is only available on Windows.".to_string())
    }

    fn launch_detached(&self, executable: &str) -> Result<(), String> {
        Err(format!("'{executable}' is only available on Windows."))
    }

    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

fn launch_and_settle<R, F>(runner: &R, executable: &str, settle: Option<Duration>, log: &F)
where
    R: CommandRunner + ?Sized,
    F: Fn(&str),
{
    match runner.launch_detached(executable) {
        Ok(()) => log(&format!("launched {executable}")),
        Err(error) => log(&format!("launch failed: {error}")),
    }
    if let Some(settle) = settle {
        runner.pause(settle);
    }
}

/// Runs every step in order. Failures are logged and never abort the plan:
/// a reset is best-effort and the portal loads regardless.
pub fn execute_plan<R, F>(runner: &R, plan: &[HardwareStep], log: F)
where
    R: CommandRunner + ?Sized,
    F: Fn(&str),
{
    for step in plan {
        match step {
            HardwareStep::Run { program, args } => match runner.run(program, args) {
                Ok(code) => log(&format!(
                    "{} {} exited with {}",
                    program,
                    args.join(" "),
                    code.map(|code| code.to_string())
                        .unwrap_or_else(|| "no code".to_string())
                )),
                Err(error) => log(&format!("command failed: {error}")),
            },
            HardwareStep::Pause(duration) => runner.pause(*duration),
            HardwareStep::EnsureRunning {
                image,
                executable,
                settle,
            } => match runner.is_process_running(image) {
                Ok(true) => log(&format!("{image} already running")),
                Ok(false) => launch_and_settle(runner, executable, *settle, &log),
                Err(error) => {
                    log(&format!("could not query {image} ({error}); launching anyway"));
                    launch_and_settle(runner, executable, *settle, &log);
                }
            },
            HardwareStep::Launch { executable, settle } => {
                launch_and_settle(runner, executable, *settle, &log)
            }
        }
    }
}
