use std::process::Command;

use crate::config::AndroidConfig;
use crate::lock_task::error::PlatformError;
use crate::lock_task::platform::LockTaskPlatform;

/// System property holding the platform API level
const SDK_PROPERTY: &str = "ro.build.version.sdk";

/// Key `dumpsys activity activities` uses for the lock task state
const LOCK_TASK_STATE_KEY: &str = "mLockTaskModeState=";

/// Lock task capability backed by the Android platform tools
///
/// Runs `getprop`, `am` and `dumpsys` directly on a device, or through a
/// command prefix such as `adb shell` when driving a device from a host.
#[derive(Debug, Clone)]
pub struct AndroidShell {
    config: AndroidConfig,
}

impl AndroidShell {
    pub fn new(config: AndroidConfig) -> Self {
        Self { config }
    }

    /// Run a platform tool and return its stdout and stderr
    fn run(&self, args: &[&str]) -> Result<(String, String), PlatformError> {
        let mut argv: Vec<&str> = self.config.command_prefix.iter().map(String::as_str).collect();
        argv.extend_from_slice(args);

        let (program, rest) = argv
            .split_first()
            .ok_or_else(|| PlatformError::Rejected("empty command".to_string()))?;

        let output = Command::new(program).args(rest).output()?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(PlatformError::CommandFailed {
                command: argv.join(" "),
                status: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok((stdout, stderr))
    }

    /// Run an `am` subcommand, treating error text as a failure
    fn run_am(&self, args: &[&str]) -> Result<(), PlatformError> {
        let mut argv = vec!["am"];
        argv.extend_from_slice(args);
        let (stdout, stderr) = self.run(&argv)?;
        check_am_output(&stdout, &stderr)
    }

    fn dump_activities(&self) -> Result<String, PlatformError> {
        self.run(&["dumpsys", "activity", "activities"]).map(|(stdout, _)| stdout)
    }

    /// Task to pin: the configured one, or the task of the resumed activity
    fn target_task_id(&self) -> Result<u32, PlatformError> {
        match self.config.task_id {
            Some(task_id) => Ok(task_id),
            None => parse_resumed_task_id(&self.dump_activities()?),
        }
    }
}

impl LockTaskPlatform for AndroidShell {
    fn api_level(&self) -> Result<u32, PlatformError> {
        let (stdout, _) = self.run(&["getprop", SDK_PROPERTY])?;
        parse_api_level(&stdout)
    }

    fn start_lock_task(&self) -> Result<(), PlatformError> {
        let task_id = self.target_task_id()?.to_string();
        self.run_am(&["task", "lock", &task_id])
    }

    fn stop_lock_task(&self) -> Result<(), PlatformError> {
        self.run_am(&["task", "lock", "stop"])
    }

    fn is_in_lock_task_mode(&self) -> Result<bool, PlatformError> {
        parse_lock_task_state(&self.dump_activities()?)
    }
}

/// `am` reports many failures with a zero exit status
fn check_am_output(stdout: &str, stderr: &str) -> Result<(), PlatformError> {
    for line in stdout.lines().chain(stderr.lines()) {
        let line = line.trim();
        if line.contains("SecurityException") {
            return Err(PlatformError::PermissionDenied(line.to_string()));
        }
        if line.starts_with("Error:") || line.contains("Exception") {
            return Err(PlatformError::Rejected(line.to_string()));
        }
    }
    Ok(())
}

fn parse_api_level(output: &str) -> Result<u32, PlatformError> {
    let value = output.trim();
    value
        .parse()
        .map_err(|_| PlatformError::Parse(format!("invalid API level: {:?}", value)))
}

/// Read the lock task state from `dumpsys activity activities`
///
/// Both `LOCKED` (kiosk) and `PINNED` (screen pinning) count as lock task mode.
fn parse_lock_task_state(dump: &str) -> Result<bool, PlatformError> {
    let state = dump
        .lines()
        .find_map(|line| {
            let start = line.find(LOCK_TASK_STATE_KEY)? + LOCK_TASK_STATE_KEY.len();
            line[start..].split_whitespace().next()
        })
        .ok_or_else(|| PlatformError::Parse("lock task state not reported".to_string()))?;

    match state {
        "NONE" => Ok(false),
        "LOCKED" | "PINNED" => Ok(true),
        other => Err(PlatformError::Parse(format!("unknown lock task state: {}", other))),
    }
}

/// Find the task id of the resumed activity, e.g. `ActivityRecord{1a2b u0 com.app/.Main t42}`
fn parse_resumed_task_id(dump: &str) -> Result<u32, PlatformError> {
    dump.lines()
        .filter(|line| line.contains("ResumedActivity"))
        .flat_map(|line| line.split_whitespace())
        .find_map(|token| {
            let digits = token.strip_prefix('t')?.trim_end_matches('}');
            if digits.is_empty() {
                return None;
            }
            digits.parse().ok()
        })
        .ok_or_else(|| PlatformError::Parse("no resumed activity found".to_string()))
}
