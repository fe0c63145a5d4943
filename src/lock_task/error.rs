use thiserror::Error;

/// Failure raised by an OS lock-task capability
///
/// These never cross the bridge boundary; `LockTaskBridge` collapses them
/// to `false`. They stay typed so callers can log the reason.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("already in lock task mode")]
    AlreadyLocked,

    #[error("not in lock task mode")]
    NotLocked,

    #[error("request rejected by the platform: {0}")]
    Rejected(String),

    #[error("command `{command}` failed with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("could not parse platform output: {0}")]
    Parse(String),

    #[error("platform panicked: {0}")]
    Panicked(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
