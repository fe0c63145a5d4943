use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::lock_task::error::PlatformError;
use crate::lock_task::platform::LockTaskPlatform;
use crate::lock_task::request::{ModeRequest, ModeResult};

/// First API level with the lock task capability
pub const MIN_LOCK_TASK_API_LEVEL: u32 = 21;

/// Whether a platform at `api_level` supports lock task mode
pub fn platform_supports_lock_task(api_level: u32, min_api_level: u32) -> bool {
    api_level >= min_api_level
}

/// Outcome of a request before failures are collapsed to `false`
#[derive(Debug)]
pub enum Outcome {
    /// The capability ran and produced a value
    Completed(bool),
    /// The platform is below the minimum API level (or did not report one)
    Unsupported(Option<u32>),
    /// The capability ran and failed
    Failed(PlatformError),
    /// The request named an unknown operation
    NotImplemented,
}

impl Outcome {
    /// Collapse to the boundary result: every failure becomes `false`
    pub fn into_result(self) -> ModeResult {
        match self {
            Outcome::Completed(value) => ModeResult::Success(value),
            Outcome::Unsupported(_) | Outcome::Failed(_) => ModeResult::Success(false),
            Outcome::NotImplemented => ModeResult::NotImplemented,
        }
    }
}

/// Translates lock task requests into platform calls
///
/// Nothing a platform does escapes as an error: unsupported versions,
/// rejected calls and platform panics all read as `false`. The bridge does
/// not track the lock state and leaves transition legality to the platform.
#[derive(Debug)]
pub struct LockTaskBridge<P> {
    platform: P,
    min_api_level: u32,
}

impl<P: LockTaskPlatform> LockTaskBridge<P> {
    pub fn new(platform: P) -> Self {
        Self::with_min_api_level(platform, MIN_LOCK_TASK_API_LEVEL)
    }

    pub fn with_min_api_level(platform: P, min_api_level: u32) -> Self {
        Self {
            platform,
            min_api_level,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Enter lock task mode; `true` if the platform accepted
    pub fn enter(&self) -> bool {
        self.handle(&ModeRequest::Enter) == ModeResult::Success(true)
    }

    /// Exit lock task mode; `true` if the platform accepted
    pub fn exit(&self) -> bool {
        self.handle(&ModeRequest::Exit) == ModeResult::Success(true)
    }

    /// Whether lock task mode is active; `false` when it cannot be determined
    pub fn query(&self) -> bool {
        self.handle(&ModeRequest::Query) == ModeResult::Success(true)
    }

    /// Handle a request by method name
    pub fn handle_method(&self, method: &str) -> ModeResult {
        self.handle(&ModeRequest::from_method(method))
    }

    pub fn handle(&self, request: &ModeRequest) -> ModeResult {
        self.execute(request).into_result()
    }

    /// Handle a request and keep the failure reason
    pub fn execute(&self, request: &ModeRequest) -> Outcome {
        let action: fn(&P) -> Result<bool, PlatformError> = match request {
            ModeRequest::Enter => |p: &P| p.start_lock_task().map(|()| true),
            ModeRequest::Exit => |p: &P| p.stop_lock_task().map(|()| true),
            ModeRequest::Query => |p: &P| p.is_in_lock_task_mode(),
            ModeRequest::Unknown(_) => return Outcome::NotImplemented,
        };

        let platform = &self.platform;
        let min_api_level = self.min_api_level;
        let run = move || -> Outcome {
            match platform.api_level() {
                Ok(level) if platform_supports_lock_task(level, min_api_level) => {}
                Ok(level) => return Outcome::Unsupported(Some(level)),
                Err(_) => return Outcome::Unsupported(None),
            }

            match action(platform) {
                Ok(value) => Outcome::Completed(value),
                Err(e) => Outcome::Failed(e),
            }
        };

        panic::catch_unwind(AssertUnwindSafe(run))
            .unwrap_or_else(|payload| Outcome::Failed(PlatformError::Panicked(panic_message(&*payload))))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
