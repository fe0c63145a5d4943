use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::SimulatedConfig;
use crate::lock_task::error::PlatformError;
use crate::lock_task::platform::LockTaskPlatform;

/// In-memory lock task capability
///
/// Mirrors how the OS treats transitions: starting while locked and
/// stopping while unlocked are rejected. Start, stop and query calls are
/// counted; `api_level` is not.
#[derive(Debug)]
pub struct SimulatedPlatform {
    api_level: u32,
    deny_start: bool,
    deny_stop: bool,
    deny_query: bool,
    locked: Mutex<bool>,
    invocations: AtomicUsize,
}

impl SimulatedPlatform {
    pub fn new(api_level: u32) -> Self {
        Self {
            api_level,
            deny_start: false,
            deny_stop: false,
            deny_query: false,
            locked: Mutex::new(false),
            invocations: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &SimulatedConfig) -> Self {
        Self {
            api_level: config.api_level,
            deny_start: config.deny_start,
            deny_stop: config.deny_stop,
            deny_query: config.deny_query,
            locked: Mutex::new(config.initially_locked),
            invocations: AtomicUsize::new(0),
        }
    }

    /// Reject every start request with a permission error
    pub fn deny_start(mut self) -> Self {
        self.deny_start = true;
        self
    }

    /// Reject every stop request with a permission error
    pub fn deny_stop(mut self) -> Self {
        self.deny_stop = true;
        self
    }

    /// Fail every state read
    pub fn deny_query(mut self) -> Self {
        self.deny_query = true;
        self
    }

    /// Number of start, stop and query calls that reached this platform
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut bool) -> Result<R, PlatformError>) -> Result<R, PlatformError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        let mut locked = self
            .locked
            .lock()
            .map_err(|_| PlatformError::Rejected("simulated lock state is poisoned".to_string()))?;
        f(&mut *locked)
    }
}

impl LockTaskPlatform for SimulatedPlatform {
    fn api_level(&self) -> Result<u32, PlatformError> {
        Ok(self.api_level)
    }

    fn start_lock_task(&self) -> Result<(), PlatformError> {
        let deny = self.deny_start;
        self.with_state(|locked| {
            if deny {
                return Err(PlatformError::PermissionDenied(
                    "lock task is not permitted for this package".to_string(),
                ));
            }
            if *locked {
                return Err(PlatformError::AlreadyLocked);
            }
            *locked = true;
            Ok(())
        })
    }

    fn stop_lock_task(&self) -> Result<(), PlatformError> {
        let deny = self.deny_stop;
        self.with_state(|locked| {
            if deny {
                return Err(PlatformError::PermissionDenied(
                    "only the locking package may stop lock task".to_string(),
                ));
            }
            if !*locked {
                return Err(PlatformError::NotLocked);
            }
            *locked = false;
            Ok(())
        })
    }

    fn is_in_lock_task_mode(&self) -> Result<bool, PlatformError> {
        let deny = self.deny_query;
        self.with_state(|locked| {
            if deny {
                return Err(PlatformError::Rejected("activity service unavailable".to_string()));
            }
            Ok(*locked)
        })
    }
}
