/// Platform-specific lock task implementations

pub mod android;
pub mod simulated;

pub use android::AndroidShell;
pub use simulated::SimulatedPlatform;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::BridgeConfig;
use crate::lock_task::error::PlatformError;

/// The OS lock task capability
///
/// Implementations report failures as `PlatformError`; deciding what a
/// failure means to the caller is the bridge's job.
pub trait LockTaskPlatform {
    /// Platform API level used by the version gate
    fn api_level(&self) -> Result<u32, PlatformError>;

    /// Pin the current foreground task
    fn start_lock_task(&self) -> Result<(), PlatformError>;

    /// Release the pinned task
    fn stop_lock_task(&self) -> Result<(), PlatformError>;

    /// Whether a task is currently locked or pinned
    fn is_in_lock_task_mode(&self) -> Result<bool, PlatformError>;
}

impl<T: LockTaskPlatform + ?Sized> LockTaskPlatform for Box<T> {
    fn api_level(&self) -> Result<u32, PlatformError> {
        (**self).api_level()
    }

    fn start_lock_task(&self) -> Result<(), PlatformError> {
        (**self).start_lock_task()
    }

    fn stop_lock_task(&self) -> Result<(), PlatformError> {
        (**self).stop_lock_task()
    }

    fn is_in_lock_task_mode(&self) -> Result<bool, PlatformError> {
        (**self).is_in_lock_task_mode()
    }
}

/// Which backend drives the lock task capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Android platform tools (`am`, `dumpsys`, `getprop`)
    #[default]
    Android,
    /// In-memory lock flag
    Simulated,
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformKind::Android => f.write_str("android"),
            PlatformKind::Simulated => f.write_str("simulated"),
        }
    }
}

/// Build the backend selected by the configuration
pub fn create_platform(config: &BridgeConfig) -> Box<dyn LockTaskPlatform + Send + Sync> {
    match config.platform {
        PlatformKind::Android => Box::new(AndroidShell::new(config.android.clone())),
        PlatformKind::Simulated => Box::new(SimulatedPlatform::from_config(&config.simulated)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_simulated_platform() {
        let mut config = BridgeConfig::default();
        config.platform = PlatformKind::Simulated;
        config.simulated.api_level = 28;

        let platform = create_platform(&config);
        assert_eq!(platform.api_level().unwrap(), 28);
        assert!(!platform.is_in_lock_task_mode().unwrap());
    }

    #[test]
    fn test_platform_kind_display() {
        assert_eq!(PlatformKind::Android.to_string(), "android");
        assert_eq!(PlatformKind::Simulated.to_string(), "simulated");
    }
}
