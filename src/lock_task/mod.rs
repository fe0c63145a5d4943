/// Lock task (kiosk) mode control
///
/// This module provides:
/// - Request and result types for the three lock task operations
/// - The bridge that gates, dispatches and normalizes them
/// - Platform backends for the OS capability

pub mod bridge;
pub mod error;
pub mod platform;
pub mod request;

pub use bridge::{LockTaskBridge, MIN_LOCK_TASK_API_LEVEL, Outcome, platform_supports_lock_task};
pub use error::PlatformError;
pub use platform::{AndroidShell, LockTaskPlatform, PlatformKind, SimulatedPlatform, create_platform};
pub use request::{ModeRequest, ModeResult};
