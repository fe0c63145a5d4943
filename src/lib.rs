//! Lock Task Bridge
//!
//! Enters, exits and reports the OS single-task (kiosk) mode, turning every
//! platform outcome into a plain boolean.

pub mod channel;
pub mod config;
pub mod lock_task;

pub use channel::{MethodCall, MethodResponse, serve};
pub use config::BridgeConfig;
pub use lock_task::{LockTaskBridge, LockTaskPlatform, ModeRequest, ModeResult, PlatformError};
