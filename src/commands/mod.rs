pub mod bridge;
pub mod utils;

pub use bridge::run_command;
