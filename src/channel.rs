//! Line-delimited JSON method channel
//!
//! Each input line is a call such as `{"method": "startLockTask"}`; each
//! call produces exactly one response line.

use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};

use crate::lock_task::{LockTaskBridge, LockTaskPlatform, ModeRequest, ModeResult, Outcome};

/// Channel-level failure; bridge outcomes are never reported this way
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A call arriving on the channel
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MethodCall {
    pub method: String,

    /// Accepted for callers that always send arguments; never read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

/// A response written back to the channel
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MethodResponse {
    Success {
        result: bool,
    },
    NotImplemented {
        #[serde(rename = "notImplemented")]
        not_implemented: bool,
    },
    Error {
        error: String,
    },
}

impl From<ModeResult> for MethodResponse {
    fn from(result: ModeResult) -> Self {
        match result {
            ModeResult::Success(result) => MethodResponse::Success { result },
            ModeResult::NotImplemented => MethodResponse::NotImplemented {
                not_implemented: true,
            },
        }
    }
}

/// Log why a request produced its result
pub fn log_outcome(request: &ModeRequest, outcome: &Outcome) {
    match outcome {
        Outcome::Completed(value) => debug!("{} -> {}", request, value),
        Outcome::Unsupported(Some(level)) => {
            debug!("{} unsupported on API level {}", request, level)
        }
        Outcome::Unsupported(None) => debug!("{} unsupported: API level unknown", request),
        Outcome::Failed(e) => warn!("{} failed: {}", request, e),
        Outcome::NotImplemented => debug!("{} is not implemented", request),
    }
}

/// Dispatch one call through the bridge
pub fn dispatch<P: LockTaskPlatform>(bridge: &LockTaskBridge<P>, call: &MethodCall) -> MethodResponse {
    let request = ModeRequest::from_method(&call.method);
    let outcome = bridge.execute(&request);
    log_outcome(&request, &outcome);
    outcome.into_result().into()
}

fn malformed(reason: impl std::fmt::Display) -> MethodResponse {
    warn!("Malformed call: {}", reason);
    MethodResponse::Error {
        error: format!("malformed call: {}", reason),
    }
}

/// Decode a single call line and answer it
pub fn handle_line<P: LockTaskPlatform>(bridge: &LockTaskBridge<P>, line: &str) -> MethodResponse {
    match serde_json::from_str::<MethodCall>(line) {
        Ok(call) => dispatch(bridge, &call),
        Err(e) => malformed(e),
    }
}

/// Serve calls until the reader reaches EOF; returns the number of calls answered
///
/// Lines are read as bytes so a line that is not UTF-8 gets an error
/// response like any other malformed call.
pub fn serve<P, R, W>(bridge: &LockTaskBridge<P>, mut reader: R, mut writer: W) -> Result<usize, ChannelError>
where
    P: LockTaskPlatform,
    R: BufRead,
    W: Write,
{
    let mut handled = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                handle_line(bridge, line)
            }
            Err(e) => malformed(e),
        };

        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        handled += 1;
    }

    debug!("Channel closed after {} calls", handled);
    Ok(handled)
}
