use std::fmt;

/// Method name that enters lock task mode
pub const START_LOCK_TASK: &str = "startLockTask";

/// Method name that exits lock task mode
pub const STOP_LOCK_TASK: &str = "stopLockTask";

/// Method name that reports whether lock task mode is active
pub const IS_LOCK_TASK_MODE: &str = "isLockTaskMode";

/// A single request to the lock task bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeRequest {
    /// Enter lock task mode
    Enter,
    /// Exit lock task mode
    Exit,
    /// Report whether lock task mode is active
    Query,
    /// Any method name the bridge does not know
    Unknown(String),
}

impl ModeRequest {
    /// Map a method name to a request; unknown names are kept verbatim
    pub fn from_method(method: &str) -> Self {
        match method {
            START_LOCK_TASK => ModeRequest::Enter,
            STOP_LOCK_TASK => ModeRequest::Exit,
            IS_LOCK_TASK_MODE => ModeRequest::Query,
            other => ModeRequest::Unknown(other.to_string()),
        }
    }

    /// The method name this request travels under
    pub fn method(&self) -> &str {
        match self {
            ModeRequest::Enter => START_LOCK_TASK,
            ModeRequest::Exit => STOP_LOCK_TASK,
            ModeRequest::Query => IS_LOCK_TASK_MODE,
            ModeRequest::Unknown(method) => method,
        }
    }
}

impl fmt::Display for ModeRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// Outcome of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeResult {
    /// Boolean outcome of Enter, Exit or Query
    Success(bool),
    /// The request named an operation the bridge does not implement
    NotImplemented,
}

impl ModeResult {
    /// The boolean outcome, or `None` for `NotImplemented`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ModeResult::Success(value) => Some(*value),
            ModeResult::NotImplemented => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_methods() {
        assert_eq!(ModeRequest::from_method("startLockTask"), ModeRequest::Enter);
        assert_eq!(ModeRequest::from_method("stopLockTask"), ModeRequest::Exit);
        assert_eq!(ModeRequest::from_method("isLockTaskMode"), ModeRequest::Query);
    }

    #[test]
    fn test_unknown_method_is_kept() {
        let request = ModeRequest::from_method("doSomethingElse");
        assert_eq!(request, ModeRequest::Unknown("doSomethingElse".to_string()));
        assert_eq!(request.method(), "doSomethingElse");
    }

    #[test]
    fn test_method_names_are_case_sensitive() {
        assert!(matches!(ModeRequest::from_method("StartLockTask"), ModeRequest::Unknown(_)));
    }

    #[test]
    fn test_not_implemented_is_not_false() {
        assert_eq!(ModeResult::Success(false).as_bool(), Some(false));
        assert_eq!(ModeResult::NotImplemented.as_bool(), None);
        assert_ne!(ModeResult::NotImplemented, ModeResult::Success(false));
    }
}
