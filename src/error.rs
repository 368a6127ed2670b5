use crate::config::ConfigError;
use thiserror::Error;

/// Caller errors raised when an operation is not supported by the role it
/// was invoked on, or addresses something that does not exist.
///
/// Soft failures (unhandled ticket, nothing to undo, rejected payment) are
/// not errors; they are narrated and returned as ordinary values.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("'{operation}' is not supported by leaf component '{component}'")]
    UnsupportedOperation {
        operation: &'static str,
        component: String,
    },

    #[error("index {index} is out of bounds (len: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("participant #{id} is not a member of room '{room}'")]
    UnknownParticipant { room: String, id: usize },

    #[error("unknown demo '{0}' (try `patterns list`)")]
    UnknownDemo(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PatternError {
    pub fn unsupported(operation: &'static str, component: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation,
            component: component.into(),
        }
    }

    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }
}

pub type Result<T, E = PatternError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message() {
        let err = PatternError::unsupported("add", "Wireless Mouse");
        assert_eq!(
            err.to_string(),
            "'add' is not supported by leaf component 'Wireless Mouse'"
        );
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = PatternError::out_of_bounds(7, 4);
        assert_eq!(err.to_string(), "index 7 is out of bounds (len: 4)");
    }
}
