//! Problem model error types.

use crate::io::IoError;

/// Errors that can occur during model operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// Structural growth attempted on a problem frozen at load time.
    Unmodifiable,
    /// Bulk-loaded or supplied data is internally inconsistent.
    InvalidData { reason: String },
    /// Interchange read or write failure.
    Io(IoError),
}

impl ProblemError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ProblemError::Unmodifiable => "PROBLEM_UNMODIFIABLE",
            ProblemError::InvalidData { .. } => "PROBLEM_INVALID_DATA",
            ProblemError::Io(err) => err.code(),
        }
    }
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::Unmodifiable => {
                write!(f, "[{}] Problem can't be modified", self.code())
            }
            ProblemError::InvalidData { reason } => {
                write!(f, "[{}] Invalid problem data: {}", self.code(), reason)
            }
            ProblemError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ProblemError {}

impl From<IoError> for ProblemError {
    fn from(err: IoError) -> Self {
        ProblemError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_is_stable() {
        assert_eq!(ProblemError::Unmodifiable.code(), "PROBLEM_UNMODIFIABLE");
        let err = ProblemError::InvalidData {
            reason: "bounds length mismatch".to_string(),
        };
        assert_eq!(err.code(), "PROBLEM_INVALID_DATA");
    }

    #[test]
    fn display_prefixes_error_code() {
        let rendered = ProblemError::Unmodifiable.to_string();
        assert!(rendered.starts_with("[PROBLEM_UNMODIFIABLE]"));
        assert!(rendered.contains("can't be modified"));
    }
}
