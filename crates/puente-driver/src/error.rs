//! Driver error types.

use puente_core::ProblemError;

/// Errors that abort a driver run before any solve attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverError {
    /// No usable problem stub among the arguments.
    NoStub,
    /// Loading the problem from the stub failed.
    Load(ProblemError),
    /// Option parsing accumulated errors.
    OptionsFailed,
}

impl DriverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            DriverError::NoStub => "DRIVER_NO_STUB",
            DriverError::Load(err) => err.code(),
            DriverError::OptionsFailed => "DRIVER_BAD_OPTIONS",
        }
    }
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::NoStub => {
                write!(f, "[{}] No problem stub among the arguments", self.code())
            }
            DriverError::Load(err) => write!(f, "{}", err),
            DriverError::OptionsFailed => {
                write!(f, "[{}] Option parsing reported errors", self.code())
            }
        }
    }
}

impl std::error::Error for DriverError {}

impl From<ProblemError> for DriverError {
    fn from(err: ProblemError) -> Self {
        DriverError::Load(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_is_stable() {
        assert_eq!(DriverError::NoStub.code(), "DRIVER_NO_STUB");
        assert_eq!(DriverError::OptionsFailed.code(), "DRIVER_BAD_OPTIONS");
    }

    #[test]
    fn load_delegates_to_the_inner_error() {
        let err = DriverError::Load(ProblemError::Unmodifiable);
        assert_eq!(err.code(), "PROBLEM_UNMODIFIABLE");
        assert!(err.to_string().contains("can't be modified"));
    }
}
