//! Error types for finctl.

use thiserror::Error;

/// Errors raised by the CLI layer itself (as opposed to the API).
#[derive(Error, Debug)]
pub enum FinctlError {
    #[error("Not logged in. Run `finctl auth login` first.")]
    NotLoggedIn,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Aborted")]
    Aborted,
}

impl FinctlError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FinctlError::NotLoggedIn => 3,
            FinctlError::Aborted => 130,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(FinctlError::NotLoggedIn.exit_code(), 3);
        assert_eq!(FinctlError::Aborted.exit_code(), 130);
        assert_eq!(FinctlError::InvalidInput("x".into()).exit_code(), 1);
    }
}
