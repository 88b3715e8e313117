//! Exit codes for the envguard CLI.
//!
//! Scripts can branch on the outcome of `envguard check` without parsing
//! output.

use eg_common::EnvError;

/// Exit codes for envguard commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Environment valid / command succeeded
    Clean = 0,

    /// Environment failed validation
    InvalidEnvironment = 2,

    /// Schemas break the public-prefix contract
    ContractViolation = 3,

    /// Declaration missing, unreadable or malformed; bad arguments
    ConfigError = 10,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Exit code for a composition or declaration failure.
    pub fn for_error(err: &EnvError) -> Self {
        match err.code() {
            20..=29 => ExitCode::InvalidEnvironment,
            10..=19 => ExitCode::ContractViolation,
            40..=49 | 61 => ExitCode::ConfigError,
            60 => ExitCode::IoError,
            _ => ExitCode::InternalError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
