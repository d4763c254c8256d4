//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: core error (unexpected failure inside the color library)
//! - 11: I/O error (socket bind, worker threads, stdout)
//! - 12: input error (bad color, unknown culture, bad option values)
//! - 13: serialization error

use color_advisor_core::ColorError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A non-validation error from the core library.
    Core(ColorError),
    /// An I/O error (bind failure, thread spawn).
    Io(String),
    /// A user input error (bad hex color, bad option value).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Core(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ColorError> for CliError {
    fn from(e: ColorError) -> Self {
        if e.is_validation() {
            CliError::Input(e.to_string())
        } else {
            CliError::Core(e)
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_error_exit_code_is_10() {
        let err = CliError::Core(ColorError::Internal("boom".into()));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::Io("address in use".into());
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        let err = CliError::Input("bad color".into());
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let err = CliError::Serialization("json fail".into());
        assert_eq!(err.exit_code(), 13);
    }

    #[test]
    fn from_invalid_color_routes_to_input() {
        let cli_err = CliError::from(ColorError::InvalidColor("'zzz'".into()));
        assert_eq!(cli_err.exit_code(), 12);
        assert!(cli_err.to_string().contains("zzz"));
    }

    #[test]
    fn from_unknown_culture_routes_to_input() {
        let cli_err = CliError::from(ColorError::InvalidCulture("martian".into()));
        assert_eq!(cli_err.exit_code(), 12);
    }

    #[test]
    fn from_internal_error_routes_to_core() {
        let cli_err = CliError::from(ColorError::Internal("classifier".into()));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("classifier"));
    }

    #[test]
    fn from_io_error_routes_to_io() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let cli_err = CliError::from(io);
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("port taken"));
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
