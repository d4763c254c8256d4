//! Error types for the color-advisor core.

use thiserror::Error;

/// Errors produced by color operations.
///
/// `InvalidColor` and `InvalidCulture` are validation failures caused by the
/// caller's input; `Internal` covers everything else.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// A color string was not a 6-digit hex code.
    #[error("invalid hex color format: {0}. Please provide a color in the format #RRGGBB.")]
    InvalidColor(String),

    /// A culture name did not match any culture in the emotion dataset.
    #[error("unknown culture '{0}'")]
    InvalidCulture(String),

    /// An unexpected failure while computing a result.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ColorError {
    /// Returns true if the error was caused by invalid caller input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ColorError::InvalidColor(_) | ColorError::InvalidCulture(_)
        )
    }
}
