//! Core value types for the keypad calculator
//!
//! The engine never touches raw strings for arithmetic: operands are built
//! digit by digit in a [`NumberEntry`], combined through [`Arithmetic`] and
//! rendered with [`format_value`].

mod entry;
mod format;
pub mod history;
mod operations;

pub use entry::NumberEntry;
pub use format::format_value;
pub use operations::{Arithmetic, Operator};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Division by zero attempted under [`ErrorPolicy::Report`]
    #[error("Division by zero")]
    DivisionByZero,
    /// Square root of a negative operand under [`ErrorPolicy::Report`]
    #[error("Square root of negative number: {0}")]
    NegativeRoot(f64),
    /// Finite operands produced a non-finite result under [`ErrorPolicy::Report`]
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// A character other than `0-9` or `.` was passed as a digit
    #[error("Invalid digit: {0:?}")]
    InvalidDigit(char),
    /// A key script contained a character with no keypad mapping
    #[error("Unknown key: {0:?}")]
    UnknownKey(char),
}

impl CalcError {
    /// Short token shown on the primary display in place of a result
    #[must_use]
    pub const fn display_token(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "Cannot divide by zero",
            Self::NegativeRoot(_) | Self::InvalidDigit(_) | Self::UnknownKey(_) => "Invalid input",
            Self::Overflow => "Overflow",
        }
    }
}

/// How arithmetic faults surface on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// IEEE 754 special values are formatted and shown as-is
    #[default]
    Propagate,
    /// Faults become [`CalcError`]s and the display shows an error token
    Report,
}

impl ErrorPolicy {
    /// Returns true when faults are reported as errors
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Report)
    }
}
