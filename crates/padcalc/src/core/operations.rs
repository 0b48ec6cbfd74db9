//! Binary operators and the arithmetic they perform
//!
//! One enum replaces a flag per operator, so two operators can never be
//! pending at once.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::core::{CalcError, CalcResult, ErrorPolicy};

/// Binary operator selectable on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl Operator {
    /// All operators in keypad order (top to bottom)
    pub const ALL: [Self; 4] = [Self::Divide, Self::Multiply, Self::Subtract, Self::Add];

    /// Returns the glyph shown on the display and in the equation trace
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Returns the ASCII key that selects this operator
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Maps a typed character (ASCII or glyph) to an operator
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' | '×' | 'x' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Stable lowercase name, used in log fields
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// IEEE double arithmetic with a configurable fault policy
#[derive(Debug, Clone, Copy, Default)]
pub struct Arithmetic {
    policy: ErrorPolicy,
}

impl Arithmetic {
    /// Creates arithmetic with the given fault policy
    #[must_use]
    pub const fn new(policy: ErrorPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active fault policy
    #[must_use]
    pub const fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Computes `a op b`
    pub fn apply(&self, a: f64, op: Operator, b: f64) -> CalcResult<f64> {
        if self.policy.is_strict() && op == Operator::Divide && b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        let result = match op {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
        };
        trace!(a, b, op = op.name(), result, "apply");
        self.check(&[a, b], result)
    }

    /// Computes `a²`
    pub fn square(&self, a: f64) -> CalcResult<f64> {
        self.check(&[a], a * a)
    }

    /// Computes `√a`
    pub fn square_root(&self, a: f64) -> CalcResult<f64> {
        if self.policy.is_strict() && a < 0.0 {
            return Err(CalcError::NegativeRoot(a));
        }
        self.check(&[a], a.sqrt())
    }

    /// Rejects results that turned non-finite from finite inputs (strict only)
    fn check(&self, inputs: &[f64], result: f64) -> CalcResult<f64> {
        if self.policy.is_strict() && !result.is_finite() && inputs.iter().all(|v| v.is_finite())
        {
            return Err(CalcError::Overflow);
        }
        Ok(result)
    }
}
