//! Commands the presentation layer sends and the snapshots it gets back

use serde::{Deserialize, Serialize};

use crate::core::Operator;

/// A discrete UI event delivered to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "command", content = "arg")]
pub enum Command {
    /// Append a digit (0-9) to the active operand
    Digit(u8),
    /// Append a decimal point to the active operand
    Point,
    /// Select a binary operator
    Operator(Operator),
    /// Resolve the equation
    Equals,
    /// Delete the last entry (CE)
    ClearEntry,
    /// Reset everything (AC)
    AllClear,
    /// Square the first operand (x²)
    Square,
    /// Square root of the first operand (√)
    SquareRoot,
}

impl Command {
    /// Creates a digit command, rejecting values above 9
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Text shown on the keypad button for this command
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Point => ".".to_string(),
            Self::Operator(op) => op.glyph().to_string(),
            Self::Equals => "=".to_string(),
            Self::ClearEntry => "CE".to_string(),
            Self::AllClear => "AC".to_string(),
            Self::Square => "x²".to_string(),
            Self::SquareRoot => "√".to_string(),
        }
    }
}

/// Which operand currently receives digit input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Left-hand operand (no operator pending)
    First,
    /// Right-hand operand (an operator is pending)
    Second,
}

/// Immutable view of what the presentation layer should render
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    /// Main display: operand or equation under construction, or the answer
    pub primary: String,
    /// Secondary caption: previous equation (`10 + 5 = `) or answer (`Ans = 15`)
    pub caption: String,
    /// True immediately after an equation completed
    pub just_completed: bool,
    /// True when the primary display shows an error token
    pub error: bool,
}

impl DisplaySnapshot {
    /// Text a copy-to-clipboard affordance may copy, if any
    #[must_use]
    pub fn copy_text(&self) -> Option<&str> {
        (self.just_completed && !self.error).then_some(self.primary.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_constructor_bounds() {
        assert_eq!(Command::digit(0), Some(Command::Digit(0)));
        assert_eq!(Command::digit(9), Some(Command::Digit(9)));
        assert_eq!(Command::digit(10), None);
    }

    #[test]
    fn test_command_labels() {
        assert_eq!(Command::Digit(7).label(), "7");
        assert_eq!(Command::Point.label(), ".");
        assert_eq!(Command::Operator(Operator::Multiply).label(), "×");
        assert_eq!(Command::ClearEntry.label(), "CE");
        assert_eq!(Command::AllClear.label(), "AC");
        assert_eq!(Command::Square.label(), "x²");
        assert_eq!(Command::SquareRoot.label(), "√");
    }

    #[test]
    fn test_command_serde_shape() {
        let json = serde_json::to_string(&Command::Operator(Operator::Add)).unwrap();
        assert_eq!(json, r#"{"command":"operator","arg":"add"}"#);
        let back: Command = serde_json::from_str(r#"{"command":"equals"}"#).unwrap();
        assert_eq!(back, Command::Equals);
    }

    #[test]
    fn test_copy_text_only_when_completed() {
        let mut snap = DisplaySnapshot {
            primary: "15".into(),
            caption: "10 + 5 = ".into(),
            just_completed: true,
            error: false,
        };
        assert_eq!(snap.copy_text(), Some("15"));

        snap.error = true;
        assert_eq!(snap.copy_text(), None);

        snap.error = false;
        snap.just_completed = false;
        assert_eq!(snap.copy_text(), None);
    }
}
