//! Keypad model: the button grid and keyboard mapping
//!
//! Every button has a stable id, label and grid position, so any
//! presentation layer can render and click it the same way.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult, Operator};
use crate::engine::Command;

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadButton {
    /// The command this button sends
    pub command: Command,
    /// Stable element id (`btn-7`, `btn-plus`, `btn-clear-entry`)
    pub id: String,
    /// Text printed on the button
    pub label: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButton {
    /// Creates a button at a grid position
    #[must_use]
    pub fn new(command: Command, row: usize, col: usize) -> Self {
        Self {
            id: button_id(command),
            label: command.label(),
            command,
            row,
            col,
        }
    }
}

fn button_id(command: Command) -> String {
    match command {
        Command::Digit(d) => format!("btn-{d}"),
        Command::Point => "btn-decimal".to_string(),
        Command::Operator(op) => format!("btn-{}", op_name(op)),
        Command::Equals => "btn-equals".to_string(),
        Command::ClearEntry => "btn-clear-entry".to_string(),
        Command::AllClear => "btn-all-clear".to_string(),
        Command::Square => "btn-square".to_string(),
        Command::SquareRoot => "btn-sqrt".to_string(),
    }
}

/// Element id fragment for an operator
const fn op_name(op: Operator) -> &'static str {
    match op {
        Operator::Add => "plus",
        Operator::Subtract => "minus",
        Operator::Multiply => "times",
        Operator::Divide => "divide",
    }
}

/// Calculator keypad layout
///
/// ```text
/// [ x² ] [ √ ] [ CE ] [ AC ]
/// [ 7  ] [ 8 ] [ 9  ] [ ÷  ]
/// [ 4  ] [ 5 ] [ 6  ] [ ×  ]
/// [ 1  ] [ 2 ] [ 3  ] [ -  ]
/// [ .  ] [ 0 ] [ =  ] [ +  ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let layout = [
            [
                Command::Square,
                Command::SquareRoot,
                Command::ClearEntry,
                Command::AllClear,
            ],
            [
                Command::Digit(7),
                Command::Digit(8),
                Command::Digit(9),
                Command::Operator(Operator::Divide),
            ],
            [
                Command::Digit(4),
                Command::Digit(5),
                Command::Digit(6),
                Command::Operator(Operator::Multiply),
            ],
            [
                Command::Digit(1),
                Command::Digit(2),
                Command::Digit(3),
                Command::Operator(Operator::Subtract),
            ],
            [
                Command::Point,
                Command::Digit(0),
                Command::Equals,
                Command::Operator(Operator::Add),
            ],
        ];

        let buttons = layout
            .iter()
            .enumerate()
            .flat_map(|(row, commands)| {
                commands
                    .iter()
                    .enumerate()
                    .map(move |(col, &command)| KeypadButton::new(command, row, col))
            })
            .collect();

        Self {
            buttons,
            rows: layout.len(),
            cols: 4,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// All buttons in row-major order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Iterates the grid one row at a time
    pub fn rows(&self) -> impl Iterator<Item = &[KeypadButton]> {
        self.buttons.chunks(self.cols)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by element id
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds a button by its printed label
    #[must_use]
    pub fn find_button_by_label(&self, label: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.label == label)
    }

    /// Finds the button that sends a command
    #[must_use]
    pub fn find_button_by_command(&self, command: Command) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.command == command)
    }

    /// Resolves a click on an element id to its command
    #[must_use]
    pub fn handle_click(&self, id: &str) -> Option<Command> {
        self.find_button_by_id(id).map(|b| b.command)
    }

    /// Maps a keyboard character to a command
    #[must_use]
    pub fn key_to_command(key: char) -> Option<Command> {
        match key {
            '0'..='9' => key
                .to_digit(10)
                .and_then(|d| Command::digit(d as u8)),
            '.' => Some(Command::Point),
            '=' => Some(Command::Equals),
            's' | '²' => Some(Command::Square),
            'r' | '√' => Some(Command::SquareRoot),
            '<' | '\x08' => Some(Command::ClearEntry),
            'c' | 'C' => Some(Command::AllClear),
            c => Operator::from_char(c).map(Command::Operator),
        }
    }
}

/// Parses a key script such as `10+5=` into commands
///
/// Whitespace is ignored.
pub fn parse_keys(script: &str) -> CalcResult<Vec<Command>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Keypad::key_to_command(c).ok_or(CalcError::UnknownKey(c)))
        .collect()
}
