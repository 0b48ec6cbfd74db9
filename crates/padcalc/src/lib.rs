//! padcalc - Keypad Calculator Engine
//!
//! The state machine behind a push-button calculator: digits build a first
//! operand, an operator switches to the second, and the result is previewed
//! live on every digit. Presentation layers send [`engine::Command`]s and
//! render the [`engine::DisplaySnapshot`] that comes back.
//!
//! # Design
//!
//! - The pending operator is an `Option`, so the active operand is always
//!   derived from it
//! - Operands are built digit by digit as [`core::NumberEntry`] values and
//!   read back as the parse of their rendering
//! - [`core::ErrorPolicy::Report`] surfaces division by zero instead of
//!   showing `Infinity`
//! - One set of [`driver`] scenarios runs against the bare engine and the keypad
//!
//! # Example
//!
//! ```rust
//! use padcalc::prelude::*;
//!
//! let mut engine = Engine::new();
//! engine.press_keys("10+5").unwrap();
//! assert_eq!(engine.result_text(), "15");
//!
//! let done = engine.equals();
//! assert_eq!(done.primary, "15");
//! assert_eq!(done.caption, "10 + 5 = ");
//! assert_eq!(done.copy_text(), Some("15"));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod engine;
pub mod keypad;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::{
        format_value, Arithmetic, CalcError, CalcResult, ErrorPolicy, NumberEntry, Operator,
    };
    pub use crate::driver::{CalculatorDriver, KeypadDriver};
    pub use crate::engine::{Command, DisplaySnapshot, Engine, EngineConfig, Target};
    pub use crate::keypad::{parse_keys, Keypad, KeypadButton};
}
