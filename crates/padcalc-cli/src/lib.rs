//! padcalc CLI Library
//!
//! Terminal presentation layer for the padcalc engine: key scripts,
//! an interactive raw-mode keypad, and clipboard copy of answers.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod clipboard;
mod commands;
mod config;
mod error;
pub mod interactive;
pub mod logging;
mod output;

pub use commands::{Cli, ColorArg, Commands, FormatArg, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, Renderer, RunReport, Step};
