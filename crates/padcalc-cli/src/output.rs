//! Output formatting for display snapshots, the answer tape and the keypad

use console::{style, Term};
use padcalc::core::history::{History, HistoryEntry};
use padcalc::engine::{Command, DisplaySnapshot};
use padcalc::keypad::Keypad;
use serde::{Deserialize, Serialize};

/// Output format for `run`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// One key press and the display it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Keypad label of the command
    pub key: String,
    /// Display after the command
    pub display: DisplaySnapshot,
}

impl Step {
    /// Pairs a command with its resulting display
    #[must_use]
    pub fn new(command: Command, display: DisplaySnapshot) -> Self {
        Self {
            key: command.label(),
            display,
        }
    }
}

/// Machine-readable result of a `run`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Final display
    pub display: DisplaySnapshot,
    /// Every intermediate display, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
    /// The answer tape, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryEntry>>,
    /// True when the answer was placed on the clipboard
    pub copied: bool,
}

/// Renders calculator output to the terminal
#[derive(Debug)]
pub struct Renderer {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Renderer {
    /// Create a new renderer
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    // ===== Formatting =====

    /// Caption above primary, the way the calculator window shows them
    #[must_use]
    pub fn format_display(&self, snapshot: &DisplaySnapshot) -> String {
        let primary = if !self.use_color {
            snapshot.primary.clone()
        } else if snapshot.error {
            style(&snapshot.primary).red().bold().to_string()
        } else if snapshot.just_completed {
            style(&snapshot.primary).green().bold().to_string()
        } else {
            style(&snapshot.primary).bold().to_string()
        };

        if snapshot.caption.is_empty() {
            primary
        } else {
            let caption = if self.use_color {
                style(&snapshot.caption).dim().to_string()
            } else {
                snapshot.caption.clone()
            };
            format!("{caption}\n{primary}")
        }
    }

    /// Single-line display used while keys are pressed interactively
    #[must_use]
    pub fn format_inline(&self, snapshot: &DisplaySnapshot) -> String {
        let caption = if self.use_color {
            style(&snapshot.caption).dim().to_string()
        } else {
            snapshot.caption.clone()
        };
        let primary = if self.use_color && snapshot.error {
            style(&snapshot.primary).red().bold().to_string()
        } else if self.use_color {
            style(&snapshot.primary).bold().to_string()
        } else {
            snapshot.primary.clone()
        };
        format!("[{caption:>24}] {primary}")
    }

    /// One line per key press
    #[must_use]
    pub fn format_step(&self, step: &Step) -> String {
        let key = if self.use_color {
            style(format!("{:>3}", step.key)).cyan().to_string()
        } else {
            format!("{:>3}", step.key)
        };
        let mut line = format!("{key}  {}", step.display.primary);
        if !step.display.caption.is_empty() {
            line.push_str(&format!("    ({})", step.display.caption.trim_end()));
        }
        line
    }

    /// The answer tape, one equation per line
    #[must_use]
    pub fn format_history(&self, history: &History) -> String {
        if history.is_empty() {
            return "(no completed equations)".to_string();
        }
        history
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{:>3}. {}", i + 1, entry.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The button grid with element ids
    #[must_use]
    pub fn format_keypad(&self, keypad: &Keypad) -> String {
        let mut lines = Vec::new();
        for row in keypad.rows() {
            let cells: Vec<String> = row
                .iter()
                .map(|b| {
                    let label = format!("[{:^4}]", b.label);
                    if self.use_color {
                        style(label).bold().to_string()
                    } else {
                        label
                    }
                })
                .collect();
            let ids: Vec<&str> = row.iter().map(|b| b.id.as_str()).collect();
            lines.push(format!("{}   {}", cells.join(" "), ids.join(" ")));
        }
        lines.join("\n")
    }

    /// Serializes a run report
    pub fn format_json(report: &RunReport) -> serde_json::Result<String> {
        serde_json::to_string_pretty(report)
    }

    // ===== Writing =====

    /// Writes a block of output to stdout
    pub fn print(&self, text: &str) -> std::io::Result<()> {
        self.out.write_line(text)
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }
        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };
        let _ = self.out.write_line(&styled);
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }
}
