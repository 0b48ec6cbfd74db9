//! Calculator engine: the keypad state machine
//!
//! The pending operator doubles as the "which operand is active" flag, so
//! the two can never disagree.
//!
//! Button presses arrive as [`Command`]s. Each one mutates the state and
//! returns a [`DisplaySnapshot`] for the presentation layer to render.
//! While the second operand is typed the result is recomputed after every
//! digit (live preview); pressing an operator with a second operand in
//! progress folds the running result into the first operand, so
//! `10 + 5 + 2` evaluates left to right without an explicit equals.

mod command;

pub use command::{Command, DisplaySnapshot, Target};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::history::History;
use crate::core::{
    format_value, Arithmetic, CalcError, CalcResult, ErrorPolicy, NumberEntry, Operator,
};

/// Engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How division by zero and friends surface
    pub error_policy: ErrorPolicy,
    /// Answer tape length; zero disables the tape
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Propagate,
            history_capacity: History::DEFAULT_MAX_ENTRIES,
        }
    }
}

impl EngineConfig {
    /// Sets the error policy
    #[must_use]
    pub const fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Sets the answer tape length
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

/// A computed answer held as an operand
#[derive(Debug, Clone, PartialEq)]
struct Computed {
    value: f64,
    text: String,
}

/// One side of the equation: typed digits or a carried-over answer
#[derive(Debug, Clone, Default, PartialEq)]
struct Operand {
    entry: NumberEntry,
    computed: Option<Computed>,
}

impl Operand {
    fn typed(entry: NumberEntry) -> Self {
        Self {
            entry,
            computed: None,
        }
    }

    fn computed(value: f64) -> Self {
        Self {
            entry: NumberEntry::new(),
            computed: Some(Computed {
                value,
                text: format_value(value),
            }),
        }
    }

    fn is_empty(&self) -> bool {
        self.computed.is_none() && self.entry.is_empty()
    }

    fn value(&self) -> f64 {
        self.computed
            .as_ref()
            .map_or_else(|| self.entry.value(), |c| c.value)
    }

    fn text(&self) -> String {
        self.computed
            .as_ref()
            .map_or_else(|| self.entry.to_string(), |c| c.text.clone())
    }

    /// Text as shown on the display: an empty operand reads `0`
    fn display_text(&self) -> String {
        if self.is_empty() {
            "0".to_string()
        } else {
            self.text()
        }
    }

    fn has_point(&self) -> bool {
        self.computed
            .as_ref()
            .map_or_else(|| self.entry.has_point(), |c| c.text.contains('.'))
    }

    /// Switches a computed answer back to editable digits
    ///
    /// Answers rendered as `Infinity`, `NaN` or in exponent form have no
    /// digit form and restart from empty.
    fn entry_mut(&mut self) -> &mut NumberEntry {
        if let Some(computed) = self.computed.take() {
            self.entry = NumberEntry::parse(&computed.text).unwrap_or_default();
        }
        &mut self.entry
    }
}

/// Unary operations that act on the first operand only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unary {
    Square,
    SquareRoot,
}

/// The calculator engine
#[derive(Debug)]
pub struct Engine {
    first: Operand,
    second: Operand,
    /// `Some` exactly while the second operand is being entered
    pending: Option<Operator>,
    result: f64,
    result_text: String,
    /// Fault from the last live preview, surfaced on equals or chaining
    fault: Option<CalcError>,
    /// Error currently shown in place of a result
    error: Option<CalcError>,
    /// Equation text standing in for the first operand (`10 + 5`, `5²`)
    chain: Option<String>,
    caption: String,
    answer_caption: String,
    just_completed: bool,
    arithmetic: Arithmetic,
    history: History,
    config: EngineConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with custom settings
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            first: Operand::default(),
            second: Operand::default(),
            pending: None,
            result: 0.0,
            result_text: "0".to_string(),
            fault: None,
            error: None,
            chain: None,
            caption: String::new(),
            answer_caption: String::new(),
            just_completed: false,
            arithmetic: Arithmetic::new(config.error_policy),
            history: History::with_capacity(config.history_capacity),
            config,
        }
    }

    /// Returns the engine settings
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ===== Commands =====

    /// Applies a command and returns the new display
    pub fn dispatch(&mut self, command: Command) -> DisplaySnapshot {
        let snapshot = match command {
            Command::Digit(d) => self.push_digit(d),
            Command::Point => self.push_point(),
            Command::Operator(op) => self.operator(op),
            Command::Equals => self.equals(),
            Command::ClearEntry => self.clear_entry(),
            Command::AllClear => self.all_clear(),
            Command::Square => self.square(),
            Command::SquareRoot => self.square_root(),
        };
        debug!(
            ?command,
            primary = %snapshot.primary,
            caption = %snapshot.caption,
            "dispatch"
        );
        snapshot
    }

    /// Enters a digit key: `0`-`9` or `.`
    pub fn digit(&mut self, key: char) -> CalcResult<DisplaySnapshot> {
        match key {
            '.' => Ok(self.push_point()),
            c => c
                .to_digit(10)
                .map(|d| self.push_digit(d as u8))
                .ok_or(CalcError::InvalidDigit(c)),
        }
    }

    /// Appends a digit (0-9) to the active operand
    pub fn push_digit(&mut self, digit: u8) -> DisplaySnapshot {
        if digit > 9 {
            warn!(digit, "ignoring out-of-range digit");
            return self.snapshot();
        }
        self.begin_entry();
        self.active_mut().entry_mut().push_digit(digit);
        self.after_entry();
        self.snapshot()
    }

    /// Appends a decimal point to the active operand
    ///
    /// A second point in the same operand is ignored.
    pub fn push_point(&mut self) -> DisplaySnapshot {
        self.begin_entry();
        if !self.active_mut().entry_mut().push_point() {
            trace!("decimal point already entered");
            return self.snapshot();
        }
        self.after_entry();
        self.snapshot()
    }

    /// Selects a binary operator
    ///
    /// With a second operand in progress, the running result becomes the
    /// new first operand. With the second operand still empty, the pending
    /// operator is replaced: the last operator pressed before a digit wins.
    pub fn operator(&mut self, op: Operator) -> DisplaySnapshot {
        self.error = None;
        if self.pending.is_some() && !self.second.is_empty() {
            if let Some(err) = self.fault.take() {
                self.fail(err);
                return self.snapshot();
            }
            debug!(result = %self.result_text, "chaining equation");
            self.chain = Some(self.render_trace());
            self.first = Operand::computed(self.result);
            self.second = Operand::default();
        }
        if self.first.is_empty() {
            self.first = Operand::typed(NumberEntry::zero());
        }
        if let Some(previous) = self.pending.replace(op) {
            if previous != op {
                trace!(from = previous.name(), to = op.name(), "operator replaced");
            }
        }
        self.just_completed = false;
        self.refresh();
        self.snapshot()
    }

    /// Resolves the equation and shows the result
    pub fn equals(&mut self) -> DisplaySnapshot {
        self.error = None;
        let trace = self.render_trace().trim_end().to_string();
        self.caption = format!("{trace} = ");
        if let Some(err) = self.fault.take() {
            self.fail(err);
            return self.snapshot();
        }
        if self.pending.is_some() && !self.second.is_empty() {
            self.history.record(&trace, &self.result_text);
        }
        self.first = Operand::computed(self.result);
        self.second = Operand::default();
        self.pending = None;
        self.chain = Some(trace);
        self.just_completed = true;
        self.refresh();
        self.snapshot()
    }

    /// Deletes the last entry (CE)
    ///
    /// Removes the last character of the active operand. With only an
    /// operator entered, the operator is undone. A first operand never
    /// empties: it falls back to `0`.
    pub fn clear_entry(&mut self) -> DisplaySnapshot {
        if self.error.take().is_some() {
            return self.snapshot();
        }
        match self.pending {
            None => {
                if self.first.is_empty() {
                    return self.snapshot();
                }
                let entry = self.first.entry_mut();
                entry.pop();
                if entry.is_empty() {
                    *entry = NumberEntry::zero();
                }
                self.chain = None;
                self.just_completed = false;
            }
            Some(op) if self.second.is_empty() => {
                trace!(op = op.name(), "operator undone");
                self.pending = None;
                self.chain = None;
            }
            Some(_) => self.second.entry_mut().pop(),
        }
        self.refresh();
        self.snapshot()
    }

    /// Resets everything except the previous-answer caption and the tape (AC)
    pub fn all_clear(&mut self) -> DisplaySnapshot {
        self.first = Operand::default();
        self.second = Operand::default();
        self.pending = None;
        self.fault = None;
        self.error = None;
        self.chain = None;
        self.just_completed = false;
        self.caption = self.answer_caption.clone();
        self.refresh();
        self.snapshot()
    }

    /// Squares the first operand (x²)
    pub fn square(&mut self) -> DisplaySnapshot {
        self.unary(Unary::Square)
    }

    /// Takes the square root of the first operand (√)
    pub fn square_root(&mut self) -> DisplaySnapshot {
        self.unary(Unary::SquareRoot)
    }

    // ===== Observers =====

    /// Current display state
    #[must_use]
    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            primary: self.primary(),
            caption: self.caption.clone(),
            just_completed: self.just_completed,
            error: self.error.is_some(),
        }
    }

    /// Main display text
    #[must_use]
    pub fn primary(&self) -> String {
        if let Some(err) = &self.error {
            return err.display_token().to_string();
        }
        let first = self.first.display_text();
        match self.pending {
            None => first,
            Some(op) => format!("{first} {op} {}", self.second.text()),
        }
    }

    /// Secondary caption text
    #[must_use]
    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Which operand receives digits
    #[must_use]
    pub const fn entering(&self) -> Target {
        if self.pending.is_some() {
            Target::Second
        } else {
            Target::First
        }
    }

    /// The pending operator, if any
    #[must_use]
    pub const fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    /// First operand as displayed (empty when nothing is entered)
    #[must_use]
    pub fn first_operand(&self) -> String {
        self.first.text()
    }

    /// Second operand as displayed (empty until digits follow the operator)
    #[must_use]
    pub fn second_operand(&self) -> String {
        self.second.text()
    }

    /// Floating-point value of the first operand
    #[must_use]
    pub fn first_value(&self) -> f64 {
        self.first.value()
    }

    /// Floating-point value of the second operand
    #[must_use]
    pub fn second_value(&self) -> f64 {
        self.second.value()
    }

    /// Most recently computed value
    #[must_use]
    pub const fn result_value(&self) -> f64 {
        self.result
    }

    /// Most recently computed value as text
    #[must_use]
    pub fn result_text(&self) -> &str {
        &self.result_text
    }

    /// The `Ans = …` caption for the latest answer
    #[must_use]
    pub fn answer_caption(&self) -> &str {
        &self.answer_caption
    }

    /// Human-readable trace of the equation so far
    #[must_use]
    pub fn equation(&self) -> String {
        self.render_trace()
    }

    /// True immediately after an equation completed
    #[must_use]
    pub const fn is_just_completed(&self) -> bool {
        self.just_completed
    }

    /// True when the active operand already holds a decimal point
    #[must_use]
    pub fn decimal_already_entered(&self) -> bool {
        match self.pending {
            None => self.first.has_point(),
            Some(_) => self.second.has_point(),
        }
    }

    /// True when an operator was the last thing entered
    #[must_use]
    pub fn operator_just_entered(&self) -> bool {
        self.pending.is_some() && self.second.is_empty()
    }

    /// Error shown in place of a result, if any
    #[must_use]
    pub const fn error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// Primary display text when it holds a completed answer
    #[must_use]
    pub fn copy_text(&self) -> Option<String> {
        (self.just_completed && self.error.is_none()).then(|| self.primary())
    }

    /// Completed equations, oldest first
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    // ===== Internals =====

    fn active_mut(&mut self) -> &mut Operand {
        if self.pending.is_some() {
            &mut self.second
        } else {
            &mut self.first
        }
    }

    /// A digit right after a completed equation starts a fresh one
    fn begin_entry(&mut self) {
        if self.just_completed && self.pending.is_none() {
            debug!(answer = %self.answer_caption, "starting fresh equation");
            self.caption = self.answer_caption.clone();
            self.first = Operand::default();
            self.chain = None;
            self.just_completed = false;
        }
        self.error = None;
    }

    fn after_entry(&mut self) {
        if self.pending.is_none() {
            self.chain = None;
        }
        self.refresh();
    }

    fn unary(&mut self, op: Unary) -> DisplaySnapshot {
        if self.pending.is_some() || self.first.is_empty() || self.error.is_some() {
            trace!(?op, "unary operation not applicable");
            return self.snapshot();
        }
        let operand = self.first.display_text();
        let value = self.first.value();
        let (label, outcome) = match op {
            Unary::Square => (format!("{operand}²"), self.arithmetic.square(value)),
            Unary::SquareRoot => (format!("√{operand}"), self.arithmetic.square_root(value)),
        };
        match outcome {
            Ok(value) => {
                self.first = Operand::computed(value);
                self.refresh();
                self.answer_caption = format!("Ans = {}", self.result_text);
                self.history.record(&label, &self.result_text);
                self.chain = Some(label);
                self.just_completed = true;
            }
            Err(err) => {
                self.chain = Some(label);
                self.fail(err);
            }
        }
        self.snapshot()
    }

    /// Shows an error and leaves the engine ready for a fresh equation
    fn fail(&mut self, err: CalcError) {
        warn!(%err, equation = %self.render_trace(), "calculation failed");
        self.first = Operand::default();
        self.second = Operand::default();
        self.pending = None;
        self.fault = None;
        self.chain = None;
        self.just_completed = true;
        self.refresh();
        self.error = Some(err);
    }

    /// Recomputes the result from the operands
    fn refresh(&mut self) {
        self.fault = None;
        match self.pending {
            Some(op) if !self.second.is_empty() => {
                match self
                    .arithmetic
                    .apply(self.first.value(), op, self.second.value())
                {
                    Ok(value) => {
                        self.result = value;
                        self.result_text = format_value(value);
                        self.answer_caption = format!("Ans = {}", self.result_text);
                    }
                    Err(err) => {
                        trace!(%err, "live preview fault");
                        self.fault = Some(err);
                    }
                }
            }
            _ => {
                self.result = self.first.value();
                self.result_text = self.first.display_text();
            }
        }
        trace!(
            first = %self.first.text(),
            second = %self.second.text(),
            result = %self.result_text,
            "refresh"
        );
    }

    fn render_trace(&self) -> String {
        let head = self
            .chain
            .clone()
            .unwrap_or_else(|| self.first.display_text());
        match self.pending {
            None => head,
            Some(op) => format!("{head} {op} {}", self.second.text()),
        }
    }
}
