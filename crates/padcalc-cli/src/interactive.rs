//! Raw-mode terminal keypad
//!
//! Key events map to a closed set of actions.

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use padcalc::engine::{Command, DisplaySnapshot, Engine};
use padcalc::keypad::Keypad;
use tracing::{debug, warn};

use crate::clipboard::copy_to_clipboard;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Renderer;

/// What a key press asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Send a command to the engine
    Press(Command),
    /// Copy the current answer
    Copy,
    /// Leave the session
    Quit,
    /// Ignored input
    None,
}

/// Maps terminal key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('y') => KeyAction::Copy,
            KeyCode::Char(c) => Keypad::key_to_command(c).map_or(KeyAction::None, KeyAction::Press),
            KeyCode::Enter => KeyAction::Press(Command::Equals),
            KeyCode::Backspace | KeyCode::Delete => KeyAction::Press(Command::ClearEntry),
            KeyCode::Esc => KeyAction::Press(Command::AllClear),
            _ => KeyAction::None,
        }
    }
}

/// Outcome of one key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    /// The display changed
    Redraw(DisplaySnapshot),
    /// Copy requested; `None` when there is no completed answer
    Copy(Option<String>),
    /// Leave the session
    Quit,
    /// Nothing to do
    Ignored,
}

/// Engine plus key mapping, independent of the terminal
#[derive(Debug)]
pub struct Session {
    engine: Engine,
    input: InputHandler,
}

impl Session {
    /// Creates a session with the configured engine
    #[must_use]
    pub fn new(config: &CliConfig) -> Self {
        Self {
            engine: Engine::with_config(config.engine),
            input: InputHandler::new(),
        }
    }

    /// Handles one key event
    pub fn handle(&mut self, event: KeyEvent) -> SessionStep {
        match self.input.handle_key(event) {
            KeyAction::Press(command) => SessionStep::Redraw(self.engine.dispatch(command)),
            KeyAction::Copy => SessionStep::Copy(self.engine.copy_text()),
            KeyAction::Quit => SessionStep::Quit,
            KeyAction::None => SessionStep::Ignored,
        }
    }

    /// The engine being driven
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }
}

/// Restores cooked mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!(%e, "failed to restore terminal mode");
        }
    }
}

fn redraw(out: &mut impl Write, line: &str) -> io::Result<()> {
    queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine), Print(line))?;
    out.flush()
}

fn notice(out: &mut impl Write, message: &str, line: &str) -> io::Result<()> {
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(message),
        Print("\r\n")
    )?;
    redraw(out, line)
}

/// Runs the interactive keypad until the user quits
pub fn run_interactive(config: &CliConfig, renderer: &Renderer) -> CliResult<()> {
    let mut session = Session::new(config);
    let mut out = io::stdout();

    renderer.header("padcalc");
    renderer.print("Enter = equals, Backspace = CE, Esc = AC, y = copy, q = quit")?;

    let _guard = RawModeGuard::enable()?;
    let mut line = renderer.format_inline(&session.engine().snapshot());
    redraw(&mut out, &line)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match session.handle(key) {
            SessionStep::Redraw(snapshot) => {
                line = renderer.format_inline(&snapshot);
                redraw(&mut out, &line)?;
            }
            SessionStep::Copy(Some(text)) => {
                let message = match copy_to_clipboard(&text) {
                    Ok(()) => format!("copied {text}"),
                    Err(e) => e.to_string(),
                };
                notice(&mut out, &message, &line)?;
            }
            SessionStep::Copy(None) => notice(&mut out, "nothing to copy", &line)?,
            SessionStep::Quit => break,
            SessionStep::Ignored => debug!(?key, "ignored key"),
        }
    }

    execute!(out, Print("\r\n"))?;
    Ok(())
}
