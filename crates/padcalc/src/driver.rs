//! Unified calculator driver
//!
//! Write the scenario once, run it against any front end: the bare
//! [`Engine`] or a [`KeypadDriver`] that clicks buttons by id.

use tracing::warn;

use crate::core::history::History;
use crate::core::CalcResult;
use crate::engine::{Command, DisplaySnapshot, Engine, EngineConfig};
use crate::keypad::{parse_keys, Keypad};

/// Anything that accepts keypad commands and shows a display
///
/// # Example
///
/// ```rust
/// use padcalc::prelude::*;
///
/// fn add<D: CalculatorDriver>(driver: &mut D) -> CalcResult<String> {
///     Ok(driver.press_keys("10+5=")?.primary)
/// }
///
/// assert_eq!(add(&mut Engine::new()).unwrap(), "15");
/// assert_eq!(add(&mut KeypadDriver::new()).unwrap(), "15");
/// ```
pub trait CalculatorDriver {
    /// Sends one command
    fn press(&mut self, command: Command) -> DisplaySnapshot;

    /// Current display
    fn snapshot(&self) -> DisplaySnapshot;

    /// Completed equations, oldest first
    fn history(&self) -> &History;

    /// Sends every command in a key script and returns the final display
    fn press_keys(&mut self, keys: &str) -> CalcResult<DisplaySnapshot> {
        let commands = parse_keys(keys)?;
        Ok(commands
            .into_iter()
            .fold(self.snapshot(), |_, command| self.press(command)))
    }
}

impl CalculatorDriver for Engine {
    fn press(&mut self, command: Command) -> DisplaySnapshot {
        self.dispatch(command)
    }

    fn snapshot(&self) -> DisplaySnapshot {
        Engine::snapshot(self)
    }

    fn history(&self) -> &History {
        Engine::history(self)
    }
}

/// Driver that routes every command through a keypad button click
#[derive(Debug)]
pub struct KeypadDriver {
    keypad: Keypad,
    engine: Engine,
    clicks: Vec<String>,
}

impl Default for KeypadDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeypadDriver {
    /// Creates a driver over a default engine
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates a driver over an engine with custom settings
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            keypad: Keypad::new(),
            engine: Engine::with_config(config),
            clicks: Vec::new(),
        }
    }

    /// Clicks a button by element id; unknown ids do nothing
    pub fn click(&mut self, id: &str) -> Option<DisplaySnapshot> {
        let command = self.keypad.handle_click(id)?;
        self.clicks.push(id.to_string());
        Some(self.engine.dispatch(command))
    }

    /// Element ids clicked so far
    #[must_use]
    pub fn clicks(&self) -> &[String] {
        &self.clicks
    }

    /// The keypad being clicked
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The engine behind the keypad
    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl CalculatorDriver for KeypadDriver {
    fn press(&mut self, command: Command) -> DisplaySnapshot {
        let Some(id) = self
            .keypad
            .find_button_by_command(command)
            .map(|b| b.id.clone())
        else {
            warn!(?command, "no keypad button for command");
            return self.engine.snapshot();
        };
        self.click(&id)
            .unwrap_or_else(|| self.engine.snapshot())
    }

    fn snapshot(&self) -> DisplaySnapshot {
        self.engine.snapshot()
    }

    fn history(&self) -> &History {
        self.engine.history()
    }
}

// ===== Unified scenarios =====
// Each scenario starts with all-clear and works with ANY CalculatorDriver

/// Verifies the four binary operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    for (keys, expected) in [
        ("C2+3=", "5"),
        ("C10-4=", "6"),
        ("C6*7=", "42"),
        ("C20/4=", "5"),
        ("C1/4=", "0.25"),
    ] {
        assert_eq!(driver.press_keys(keys)?.primary, expected, "keys: {keys}");
    }
    Ok(())
}

/// Verifies leading-zero collapse and the single decimal point rule
pub fn verify_number_entry<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    assert_eq!(driver.press_keys("C05")?.primary, "5");
    assert_eq!(driver.press_keys("C.")?.primary, "0.");
    assert_eq!(driver.press_keys("C1.5.")?.primary, "1.5");
    assert_eq!(driver.press_keys("C1.5+2.")?.primary, "1.5 + 2.");
    Ok(())
}

/// Verifies live preview and left-to-right chaining
pub fn verify_chaining<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    assert_eq!(driver.press_keys("C10+5+")?.primary, "15 + ");
    assert_eq!(driver.press_keys("2")?.primary, "15 + 2");
    let done = driver.press_keys("=")?;
    assert_eq!(done.primary, "17");
    assert_eq!(done.caption, "10 + 5 + 2 = ");
    assert_eq!(done.copy_text(), Some("17"));
    Ok(())
}

/// Verifies clear entry and all clear
pub fn verify_clearing<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    assert_eq!(driver.press_keys("C12<")?.primary, "1");
    assert_eq!(driver.press_keys("<")?.primary, "0");
    assert_eq!(driver.press_keys("C10+<")?.primary, "10");

    let cleared = driver.press_keys("C10+5C")?;
    assert_eq!(cleared.primary, "0");
    assert_eq!(cleared.caption, "Ans = 15");
    Ok(())
}

/// Verifies square and square root
pub fn verify_unary<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    let squared = driver.press_keys("C5s")?;
    assert_eq!(squared.primary, "25");
    assert!(squared.just_completed);
    assert_eq!(driver.press_keys("C9r")?.primary, "3");
    Ok(())
}

/// Verifies the answer tape
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    let before = driver.history().len();
    driver.press_keys("C1+1=")?;
    driver.press_keys("C3*3=")?;
    let history = driver.history();
    assert_eq!(history.len(), before + 2);
    assert_eq!(
        history.last().map(|e| e.display()),
        Some("3 × 3 = 9".to_string())
    );
    Ok(())
}

/// Runs every scenario
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) -> CalcResult<()> {
    verify_basic_arithmetic(driver)?;
    verify_number_entry(driver)?;
    verify_chaining(driver)?;
    verify_clearing(driver)?;
    verify_unary(driver)?;
    verify_history(driver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ErrorPolicy, Operator};

    #[test]
    fn test_keypad_driver_new() {
        let driver = KeypadDriver::new();
        assert_eq!(driver.snapshot().primary, "0");
        assert!(driver.clicks().is_empty());
        assert_eq!(driver.keypad().button_count(), 20);
    }

    #[test]
    fn test_keypad_driver_records_clicks() {
        let mut driver = KeypadDriver::new();
        driver.press_keys("1+2=").unwrap();
        assert_eq!(driver.clicks(), ["btn-1", "btn-plus", "btn-2", "btn-equals"]);
        assert_eq!(driver.engine().primary(), "3");
    }

    #[test]
    fn test_keypad_driver_click_unknown_id() {
        let mut driver = KeypadDriver::new();
        assert!(driver.click("btn-power").is_none());
        assert!(driver.clicks().is_empty());
    }

    #[test]
    fn test_keypad_driver_ignores_command_without_button() {
        let mut driver = KeypadDriver::new();
        assert_eq!(driver.press(Command::Digit(42)).primary, "0");
        assert!(driver.clicks().is_empty());
    }

    #[test]
    fn test_press_keys_rejects_unknown_key() {
        let mut engine = Engine::new();
        assert!(engine.press_keys("1+a").is_err());
        assert_eq!(engine.snapshot().primary, "0");
    }

    #[test]
    fn test_press_on_engine_dispatches() {
        let mut engine = Engine::new();
        engine.press(Command::Digit(4));
        let snap = engine.press(Command::Operator(Operator::Multiply));
        assert_eq!(snap.primary, "4 × ");
    }

    #[test]
    fn test_strict_keypad_driver() {
        let config = EngineConfig::default().with_error_policy(ErrorPolicy::Report);
        let mut driver = KeypadDriver::with_config(config);
        let snap = driver.press_keys("1/0=").unwrap();
        assert!(snap.error);
        assert_eq!(snap.primary, "Cannot divide by zero");
    }

    // ===== Unified scenarios on both drivers =====

    #[test]
    fn test_engine_all_scenarios() {
        run_all_scenarios(&mut Engine::new()).unwrap();
    }

    #[test]
    fn test_keypad_all_scenarios() {
        run_all_scenarios(&mut KeypadDriver::new()).unwrap();
    }

    #[test]
    fn test_drivers_agree() {
        let mut engine = Engine::new();
        let mut keypad = KeypadDriver::new();
        for keys in ["12+3", "*2", "=", "s", "<", "C", "7r"] {
            assert_eq!(engine.press_keys(keys), keypad.press_keys(keys));
        }
    }
}
