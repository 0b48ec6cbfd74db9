//! Unified scenarios run through the public API

#![allow(clippy::unwrap_used)]

use padcalc::driver::{
    run_all_scenarios, verify_basic_arithmetic, verify_chaining, verify_clearing,
    verify_history, verify_number_entry, verify_unary,
};
use padcalc::prelude::*;

#[test]
fn test_engine_scenarios() {
    let mut engine = Engine::new();
    verify_basic_arithmetic(&mut engine).unwrap();
    verify_number_entry(&mut engine).unwrap();
    verify_chaining(&mut engine).unwrap();
    verify_clearing(&mut engine).unwrap();
    verify_unary(&mut engine).unwrap();
    verify_history(&mut engine).unwrap();
}

#[test]
fn test_keypad_scenarios() {
    let mut driver = KeypadDriver::new();
    run_all_scenarios(&mut driver).unwrap();
    assert!(driver.clicks().iter().all(|id| id.starts_with("btn-")));
}

#[test]
fn test_all_scenarios_repeatable() {
    let mut engine = Engine::new();
    run_all_scenarios(&mut engine).unwrap();
    run_all_scenarios(&mut engine).unwrap();
}

#[test]
fn test_snapshot_json_shape() {
    let mut engine = Engine::new();
    let snap = engine.press_keys("10+5=").unwrap();
    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["primary"], "15");
    assert_eq!(json["caption"], "10 + 5 = ");
    assert_eq!(json["just_completed"], true);
    assert_eq!(json["error"], false);
}

#[test]
fn test_history_export_after_session() {
    let mut driver = KeypadDriver::new();
    driver.press_keys("2+2=").unwrap();
    driver.press_keys("3s").unwrap();
    driver.press_keys("C16r").unwrap();
    let lines: Vec<String> = driver.history().iter().map(HistoryEntry::display).collect();
    assert_eq!(lines, ["2 + 2 = 4", "3² = 9", "√16 = 4"]);
}

#[test]
fn test_unknown_key_reported() {
    let mut driver = KeypadDriver::new();
    assert_eq!(
        driver.press_keys("1+%"),
        Err(CalcError::UnknownKey('%'))
    );
}
