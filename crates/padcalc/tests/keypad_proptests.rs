//! Property-based tests for the keypad
//!
//! Covers every grid position, mapped key and random key scripts.

#![allow(clippy::unwrap_used)]

use padcalc::prelude::*;
use proptest::prelude::*;

fn grid_position_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0usize..5usize, 0usize..4usize)
}

fn key_strategy() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.', '+', '-', '*', '/', 'x', '×', '÷',
        '=', 's', 'r', '²', '√', '<', 'c', 'C',
    ])
}

proptest! {
    /// Every grid position holds a button that reports that position
    #[test]
    fn prop_grid_positions_valid((row, col) in grid_position_strategy()) {
        let keypad = Keypad::new();
        let button = keypad.get_button_at(row, col).unwrap();
        prop_assert_eq!(button.row, row);
        prop_assert_eq!(button.col, col);
        prop_assert!(!button.label.is_empty());
    }

    /// Positions outside the grid have no button
    #[test]
    fn prop_outside_grid_empty(row in 5usize..100, col in 4usize..100) {
        let keypad = Keypad::new();
        prop_assert!(keypad.get_button_at(row, 0).is_none());
        prop_assert!(keypad.get_button_at(0, col).is_none());
    }

    /// Clicking a button by id yields the button's command
    #[test]
    fn prop_click_roundtrip((row, col) in grid_position_strategy()) {
        let keypad = Keypad::new();
        let button = keypad.get_button_at(row, col).unwrap();
        prop_assert_eq!(keypad.handle_click(&button.id), Some(button.command));
    }

    /// Every mapped key has a button on the keypad
    #[test]
    fn prop_mapped_keys_have_buttons(key in key_strategy()) {
        let keypad = Keypad::new();
        let command = Keypad::key_to_command(key).unwrap();
        prop_assert!(keypad.find_button_by_command(command).is_some());
    }

    /// Key scripts produce one command per non-whitespace key
    #[test]
    fn prop_parse_keys_length(keys in prop::collection::vec(key_strategy(), 0..30), spaces in 0usize..5) {
        let script: String = keys.iter().collect::<String>() + &" ".repeat(spaces);
        let commands = parse_keys(&script).unwrap();
        prop_assert_eq!(commands.len(), keys.len());
    }

    /// Letters outside the mapping are rejected with the offending key
    #[test]
    fn prop_unknown_keys_rejected(key in "[abdefghijklmnopqtuvwyzA-BD-Z]") {
        let ch = key.chars().next().unwrap();
        prop_assert_eq!(parse_keys(&format!("1{ch}")), Err(CalcError::UnknownKey(ch)));
    }
}
