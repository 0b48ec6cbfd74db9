//! Structured operand builder
//!
//! Digits are tracked as data, so an operand can never hold two decimal
//! points or a bare leading dot.

use std::fmt;

/// An operand under construction: sign, integer digits, optional fraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberEntry {
    negative: bool,
    integer: Vec<u8>,
    /// `Some` once a decimal point has been entered, even with no digits after it
    fraction: Option<Vec<u8>>,
}

impl NumberEntry {
    /// Creates an empty entry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the entry `"0"`
    #[must_use]
    pub fn zero() -> Self {
        Self {
            negative: false,
            integer: vec![0],
            fraction: None,
        }
    }

    /// Rebuilds an entry from a plain decimal rendering such as `-12.5`
    ///
    /// Exponent forms and non-finite renderings return `None`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (body, None),
        };
        if int_part.is_empty() {
            return None;
        }
        let integer = digits_of(int_part)?;
        let fraction = match frac_part {
            Some(f) => Some(digits_of(f)?),
            None => None,
        };
        Some(Self {
            negative,
            integer,
            fraction,
        })
    }

    /// Returns true when nothing has been entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.integer.is_empty() && self.fraction.is_none()
    }

    /// Returns true once a decimal point is part of the entry
    #[must_use]
    pub fn has_point(&self) -> bool {
        self.fraction.is_some()
    }

    /// Returns true when the entry reads exactly `0`
    #[must_use]
    pub fn is_zero_literal(&self) -> bool {
        !self.negative && self.integer == [0] && self.fraction.is_none()
    }

    /// Appends a digit (0-9); a lone `0` is replaced rather than extended
    pub fn push_digit(&mut self, digit: u8) {
        debug_assert!(digit <= 9, "digit out of range: {digit}");
        if self.is_zero_literal() {
            self.integer[0] = digit;
            return;
        }
        match self.fraction.as_mut() {
            Some(fraction) => fraction.push(digit),
            None => self.integer.push(digit),
        }
    }

    /// Appends a decimal point, seeding `0.` on an empty entry
    ///
    /// Returns false (and leaves the entry untouched) if a point is already present.
    pub fn push_point(&mut self) -> bool {
        if self.has_point() {
            return false;
        }
        if self.integer.is_empty() {
            self.integer.push(0);
        }
        self.fraction = Some(Vec::new());
        true
    }

    /// Removes the last rendered character
    pub fn pop(&mut self) {
        match self.fraction.as_mut() {
            Some(fraction) => {
                if fraction.pop().is_none() {
                    self.fraction = None;
                }
            }
            None => {
                self.integer.pop();
            }
        }
        if self.is_empty() {
            self.negative = false;
        }
    }

    /// Numeric value of the entry: the correctly rounded parse of its rendering
    ///
    /// The empty entry is `0.0`.
    #[must_use]
    pub fn value(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.to_string().parse().unwrap_or(0.0)
    }
}

impl fmt::Display for NumberEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        if self.negative {
            f.write_str("-")?;
        }
        for &d in &self.integer {
            write!(f, "{d}")?;
        }
        if let Some(fraction) = &self.fraction {
            f.write_str(".")?;
            for &d in fraction {
                write!(f, "{d}")?;
            }
        }
        Ok(())
    }
}

fn digits_of(s: &str) -> Option<Vec<u8>> {
    s.chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> NumberEntry {
        let mut entry = NumberEntry::new();
        for c in keys.chars() {
            if c == '.' {
                entry.push_point();
            } else {
                entry.push_digit(c.to_digit(10).unwrap() as u8);
            }
        }
        entry
    }

    #[test]
    fn test_empty_entry() {
        let entry = NumberEntry::new();
        assert!(entry.is_empty());
        assert!(!entry.has_point());
        assert_eq!(entry.to_string(), "");
        assert_eq!(entry.value(), 0.0);
    }

    #[test]
    fn test_digits_accumulate() {
        let entry = typed("123");
        assert_eq!(entry.to_string(), "123");
        assert_eq!(entry.value(), 123.0);
    }

    #[test]
    fn test_leading_zero_collapses() {
        assert_eq!(typed("05").to_string(), "5");
        assert_eq!(typed("00").to_string(), "0");
        assert_eq!(typed("0.05").to_string(), "0.05");
    }

    #[test]
    fn test_point_on_empty_seeds_zero() {
        let entry = typed(".");
        assert_eq!(entry.to_string(), "0.");
        assert!(entry.has_point());
        assert_eq!(entry.value(), 0.0);
    }

    #[test]
    fn test_second_point_ignored() {
        let mut entry = typed("1.5");
        assert!(!entry.push_point());
        assert_eq!(entry.to_string(), "1.5");
    }

    #[test]
    fn test_fraction_value_is_exact_for_short_input() {
        assert_eq!(typed("0.3").value(), 0.3);
        assert_eq!(typed("12.25").value(), 12.25);
        assert_eq!(typed("2.").value(), 2.0);
    }

    #[test]
    fn test_long_input_value_is_correctly_rounded() {
        assert_eq!(typed("1.00000000000000011102230246251565").value(), 1.0);
        assert_eq!(typed("0.1234567890123456789").value(), 0.123_456_789_012_345_68);
        let tiny = format!("1.{}", "0".repeat(309));
        assert_eq!(typed(&tiny).value(), 1.0);
        let huge = format!("1{}", "0".repeat(400));
        assert_eq!(typed(&huge).value(), f64::INFINITY);
    }

    #[test]
    fn test_pop_walks_back_through_point() {
        let mut entry = typed("1.5");
        entry.pop();
        assert_eq!(entry.to_string(), "1.");
        entry.pop();
        assert_eq!(entry.to_string(), "1");
        assert!(!entry.has_point());
        entry.pop();
        assert!(entry.is_empty());
    }

    #[test]
    fn test_parse_plain_decimals() {
        let entry = NumberEntry::parse("-12.5").unwrap();
        assert_eq!(entry.to_string(), "-12.5");
        assert_eq!(entry.value(), -12.5);
        assert_eq!(NumberEntry::parse("15").unwrap().value(), 15.0);
    }

    #[test]
    fn test_parse_rejects_non_plain() {
        assert!(NumberEntry::parse("Infinity").is_none());
        assert!(NumberEntry::parse("NaN").is_none());
        assert!(NumberEntry::parse("1e300").is_none());
        assert!(NumberEntry::parse("").is_none());
        assert!(NumberEntry::parse("-").is_none());
        assert!(NumberEntry::parse(".5").is_none());
    }

    #[test]
    fn test_pop_negative_to_empty_drops_sign() {
        let mut entry = NumberEntry::parse("-5").unwrap();
        entry.pop();
        assert!(entry.is_empty());
        assert_eq!(entry.to_string(), "");
        entry.push_digit(3);
        assert_eq!(entry.to_string(), "3");
    }

    #[test]
    fn test_zero_literal() {
        assert!(NumberEntry::zero().is_zero_literal());
        assert!(!typed("0.").is_zero_literal());
        assert!(!typed("10").is_zero_literal());
    }
}
