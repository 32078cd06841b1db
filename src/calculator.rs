//! Standalone score calculator: a base value plus named bonuses, multiplied.

use serde::{Deserialize, Serialize};

/// Calculator configuration: which bonus inputs exist.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Bonus input labels, in display order
    pub bonuses: Vec<String>,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            bonuses: ["Present", "Ornament", "Stocking", "Candy Cane", "Grinch", "Whoville"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bonus {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    pub base: f64,
    pub bonuses: Vec<Bonus>,
    pub multiplier: f64,
}

impl Calculator {
    pub fn new(config: &CalculatorConfig) -> Self {
        Self {
            base: 0.0,
            bonuses: config
                .bonuses
                .iter()
                .map(|label| Bonus {
                    label: label.clone(),
                    value: 0.0,
                })
                .collect(),
            multiplier: 1.0,
        }
    }

    /// Base plus every bonus
    pub fn subtotal(&self) -> f64 {
        self.base + self.bonuses.iter().map(|b| b.value).sum::<f64>()
    }

    pub fn total(&self) -> f64 {
        self.subtotal() * self.multiplier
    }

    /// Total rounded half toward positive infinity
    pub fn rounded_total(&self) -> i64 {
        (self.total() + 0.5).floor() as i64
    }

    /// Set a bonus by name. Names match labels ignoring case and spaces.
    /// Returns false if no bonus has that name.
    pub fn set_bonus(&mut self, name: &str, value: f64) -> bool {
        let slug = bonus_slug(name);
        match self.bonuses.iter_mut().find(|b| bonus_slug(&b.label) == slug) {
            Some(bonus) => {
                bonus.value = value;
                true
            }
            None => false,
        }
    }

    /// Zero the base and bonuses, multiplier back to 1
    pub fn reset(&mut self) {
        self.base = 0.0;
        for bonus in self.bonuses.iter_mut() {
            bonus.value = 0.0;
        }
        self.multiplier = 1.0;
    }
}

/// Lowercase alphanumeric form of a bonus label ("Candy Cane" -> "candycane")
pub fn bonus_slug(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Parse the leading decimal number of `raw`, ignoring trailing text.
/// Anything without a leading number is 0.
pub fn parse_amount(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a multiplier; zero or unparsable input means 1
pub fn parse_multiplier(raw: &str) -> f64 {
    let value = parse_amount(raw);
    if value == 0.0 {
        1.0
    } else {
        value
    }
}

/// Format an integer with `,` thousands separators ("1234567" -> "1,234,567").
/// Takes both signed calculator totals and unsigned board points.
pub fn format_thousands(n: impl Into<i128>) -> String {
    let n: i128 = n.into();
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> Calculator {
        Calculator::new(&CalculatorConfig::default())
    }

    #[test]
    fn test_new_is_zeroed() {
        let calc = calculator();
        assert_eq!(calc.bonuses.len(), 6);
        assert_eq!(calc.total(), 0.0);
        assert_eq!(calc.multiplier, 1.0);
    }

    #[test]
    fn test_sum_then_multiply() {
        let mut calc = calculator();
        calc.base = 10.0;
        assert!(calc.set_bonus("present", 5.0));
        assert!(calc.set_bonus("Grinch", 2.5));
        calc.multiplier = 2.0;

        assert_eq!(calc.subtotal(), 17.5);
        assert_eq!(calc.total(), 35.0);
        assert_eq!(calc.rounded_total(), 35);
    }

    #[test]
    fn test_rounding_half_up() {
        let mut calc = calculator();
        calc.base = 2.5;
        assert_eq!(calc.rounded_total(), 3);
        calc.base = -2.5;
        assert_eq!(calc.rounded_total(), -2);
        calc.base = 2.49;
        assert_eq!(calc.rounded_total(), 2);
    }

    #[test]
    fn test_set_bonus_matches_slug() {
        let mut calc = calculator();
        assert!(calc.set_bonus("candycane", 4.0));
        assert!(calc.set_bonus("Candy Cane", 4.0));
        assert!(calc.set_bonus("CANDY-CANE", 4.0));
        assert!(!calc.set_bonus("reindeer", 1.0));
        assert_eq!(calc.subtotal(), 4.0);
    }

    #[test]
    fn test_reset() {
        let mut calc = calculator();
        calc.base = 3.0;
        calc.set_bonus("whoville", 9.0);
        calc.multiplier = 3.0;
        calc.reset();

        assert_eq!(calc, calculator());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12"), 12.0);
        assert_eq!(parse_amount("  3.5"), 3.5);
        assert_eq!(parse_amount("-4"), -4.0);
        assert_eq!(parse_amount(".5"), 0.5);
        assert_eq!(parse_amount("5."), 5.0);
        assert_eq!(parse_amount("1e3"), 1000.0);
        assert_eq!(parse_amount("7pts"), 7.0);
        assert_eq!(parse_amount("2e"), 2.0);
    }

    #[test]
    fn test_parse_amount_garbage_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("-"), 0.0);
        assert_eq!(parse_amount("1e999"), 0.0);
    }

    #[test]
    fn test_parse_multiplier_defaults_to_one() {
        assert_eq!(parse_multiplier(""), 1.0);
        assert_eq!(parse_multiplier("0"), 1.0);
        assert_eq!(parse_multiplier("x"), 1.0);
        assert_eq!(parse_multiplier("3"), 3.0);
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-45000), "-45,000");
        assert_eq!(format_thousands(u64::MAX), "18,446,744,073,709,551,615");
        assert_eq!(format_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }
}
