use super::board::Counts;

/// Clamp raw user input to a non-negative count.
///
/// Reads an optional sign followed by leading digits and ignores whatever
/// follows, so `"3.7"` is 3 and `"12abc"` is 12. Empty, non-numeric and
/// negative input all become 0. Values past `u32::MAX` saturate.
pub fn to_non_negative_int(raw: &str) -> u32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        &digits[..end]
    };
    if digits.is_empty() || negative {
        return 0;
    }

    digits.chars().fold(0u32, |acc, c| {
        acc.saturating_mul(10)
            .saturating_add(c.to_digit(10).unwrap_or(0))
    })
}

/// Build a complete count map for `keys`, clamping each raw value.
/// Keys without a raw value are 0.
pub fn counts_from_raw<'a, K, F>(keys: K, raw: F) -> Counts
where
    K: IntoIterator<Item = &'a str>,
    F: Fn(&str) -> Option<String>,
{
    keys.into_iter()
        .map(|key| {
            let value = raw(key).map(|v| to_non_negative_int(&v)).unwrap_or(0);
            (key.to_string(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(to_non_negative_int("0"), 0);
        assert_eq!(to_non_negative_int("7"), 7);
        assert_eq!(to_non_negative_int("  42"), 42);
        assert_eq!(to_non_negative_int("+5"), 5);
    }

    #[test]
    fn test_negative_becomes_zero() {
        assert_eq!(to_non_negative_int("-3"), 0);
        assert_eq!(to_non_negative_int("-0"), 0);
    }

    #[test]
    fn test_garbage_becomes_zero() {
        assert_eq!(to_non_negative_int(""), 0);
        assert_eq!(to_non_negative_int("abc"), 0);
        assert_eq!(to_non_negative_int("-"), 0);
        assert_eq!(to_non_negative_int("   "), 0);
    }

    #[test]
    fn test_integer_prefix() {
        assert_eq!(to_non_negative_int("3.7"), 3);
        assert_eq!(to_non_negative_int("12abc"), 12);
        assert_eq!(to_non_negative_int("9 apples"), 9);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(to_non_negative_int("99999999999999999999"), u32::MAX);
    }

    #[test]
    fn test_counts_from_raw() {
        let counts = counts_from_raw(["a", "b", "c"], |key| match key {
            "a" => Some("3".to_string()),
            "b" => Some("-1".to_string()),
            _ => None,
        });
        assert_eq!(counts.len(), 3);
        assert_eq!(counts["a"], 3);
        assert_eq!(counts["b"], 0);
        assert_eq!(counts["c"], 0);
    }
}
