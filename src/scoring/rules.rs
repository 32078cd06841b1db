use anyhow::{bail, Result};
use std::fmt;

use super::catalog::ItemType;

/// Lowercase and trim a color or kind name so lookups are case-insensitive.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Which item types a multiplier card applies to.
///
/// Rule syntax in config files:
/// - `*` matches every item
/// - `color=red` matches items of that color
/// - `kind=gift` matches items of that kind
/// - terms joined with `&` must all match (`color=red & kind=gift`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardRule {
    Any,
    ColorIs(String),
    KindIs(String),
    All(Vec<CardRule>),
}

impl CardRule {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            bail!("Rule must not be empty");
        }

        if s.contains('&') {
            let terms = s
                .split('&')
                .map(Self::parse_term)
                .collect::<Result<Vec<_>>>()?;
            Ok(CardRule::All(terms))
        } else {
            Self::parse_term(s)
        }
    }

    fn parse_term(term: &str) -> Result<Self> {
        let term = term.trim();
        if term == "*" {
            return Ok(CardRule::Any);
        }

        let Some((field, value)) = term.split_once('=') else {
            bail!("Rule term must be '*', 'color=NAME' or 'kind=NAME': '{}'", term)
        };
        let value = normalize(value);
        if value.is_empty() {
            bail!("Rule term has no value: '{}'", term);
        }

        match normalize(field).as_str() {
            "color" => Ok(CardRule::ColorIs(value)),
            "kind" => Ok(CardRule::KindIs(value)),
            other => bail!("Unknown rule field '{}' in '{}'", other, term),
        }
    }

    pub fn matches(&self, item: &ItemType) -> bool {
        match self {
            CardRule::Any => true,
            CardRule::ColorIs(color) => item.color == *color,
            CardRule::KindIs(kind) => item.kind == *kind,
            CardRule::All(rules) => rules.iter().all(|rule| rule.matches(item)),
        }
    }

    /// Colors named anywhere in the rule (for validation against the item palette)
    pub fn colors(&self) -> Vec<&str> {
        match self {
            CardRule::ColorIs(color) => vec![color.as_str()],
            CardRule::All(rules) => rules.iter().flat_map(|r| r.colors()).collect(),
            _ => Vec::new(),
        }
    }

    /// Kinds named anywhere in the rule
    pub fn kinds(&self) -> Vec<&str> {
        match self {
            CardRule::KindIs(kind) => vec![kind.as_str()],
            CardRule::All(rules) => rules.iter().flat_map(|r| r.kinds()).collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for CardRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardRule::Any => write!(f, "*"),
            CardRule::ColorIs(color) => write!(f, "color={}", color),
            CardRule::KindIs(kind) => write!(f, "kind={}", kind),
            CardRule::All(rules) => {
                let terms: Vec<String> = rules.iter().map(|r| r.to_string()).collect();
                write!(f, "{}", terms.join(" & "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(color: &str, kind: &str) -> ItemType {
        ItemType {
            key: format!("{}{}", color, kind),
            label: "test".to_string(),
            color: color.to_string(),
            kind: kind.to_string(),
        }
    }

    #[test]
    fn test_parse_color_rule() {
        let rule = CardRule::parse("color=red").unwrap();
        assert_eq!(rule, CardRule::ColorIs("red".to_string()));
        assert!(rule.matches(&item("red", "gift")));
        assert!(rule.matches(&item("red", "orn")));
        assert!(!rule.matches(&item("blue", "gift")));
    }

    #[test]
    fn test_parse_kind_rule() {
        let rule = CardRule::parse("kind=orn").unwrap();
        assert!(rule.matches(&item("blue", "orn")));
        assert!(!rule.matches(&item("blue", "gift")));
    }

    #[test]
    fn test_parse_conjunction() {
        let rule = CardRule::parse("color=red & kind=gift").unwrap();
        assert!(rule.matches(&item("red", "gift")));
        assert!(!rule.matches(&item("red", "orn")));
        assert!(!rule.matches(&item("blue", "gift")));
    }

    #[test]
    fn test_parse_any() {
        let rule = CardRule::parse("*").unwrap();
        assert!(rule.matches(&item("blue", "orn")));
        assert!(rule.matches(&item("red", "gift")));
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let rule = CardRule::parse("  Color = RED ").unwrap();
        assert_eq!(rule, CardRule::ColorIs("red".to_string()));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(CardRule::parse("").is_err());
        assert!(CardRule::parse("red").is_err());
        assert!(CardRule::parse("size=big").is_err());
        assert!(CardRule::parse("color=").is_err());
        assert!(CardRule::parse("color=red & ").is_err());
    }

    #[test]
    fn test_display_is_parseable() {
        let rule = CardRule::parse("color=red&kind=gift").unwrap();
        assert_eq!(rule.to_string(), "color=red & kind=gift");
        assert_eq!(CardRule::parse(&rule.to_string()).unwrap(), rule);
    }

    #[test]
    fn test_named_colors_and_kinds() {
        let rule = CardRule::parse("color=red & kind=gift & color=blue").unwrap();
        assert_eq!(rule.colors(), vec!["red", "blue"]);
        assert_eq!(rule.kinds(), vec!["gift"]);
        assert!(CardRule::Any.colors().is_empty());
    }
}
