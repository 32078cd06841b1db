use serde::{Deserialize, Serialize};

/// Board definition: item types, multiplier cards, color palette and layout.
///
/// Fixed for the lifetime of a session. Every field falls back to the
/// reference board when omitted.
///
/// Example YAML:
/// ```yaml
/// board:
///   colors: [orange, pink, red, yellow]
///   items:
///     - { key: redGift, label: "R🎁", color: red, kind: gift }
///   cards:
///     - { key: x4RedGift, label: "x4 for RED gifts", factor: 4, applies_to: "color=red & kind=gift" }
///   houses:
///     - { name: "Orange 1", color: orange }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// House color palette, in canonical order
    pub colors: Vec<String>,

    /// Item types that can be placed in a house
    pub items: Vec<ItemDef>,

    /// Multiplier cards a house can hold
    pub cards: Vec<CardDef>,

    /// Board layout: one entry per house, in board order
    pub houses: Vec<HouseDef>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let colors = ["orange", "pink", "red", "yellow"];

        // Board order repeats the palette: O,P,R,Y,O,P,R,Y
        let houses = (1..=2)
            .flat_map(|n| {
                colors.iter().map(move |color| HouseDef {
                    name: format!("{} {}", capitalize(color), n),
                    color: color.to_string(),
                })
            })
            .collect();

        Self {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            items: vec![
                ItemDef::new("redGift", "R🎁", "red", "gift"),
                ItemDef::new("blueGift", "B🎁", "blue", "gift"),
                ItemDef::new("redOrn", "R❄", "red", "orn"),
                ItemDef::new("blueOrn", "B❄", "blue", "orn"),
            ],
            cards: vec![
                CardDef::new("x3RedAll", "x3 for RED items", 3, "color=red"),
                CardDef::new("x2BlueAll", "x2 for BLUE items", 2, "color=blue"),
                CardDef::new("x4RedGift", "x4 for RED gifts", 4, "color=red & kind=gift"),
            ],
            houses,
        }
    }
}

/// Item type definition.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ItemDef {
    /// Unique identifier (e.g. "redGift")
    pub key: String,

    /// Short display label (e.g. "R🎁")
    pub label: String,

    /// Item color, matched by `color=` card rules
    pub color: String,

    /// Item category, matched by `kind=` card rules
    pub kind: String,
}

impl ItemDef {
    pub fn new(key: &str, label: &str, color: &str, kind: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            color: color.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Multiplier card definition.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CardDef {
    pub key: String,
    pub label: String,

    /// Each copy held multiplies matching items by this factor
    pub factor: u32,

    /// Rule expression, e.g. "color=red & kind=gift"
    pub applies_to: String,
}

impl CardDef {
    pub fn new(key: &str, label: &str, factor: u32, applies_to: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            factor,
            applies_to: applies_to.to_string(),
        }
    }
}

/// One house position on the board.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HouseDef {
    pub name: String,
    pub color: String,
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
