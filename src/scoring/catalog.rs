use super::config::{BoardConfig, HouseDef};
use super::rules::{normalize, CardRule};
use super::validation::validate_board;

/// An item type a house can collect. Color and kind are normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemType {
    pub key: String,
    pub label: String,
    pub color: String,
    pub kind: String,
}

/// A multiplier card with its parsed applicability rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardType {
    pub key: String,
    pub label: String,
    pub factor: u32,
    pub rule: CardRule,
}

impl CardType {
    pub fn applies_to(&self, item: &ItemType) -> bool {
        self.rule.matches(item)
    }
}

/// Validated, immutable board definition shared by an engine for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    colors: Vec<String>,
    items: Vec<ItemType>,
    cards: Vec<CardType>,
    layout: Vec<(String, String)>,
}

impl Catalog {
    /// Validate a board config and resolve it into a catalog.
    ///
    /// Returns every validation error at once.
    pub fn from_config(config: &BoardConfig) -> Result<Self, Vec<String>> {
        validate_board(config)?;

        // validate_board has already parsed every rule
        let cards = config
            .cards
            .iter()
            .enumerate()
            .map(|(i, def)| {
                CardRule::parse(&def.applies_to)
                    .map(|rule| CardType {
                        key: def.key.clone(),
                        label: def.label.clone(),
                        factor: def.factor,
                        rule,
                    })
                    .map_err(|e| {
                        vec![format!(
                            "board.cards[{}].applies_to: invalid '{}' - {}",
                            i, def.applies_to, e
                        )]
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            colors: config.colors.iter().map(|c| normalize(c)).collect(),
            items: config
                .items
                .iter()
                .map(|def| ItemType {
                    key: def.key.clone(),
                    label: def.label.clone(),
                    color: normalize(&def.color),
                    kind: normalize(&def.kind),
                })
                .collect(),
            cards,
            layout: config
                .houses
                .iter()
                .map(|HouseDef { name, color }| (name.clone(), normalize(color)))
                .collect(),
        })
    }

    /// House color palette in canonical order
    pub fn colors(&self) -> &[String] {
        &self.colors
    }

    pub fn items(&self) -> &[ItemType] {
        &self.items
    }

    pub fn cards(&self) -> &[CardType] {
        &self.cards
    }

    /// Board layout as (name, color) pairs in board order
    pub fn layout(&self) -> &[(String, String)] {
        &self.layout
    }

    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    pub fn item(&self, key: &str) -> Option<&ItemType> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn card(&self, key: &str) -> Option<&CardType> {
        self.cards.iter().find(|card| card.key == key)
    }

    /// Cards whose rule matches the given item type
    pub fn cards_for<'a>(&'a self, item: &'a ItemType) -> impl Iterator<Item = &'a CardType> {
        self.cards.iter().filter(move |card| card.applies_to(item))
    }
}
