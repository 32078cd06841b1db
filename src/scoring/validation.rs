use std::collections::HashSet;

use super::config::BoardConfig;
use super::rules::{normalize, CardRule};

/// Validate a board definition at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_board(config: &BoardConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    // Palette
    if config.colors.is_empty() {
        errors.push("board.colors: at least one color is required".to_string());
    }
    let mut palette = HashSet::new();
    for (i, color) in config.colors.iter().enumerate() {
        let color = normalize(color);
        if color.is_empty() {
            errors.push(format!("board.colors[{}]: must not be empty", i));
        } else if !palette.insert(color.clone()) {
            errors.push(format!("board.colors[{}]: duplicate color '{}'", i, color));
        }
    }

    // Items
    if config.items.is_empty() {
        errors.push("board.items: at least one item type is required".to_string());
    }
    let mut item_keys = HashSet::new();
    let mut item_colors = HashSet::new();
    let mut item_kinds = HashSet::new();
    for (i, item) in config.items.iter().enumerate() {
        if item.key.trim().is_empty() {
            errors.push(format!("board.items[{}].key: must not be empty", i));
        } else if !item_keys.insert(item.key.as_str()) {
            errors.push(format!("board.items[{}].key: duplicate key '{}'", i, item.key));
        }
        if normalize(&item.color).is_empty() {
            errors.push(format!("board.items[{}].color: must not be empty", i));
        }
        if normalize(&item.kind).is_empty() {
            errors.push(format!("board.items[{}].kind: must not be empty", i));
        }
        item_colors.insert(normalize(&item.color));
        item_kinds.insert(normalize(&item.kind));
    }

    // Cards (an empty card list is allowed)
    let mut card_keys = HashSet::new();
    for (i, card) in config.cards.iter().enumerate() {
        if card.key.trim().is_empty() {
            errors.push(format!("board.cards[{}].key: must not be empty", i));
        } else if !card_keys.insert(card.key.as_str()) {
            errors.push(format!("board.cards[{}].key: duplicate key '{}'", i, card.key));
        }
        if card.factor == 0 {
            errors.push(format!("board.cards[{}].factor: must be at least 1", i));
        }
        match CardRule::parse(&card.applies_to) {
            Ok(rule) => {
                for color in rule.colors() {
                    if !item_colors.contains(color) {
                        errors.push(format!(
                            "board.cards[{}].applies_to: no item has color '{}'",
                            i, color
                        ));
                    }
                }
                for kind in rule.kinds() {
                    if !item_kinds.contains(kind) {
                        errors.push(format!(
                            "board.cards[{}].applies_to: no item has kind '{}'",
                            i, kind
                        ));
                    }
                }
            }
            Err(e) => {
                errors.push(format!(
                    "board.cards[{}].applies_to: invalid '{}' - {}",
                    i, card.applies_to, e
                ));
            }
        }
    }

    // Layout
    if config.houses.is_empty() {
        errors.push("board.houses: at least one house is required".to_string());
    }
    for (i, house) in config.houses.iter().enumerate() {
        if house.name.trim().is_empty() {
            errors.push(format!("board.houses[{}].name: must not be empty", i));
        }
        let color = normalize(&house.color);
        if !palette.contains(&color) {
            errors.push(format!(
                "board.houses[{}].color: '{}' is not in board.colors",
                i, house.color
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
