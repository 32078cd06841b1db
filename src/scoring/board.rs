use serde::Serialize;
use std::collections::BTreeMap;

use super::catalog::Catalog;

/// Key → count mapping for items or cards.
pub type Counts = BTreeMap<String, u32>;

fn zeroed<'a>(keys: impl Iterator<Item = &'a str>) -> Counts {
    keys.map(|k| (k.to_string(), 0)).collect()
}

/// A board position holding this round's items and cards.
///
/// `items` and `cards` always hold exactly one entry per catalog key.
/// Only the engine mutates a house; callers get read access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct House {
    name: String,
    color: String,
    items: Counts,
    cards: Counts,
    points: u64,
}

impl House {
    pub(crate) fn new(name: &str, color: &str, catalog: &Catalog) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            items: zeroed(catalog.items().iter().map(|i| i.key.as_str())),
            cards: zeroed(catalog.cards().iter().map(|c| c.key.as_str())),
            points: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn items(&self) -> &Counts {
        &self.items
    }

    pub fn cards(&self) -> &Counts {
        &self.cards
    }

    pub fn item_count(&self, key: &str) -> u32 {
        self.items.get(key).copied().unwrap_or(0)
    }

    pub fn card_count(&self, key: &str) -> u32 {
        self.cards.get(key).copied().unwrap_or(0)
    }

    /// Points cached by the last computation
    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn is_empty(&self) -> bool {
        self.items.values().all(|&n| n == 0) && self.cards.values().all(|&n| n == 0)
    }

    pub(crate) fn set_points(&mut self, points: u64) {
        self.points = points;
    }

    /// Overwrite every item and card count. Missing keys become zero,
    /// keys the catalog does not define are ignored.
    pub(crate) fn overwrite(&mut self, items: &Counts, cards: &Counts) {
        for (key, count) in self.items.iter_mut() {
            *count = items.get(key).copied().unwrap_or(0);
        }
        for (key, count) in self.cards.iter_mut() {
            *count = cards.get(key).copied().unwrap_or(0);
        }
    }

    /// Add item deltas on top of the current counts. Cards are untouched.
    pub(crate) fn add_items(&mut self, deltas: &Counts) {
        for (key, count) in self.items.iter_mut() {
            if let Some(delta) = deltas.get(key) {
                *count = count.saturating_add(*delta);
            }
        }
    }

    /// Zero all items and cards, keeping name and color
    pub(crate) fn clear(&mut self) {
        self.items.values_mut().for_each(|n| *n = 0);
        self.cards.values_mut().for_each(|n| *n = 0);
    }
}

/// Persistent per-color, per-item bonus flags.
///
/// Every palette color has an entry for every item key. A set flag adds 1 to
/// the item's base value in houses of that color. The only way to change a
/// flag is [`ColorBonusTable::toggle`], so values never exceed 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorBonusTable {
    table: BTreeMap<String, BTreeMap<String, bool>>,
}

impl ColorBonusTable {
    pub(crate) fn new(catalog: &Catalog) -> Self {
        let table = catalog
            .colors()
            .iter()
            .map(|color| {
                let flags = catalog
                    .items()
                    .iter()
                    .map(|item| (item.key.clone(), false))
                    .collect();
                (color.clone(), flags)
            })
            .collect();
        Self { table }
    }

    /// Bonus value (0 or 1) for an item in houses of `color`.
    /// Unknown colors or items read as 0.
    pub fn bonus(&self, color: &str, item_key: &str) -> u32 {
        u32::from(self.is_active(color, item_key))
    }

    pub fn is_active(&self, color: &str, item_key: &str) -> bool {
        self.table
            .get(color)
            .and_then(|flags| flags.get(item_key))
            .copied()
            .unwrap_or(false)
    }

    /// Item keys with an active bonus for `color`
    pub fn active_items(&self, color: &str) -> Vec<&str> {
        self.table
            .get(color)
            .map(|flags| {
                flags
                    .iter()
                    .filter(|(_, &on)| on)
                    .map(|(key, _)| key.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Flip a flag. Returns the new state, or None for an unknown color or item.
    pub(crate) fn toggle(&mut self, color: &str, item_key: &str) -> Option<bool> {
        let flag = self.table.get_mut(color)?.get_mut(item_key)?;
        *flag = !*flag;
        Some(*flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::config::BoardConfig;

    fn catalog() -> Catalog {
        Catalog::from_config(&BoardConfig::default()).unwrap()
    }

    fn counts(pairs: &[(&str, u32)]) -> Counts {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_new_house_has_every_key_at_zero() {
        let house = House::new("Red 1", "red", &catalog());
        assert_eq!(house.items().len(), 4);
        assert_eq!(house.cards().len(), 3);
        assert!(house.is_empty());
        assert_eq!(house.points(), 0);
    }

    #[test]
    fn test_overwrite_replaces_and_fills_missing() {
        let mut house = House::new("Red 1", "red", &catalog());
        house.overwrite(&counts(&[("redGift", 5), ("blueOrn", 1)]), &counts(&[("x3RedAll", 2)]));
        house.overwrite(&counts(&[("redGift", 2)]), &Counts::new());

        assert_eq!(house.item_count("redGift"), 2);
        assert_eq!(house.item_count("blueOrn"), 0);
        assert_eq!(house.card_count("x3RedAll"), 0);
    }

    #[test]
    fn test_overwrite_ignores_unknown_keys() {
        let mut house = House::new("Red 1", "red", &catalog());
        house.overwrite(&counts(&[("greenGift", 9)]), &counts(&[("x9", 1)]));

        assert_eq!(house.items().len(), 4);
        assert_eq!(house.cards().len(), 3);
        assert!(!house.items().contains_key("greenGift"));
    }

    #[test]
    fn test_add_items_accumulates() {
        let mut house = House::new("Pink 1", "pink", &catalog());
        house.add_items(&counts(&[("blueGift", 2)]));
        house.add_items(&counts(&[("blueGift", 3), ("redOrn", 1)]));

        assert_eq!(house.item_count("blueGift"), 5);
        assert_eq!(house.item_count("redOrn"), 1);
    }

    #[test]
    fn test_add_items_saturates() {
        let mut house = House::new("Pink 1", "pink", &catalog());
        house.add_items(&counts(&[("blueGift", u32::MAX)]));
        house.add_items(&counts(&[("blueGift", 10)]));
        assert_eq!(house.item_count("blueGift"), u32::MAX);
    }

    #[test]
    fn test_clear_keeps_identity() {
        let mut house = House::new("Yellow 2", "yellow", &catalog());
        house.overwrite(&counts(&[("redGift", 3)]), &counts(&[("x2BlueAll", 1)]));
        house.clear();

        assert!(house.is_empty());
        assert_eq!(house.name(), "Yellow 2");
        assert_eq!(house.color(), "yellow");
        assert_eq!(house.items().len(), 4);
    }

    #[test]
    fn test_bonus_table_complete_and_zeroed() {
        let bonuses = ColorBonusTable::new(&catalog());
        for color in ["orange", "pink", "red", "yellow"] {
            for item in ["redGift", "blueGift", "redOrn", "blueOrn"] {
                assert_eq!(bonuses.bonus(color, item), 0);
            }
        }
    }

    #[test]
    fn test_toggle_is_binary() {
        let mut bonuses = ColorBonusTable::new(&catalog());

        assert_eq!(bonuses.toggle("red", "redGift"), Some(true));
        assert_eq!(bonuses.bonus("red", "redGift"), 1);
        assert_eq!(bonuses.active_items("red"), vec!["redGift"]);

        assert_eq!(bonuses.toggle("red", "redGift"), Some(false));
        assert_eq!(bonuses.bonus("red", "redGift"), 0);
        assert!(bonuses.active_items("red").is_empty());
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let mut bonuses = ColorBonusTable::new(&catalog());
        let before = bonuses.clone();

        assert_eq!(bonuses.toggle("green", "redGift"), None);
        assert_eq!(bonuses.toggle("red", "greenGift"), None);
        assert_eq!(bonuses, before);
        assert_eq!(bonuses.bonus("green", "redGift"), 0);
    }
}
