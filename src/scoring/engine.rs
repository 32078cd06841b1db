use chrono::{DateTime, Utc};
use serde::Serialize;

use super::board::{ColorBonusTable, Counts, House};
use super::catalog::{Catalog, ItemType};
use super::rules::normalize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemContribution {
    pub key: String,
    pub label: String,
    pub count: u32,
    pub bonus: bool,      // Color bonus active for this item
    pub base_value: u64,  // 1 + bonus
    pub multiplier: u64,  // Product of matching card factors, per copy held
    pub points: u64,      // count * base_value * multiplier
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseBreakdown {
    pub name: String,
    pub color: String,
    pub items: Vec<ItemContribution>,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HouseScore {
    pub name: String,
    pub color: String,
    pub points: u64,
}

/// Outcome of one scoring round, captured before the reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub total: u64,
    pub houses: Vec<HouseScore>,
    pub scored_at: DateTime<Utc>,
}

/// Multiplier for one item type in a house: every matching card multiplies
/// by its factor once per copy held.
fn item_multiplier(catalog: &Catalog, house: &House, item: &ItemType) -> u64 {
    catalog.cards_for(item).fold(1u64, |acc, card| {
        let copies = house.card_count(&card.key);
        acc.saturating_mul(u64::from(card.factor).saturating_pow(copies))
    })
}

fn contribution(
    catalog: &Catalog,
    bonuses: &ColorBonusTable,
    house: &House,
    item: &ItemType,
) -> Option<ItemContribution> {
    let count = house.item_count(&item.key);
    if count == 0 {
        return None;
    }

    // Additive color bonus goes into the base value before any card applies
    let bonus = bonuses.bonus(house.color(), &item.key);
    let base_value = 1 + u64::from(bonus);
    let multiplier = item_multiplier(catalog, house, item);
    let points = u64::from(count)
        .saturating_mul(base_value)
        .saturating_mul(multiplier);

    Some(ItemContribution {
        key: item.key.clone(),
        label: item.label.clone(),
        count,
        bonus: bonus > 0,
        base_value,
        multiplier,
        points,
    })
}

/// Points for a house under the given bonus table. Pure; does not touch the
/// house's cached points.
pub fn house_points(catalog: &Catalog, bonuses: &ColorBonusTable, house: &House) -> u64 {
    catalog
        .items()
        .iter()
        .filter_map(|item| contribution(catalog, bonuses, house, item))
        .fold(0u64, |total, c| total.saturating_add(c.points))
}

/// Itemized version of [`house_points`]
pub fn explain(catalog: &Catalog, bonuses: &ColorBonusTable, house: &House) -> HouseBreakdown {
    let items: Vec<ItemContribution> = catalog
        .items()
        .iter()
        .filter_map(|item| contribution(catalog, bonuses, house, item))
        .collect();
    let total = items.iter().fold(0u64, |t, c| t.saturating_add(c.points));

    HouseBreakdown {
        name: house.name().to_string(),
        color: house.color().to_string(),
        items,
        total,
    }
}

/// Owns the board for one session: houses, color bonuses and round history.
///
/// Invalid house indices and unknown colors or items are no-ops reported
/// through return values, never errors.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Catalog,
    houses: Vec<House>,
    bonuses: ColorBonusTable,
    history: Vec<RoundReport>,
}

impl ScoringEngine {
    pub fn new(catalog: Catalog) -> Self {
        let houses = catalog
            .layout()
            .iter()
            .map(|(name, color)| House::new(name, color, &catalog))
            .collect();
        let bonuses = ColorBonusTable::new(&catalog);

        Self {
            catalog,
            houses,
            bonuses,
            history: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    pub fn house(&self, index: usize) -> Option<&House> {
        self.houses.get(index)
    }

    pub fn bonuses(&self) -> &ColorBonusTable {
        &self.bonuses
    }

    /// Reports of every round scored this session, oldest first
    pub fn history(&self) -> &[RoundReport] {
        &self.history
    }

    pub fn rounds_played(&self) -> u32 {
        self.history.len() as u32
    }

    /// Houses of a color with their board index
    pub fn houses_of<'a>(&'a self, color: &'a str) -> impl Iterator<Item = (usize, &'a House)> {
        self.houses
            .iter()
            .enumerate()
            .filter(move |(_, house)| house.color() == color)
    }

    /// Recompute a house's points, cache them on the house and return them.
    /// Returns None for an index outside the board.
    pub fn compute_house_points(&mut self, index: usize) -> Option<u64> {
        let house = self.houses.get(index)?;
        let points = house_points(&self.catalog, &self.bonuses, house);
        self.houses[index].set_points(points);
        Some(points)
    }

    /// Recompute every house and return the board total
    pub fn compute_total_points(&mut self) -> u64 {
        (0..self.houses.len())
            .filter_map(|i| self.compute_house_points(i))
            .fold(0u64, |total, p| total.saturating_add(p))
    }

    /// Sum of the points cached on each house. Every mutation recomputes the
    /// houses it touches, so this matches [`Self::compute_total_points`].
    pub fn cached_total(&self) -> u64 {
        self.houses
            .iter()
            .fold(0u64, |total, h| total.saturating_add(h.points()))
    }

    pub fn explain_house(&self, index: usize) -> Option<HouseBreakdown> {
        self.houses
            .get(index)
            .map(|house| explain(&self.catalog, &self.bonuses, house))
    }

    /// Overwrite a house's items and cards in full and rescore it.
    /// Returns false (and changes nothing) if the index is out of range.
    pub fn apply_house_edit(&mut self, index: usize, items: &Counts, cards: &Counts) -> bool {
        let Some(house) = self.houses.get_mut(index) else {
            return false;
        };
        house.overwrite(items, cards);
        self.compute_house_points(index);
        true
    }

    /// Add item deltas to every house of `color` and rescore them.
    /// Returns the number of houses affected (0 for an unknown color).
    pub fn apply_color_delta(&mut self, color: &str, deltas: &Counts) -> usize {
        let color = normalize(color);
        let indices: Vec<usize> = self.houses_of(&color).map(|(i, _)| i).collect();

        for &index in &indices {
            self.houses[index].add_items(deltas);
            self.compute_house_points(index);
        }
        indices.len()
    }

    /// Flip the bonus for (color, item) and rescore every house of that color.
    /// Returns the new state, or None for an unknown color or item.
    pub fn toggle_color_bonus(&mut self, color: &str, item_key: &str) -> Option<bool> {
        let color = normalize(color);
        let active = self.bonuses.toggle(&color, item_key)?;

        let indices: Vec<usize> = self.houses_of(&color).map(|(i, _)| i).collect();
        for index in indices {
            self.compute_house_points(index);
        }
        Some(active)
    }

    /// Tally the board, then clear every house's items and cards.
    ///
    /// Color bonuses survive the reset. The report is also appended to
    /// [`Self::history`].
    pub fn run_scoring_round(&mut self) -> RoundReport {
        let total = self.compute_total_points();
        let report = RoundReport {
            round: self.rounds_played() + 1,
            total,
            houses: self
                .houses
                .iter()
                .map(|h| HouseScore {
                    name: h.name().to_string(),
                    color: h.color().to_string(),
                    points: h.points(),
                })
                .collect(),
            scored_at: Utc::now(),
        };

        for house in self.houses.iter_mut() {
            house.clear();
        }
        self.compute_total_points();

        self.history.push(report.clone());
        report
    }
}
