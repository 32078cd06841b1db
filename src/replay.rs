//! Scripted sessions: a YAML list of board actions applied to a fresh engine.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::buffered_eprintln;
use crate::scoring::{counts_from_raw, RoundReport, ScoringEngine};

/// A raw input value as typed into a form: text or a bare number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    pub fn as_raw(&self) -> String {
        match self {
            RawValue::Int(n) => n.to_string(),
            RawValue::Float(f) => f.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

pub type RawCounts = BTreeMap<String, RawValue>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Overwrite one house; item and card types left out become 0
    Edit {
        house: usize,
        #[serde(default)]
        items: RawCounts,
        #[serde(default)]
        cards: RawCounts,
    },
    /// Add item counts to every house of a color
    Delta {
        color: String,
        #[serde(default)]
        items: RawCounts,
    },
    /// Flip a color bonus
    Toggle { color: String, item: String },
    /// Tally the board and reset it
    Score,
}

pub fn parse_script(content: &str) -> Result<Vec<Action>> {
    serde_saphyr::from_str(content).context("Failed to parse replay script")
}

pub fn load_script(path: &Path) -> Result<Vec<Action>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read replay script at {}", path.display()))?;
    parse_script(&content).with_context(|| format!("Invalid replay script {}", path.display()))
}

/// Keys of `raw` that name no item or card type on the board
fn unknown_keys(raw: &RawCounts, is_known: impl Fn(&str) -> bool) -> Vec<&str> {
    raw.keys().map(String::as_str).filter(|k| !is_known(k)).collect()
}

fn warn_unknown_keys(verbose: bool, step: usize, unknown: Vec<&str>) {
    if !verbose {
        return;
    }
    for key in unknown {
        buffered_eprintln!("  step {}: ignoring unknown key '{}'", step + 1, key);
    }
}

/// Apply every action in order and return the report of each round scored.
///
/// Actions that change nothing (house index off the board, unknown color or
/// item) are skipped; with `verbose` each one is reported on stderr.
pub fn run_script(engine: &mut ScoringEngine, actions: &[Action], verbose: bool) -> Vec<RoundReport> {
    let item_keys: Vec<String> = engine.catalog().items().iter().map(|i| i.key.clone()).collect();
    let card_keys: Vec<String> = engine.catalog().cards().iter().map(|c| c.key.clone()).collect();
    let item_keys: Vec<&str> = item_keys.iter().map(String::as_str).collect();
    let card_keys: Vec<&str> = card_keys.iter().map(String::as_str).collect();

    let mut reports = Vec::new();

    for (step, action) in actions.iter().enumerate() {
        match action {
            Action::Edit { house, items, cards } => {
                let catalog = engine.catalog();
                warn_unknown_keys(verbose, step, unknown_keys(items, |k| catalog.item(k).is_some()));
                warn_unknown_keys(verbose, step, unknown_keys(cards, |k| catalog.card(k).is_some()));
                let item_counts =
                    counts_from_raw(item_keys.iter().copied(), |k| items.get(k).map(RawValue::as_raw));
                let card_counts =
                    counts_from_raw(card_keys.iter().copied(), |k| cards.get(k).map(RawValue::as_raw));

                if !engine.apply_house_edit(*house, &item_counts, &card_counts) && verbose {
                    buffered_eprintln!(
                        "  step {}: no house at index {} (board has {})",
                        step + 1,
                        house,
                        engine.houses().len()
                    );
                }
            }
            Action::Delta { color, items } => {
                let catalog = engine.catalog();
                warn_unknown_keys(verbose, step, unknown_keys(items, |k| catalog.item(k).is_some()));
                let deltas =
                    counts_from_raw(item_keys.iter().copied(), |k| items.get(k).map(RawValue::as_raw));

                let affected = engine.apply_color_delta(color, &deltas);
                if verbose {
                    if affected == 0 {
                        buffered_eprintln!("  step {}: no houses of color '{}'", step + 1, color);
                    } else {
                        buffered_eprintln!("  step {}: {} +{} houses", step + 1, color, affected);
                    }
                }
            }
            Action::Toggle { color, item } => match engine.toggle_color_bonus(color, item) {
                Some(active) if verbose => {
                    let state = if active { "on" } else { "off" };
                    buffered_eprintln!("  step {}: {} bonus for {} {}", step + 1, color, item, state);
                }
                Some(_) => {}
                None if verbose => {
                    buffered_eprintln!(
                        "  step {}: unknown color/item '{}'/'{}'",
                        step + 1,
                        color,
                        item
                    );
                }
                None => {}
            },
            Action::Score => {
                let report = engine.run_scoring_round();
                if verbose {
                    buffered_eprintln!(
                        "  step {}: round {} scored {} points",
                        step + 1,
                        report.round,
                        report.total
                    );
                }
                reports.push(report);
            }
        }
    }

    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{BoardConfig, Catalog};

    fn engine() -> ScoringEngine {
        ScoringEngine::new(Catalog::from_config(&BoardConfig::default()).unwrap())
    }

    const SCRIPT: &str = r#"
- toggle: { color: red, item: redGift }
- edit: { house: 2, items: { redGift: "2" }, cards: { x4RedGift: 1 } }
- delta: { color: orange, items: { blueOrn: "1" } }
- score
"#;

    #[test]
    fn test_parse_script() {
        let actions = parse_script(SCRIPT).unwrap();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[3], Action::Score);
        match &actions[1] {
            Action::Edit { house, items, cards } => {
                assert_eq!(*house, 2);
                assert_eq!(items["redGift"].as_raw(), "2");
                assert_eq!(cards["x4RedGift"].as_raw(), "1");
            }
            other => panic!("expected edit, got {:?}", other),
        }
    }

    #[test]
    fn test_run_script_reports_rounds() {
        let mut engine = engine();
        let reports = run_script(&mut engine, &parse_script(SCRIPT).unwrap(), false);

        assert_eq!(reports.len(), 1);
        // Red 1: 2 * (1 + 1) * 4, plus one blue ornament in each orange house
        assert_eq!(reports[0].total, 18);
        assert_eq!(reports[0].houses[2].points, 16);
        assert_eq!(engine.cached_total(), 0);
    }

    #[test]
    fn test_raw_values_are_clamped() {
        let script = r#"
- edit: { house: 0, items: { redGift: "-4", blueGift: "3.9", redOrn: "x" } }
- score
"#;
        let mut engine = engine();
        let reports = run_script(&mut engine, &parse_script(script).unwrap(), false);
        assert_eq!(reports[0].houses[0].points, 3);
    }

    #[test]
    fn test_noop_actions_are_skipped() {
        let script = r#"
- edit: { house: 42, items: { redGift: "1" } }
- delta: { color: green, items: { redGift: "1" } }
- toggle: { color: red, item: nope }
- score
"#;
        let mut engine = engine();
        let reports = run_script(&mut engine, &parse_script(script).unwrap(), false);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].total, 0);
    }

    #[test]
    fn test_edit_without_cards_clears_them() {
        let script = r#"
- edit: { house: 1, items: { redOrn: "1" }, cards: { x3RedAll: "2" } }
- edit: { house: 1, items: { redOrn: "1" } }
- score
"#;
        let mut engine = engine();
        let reports = run_script(&mut engine, &parse_script(script).unwrap(), false);
        assert_eq!(reports[0].houses[1].points, 1);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let script = r#"
- edit: { house: 2, items: { redGift: "2", glitter: "5" }, cards: { x4RedGift: "1", x9Gold: "3" } }
- score
"#;
        let actions = parse_script(script).unwrap();
        let mut engine = engine();

        let Action::Edit { items, cards, .. } = &actions[0] else {
            panic!("expected edit, got {:?}", actions[0]);
        };
        let catalog = engine.catalog();
        assert_eq!(unknown_keys(items, |k| catalog.item(k).is_some()), vec!["glitter"]);
        assert_eq!(unknown_keys(cards, |k| catalog.card(k).is_some()), vec!["x9Gold"]);
        // Card keys are not item keys
        assert_eq!(unknown_keys(cards, |k| catalog.item(k).is_some()).len(), 2);

        let reports = run_script(&mut engine, &actions, true);
        assert_eq!(reports[0].houses[2].points, 8);
    }

    #[test]
    fn test_final_board_output() {
        // No score step, so the board keeps the edits
        let script = r#"
- toggle: { color: red, item: redGift }
- edit: { house: 2, items: { redGift: "2" }, cards: { x4RedGift: "1" } }
"#;
        let mut engine = engine();
        let reports = run_script(&mut engine, &parse_script(script).unwrap(), false);
        assert!(reports.is_empty());

        let summary = crate::output::format_board_summary(&engine, false);
        assert!(summary.contains("Red 1\n  R🎁:2\n  x4 for RED gifts x1\n  Pts: 16"));

        let breakdown = crate::output::format_board_breakdown(&engine, false);
        assert!(breakdown.contains("Red 1\n  R🎁  2 x 2 x 4 = 16  +bonus\n  Total: 16"));
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(parse_script("- explode: { house: 1 }").is_err());
        assert!(parse_script("not a list").is_err());
    }

    #[test]
    fn test_load_script_from_file() {
        let path = std::env::temp_dir().join("house-score-replay-test.yaml");
        fs::write(&path, SCRIPT).unwrap();

        let actions = load_script(&path).unwrap();
        assert_eq!(actions.len(), 4);

        let _ = fs::remove_file(&path);
        assert!(load_script(&path).is_err());
    }
}
