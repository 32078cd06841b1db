use owo_colors::OwoColorize;
use std::io::IsTerminal;

use crate::calculator::{format_thousands, Calculator};
use crate::scoring::{Catalog, House, HouseBreakdown, RoundReport, ScoringEngine};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// RGB for a palette color name; None for names without a known color
pub fn color_rgb(color: &str) -> Option<(u8, u8, u8)> {
    match color {
        "orange" => Some((255, 165, 0)),
        "pink" => Some((255, 105, 180)),
        "red" => Some((220, 50, 47)),
        "yellow" => Some((240, 200, 40)),
        "blue" => Some((60, 120, 230)),
        "green" => Some((60, 180, 75)),
        "purple" => Some((150, 90, 200)),
        "white" => Some((230, 230, 230)),
        _ => None,
    }
}

fn paint(text: &str, color: &str, use_colors: bool) -> String {
    match (use_colors, color_rgb(color)) {
        (true, Some((r, g, b))) => text.truecolor(r, g, b).bold().to_string(),
        (true, None) => text.bold().to_string(),
        (false, _) => text.to_string(),
    }
}

pub fn format_points(points: u64) -> String {
    format_thousands(points)
}

/// Non-zero items as "label:count", joined with " | "
pub fn item_summary(house: &House, catalog: &Catalog) -> String {
    catalog
        .items()
        .iter()
        .filter_map(|item| match house.item_count(&item.key) {
            0 => None,
            n => Some(format!("{}:{}", item.label, n)),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Held cards as "label xcount", joined with " | "
pub fn card_summary(house: &House, catalog: &Catalog) -> String {
    catalog
        .cards()
        .iter()
        .filter_map(|card| match house.card_count(&card.key) {
            0 => None,
            n => Some(format!("{} x{}", card.label, n)),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Multi-line house summary: items line, cards line (each only when
/// non-empty), then "Pts: N".
pub fn format_house_summary(house: &House, catalog: &Catalog) -> String {
    let mut lines = Vec::new();
    let items = item_summary(house, catalog);
    if !items.is_empty() {
        lines.push(items);
    }
    let cards = card_summary(house, catalog);
    if !cards.is_empty() {
        lines.push(cards);
    }
    lines.push(format!("Pts: {}", house.points()));
    lines.join("\n")
}

/// Every house on the board as a name line followed by its indented summary
pub fn format_board_summary(engine: &ScoringEngine, use_colors: bool) -> String {
    engine
        .houses()
        .iter()
        .map(|house| {
            let body = format_house_summary(house, engine.catalog())
                .lines()
                .map(|line| format!("  {}", line))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{}\n{}", paint(house.name(), house.color(), use_colors), body)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Score breakdown of every house, in board order
pub fn format_board_breakdown(engine: &ScoringEngine, use_colors: bool) -> String {
    (0..engine.houses().len())
        .filter_map(|i| engine.explain_house(i))
        .map(|breakdown| format_breakdown(&breakdown, use_colors))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-house points for one round, followed by the round total
pub fn format_round_table(report: &RoundReport, use_colors: bool) -> String {
    let name_width = report
        .houses
        .iter()
        .map(|h| h.name.chars().count())
        .max()
        .unwrap_or(0);
    let points_width = report
        .houses
        .iter()
        .map(|h| format_points(h.points).len())
        .max()
        .unwrap_or(1);

    let header = format!(
        "Round {} (scored {})",
        report.round,
        report.scored_at.format("%H:%M:%S UTC")
    );
    let mut lines = vec![if use_colors {
        header.bold().to_string()
    } else {
        header
    }];

    for (idx, house) in report.houses.iter().enumerate() {
        let index = format!("{:>2}.", idx + 1);
        let name = format!("{:<width$}", house.name, width = name_width);
        let points = format!("{:>width$}", format_points(house.points), width = points_width);
        if use_colors {
            lines.push(format!(
                "{} {}  {}",
                index.dimmed(),
                paint(&name, &house.color, true),
                points
            ));
        } else {
            lines.push(format!("{} {}  {}", index, name, points));
        }
    }

    let total = format!("Total: {}", format_points(report.total));
    lines.push(if use_colors {
        total.bold().to_string()
    } else {
        total
    });
    lines.join("\n")
}

/// Tab-separated rows for scripting: round, house, color, points
pub fn format_round_tsv(report: &RoundReport) -> String {
    report
        .houses
        .iter()
        .map(|h| format!("{}\t{}\t{}\t{}", report.round, h.name, h.color, h.points))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_rounds_json(reports: &[RoundReport]) -> anyhow::Result<String> {
    serde_json::to_string_pretty(reports)
        .map_err(|e| anyhow::anyhow!("Failed to serialize round reports: {}", e))
}

/// Itemized score explanation for one house
pub fn format_breakdown(breakdown: &HouseBreakdown, use_colors: bool) -> String {
    let mut lines = vec![paint(&breakdown.name, &breakdown.color, use_colors)];

    if breakdown.items.is_empty() {
        lines.push("  (no items)".to_string());
    }
    for item in &breakdown.items {
        let bonus = if item.bonus { "  +bonus" } else { "" };
        lines.push(format!(
            "  {}  {} x {} x {} = {}{}",
            item.label,
            item.count,
            item.base_value,
            item.multiplier,
            format_points(item.points),
            bonus
        ));
    }
    lines.push(format!("  Total: {}", format_points(breakdown.total)));
    lines.join("\n")
}

/// Calculator inputs and result
pub fn format_calculator(calc: &Calculator, use_colors: bool) -> String {
    let label_width = calc
        .bonuses
        .iter()
        .map(|b| b.label.chars().count())
        .chain(["Base".len(), "Multiplier".len()])
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("{:<w$}  {}", "Base", calc.base, w = label_width)];
    for bonus in calc.bonuses.iter().filter(|b| b.value != 0.0) {
        lines.push(format!("{:<w$}  {}", bonus.label, bonus.value, w = label_width));
    }
    lines.push(format!("{:<w$}  x{}", "Multiplier", calc.multiplier, w = label_width));

    let total = format!("Total: {}", format_thousands(calc.rounded_total()));
    lines.push(if use_colors {
        total.bold().to_string()
    } else {
        total
    });
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::CalculatorConfig;
    use crate::scoring::{BoardConfig, Counts};

    fn engine() -> ScoringEngine {
        ScoringEngine::new(Catalog::from_config(&BoardConfig::default()).unwrap())
    }

    fn counts(pairs: &[(&str, u32)]) -> Counts {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_format_points() {
        assert_eq!(format_points(0), "0");
        assert_eq!(format_points(1234), "1,234");
        assert_eq!(format_points(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_empty_house_summary() {
        let engine = engine();
        let summary = format_house_summary(&engine.houses()[0], engine.catalog());
        assert_eq!(summary, "Pts: 0");
    }

    #[test]
    fn test_house_summary_lines() {
        let mut engine = engine();
        engine.apply_house_edit(
            2,
            &counts(&[("redGift", 2), ("blueOrn", 1)]),
            &counts(&[("x4RedGift", 1)]),
        );
        let summary = format_house_summary(&engine.houses()[2], engine.catalog());
        assert_eq!(summary, "R🎁:2 | B❄:1\nx4 for RED gifts x1\nPts: 9");
    }

    #[test]
    fn test_board_summary() {
        let mut engine = engine();
        engine.apply_house_edit(2, &counts(&[("redGift", 2)]), &counts(&[("x4RedGift", 1)]));

        let text = format_board_summary(&engine, false);
        let lines: Vec<&str> = text.lines().collect();
        // Empty houses: name + "Pts: 0"; Red 1 adds an items and a cards line
        assert_eq!(lines.len(), 8 * 2 + 2);
        assert_eq!(lines[0], "Orange 1");
        assert_eq!(lines[1], "  Pts: 0");
        assert_eq!(&lines[4..8], &["Red 1", "  R🎁:2", "  x4 for RED gifts x1", "  Pts: 8"]);
    }

    #[test]
    fn test_board_breakdown() {
        let mut engine = engine();
        engine.apply_house_edit(2, &counts(&[("redGift", 2)]), &counts(&[("x4RedGift", 1)]));

        let text = format_board_breakdown(&engine, false);
        assert_eq!(text.matches("(no items)").count(), 7);
        assert!(text.contains("Red 1\n  R🎁  2 x 1 x 4 = 8\n  Total: 8"));
    }

    #[test]
    fn test_card_summary_only() {
        let mut engine = engine();
        engine.apply_house_edit(1, &Counts::new(), &counts(&[("x2BlueAll", 3)]));
        let house = &engine.houses()[1];
        assert_eq!(item_summary(house, engine.catalog()), "");
        assert_eq!(card_summary(house, engine.catalog()), "x2 for BLUE items x3");
    }

    #[test]
    fn test_round_table_plain() {
        let mut engine = engine();
        engine.apply_color_delta("orange", &counts(&[("redGift", 1000)]));
        let report = engine.run_scoring_round();

        let table = format_round_table(&report, false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("Round 1 (scored "));
        assert_eq!(lines[1], " 1. Orange 1  1,000");
        assert_eq!(lines[2], " 2. Pink 1        0");
        assert_eq!(lines[9], "Total: 2,000");
    }

    #[test]
    fn test_round_tsv() {
        let mut engine = engine();
        engine.apply_house_edit(2, &counts(&[("redGift", 2)]), &counts(&[("x4RedGift", 1)]));
        let report = engine.run_scoring_round();

        let tsv = format_round_tsv(&report);
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[2], "1\tRed 1\tred\t8");
        assert_eq!(lines[0].split('\t').count(), 4);
    }

    #[test]
    fn test_rounds_json() {
        let mut engine = engine();
        engine.apply_house_edit(0, &counts(&[("blueGift", 1)]), &Counts::new());
        engine.run_scoring_round();

        let json = format_rounds_json(engine.history()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["round"], 1);
        assert_eq!(value[0]["total"], 1);
        assert_eq!(value[0]["houses"][0]["name"], "Orange 1");
        assert!(value[0]["scored_at"].is_string());
    }

    #[test]
    fn test_breakdown_plain() {
        let mut engine = engine();
        engine.toggle_color_bonus("red", "redGift");
        engine.apply_house_edit(2, &counts(&[("redGift", 2)]), &counts(&[("x4RedGift", 1)]));

        let text = format_breakdown(&engine.explain_house(2).unwrap(), false);
        assert_eq!(text, "Red 1\n  R🎁  2 x 2 x 4 = 16  +bonus\n  Total: 16");
    }

    #[test]
    fn test_breakdown_empty_house() {
        let engine = engine();
        let text = format_breakdown(&engine.explain_house(0).unwrap(), false);
        assert!(text.contains("(no items)"));
        assert!(text.ends_with("Total: 0"));
    }

    #[test]
    fn test_calculator_output() {
        let mut calc = Calculator::new(&CalculatorConfig::default());
        calc.base = 600.0;
        calc.set_bonus("grinch", 17.0);
        calc.multiplier = 2.0;

        let text = format_calculator(&calc, false);
        assert!(text.contains("Grinch"));
        assert!(!text.contains("Present"));
        assert!(text.contains("x2"));
        assert!(text.ends_with("Total: 1,234"));
    }

    #[test]
    fn test_color_rgb() {
        assert_eq!(color_rgb("orange"), Some((255, 165, 0)));
        assert_eq!(color_rgb("teal"), None);
        assert_eq!(paint("Teal 1", "teal", false), "Teal 1");
    }
}
