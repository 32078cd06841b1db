use std::time::{Duration, Instant};

use crate::buffered_eprintln;
use crate::calculator::{parse_amount, parse_multiplier, Calculator, CalculatorConfig};
use crate::scoring::{HouseBreakdown, RoundReport, ScoringEngine};
use crate::tui::animate::AnimatedNumber;
use crate::tui::form::{EditForm, FieldKind, FormTarget};
use crate::tui::theme::ThemeColors;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Board,
    Calculator,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    HouseEdit,
    ColorEdit,
    Breakdown,
    RoundResult,
    Help,
}

pub struct App {
    pub engine: ScoringEngine,
    pub calculator: Calculator,
    pub calc_inputs: Vec<String>, // base, each bonus, multiplier
    pub calc_selected: usize,
    pub table_state: ratatui::widgets::TableState,
    pub current_view: View,
    pub input_mode: InputMode,
    pub form: Option<EditForm>,
    pub flash_message: Option<(String, Instant)>,
    pub live_total: AnimatedNumber,
    pub round_total: AnimatedNumber,
    pub last_round: Option<RoundReport>,
    pub should_quit: bool,
    pub verbose: bool,
    pub colors: ThemeColors,
}

impl App {
    pub fn new(
        engine: ScoringEngine,
        calculator_config: &CalculatorConfig,
        animation: Duration,
        colors: ThemeColors,
        verbose: bool,
    ) -> Self {
        let mut table_state = ratatui::widgets::TableState::default();
        if !engine.houses().is_empty() {
            table_state.select(Some(0));
        }
        let total = engine.cached_total();
        let calculator = Calculator::new(calculator_config);
        let calc_inputs = blank_calc_inputs(&calculator);

        Self {
            engine,
            calculator,
            calc_inputs,
            calc_selected: 0,
            table_state,
            current_view: View::Board,
            input_mode: InputMode::Normal,
            form: None,
            flash_message: None,
            live_total: AnimatedNumber::new(total, animation),
            round_total: AnimatedNumber::new(0, animation),
            last_round: None,
            should_quit: false,
            verbose,
            colors,
        }
    }

    fn log(&self, msg: String) {
        if self.verbose {
            buffered_eprintln!("{}", msg);
        }
    }

    pub fn next_row(&mut self) {
        let len = self.engine.houses().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.engine.houses().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected_house(&self) -> Option<usize> {
        self.table_state
            .selected()
            .filter(|&i| i < self.engine.houses().len())
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    fn refresh_total(&mut self) {
        self.live_total.set_target(self.engine.cached_total());
    }

    pub fn toggle_view(&mut self) {
        self.current_view = match self.current_view {
            View::Board => View::Calculator,
            View::Calculator => View::Board,
        };
    }

    // Board editors

    pub fn open_house_editor(&mut self) {
        let Some(index) = self.selected_house() else {
            return;
        };
        if let Some(form) = EditForm::for_house(&self.engine, index) {
            self.form = Some(form);
            self.input_mode = InputMode::HouseEdit;
        }
    }

    pub fn open_color_editor(&mut self, color: &str) {
        if !self.engine.catalog().has_color(color) {
            return;
        }
        self.form = Some(EditForm::for_color(&self.engine, color));
        self.input_mode = InputMode::ColorEdit;
    }

    /// Color editor for the selected house's color
    pub fn open_selected_color_editor(&mut self) {
        let color = self
            .selected_house()
            .and_then(|i| self.engine.house(i))
            .map(|h| h.color().to_string());
        if let Some(color) = color {
            self.open_color_editor(&color);
        }
    }

    /// Color editor for the n-th palette color (1-based)
    pub fn open_palette_color(&mut self, n: usize) {
        let color = n
            .checked_sub(1)
            .and_then(|i| self.engine.catalog().colors().get(i))
            .cloned();
        if let Some(color) = color {
            self.open_color_editor(&color);
        }
    }

    /// Enter/Space on the selected form row: flips a bonus toggle right away,
    /// anywhere else saves the form.
    pub fn activate_form_row(&mut self) {
        let toggle = self.form.as_ref().and_then(|form| {
            match (&form.target, form.selected_field()) {
                (FormTarget::Color(color), Some(field)) if field.kind == FieldKind::Bonus => {
                    Some((color.clone(), field.key.clone()))
                }
                _ => None,
            }
        });

        match toggle {
            Some((color, item)) => {
                if let Some(active) = self.engine.toggle_color_bonus(&color, &item) {
                    self.log(format!(
                        "bonus {} for {} houses: {}",
                        item,
                        color,
                        if active { "on" } else { "off" }
                    ));
                    self.refresh_total();
                }
            }
            None => self.save_form(),
        }
    }

    pub fn save_form(&mut self) {
        let Some(form) = self.form.take() else {
            self.input_mode = InputMode::Normal;
            return;
        };
        let items = form.item_counts();

        match &form.target {
            FormTarget::House(index) => {
                let cards = form.card_counts();
                if self.engine.apply_house_edit(*index, &items, &cards) {
                    let name = self
                        .engine
                        .house(*index)
                        .map(|h| h.name().to_string())
                        .unwrap_or_default();
                    self.log(format!("edit {}: items {:?} cards {:?}", name, items, cards));
                    self.show_flash(format!("Saved {}", name));
                }
            }
            FormTarget::Color(color) => {
                let affected = self.engine.apply_color_delta(color, &items);
                self.log(format!("delta {} ({} houses): {:?}", color, affected, items));
                self.show_flash(format!("Updated {} {} houses", affected, color));
            }
        }

        self.refresh_total();
        self.input_mode = InputMode::Normal;
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
    }

    // Rounds and popups

    pub fn score_round(&mut self) {
        let report = self.engine.run_scoring_round();
        self.log(format!(
            "round {} scored: {} points",
            report.round, report.total
        ));
        self.round_total.set_target(report.total);
        self.refresh_total();
        self.show_flash(format!("Round {} scored", report.round));
        self.last_round = Some(report);
        self.input_mode = InputMode::RoundResult;
    }

    pub fn show_breakdown(&mut self) {
        if self.selected_house().is_some() {
            self.input_mode = InputMode::Breakdown;
        }
    }

    pub fn selected_breakdown(&self) -> Option<HouseBreakdown> {
        self.selected_house().and_then(|i| self.engine.explain_house(i))
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_popup(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    // Calculator tab

    pub fn calc_labels(&self) -> Vec<String> {
        std::iter::once("Base".to_string())
            .chain(self.calculator.bonuses.iter().map(|b| b.label.clone()))
            .chain(std::iter::once("Multiplier".to_string()))
            .collect()
    }

    pub fn calc_next(&mut self) {
        self.calc_selected = (self.calc_selected + 1) % self.calc_inputs.len();
    }

    pub fn calc_previous(&mut self) {
        let len = self.calc_inputs.len();
        self.calc_selected = (self.calc_selected + len - 1) % len;
    }

    pub fn calc_push_char(&mut self, c: char) {
        if !(c.is_ascii_digit() || c == '.' || c == '-') {
            return;
        }
        if let Some(input) = self.calc_inputs.get_mut(self.calc_selected) {
            input.push(c);
        }
        self.sync_calculator();
    }

    pub fn calc_backspace(&mut self) {
        if let Some(input) = self.calc_inputs.get_mut(self.calc_selected) {
            input.pop();
        }
        self.sync_calculator();
    }

    pub fn reset_calculator(&mut self) {
        self.calculator.reset();
        self.calc_inputs = blank_calc_inputs(&self.calculator);
        self.show_flash("Calculator reset".to_string());
    }

    /// Re-parse every calculator input into the calculator
    fn sync_calculator(&mut self) {
        let last = self.calc_inputs.len() - 1;
        self.calculator.base = parse_amount(&self.calc_inputs[0]);
        for (bonus, raw) in self
            .calculator
            .bonuses
            .iter_mut()
            .zip(&self.calc_inputs[1..last])
        {
            bonus.value = parse_amount(raw);
        }
        self.calculator.multiplier = parse_multiplier(&self.calc_inputs[last]);
    }
}

fn blank_calc_inputs(calculator: &Calculator) -> Vec<String> {
    vec![String::new(); calculator.bonuses.len() + 2]
}
