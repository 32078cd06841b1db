use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::calculator::CalculatorConfig;
use crate::scoring::BoardConfig;

pub const DEFAULT_ANIMATION: &str = "700ms";

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Terminal color theme (auto detects from the terminal background)
    #[serde(default)]
    pub theme: ThemeMode,

    /// How long the round total takes to count up, e.g. "700ms"
    #[serde(default)]
    pub animation: Option<String>,

    /// Board definition (defaults to the reference board)
    #[serde(default)]
    pub board: Option<BoardConfig>,

    /// Standalone calculator inputs
    #[serde(default)]
    pub calculator: Option<CalculatorConfig>,
}

impl Config {
    /// Fully populated config, as written by `init`
    pub fn with_defaults() -> Self {
        Self {
            theme: ThemeMode::Auto,
            animation: Some(DEFAULT_ANIMATION.to_string()),
            board: Some(BoardConfig::default()),
            calculator: Some(CalculatorConfig::default()),
        }
    }

    pub fn board(&self) -> BoardConfig {
        self.board.clone().unwrap_or_default()
    }

    pub fn calculator(&self) -> CalculatorConfig {
        self.calculator.clone().unwrap_or_default()
    }

    pub fn animation_duration(&self) -> Result<Duration> {
        let raw = self.animation.as_deref().unwrap_or(DEFAULT_ANIMATION);
        humantime::parse_duration(raw)
            .with_context(|| format!("Invalid animation duration '{}'", raw))
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Auto,
    Dark,
    Light,
}
