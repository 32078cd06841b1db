pub mod board;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod input;
pub mod rules;
pub mod validation;

pub use board::{ColorBonusTable, Counts, House};
pub use catalog::{CardType, Catalog, ItemType};
pub use config::*;
pub use engine::{
    explain, house_points, HouseBreakdown, HouseScore, ItemContribution, RoundReport,
    ScoringEngine,
};
pub use input::{counts_from_raw, to_non_negative_int};
pub use rules::{normalize, CardRule};
pub use validation::validate_board;
