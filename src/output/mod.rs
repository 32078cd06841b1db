pub mod formatter;

pub use formatter::{
    card_summary, color_rgb, format_board_breakdown, format_board_summary, format_breakdown,
    format_calculator, format_house_summary, format_points, format_round_table,
    format_round_tsv, format_rounds_json, item_summary, should_use_colors,
};
