//! Color palettes for the scoreboard, dark and light

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::output::color_rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors::dark(),
            Theme::Light => ThemeColors::light(),
        }
    }
}

/// Pick the palette for a configured mode. `auto` asks the terminal for
/// its background luminance and falls back to dark when it can't tell.
pub fn resolve_theme(mode: ThemeMode) -> Theme {
    match mode {
        ThemeMode::Dark => Theme::Dark,
        ThemeMode::Light => Theme::Light,
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Theme::Light,
            _ => Theme::Dark,
        },
    }
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub points_color: Color,

    // Styles
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub total_color: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
    pub field_selected: Style,

    // Color bonus toggles
    pub bonus_on: Color,
    pub bonus_off: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            points_color: Color::White,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            total_color: Color::Yellow,
            tab_active_style: Style::new().fg(Color::Cyan).bold().reversed(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
            field_selected: Style::new().fg(Color::Black).bg(Color::Cyan),
            bonus_on: Color::Green,
            bonus_off: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Gray,
            points_color: Color::Black,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::DarkGray,
            title_color: Color::Blue,
            total_color: Color::Indexed(130),
            tab_active_style: Style::new().fg(Color::Blue).bold().reversed(),
            tab_inactive_style: Style::new().fg(Color::Gray),
            status_bar_bg: Color::Indexed(252),
            status_key_color: Color::Blue,
            flash_success: Color::Indexed(28),
            flash_error: Color::Indexed(160),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
            field_selected: Style::new().fg(Color::White).bg(Color::Blue),
            bonus_on: Color::Indexed(28),
            bonus_off: Color::Gray,
        }
    }

    /// Foreground for a house color name, muted for names without an RGB
    pub fn house_color(&self, color: &str) -> Color {
        color_rgb(color)
            .map(|(r, g, b)| Color::Rgb(r, g, b))
            .unwrap_or(self.muted)
    }
}
