use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::calculator::format_thousands;
use crate::output::{card_summary, format_points, item_summary};
use crate::tui::app::{App, InputMode, View};
use crate::tui::form::FieldKind;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 6 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_view {
        View::Board => render_board(frame, chunks[2], app),
        View::Calculator => render_calculator(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    match app.input_mode {
        InputMode::HouseEdit | InputMode::ColorEdit => render_form_popup(frame, app),
        InputMode::Breakdown => render_breakdown_popup(frame, app),
        InputMode::RoundResult => render_round_popup(frame, app),
        InputMode::Help => render_help_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let left = "House Score";
    let total = format!("Total: {}", format_points(app.live_total.current()));
    let round = match &app.last_round {
        Some(report) => format!(
            "Round {}: {}",
            report.round,
            format_points(app.round_total.current())
        ),
        None => "No rounds yet".to_string(),
    };

    let padding = title_padding(area.width, &[left, total.as_str(), "   ", round.as_str()]);

    let title = Line::from(vec![
        Span::styled(left, Style::default().fg(colors.title_color).bold()),
        Span::raw(" ".repeat(padding)),
        Span::styled(total, Style::default().fg(colors.total_color).bold()),
        Span::raw("   "),
        Span::styled(round, Style::default().fg(colors.muted)),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

/// Spaces that push the last title parts to the right edge, counted in chars
fn title_padding(width: u16, parts: &[&str]) -> usize {
    let used: usize = parts.iter().map(|p| p.chars().count()).sum();
    (width as usize).saturating_sub(used)
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let selected = match app.current_view {
        View::Board => 0,
        View::Calculator => 1,
    };

    let tabs = Tabs::new(vec!["Board", "Calculator"])
        .select(selected)
        .style(app.colors.tab_inactive_style)
        .highlight_style(app.colors.tab_active_style)
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_board(frame: &mut Frame, area: Rect, app: &mut App) {
    let colors = &app.colors;
    let catalog = app.engine.catalog();

    let rows: Vec<Row> = app
        .engine
        .houses()
        .iter()
        .enumerate()
        .map(|(idx, house)| {
            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(colors.index_color)),
                Cell::from(house.name().to_string())
                    .style(Style::default().fg(colors.house_color(house.color())).bold()),
                Cell::from(item_summary(house, catalog)),
                Cell::from(card_summary(house, catalog)),
                Cell::from(Line::from(format_points(house.points())).alignment(Alignment::Right))
                    .style(Style::default().fg(colors.points_color)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(14),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "House", "Items", "Cards", "Pts"])
                .style(colors.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_calculator(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let labels = app.calc_labels();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut lines: Vec<Line> = labels
        .iter()
        .zip(&app.calc_inputs)
        .enumerate()
        .map(|(i, (label, input))| {
            let value = if i == app.calc_selected {
                Span::styled(format!(" {}| ", input), colors.field_selected)
            } else if input.is_empty() {
                Span::styled(" 0 ", Style::default().fg(colors.muted))
            } else {
                Span::raw(format!(" {} ", input))
            };
            Line::from(vec![Span::raw(format!("  {:<w$}  ", label, w = width)), value])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  Total  "),
        Span::styled(
            format_thousands(app.calculator.rounded_total()),
            Style::default().fg(colors.total_color).bold(),
        ),
    ]));

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            colors.flash_error
        } else {
            colors.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.current_view {
            View::Board => &[
                ("j/k", ":nav "),
                ("Enter", ":edit "),
                ("c", ":color "),
                ("s", ":score "),
                ("b", ":breakdown "),
                ("Tab", ":calc "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            View::Calculator => &[
                ("j/k", ":field "),
                ("0-9", ":type "),
                ("r", ":reset "),
                ("Tab", ":board "),
                ("q", ":quit"),
            ],
        };

        let mut spans = vec![Span::styled(
            format!("Round {} ", app.engine.rounds_played() + 1),
            Style::default().fg(colors.muted),
        )];
        for (key, label) in hints {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(*key, Style::default().fg(colors.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn popup_block<'a>(app: &App, title: String) -> Block<'a> {
    Block::bordered()
        .title(Span::styled(title, app.colors.popup_title))
        .border_style(Style::default().fg(app.colors.popup_border))
        .style(Style::default().bg(app.colors.popup_bg))
}

fn render_form_popup(frame: &mut Frame, app: &App) {
    let Some(form) = &app.form else {
        return;
    };
    let colors = &app.colors;
    let color = match &form.target {
        crate::tui::form::FormTarget::Color(c) => Some(c.as_str()),
        crate::tui::form::FormTarget::House(_) => None,
    };

    let width = form
        .fields
        .iter()
        .map(|f| f.label.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<Line> = form
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = i == form.selected;
            let value = match (field.kind, color) {
                (FieldKind::Bonus, Some(c)) => {
                    let on = app.engine.bonuses().is_active(c, &field.key);
                    let style = if selected {
                        colors.field_selected
                    } else {
                        Style::default().fg(if on { colors.bonus_on } else { colors.bonus_off })
                    };
                    Span::styled(if on { "[ON] " } else { "[OFF]" }, style)
                }
                _ if selected => Span::styled(format!("{}|", field.value), colors.field_selected),
                _ => Span::raw(field.value.clone()),
            };
            Line::from(vec![Span::raw(format!("{:<w$}  ", field.label, w = width)), value])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter: save/toggle | Esc: cancel",
        Style::default().fg(colors.muted),
    )));

    let height = lines.len() as u16 + 2;
    let popup_area = centered_rect_fixed(44, height, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, form.title(&app.engine));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_breakdown_popup(frame: &mut Frame, app: &App) {
    let Some(breakdown) = app.selected_breakdown() else {
        return;
    };
    let colors = &app.colors;

    let mut lines: Vec<Line> = breakdown
        .items
        .iter()
        .map(|item| {
            let mut spans = vec![Span::raw(format!(
                "{}  {} x {} x {} = {}",
                item.label,
                item.count,
                item.base_value,
                item.multiplier,
                format_points(item.points)
            ))];
            if item.bonus {
                spans.push(Span::styled("  +bonus", Style::default().fg(colors.bonus_on)));
            }
            Line::from(spans)
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("No items", Style::default().fg(colors.muted))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Total: {}", format_points(breakdown.total)),
        Style::default().fg(colors.total_color).bold(),
    )));

    let height = lines.len() as u16 + 2;
    let popup_area = centered_rect_fixed(48, height, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, format!(" {} ", breakdown.name));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_round_popup(frame: &mut Frame, app: &App) {
    let Some(report) = &app.last_round else {
        return;
    };
    let colors = &app.colors;

    let mut lines: Vec<Line> = report
        .houses
        .iter()
        .map(|house| {
            Line::from(vec![
                Span::styled(
                    format!("{:<14}", house.name),
                    Style::default().fg(colors.house_color(&house.color)),
                ),
                Span::raw(format!("{:>12}", format_points(house.points))),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Total: {}", format_points(app.round_total.current())),
        Style::default().fg(colors.total_color).bold(),
    )));
    lines.push(Line::from(Span::styled(
        "Board cleared. Press any key",
        Style::default().fg(colors.muted),
    )));

    let height = lines.len() as u16 + 2;
    let popup_area = centered_rect_fixed(32, height, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, format!(" Round {} ", report.round));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.colors.status_key_color).bold();
    let entries = [
        ("j / Down      ", "Next house / field"),
        ("k / Up        ", "Previous house / field"),
        ("Enter / e     ", "Edit selected house"),
        ("c             ", "Edit all houses of its color"),
        ("1-9           ", "Edit all houses of a palette color"),
        ("s             ", "Score round and reset board"),
        ("b             ", "Score breakdown"),
        ("Tab           ", "Switch Board/Calculator"),
        ("r             ", "Reset calculator"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.colors.muted),
    )));

    let popup_area = centered_rect_fixed(52, help_lines.len() as u16 + 2, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block(app, " Keyboard Shortcuts ".to_string());
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);
    frame.render_widget(Paragraph::new(help_lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fixed() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(40, 10, area), Rect::new(30, 15, 40, 10));
        // Clamped to the available area
        assert_eq!(centered_rect_fixed(200, 80, area), area);
    }

    #[test]
    fn test_title_padding_counts_chars() {
        assert_eq!(title_padding(40, &["House Score", "Total: 0"]), 21);
        // "Maison Décorée" is 14 chars but 16 bytes
        assert_eq!(title_padding(40, &["Maison Décorée", "Total: 1,234"]), 14);
        assert_eq!(title_padding(10, &["House Score", "Total: 0"]), 0);
    }
}
