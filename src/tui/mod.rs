pub mod animate;
pub mod app;
pub mod event;
pub mod form;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use app::{InputMode, View};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Hold stderr while the TUI owns the terminal
    crate::stderr_buffer::hold();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    // 50ms tick keeps the total animation smooth
    let mut events = EventHandler::new(50);

    let result = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => app.update_flash(),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    // Flush held messages now that the terminal is restored
    for msg in crate::stderr_buffer::release() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl-c quits from anywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => match app.current_view {
            View::Board => handle_board_key(app, key),
            View::Calculator => handle_calculator_key(app, key),
        },
        InputMode::HouseEdit | InputMode::ColorEdit => handle_form_key(app, key),
        InputMode::Breakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Enter => app.dismiss_popup(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            _ => {}
        },
        // Any key closes these
        InputMode::RoundResult | InputMode::Help => app.dismiss_popup(),
    }
}

fn handle_board_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.next_row(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

        // Editors
        KeyCode::Enter | KeyCode::Char('e') => app.open_house_editor(),
        KeyCode::Char('c') => app.open_selected_color_editor(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(n) = c.to_digit(10) {
                app.open_palette_color(n as usize);
            }
        }

        KeyCode::Char('s') => app.score_round(),
        KeyCode::Char('b') => app.show_breakdown(),
        KeyCode::Char('?') => app.show_help(),
        KeyCode::Tab => app.toggle_view(),
        _ => {}
    }
}

fn handle_calculator_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Enter => app.calc_next(),
        KeyCode::Char('k') | KeyCode::Up => app.calc_previous(),
        KeyCode::Char('r') => app.reset_calculator(),
        KeyCode::Char('?') => app.show_help(),
        KeyCode::Tab => app.toggle_view(),
        KeyCode::Backspace => app.calc_backspace(),
        KeyCode::Char(c) => app.calc_push_char(c),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_form(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let on_toggle = app.form.as_ref().is_some_and(|f| f.on_toggle_row());
            // Space only acts on toggle rows
            if key.code == KeyCode::Enter || on_toggle {
                app.activate_form_row();
            }
        }
        _ => {
            let Some(form) = app.form.as_mut() else {
                return;
            };
            match key.code {
                KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => form.next(),
                KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => form.previous(),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) => form.push_char(c),
                _ => {}
            }
        }
    }
}
