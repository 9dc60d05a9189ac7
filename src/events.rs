//! Event handling functions for user input, the level clock and session notifications.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use log::debug;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    grid::Direction,
    state::SessionEvent,
    types::{GameOverItem, MainMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the handler of the current
/// screen. It uses a timeout to avoid blocking the UI, which is also what lets the level clock
/// advance while no key is pressed.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code);
            }
        }
    }

    // The countdown only runs while the maze is on screen
    if matches!(app.screen, Screen::InGame) {
        app.session.advance_clock(Instant::now());
    }
    process_session_events(app);

    Ok(())
}

/// Dispatches a single key press to the handler of the current screen.
///
/// The 'q' key quits from every screen; every other key means something different depending on
/// whether a menu or the maze is being shown.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    if code == KeyCode::Char('q') {
        app.exit = true;
        return;
    }

    match app.screen {
        Screen::MainMenu(item) => handle_main_menu_key(app, item, code),
        Screen::InGame => handle_in_game_key(app, code),
        Screen::GameOver(item) => handle_game_over_key(app, item, code),
    }
}

/// Maps a key to the movement direction it stands for, if any.
pub(crate) const fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}

/// Handles key presses in the main menu.
///
/// The 'j' and 'k' keys (or the arrows) move the cursor and 'l' (or enter) selects. Starting a
/// game always restarts the session so the countdown begins when the maze appears.
fn handle_main_menu_key(app: &mut App, item: MainMenuItem, code: KeyCode) {
    match (code, item) {
        (KeyCode::Char('j') | KeyCode::Down, MainMenuItem::StartGame) => {
            app.screen = Screen::MainMenu(MainMenuItem::Quit);
        }
        (KeyCode::Char('k') | KeyCode::Up, MainMenuItem::Quit) => {
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        (KeyCode::Char('l') | KeyCode::Enter, MainMenuItem::StartGame) => {
            app.session.restart();
            app.screen = Screen::InGame;
        }
        (KeyCode::Char('l') | KeyCode::Enter, MainMenuItem::Quit) => {
            app.exit = true;
        }
        _ => {}
    }
}

/// Handles key presses while the maze is on screen.
///
/// Directional keys move the player, 'r' restarts from level one and escape returns to the main
/// menu.
fn handle_in_game_key(app: &mut App, code: KeyCode) {
    if let Some(direction) = direction_for(code) {
        app.session.attempt_move(direction);
        return;
    }

    match code {
        KeyCode::Char('r') => app.session.restart(),
        KeyCode::Esc => {
            app.status = None;
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        _ => {}
    }
}

/// Handles key presses in the time-expired menu.
fn handle_game_over_key(app: &mut App, item: GameOverItem, code: KeyCode) {
    match (code, item) {
        (KeyCode::Char('j') | KeyCode::Down, GameOverItem::Restart) => {
            app.screen = Screen::GameOver(GameOverItem::MainMenu);
        }
        (KeyCode::Char('k') | KeyCode::Up, GameOverItem::MainMenu) => {
            app.screen = Screen::GameOver(GameOverItem::Restart);
        }
        (KeyCode::Char('l') | KeyCode::Enter, GameOverItem::Restart) => {
            app.session.restart();
            app.screen = Screen::InGame;
        }
        (KeyCode::Char('l') | KeyCode::Enter, GameOverItem::MainMenu) => {
            app.status = None;
            app.screen = Screen::MainMenu(MainMenuItem::StartGame);
        }
        _ => {}
    }
}

/// Reacts to the notifications queued by the session.
///
/// Every loop iteration redraws the whole frame, so render requests need no extra work here.
pub(crate) fn process_session_events(app: &mut App) {
    for session_event in app.session.take_events() {
        match session_event {
            SessionEvent::Render => {}
            SessionEvent::LevelCleared {
                earned_score,
                level,
            } => {
                app.status = Some(format!(
                    "Level {} cleared! +{earned_score} points",
                    level.saturating_sub(1)
                ));
            }
            SessionEvent::TimeExpired => {
                debug!("showing time-expired menu");
                app.status = Some("Time is up! Start over from level 1.".to_owned());
                app.screen = Screen::GameOver(GameOverItem::Restart);
            }
            SessionEvent::Restarted => {
                app.status = None;
            }
        }
    }
}
