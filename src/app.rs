//! Core application state and logic for the maze game.

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    events,
    state::GameSession,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Running game session.
    ///
    /// This field holds the maze, the player, the timer and the score. The shell only reads it to
    /// draw and feeds it moves, clock updates and restarts.
    pub(crate) session: GameSession,
    /// Message shown under the maze.
    ///
    /// This field holds the last noteworthy thing that happened in the game, such as a cleared
    /// level, until something replaces or clears it.
    pub(crate) status: Option<String>,
}

impl App {
    /// Creates a new instance of the App structure from the run-time configuration.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configured maze dimensions are invalid.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            session: GameSession::new(
                usize::from(config.width),
                usize::from(config.height),
                config.seed,
            )?,
            status: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(|err| std::io::Error::other(err.to_string()))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }
}
