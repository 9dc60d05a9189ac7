//! Type definitions and enums for the application screens and navigation.

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    ///
    /// This variant represents the main menu screen shown when the binary starts.
    MainMenu(MainMenuItem),
    /// In-game maze screen.
    ///
    /// This variant represents the screen where the maze, the player and the timer are shown and
    /// where directional keys move the player.
    InGame,
    /// Time-expired screen.
    ///
    /// This variant represents the menu shown once the countdown of a level reaches zero.
    GameOver(GameOverItem),
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    StartGame,
    /// "Quit" menu option.
    Quit,
}

/// Time-expired menu navigation options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GameOverItem {
    /// "Restart" menu option, starting over from level one.
    Restart,
    /// "Main Menu" option, returning to the main menu.
    MainMenu,
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration.
    ///
    /// This variant represents the main menu in the game.
    MainMenu(u8),
    /// Time-expired menu configuration.
    ///
    /// This variant represents the menu shown after the countdown ran out.
    GameOver(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::GameOver(_) => "Time Is Up",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu items for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::GameOver(value) => *value,
        }
    }
}
