//! Terminal maze race.
//!
//! Each level carves a fresh maze with a randomized depth-first search and gives the player a
//! countdown to walk from the top-left corner to the bottom-right goal. Clearing a level earns
//! score and starts the next one with ten seconds less on the clock, down to thirty; running out
//! of time sends the game back to level one.
//!
//! The [`maze`] and [`state`] modules hold the game itself and know nothing about terminals. The
//! [`App`] shell draws them with Ratatui and feeds them key presses and clock updates.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod config;
mod countdown;
mod events;
pub mod grid;
pub mod logger;
pub mod maze;
pub mod state;
mod types;
mod ui;

pub use app::App;
