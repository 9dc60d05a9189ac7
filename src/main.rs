//! This crate contains the source code for the binary for the game mazerun.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazerun::{config::Config, logger, App};

fn main() -> Result<()> {
    install()?;

    let config = Config::parse();
    logger::init(config.log_file.as_deref())?;
    let mut app = App::new(&config)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
