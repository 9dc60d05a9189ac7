//! Log sink initialisation.
//!
//! The terminal interface owns both standard streams, so log records can only go to a file. The
//! filter honours `RUST_LOG` and defaults to `info`.

use std::{fs::File, path::Path};

use color_eyre::eyre::Result;
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Routes the `log` facade to the given file.
///
/// Without a file no logger is installed and every log record is discarded.
///
/// # Errors
///
/// This function returns an error if the file cannot be created or a logger is already installed.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)?;
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;

    Ok(())
}
