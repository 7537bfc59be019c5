use colored::Colorize;
use std::path::PathBuf;
use std::process;
use thiserror::Error;

/// Exit code for failed runs. Usage errors exit with 2 through clap.
pub const EXIT_ERROR: i32 = 1;

/// Unified error type for CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unreadable or malformed config file.
    #[error("config error: {0}")]
    Config(String),

    /// The word list could not be opened.
    #[error("cannot open dictionary {}: {source}", .path.display())]
    Dictionary {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<toml::de::Error> for CliError {
    fn from(e: toml::de::Error) -> Self {
        CliError::Config(e.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;

/// Print the error to stderr and exit.
pub fn exit_with_error(e: CliError) -> ! {
    eprintln!("{} {e}", "error:".red().bold());
    process::exit(EXIT_ERROR)
}
