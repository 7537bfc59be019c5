use crate::cli::Cli;
use crate::error::{CliError, CliResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use wordtree::WordOrder;

const DEFAULT_DICTIONARY: &str = "dictionary.txt";

/// Settings read from the optional TOML file, then overridden by flags
///
/// ```toml
/// dictionary = "words.txt"
/// show_level_order = true
///
/// [order]
/// case_sensitive = false
/// length_first = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub dictionary: PathBuf,
    pub show_level_order: bool,
    pub order: WordOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: PathBuf::from(DEFAULT_DICTIONARY),
            show_level_order: false,
            order: WordOrder::default(),
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> CliResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> CliResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&text)
    }

    /// Config file (if any) with command-line flags applied on top
    pub fn resolve(cli: &Cli) -> CliResult<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(dictionary) = &cli.dictionary {
            config.dictionary = dictionary.clone();
        }
        if cli.case_sensitive {
            config.order.case_sensitive = true;
        }
        if cli.length_first {
            config.order.length_first = true;
        }
        if cli.level_order {
            config.show_level_order = true;
        }
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}
