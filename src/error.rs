use std::path::PathBuf;

use crate::game::Player;

/// Errors that can occur while playing a match between agents.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("{agent} returned no move for {player:?} on a board with legal moves")]
    NoMove { agent: String, player: Player },

    #[error("{agent} selected illegal column {column} (legal: {legal:?})")]
    IllegalColumn {
        agent: String,
        column: usize,
        legal: Vec<usize>,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
