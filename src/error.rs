use std::io;

use thiserror::Error;

use crate::config::MAX_SIZE;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze size must be between 1 and {}, got {}", MAX_SIZE, .0)]
    InvalidSize(usize),

    #[error("invalid value {value:?} for {name}")]
    InvalidEnv { name: &'static str, value: String },

    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}
