//! Error type shared by the map, simulation and terminal layers.
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("cell ({row}, {col}) is outside the {height}x{width} grid")]
    OutOfBounds {
        row: isize,
        col: isize,
        width: usize,
        height: usize,
    },
    #[error("no free floor cell found after {attempts} attempts")]
    NoFreeCell { attempts: usize },
    #[error("invalid map: {0}")]
    InvalidMap(String),
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
