use thiserror::Error;

use super::config::{ConfigError, ParseDirectionError};
use crate::core::color::ParseColorError;
use crate::core::models::lattice::ParseBasisLabelError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("At most two alignment constraints are supported, got {count}")]
    TooManyAlignments { count: usize },

    #[error(transparent)]
    UnknownDirection(#[from] ParseDirectionError),

    #[error(transparent)]
    UnknownBasisLabel(#[from] ParseBasisLabelError),

    #[error(transparent)]
    InvalidColor(#[from] ParseColorError),

    #[error("Invalid alignment '{0}', expected DIRECTION=LABEL (e.g. up=c)")]
    InvalidAlignment(String),

    #[error("Position count mismatch: cached snapshot holds {expected} atoms, structure has {found}")]
    PositionCountMismatch { expected: usize, found: usize },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },
}
