use crate::error::{ErrorSeverity, GameError};

/// Errors raised by maze generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeError {
    /// Width or height was zero or negative.
    #[error("invalid maze dimension {width}x{height}: both sides must be positive")]
    InvalidDimension { width: i64, height: i64 },
}

impl GameError for MazeError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDimension { .. } => "MAZE_INVALID_DIMENSION",
        }
    }
}
