use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SoundError {
    #[error("invalid sound emitter: {reason}")]
    InvalidEmitter { reason: &'static str },
}

impl GameError for SoundError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEmitter { .. } => "SOUND_INVALID_EMITTER",
        }
    }
}
