//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g., [`crate::MazeError`], [`crate::SoundError`])
//! are defined in their respective modules alongside the operations they
//! validate. This module provides the shared classification they implement.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No control flow**: Expected absences (e.g. the player not spawned yet)
//!   are recovered where they occur instead of being propagated

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Transient conditions handled locally with a safe default
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Fatal**: The requested operation cannot proceed at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - a default applies and the caller continues.
    ///
    /// Examples: player entity not spawned yet during scene warm-up
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: emitter with a non-positive radius
    Validation,

    /// Fatal error - the operation aborts before producing anything.
    ///
    /// Examples: maze generation with a non-positive dimension
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capability, CapabilityError, MazeError, SoundError};

    #[test]
    fn subsystem_errors_carry_their_severity() {
        let maze = MazeError::InvalidDimension {
            width: 0,
            height: 4,
        };
        assert_eq!(maze.severity(), ErrorSeverity::Fatal);
        assert_eq!(maze.error_code(), "MAZE_INVALID_DIMENSION");

        let sound = SoundError::InvalidEmitter { reason: "radius" };
        assert_eq!(sound.severity(), ErrorSeverity::Validation);

        let missing = CapabilityError::MissingCapability(Capability::PlayerEntity);
        assert_eq!(missing.severity(), ErrorSeverity::Recoverable);
        assert_eq!(missing.severity().as_str(), "recoverable");
    }
}
