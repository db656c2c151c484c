//! Capability access errors.

use crate::error::{ErrorSeverity, GameError};

/// External collaborators the core may depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    PathPlanner,
    SpatialQuery,
    EntityRegistry,
    /// The entity tagged as the player.
    PlayerEntity,
    /// A pose for an entity that is registered.
    EntityPose,
}

/// Errors that occur when a required collaborator is not resolved yet.
///
/// Transient absence is expected while a scene warms up, so callers recover
/// with a safe default rather than propagating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapabilityError {
    #[error("capability not available: {0}")]
    MissingCapability(Capability),
}

impl GameError for CapabilityError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingCapability(_) => "CAPABILITY_MISSING",
        }
    }
}
