//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from maze generation, worker coordination and agent lookup
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{EntityId, MazeError, Vec2};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Maze(#[from] MazeError),

    #[error("unknown agent {0}")]
    UnknownAgent(EntityId),

    #[error("spawn position {0} is outside the maze")]
    InvalidSpawn(Vec2),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
