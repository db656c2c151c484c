//! Deterministic simulation core for the maze survival game.
//!
//! `game-core` owns the engine-independent pieces of the NPC simulation and
//! exposes pure APIs that the runtime drives once per tick:
//!
//! - [`maze`] generates perfect mazes (spanning trees) from a seed
//! - [`sound`] propagates emitter intensity to registered receivers
//! - [`ai`] scores NPC actions with utility considerations
//! - [`state`] holds per-agent vitals and perception parameters
//! - [`env`] describes the external capabilities (path planning, raycasts,
//!   entity lookup, randomness) the core consumes but never implements
pub mod ai;
pub mod config;
pub mod env;
pub mod error;
pub mod maze;
pub mod sound;
pub mod state;

pub use ai::{
    ActionKind, ActionSpec, AgentView, BrainPreset, ConsiderationKind, build_reasoner,
};
pub use config::{ActionTuning, AgentDefaults, AiTuning, GameConfig, SoundPresets};
pub use env::{
    Capability, CapabilityError, EntityRegistry, EntityTag, Env, GameEnv, LayerMask,
    PathPlanner, RayHit, RngSource, SpatialQuery, derive_seed, seeded_rng,
};
pub use error::{ErrorSeverity, GameError};
pub use maze::{CellCoord, Direction, MazeCell, MazeError, MazeGraph, Walls};
pub use sound::{
    ReceiverId, SoundEmitter, SoundError, SoundProfile, SoundPropagationSystem, SoundReceiver,
    sample_intensity,
};
pub use state::{AgentState, AgentTemplate, EntityId, Pose, SightProfile, Tick};

/// Re-exported vector type used for all world-space positions.
pub use glam::Vec2;
