//! Runtime orchestration for the maze survival simulation.
//!
//! This crate wires together the pure `game-core` simulation, the external
//! capability adapters, per-agent utility brains and asynchronous action
//! tasks into a cohesive runtime API. Consumers embed [`Runtime`] to drive
//! ticks, subscribe to events, and interact with the world through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`brain`] holds the per-agent decide/execute state machine
//! - [`actions`] implements the action tasks and their effect reporting
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`oracle`] bundles the path planner, spatial queries and entity registry
//! - `workers` keeps the simulation task internal to the crate
pub mod actions;
pub mod api;
pub mod brain;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use actions::{
    ActionContext, ActionEffect, ActionExecutor, ActionOutcome, ActionSet, EffectKind,
};
pub use api::{Result, RuntimeError, RuntimeHandle};
pub use brain::{BrainState, UtilityBrain};
pub use events::{BrainEvent, CombatEvent, Event, EventBus, SoundEvent, Topic};
pub use oracle::{MazeWorld, OracleManager};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use workers::{AgentSnapshot, AgentSpawn, TickReport};
