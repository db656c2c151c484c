//! Per-entity simulation state.
//!
//! Only data owned by the simulation lives here. Positions and orientation
//! belong to the external world and are read through [`crate::env`].
mod agent;
mod common;

pub use agent::{AgentState, AgentTemplate, SightProfile};
pub use common::{EntityId, Pose, Tick};
