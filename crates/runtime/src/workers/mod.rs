//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns every agent and processes commands in arrival
//! order; action tasks report back to it through an effect channel.

mod simulation;

pub use simulation::{
    AgentSnapshot, AgentSpawn, Command, SimulationWorker, TickReport, WorkerSetup,
};
