//! High-level runtime orchestrator.
//!
//! The runtime generates the session maze, owns the simulation worker, wires
//! up command/event channels, and exposes a builder-based API for clients to
//! drive the simulation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use game_core::{BrainPreset, GameConfig, GameError, MazeGraph};

use crate::actions::{ActionExecutor, ActionSet};
use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::{MazeWorld, OracleManager};
use crate::workers::{Command, SimulationWorker, TickReport, WorkerSetup};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub maze_width: i32,
    pub maze_height: i32,
    /// Level seed: drives maze generation and every task's random stream.
    pub seed: u64,
    /// Side of one maze cell in world units.
    pub cell_size: f32,
    /// Body speed of the built-in [`MazeWorld`], in units per second.
    pub move_speed: f32,
    /// Simulated time covered by one tick.
    pub tick_interval: Duration,
    /// Brain preset for agents spawned without one.
    pub default_preset: BrainPreset,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            maze_width: 16,
            maze_height: 16,
            seed: 0,
            cell_size: 2.0,
            move_speed: 3.0,
            tick_interval: Duration::from_millis(100),
            default_preset: BrainPreset::stalker(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the simulation
///
/// Design: Runtime owns the worker and paces ticks.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    tick_interval: Duration,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Execute a single tick immediately
    pub async fn step(&self) -> Result<TickReport> {
        self.handle.step().await
    }

    /// Run `ticks` ticks, one per tick interval
    pub async fn run_ticks(&self, ticks: u64) -> Result<Vec<TickReport>> {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval completes immediately
        interval.tick().await;

        let mut reports = Vec::with_capacity(usize::try_from(ticks).unwrap_or(0));
        for _ in 0..ticks {
            interval.tick().await;
            reports.push(self.handle.step().await?);
        }
        Ok(reports)
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every handle clone has been dropped; running
    /// action tasks are aborted.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    actions: ActionSet,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            actions: ActionSet::standard(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the game tuning
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn maze_size(mut self, width: i32, height: i32) -> Self {
        self.config.maze_width = width;
        self.config.maze_height = height;
        self
    }

    pub fn default_preset(mut self, preset: BrainPreset) -> Self {
        self.config.default_preset = preset;
        self
    }

    /// Use externally supplied capabilities instead of the built-in [`MazeWorld`]
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Replace the executor for one action kind
    pub fn executor(mut self, executor: impl ActionExecutor + 'static) -> Self {
        self.actions.insert(executor);
        self
    }

    /// Build the runtime
    ///
    /// Generates the maze and spawns the simulation worker on the current
    /// tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let config = self.config;
        let maze = MazeGraph::generate(config.maze_width, config.maze_height, config.seed)
            .map_err(|err| {
                error!(
                    severity = err.severity().as_str(),
                    code = err.error_code(),
                    %err,
                    "maze generation failed"
                );
                err
            })?;
        let maze = Arc::new(maze);
        info!(
            width = maze.width(),
            height = maze.height(),
            start = %maze.start(),
            end = %maze.end(),
            "maze generated"
        );

        let oracles = self.oracles.unwrap_or_else(|| {
            OracleManager::from_world(Arc::new(MazeWorld::new(
                Arc::clone(&maze),
                config.cell_size,
                config.move_speed,
            )))
        });

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone(), Arc::clone(&maze));

        let sim_worker = SimulationWorker::new(
            WorkerSetup {
                config: config.game_config,
                seed: config.seed,
                tick_length: config.tick_interval,
                maze,
                cell_size: config.cell_size,
                oracles,
                actions: self.actions,
                default_preset: config.default_preset,
            },
            command_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            tick_interval: config.tick_interval,
            sim_worker_handle,
        })
    }
}
