//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! spawning agents, emitting sounds, stepping the simulation or streaming
//! events from specific topics.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{EntityId, MazeGraph, Pose, SoundEmitter, Vec2};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{AgentSnapshot, AgentSpawn, Command, TickReport};

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    maze: Arc<MazeGraph>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        maze: Arc<MazeGraph>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            maze,
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the reply.
    async fn request<T>(&self, make: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Spawn an agent and register its body and hearing
    pub async fn spawn_agent(&self, spawn: AgentSpawn) -> Result<EntityId> {
        self.request(|reply| Command::SpawnAgent { spawn, reply })
            .await?
    }

    /// Remove an agent, aborting its running action
    pub async fn despawn_agent(&self, agent: EntityId) -> Result<()> {
        self.request(|reply| Command::DespawnAgent { agent, reply })
            .await?
    }

    /// Damage an agent and return its remaining health
    ///
    /// An agent whose health reaches zero dies and is removed.
    pub async fn damage_agent(&self, agent: EntityId, amount: f32) -> Result<f32> {
        self.request(|reply| Command::DamageAgent {
            agent,
            amount,
            reply,
        })
        .await?
    }

    /// Queue a sound for the next tick's propagation
    pub async fn emit_sound(&self, emitter: SoundEmitter) -> Result<()> {
        self.request(|reply| Command::EmitSound { emitter, reply })
            .await
    }

    /// Register the player at `pose`, or teleport it there
    pub async fn place_player(&self, pose: Pose) -> Result<()> {
        self.request(|reply| Command::PlacePlayer { pose, reply })
            .await
    }

    /// Ask the planner to walk the player to `destination`
    pub async fn move_player(&self, destination: Vec2) -> Result<bool> {
        self.request(|reply| Command::MovePlayer { destination, reply })
            .await
    }

    /// Execute a single simulation tick
    pub async fn step(&self) -> Result<TickReport> {
        self.request(|reply| Command::Step { reply }).await
    }

    /// Query one agent (read-only snapshot)
    pub async fn agent(&self, agent: EntityId) -> Result<AgentSnapshot> {
        self.request(|reply| Command::QueryAgent { agent, reply })
            .await?
            .ok_or(RuntimeError::UnknownAgent(agent))
    }

    /// The session's maze
    pub fn maze(&self) -> Arc<MazeGraph> {
        Arc::clone(&self.maze)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Brain` - Action commits, completions and aborts
    /// - `Topic::Sound` - Noises heard above the threshold
    /// - `Topic::Combat` - Attacks, damage and deaths
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }
}
