//! Simulation worker that owns agents, brains and the sound system.
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), runs the
//! per-tick pipeline, and publishes events to the [`EventBus`].
//!
//! # Tick order
//!
//! 1. Apply effects reported by action tasks since the previous tick
//! 2. Advance the path planner by the tick length
//! 3. Move sound receivers to their agents' current positions
//! 4. Propagate queued emitters, then clear the queue
//! 5. Let every brain without a running task decide, in ascending id order
//! 6. Return a [`TickReport`]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, trace, warn};

use game_core::{
    ActionKind, ActionTuning, AgentState, AgentTemplate, AgentView, BrainPreset, EntityId,
    EntityTag, GameConfig, MazeGraph, Pose, SoundEmitter, SoundPropagationSystem, SoundReceiver,
    Tick, Vec2, derive_seed, seeded_rng,
};

use crate::actions::{
    ActionContext, ActionEffect, ActionOutcome, ActionSet, EffectKind, spawn_action,
};
use crate::api::{Result, RuntimeError};
use crate::brain::{BrainState, UtilityBrain};
use crate::events::{BrainEvent, CombatEvent, Event, EventBus, SoundEvent};
use crate::oracle::OracleManager;

/// Spawn request for a new agent.
#[derive(Debug, Clone)]
pub struct AgentSpawn {
    pub position: Vec2,
    /// Falls back to the configured agent defaults.
    pub template: Option<AgentTemplate>,
    /// Falls back to the runtime's default brain preset.
    pub preset: Option<BrainPreset>,
}

impl AgentSpawn {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            template: None,
            preset: None,
        }
    }

    pub fn with_template(mut self, template: AgentTemplate) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_preset(mut self, preset: BrainPreset) -> Self {
        self.preset = Some(preset);
        self
    }
}

/// Read-only view of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub state: AgentState,
    pub pose: Option<Pose>,
    pub hearing: Option<SoundReceiver>,
    pub brain: BrainState,
}

/// Summary of one simulation tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub clock: Tick,
    /// Actions committed this tick with their scores.
    pub committed: Vec<(EntityId, ActionKind, f64)>,
    /// Tasks whose completion was applied this tick.
    pub completed: Vec<(EntityId, ActionKind, ActionOutcome)>,
    /// Emitters that played this tick.
    pub sounds_played: usize,
    /// Damage dealt to the player this tick.
    pub player_damage: f32,
    pub agents: usize,
}

/// Commands that can be sent to the simulation worker
pub enum Command {
    SpawnAgent {
        spawn: AgentSpawn,
        reply: oneshot::Sender<Result<EntityId>>,
    },
    DespawnAgent {
        agent: EntityId,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Returns remaining health; the agent is removed when it reaches zero.
    DamageAgent {
        agent: EntityId,
        amount: f32,
        reply: oneshot::Sender<Result<f32>>,
    },
    /// Queues an emitter for the next propagation.
    EmitSound {
        emitter: SoundEmitter,
        reply: oneshot::Sender<()>,
    },
    /// Registers the player or teleports it.
    PlacePlayer {
        pose: Pose,
        reply: oneshot::Sender<()>,
    },
    /// Asks the planner to walk the player to a destination.
    MovePlayer {
        destination: Vec2,
        reply: oneshot::Sender<bool>,
    },
    Step {
        reply: oneshot::Sender<TickReport>,
    },
    QueryAgent {
        agent: EntityId,
        reply: oneshot::Sender<Option<AgentSnapshot>>,
    },
}

struct AgentSlot {
    state: AgentState,
    brain: UtilityBrain,
}

/// Background task that processes simulation commands.
pub struct SimulationWorker {
    config: GameConfig,
    seed: u64,
    tick_length: Duration,
    maze: Arc<MazeGraph>,
    cell_size: f32,
    oracles: OracleManager,
    actions: ActionSet,
    default_preset: BrainPreset,
    sound: SoundPropagationSystem,
    pending_emitters: Vec<SoundEmitter>,
    agents: BTreeMap<EntityId, AgentSlot>,
    next_entity: u32,
    clock: Tick,
    command_rx: mpsc::Receiver<Command>,
    effects_tx: mpsc::UnboundedSender<ActionEffect>,
    effects_rx: mpsc::UnboundedReceiver<ActionEffect>,
    event_bus: EventBus,
}

/// Construction parameters of a [`SimulationWorker`].
pub struct WorkerSetup {
    pub config: GameConfig,
    pub seed: u64,
    pub tick_length: Duration,
    pub maze: Arc<MazeGraph>,
    pub cell_size: f32,
    pub oracles: OracleManager,
    pub actions: ActionSet,
    pub default_preset: BrainPreset,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        setup: WorkerSetup,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let (effects_tx, effects_rx) = mpsc::unbounded_channel();

        info!(
            width = setup.maze.width(),
            height = setup.maze.height(),
            seed = setup.seed,
            preset = %setup.default_preset.name,
            "SimulationWorker initialized"
        );

        Self {
            config: setup.config,
            seed: setup.seed,
            tick_length: setup.tick_length,
            maze: setup.maze,
            cell_size: setup.cell_size,
            oracles: setup.oracles,
            actions: setup.actions,
            default_preset: setup.default_preset,
            sound: SoundPropagationSystem::new(),
            pending_emitters: Vec::new(),
            agents: BTreeMap::new(),
            next_entity: EntityId::PLAYER.0 + 1,
            clock: Tick::ZERO,
            command_rx,
            effects_tx,
            effects_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        for (id, slot) in &mut self.agents {
            if let Some(action) = slot.brain.abort() {
                debug!(agent = %id, %action, "aborting task on shutdown");
            }
        }
        info!(clock = %self.clock, "SimulationWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::SpawnAgent { spawn, reply } => {
                let result = self.spawn_agent(spawn);
                if reply.send(result).is_err() {
                    debug!("SpawnAgent reply channel closed (caller dropped)");
                }
            }
            Command::DespawnAgent { agent, reply } => {
                let result = self.despawn_agent(agent);
                if reply.send(result).is_err() {
                    debug!("DespawnAgent reply channel closed (caller dropped)");
                }
            }
            Command::DamageAgent {
                agent,
                amount,
                reply,
            } => {
                let result = self.damage_agent(agent, amount);
                if reply.send(result).is_err() {
                    debug!("DamageAgent reply channel closed (caller dropped)");
                }
            }
            Command::EmitSound { emitter, reply } => {
                self.pending_emitters.push(emitter);
                let _ = reply.send(());
            }
            Command::PlacePlayer { pose, reply } => {
                self.oracles
                    .entities()
                    .register(EntityId::PLAYER, EntityTag::Player, pose);
                let _ = reply.send(());
            }
            Command::MovePlayer { destination, reply } => {
                let accepted = self
                    .oracles
                    .planner()
                    .request_move(EntityId::PLAYER, destination);
                let _ = reply.send(accepted);
            }
            Command::Step { reply } => {
                let report = self.tick();
                if reply.send(report).is_err() {
                    debug!("Step reply channel closed (caller dropped)");
                }
            }
            Command::QueryAgent { agent, reply } => {
                let _ = reply.send(self.snapshot(agent));
            }
        }
    }

    fn spawn_agent(&mut self, spawn: AgentSpawn) -> Result<EntityId> {
        if self.maze.cell_at(spawn.position, self.cell_size).is_none() {
            return Err(RuntimeError::InvalidSpawn(spawn.position));
        }

        let id = EntityId(self.next_entity);
        self.next_entity += 1;

        let template = spawn
            .template
            .unwrap_or_else(|| AgentTemplate::from(&self.config.agent));
        let preset = spawn.preset.as_ref().unwrap_or(&self.default_preset);
        let receiver = self.sound.register(spawn.position);

        self.oracles
            .entities()
            .register(id, EntityTag::Npc, Pose::at(spawn.position));
        self.agents.insert(
            id,
            AgentSlot {
                state: AgentState::new(id, &template, receiver),
                brain: UtilityBrain::new(preset),
            },
        );

        info!(agent = %id, position = ?spawn.position, preset = %preset.name, "agent spawned");
        Ok(id)
    }

    fn despawn_agent(&mut self, agent: EntityId) -> Result<()> {
        let slot = self
            .agents
            .remove(&agent)
            .ok_or(RuntimeError::UnknownAgent(agent))?;
        self.release(slot);
        info!(agent = %agent, "agent despawned");
        Ok(())
    }

    fn damage_agent(&mut self, agent: EntityId, amount: f32) -> Result<f32> {
        let slot = self
            .agents
            .get_mut(&agent)
            .ok_or(RuntimeError::UnknownAgent(agent))?;
        slot.state.take_damage(amount);
        let health = slot.state.health();

        self.event_bus.publish(Event::Combat(CombatEvent::AgentDamaged {
            agent,
            amount,
            health,
            clock: self.clock,
        }));

        if slot.state.is_dead()
            && let Some(slot) = self.agents.remove(&agent)
        {
            self.release(slot);
            info!(agent = %agent, "agent died");
            self.event_bus.publish(Event::Combat(CombatEvent::AgentDied {
                agent,
                clock: self.clock,
            }));
        }
        Ok(health)
    }

    /// Aborts the agent's task and unregisters it from every registry.
    fn release(&mut self, mut slot: AgentSlot) {
        let id = slot.state.id;
        if let Some(action) = slot.brain.abort() {
            warn!(agent = %id, %action, "in-flight action aborted");
            self.event_bus.publish(Event::Brain(BrainEvent::ActionAborted {
                agent: id,
                action,
                clock: self.clock,
            }));
        }
        self.sound.unregister(slot.state.receiver);
        self.oracles.entities().remove(id);
    }

    fn snapshot(&self, agent: EntityId) -> Option<AgentSnapshot> {
        let slot = self.agents.get(&agent)?;
        Some(AgentSnapshot {
            state: slot.state.clone(),
            pose: self.oracles.entities().pose(agent),
            hearing: self.sound.receiver(slot.state.receiver).copied(),
            brain: slot.brain.state(),
        })
    }

    /// Runs one simulation tick.
    pub(crate) fn tick(&mut self) -> TickReport {
        self.clock = self.clock.next();
        let mut report = TickReport {
            clock: self.clock,
            ..TickReport::default()
        };

        self.apply_effects(&mut report);

        self.oracles.planner().advance(self.tick_length.as_secs_f32());

        for (&id, slot) in &self.agents {
            if let Some(pose) = self.oracles.entities().pose(id) {
                self.sound.set_position(slot.state.receiver, pose.position);
            }
        }

        report.sounds_played = self.sound.propagate(&self.pending_emitters);
        self.pending_emitters.clear();
        if report.sounds_played > 0 {
            self.publish_heard();
        }

        self.decide_all(&mut report);

        report.agents = self.agents.len();
        trace!(clock = %self.clock, committed = report.committed.len(), "tick complete");
        report
    }

    fn apply_effects(&mut self, report: &mut TickReport) {
        while let Ok(effect) = self.effects_rx.try_recv() {
            let Some(slot) = self.agents.get_mut(&effect.agent) else {
                trace!(agent = %effect.agent, "effect for removed agent dropped");
                continue;
            };
            if !slot.brain.accepts(effect.generation) {
                trace!(
                    agent = %effect.agent,
                    generation = effect.generation,
                    "stale effect dropped"
                );
                continue;
            }

            match effect.kind {
                EffectKind::Energy(delta) => slot.state.apply_energy(delta),
                EffectKind::StrikePlayer { damage } => {
                    report.player_damage += damage;
                    self.event_bus.publish(Event::Combat(CombatEvent::PlayerAttacked {
                        attacker: effect.agent,
                        damage,
                        clock: self.clock,
                    }));
                }
                EffectKind::Completed(outcome) => {
                    if let Some(action) = slot.brain.complete(effect.generation) {
                        debug!(agent = %effect.agent, %action, %outcome, "action completed");
                        report.completed.push((effect.agent, action, outcome));
                        self.event_bus.publish(Event::Brain(BrainEvent::ActionCompleted {
                            agent: effect.agent,
                            action,
                            outcome,
                            clock: self.clock,
                        }));
                    }
                }
            }
        }
    }

    fn publish_heard(&self) {
        let threshold = self.config.ai.noise_threshold;
        for (&id, slot) in &self.agents {
            let Some(hearing) = self.sound.receiver(slot.state.receiver) else {
                continue;
            };
            if hearing.intensity > threshold {
                self.event_bus.publish(Event::Sound(SoundEvent::NoiseHeard {
                    agent: id,
                    intensity: hearing.intensity,
                    source: hearing.last_heard_position,
                    clock: self.clock,
                }));
            }
        }
    }

    fn decide_all(&mut self, report: &mut TickReport) {
        let env = self.oracles.as_game_env();

        for (&id, slot) in &mut self.agents {
            if slot.brain.is_executing() {
                continue;
            }

            let pose = env
                .entities()
                .ok()
                .and_then(|entities| entities.pose(id))
                .unwrap_or_default();
            let hearing = self
                .sound
                .receiver(slot.state.receiver)
                .copied()
                .unwrap_or_default();
            let view = AgentView::new(&slot.state, pose, hearing, env, &self.config.ai);

            let Some((action, score)) = slot.brain.decide(&view) else {
                continue;
            };
            let Some(executor) = self.actions.get(action) else {
                warn!(agent = %id, %action, "no executor registered, skipping");
                continue;
            };

            let launch = LaunchParams {
                agent: id,
                origin: pose,
                sound_target: action
                    .needs_sound_target()
                    .then_some(hearing.last_heard_position)
                    .flatten(),
                seed: self.seed,
                tuning: &self.config.actions,
                oracles: &self.oracles,
                effects: &self.effects_tx,
            };
            let generation = slot
                .brain
                .commit(action, |generation| spawn_action(executor, launch.context(generation)));

            info!(agent = %id, %action, score, generation, "action committed");
            report.committed.push((id, action, score));
            self.event_bus.publish(Event::Brain(BrainEvent::ActionCommitted {
                agent: id,
                action,
                score,
                generation,
                clock: self.clock,
            }));
        }
    }
}

/// Borrowed pieces needed to build an [`ActionContext`] for a new task.
struct LaunchParams<'a> {
    agent: EntityId,
    origin: Pose,
    sound_target: Option<Vec2>,
    seed: u64,
    tuning: &'a ActionTuning,
    oracles: &'a OracleManager,
    effects: &'a mpsc::UnboundedSender<ActionEffect>,
}

impl LaunchParams<'_> {
    fn context(self, generation: u64) -> ActionContext {
        ActionContext::new(
            self.agent,
            generation,
            self.origin,
            self.sound_target,
            self.tuning.clone(),
            seeded_rng(derive_seed(self.seed, self.agent, generation)),
            self.oracles.clone(),
            self.effects.clone(),
        )
    }
}
