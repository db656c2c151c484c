//! Event types for different topics.

use game_core::{ActionKind, EntityId, Tick, Vec2};
use serde::{Deserialize, Serialize};

use crate::actions::ActionOutcome;

/// Decisions and task lifecycle of agent brains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BrainEvent {
    /// The brain committed to an action and started its task.
    ActionCommitted {
        agent: EntityId,
        action: ActionKind,
        score: f64,
        generation: u64,
        clock: Tick,
    },

    /// The committed task finished on its own.
    ActionCompleted {
        agent: EntityId,
        action: ActionKind,
        outcome: ActionOutcome,
        clock: Tick,
    },

    /// The task was abandoned before completion (death or despawn).
    ActionAborted {
        agent: EntityId,
        action: ActionKind,
        clock: Tick,
    },
}

/// Perception of sounds above the hearing threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SoundEvent {
    NoiseHeard {
        agent: EntityId,
        intensity: f32,
        source: Option<Vec2>,
        clock: Tick,
    },
}

/// Damage exchanged between agents and the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    PlayerAttacked {
        attacker: EntityId,
        damage: f32,
        clock: Tick,
    },

    AgentDamaged {
        agent: EntityId,
        amount: f32,
        health: f32,
        clock: Tick,
    },

    AgentDied { agent: EntityId, clock: Tick },
}
