//! Per-agent decision state machine.
//!
//! ```text
//! Idle ──decide──▶ Deciding ──commit──▶ Executing ──complete──▶ Deciding
//!   ▲                                        │
//!   └──────────────── abort ─────────────────┘
//! ```
//!
//! While an action executes the brain does not reconsider; it re-enters
//! `Deciding` only when the task reports completion. Committing while a task
//! is in flight aborts that task first, so an agent never runs two actions.
//! Every commit bumps a generation counter that tags the task and its effects.

use serde::{Deserialize, Serialize};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::debug;

use game_core::{ActionKind, AgentView, BrainPreset, ConsiderationKind, build_reasoner};
use utility_ai::Reasoner;

/// Lifecycle of a [`UtilityBrain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrainState {
    /// No committed action and no decision made yet.
    Idle,
    /// Ready to score actions on the next tick.
    Deciding,
    /// A task for `action` is running.
    Executing { action: ActionKind, generation: u64 },
}

/// Utility-scoring brain that owns the agent's in-flight action task.
pub struct UtilityBrain {
    preset: String,
    reasoner: Reasoner<ActionKind, ConsiderationKind>,
    state: BrainState,
    generation: u64,
    task: Option<AbortHandle>,
}

impl UtilityBrain {
    pub fn new(preset: &BrainPreset) -> Self {
        Self {
            preset: preset.name.clone(),
            reasoner: build_reasoner(preset),
            state: BrainState::Idle,
            generation: 0,
            task: None,
        }
    }

    pub fn preset(&self) -> &str {
        &self.preset
    }

    pub fn state(&self) -> BrainState {
        self.state
    }

    pub fn is_executing(&self) -> bool {
        matches!(self.state, BrainState::Executing { .. })
    }

    /// Action of the running task, if any.
    pub fn current_action(&self) -> Option<ActionKind> {
        match self.state {
            BrainState::Executing { action, .. } => Some(action),
            _ => None,
        }
    }

    /// Generation of the most recent commit.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns true if `generation` belongs to the running task.
    pub fn accepts(&self, generation: u64) -> bool {
        matches!(self.state, BrainState::Executing { generation: g, .. } if g == generation)
    }

    /// Scores every action and returns the winner with its score.
    ///
    /// Returns `None` while an action executes or when the preset is empty.
    pub fn decide(&mut self, view: &AgentView<'_>) -> Option<(ActionKind, f64)> {
        if self.is_executing() {
            return None;
        }
        self.state = BrainState::Deciding;

        let decision = self.reasoner.decide(view)?;
        for (action, score) in self.reasoner.last_scores() {
            debug!(agent = %view.agent.id, %action, score, "candidate");
        }

        let action = *self.reasoner.payload(decision.index)?;
        debug!(
            agent = %view.agent.id,
            %action,
            score = decision.score,
            "best action"
        );
        Some((action, decision.score))
    }

    /// Commits to `action`, aborting any running task, and stores the task
    /// produced by `spawn` for the new generation.
    pub fn commit<F>(&mut self, action: ActionKind, spawn: F) -> u64
    where
        F: FnOnce(u64) -> JoinHandle<()>,
    {
        self.abort();
        self.generation += 1;
        let generation = self.generation;
        self.task = Some(spawn(generation).abort_handle());
        self.state = BrainState::Executing { action, generation };
        generation
    }

    /// Marks the running task finished if `generation` matches it.
    ///
    /// Returns the completed action, or `None` for stale generations.
    pub fn complete(&mut self, generation: u64) -> Option<ActionKind> {
        match self.state {
            BrainState::Executing { action, generation: g } if g == generation => {
                self.task = None;
                self.state = BrainState::Deciding;
                Some(action)
            }
            _ => None,
        }
    }

    /// Aborts the running task and returns to `Idle`.
    pub fn abort(&mut self) -> Option<ActionKind> {
        let aborted = self.current_action();
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.state = BrainState::Idle;
        aborted
    }
}

impl Drop for UtilityBrain {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
