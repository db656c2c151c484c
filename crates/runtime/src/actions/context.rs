use std::time::Duration;

use rand_chacha::ChaCha8Rng;
use tokio::sync::mpsc;

use game_core::{ActionTuning, EntityId, EntityRegistry, EntityTag, PathPlanner, Pose, Vec2};

use super::{ActionEffect, ActionOutcome, EffectKind};
use crate::oracle::OracleManager;

/// Shortest suspension between two checks; zero intervals would spin.
const MIN_CHECKPOINT: Duration = Duration::from_millis(1);

/// Suspends the calling task for `interval` and returns the time actually
/// waited, which per-second costs should be charged against.
pub async fn checkpoint(interval: Duration) -> Duration {
    let wait = interval.max(MIN_CHECKPOINT);
    tokio::time::sleep(wait).await;
    wait
}

/// Everything an action task may read or report.
pub struct ActionContext {
    pub agent: EntityId,
    pub generation: u64,
    /// Agent pose when the action was committed.
    pub origin: Pose,
    /// Last heard sound position captured at commit time.
    pub sound_target: Option<Vec2>,
    pub tuning: ActionTuning,
    /// Stream dedicated to this task.
    pub rng: ChaCha8Rng,
    oracles: OracleManager,
    effects: mpsc::UnboundedSender<ActionEffect>,
}

impl ActionContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        agent: EntityId,
        generation: u64,
        origin: Pose,
        sound_target: Option<Vec2>,
        tuning: ActionTuning,
        rng: ChaCha8Rng,
        oracles: OracleManager,
        effects: mpsc::UnboundedSender<ActionEffect>,
    ) -> Self {
        Self {
            agent,
            generation,
            origin,
            sound_target,
            tuning,
            rng,
            oracles,
            effects,
        }
    }

    pub fn planner(&self) -> &dyn PathPlanner {
        self.oracles.planner()
    }

    pub fn entities(&self) -> &dyn EntityRegistry {
        self.oracles.entities()
    }

    /// Current pose of the acting agent, or its origin if it is not registered.
    pub fn current_pose(&self) -> Pose {
        self.entities().pose(self.agent).unwrap_or(self.origin)
    }

    pub fn player_pose(&self) -> Option<Pose> {
        let entities = self.entities();
        entities
            .find_by_tag(EntityTag::Player)
            .and_then(|player| entities.pose(player))
    }

    pub fn spend_energy(&self, amount: f32) {
        self.emit(EffectKind::Energy(-amount.max(0.0)));
    }

    pub fn restore_energy(&self, amount: f32) {
        self.emit(EffectKind::Energy(amount.max(0.0)));
    }

    pub fn strike_player(&self, damage: f32) {
        self.emit(EffectKind::StrikePlayer { damage });
    }

    pub(crate) fn finish(&self, outcome: ActionOutcome) {
        self.emit(EffectKind::Completed(outcome));
    }

    fn emit(&self, kind: EffectKind) {
        let effect = ActionEffect {
            agent: self.agent,
            generation: self.generation,
            kind,
        };
        if self.effects.send(effect).is_err() {
            tracing::trace!(agent = %self.agent, "effect dropped, simulation worker stopped");
        }
    }
}
