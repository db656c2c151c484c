//! Asynchronous execution of committed NPC actions.
//!
//! Each committed action runs as its own tokio task driven by an
//! [`ActionExecutor`]. Tasks never touch agent state directly: they report
//! [`ActionEffect`]s over an unbounded channel and the simulation worker
//! applies them at the start of the next tick. Every effect carries the task
//! generation, so effects from a task that was aborted and replaced are
//! discarded.
mod attack;
mod context;
mod follow;
mod investigate;
mod movement;
mod rest;
mod wander;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use game_core::{ActionKind, EntityId};

pub use attack::AttackPlayerExecutor;
pub use context::{ActionContext, checkpoint};
pub use follow::FollowPlayerExecutor;
pub use investigate::GoToSoundPositionExecutor;
pub use rest::RestExecutor;
pub use wander::WanderExecutor;

/// How an action task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ActionOutcome {
    /// Remaining path distance dropped under the arrival threshold.
    Arrived,
    /// Travel took longer than the configured maximum.
    TimedOut,
    /// The action's own timer ran out.
    Elapsed,
    /// The planner rejected the destination or the agent is off the surface.
    Unreachable,
    /// The player or sound target needed by the action is not available.
    TargetMissing,
}

/// Change requested by an action task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectKind {
    /// Energy delta, negative for costs.
    Energy(f32),
    /// Damage dealt to the player.
    StrikePlayer { damage: f32 },
    /// The task finished; always the last effect of a task.
    Completed(ActionOutcome),
}

/// Effect tagged with the agent and task generation that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEffect {
    pub agent: EntityId,
    pub generation: u64,
    pub kind: EffectKind,
}

/// Runs one kind of action.
///
/// Implementations suspend at fixed checkpoints (see [`checkpoint`]) and
/// return once their completion predicate holds. They may be aborted at any
/// suspension point.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    fn kind(&self) -> ActionKind;

    async fn execute(&self, ctx: &mut ActionContext) -> ActionOutcome;
}

/// Executors by action kind.
#[derive(Clone)]
pub struct ActionSet {
    executors: HashMap<ActionKind, Arc<dyn ActionExecutor>>,
}

impl ActionSet {
    /// Built-in executors for every [`ActionKind`].
    pub fn standard() -> Self {
        let mut set = Self {
            executors: HashMap::new(),
        };
        set.insert(WanderExecutor);
        set.insert(FollowPlayerExecutor);
        set.insert(GoToSoundPositionExecutor);
        set.insert(AttackPlayerExecutor);
        set.insert(RestExecutor);
        set
    }

    /// Adds or replaces the executor for `executor.kind()`.
    pub fn insert(&mut self, executor: impl ActionExecutor + 'static) {
        self.executors.insert(executor.kind(), Arc::new(executor));
    }

    pub fn get(&self, kind: ActionKind) -> Option<Arc<dyn ActionExecutor>> {
        self.executors.get(&kind).cloned()
    }
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Spawns `executor` as a task; its outcome is reported as a completion effect.
pub(crate) fn spawn_action(
    executor: Arc<dyn ActionExecutor>,
    mut ctx: ActionContext,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = executor.execute(&mut ctx).await;
        tracing::debug!(
            agent = %ctx.agent,
            action = %executor.kind(),
            generation = ctx.generation,
            %outcome,
            "action task finished"
        );
        ctx.finish(outcome);
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;
    use tokio::time::Instant;

    use game_core::{
        ActionTuning, CellCoord, EntityRegistry, EntityTag, MazeGraph, PathPlanner, Pose,
        seeded_rng,
    };

    use super::*;
    use crate::oracle::{MazeWorld, OracleManager};

    const AGENT: EntityId = EntityId(1);

    struct Fixture {
        world: Arc<MazeWorld>,
        ctx: ActionContext,
        effects: mpsc::UnboundedReceiver<ActionEffect>,
    }

    impl Fixture {
        /// Agent at the south end of a 1x5 corridor, player two cells north.
        fn corridor(with_player: bool) -> Self {
            let maze = Arc::new(MazeGraph::generate(1, 5, 3).unwrap());
            let world = Arc::new(MazeWorld::new(maze, 2.0, 4.0));
            let origin = Pose::at(world.cell_center(CellCoord::new(0, 0)));
            world.register(AGENT, EntityTag::Npc, origin);
            if with_player {
                let player = Pose::at(world.cell_center(CellCoord::new(0, 2)));
                world.register(EntityId::PLAYER, EntityTag::Player, player);
            }

            let (tx, effects) = mpsc::unbounded_channel();
            let ctx = ActionContext::new(
                AGENT,
                1,
                origin,
                None,
                ActionTuning::default(),
                seeded_rng(5),
                OracleManager::from_world(Arc::clone(&world)),
                tx,
            );
            Self {
                world,
                ctx,
                effects,
            }
        }

        fn drain(&mut self) -> Vec<EffectKind> {
            let mut kinds = Vec::new();
            while let Ok(effect) = self.effects.try_recv() {
                assert_eq!(effect.agent, AGENT);
                kinds.push(effect.kind);
            }
            kinds
        }

        fn energy_total(&mut self) -> f32 {
            self.drain()
                .into_iter()
                .filter_map(|kind| match kind {
                    EffectKind::Energy(delta) => Some(delta),
                    _ => None,
                })
                .sum()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rest_restores_energy_until_elapsed() {
        let mut fx = Fixture::corridor(false);
        let started = Instant::now();

        let outcome = RestExecutor.execute(&mut fx.ctx).await;

        assert_eq!(outcome, ActionOutcome::Elapsed);
        assert!(started.elapsed() >= Duration::from_secs(4));
        // 8 checks of half a second at 10 energy per second
        assert_eq!(fx.energy_total(), 40.0);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_check_interval_still_charges_per_wait() {
        let mut fx = Fixture::corridor(false);
        fx.ctx.tuning.check_interval_secs = 0.0;
        fx.ctx.tuning.rest_duration_secs = 0.01;

        let outcome = RestExecutor.execute(&mut fx.ctx).await;

        assert_eq!(outcome, ActionOutcome::Elapsed);
        // Each wait is clamped to one millisecond at 10 energy per second
        let restored = fx.energy_total();
        assert!(restored > 0.0);
        assert!((restored - 0.1).abs() < 0.02);
    }

    #[tokio::test(start_paused = true)]
    async fn attack_strikes_once_then_waits_out_the_cooldown() {
        let mut fx = Fixture::corridor(true);
        let started = Instant::now();

        let outcome = AttackPlayerExecutor.execute(&mut fx.ctx).await;

        assert_eq!(outcome, ActionOutcome::Elapsed);
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert_eq!(
            fx.drain(),
            vec![
                EffectKind::Energy(-5.0),
                EffectKind::StrikePlayer { damage: 10.0 }
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn attack_without_player_does_nothing() {
        let mut fx = Fixture::corridor(false);
        let outcome = AttackPlayerExecutor.execute(&mut fx.ctx).await;
        assert_eq!(outcome, ActionOutcome::TargetMissing);
        assert!(fx.drain().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn investigate_requires_a_sound_target() {
        let mut fx = Fixture::corridor(false);
        let outcome = GoToSoundPositionExecutor.execute(&mut fx.ctx).await;
        assert_eq!(outcome, ActionOutcome::TargetMissing);
    }

    #[tokio::test(start_paused = true)]
    async fn investigate_times_out_when_nothing_moves() {
        let mut fx = Fixture::corridor(false);
        fx.ctx.sound_target = Some(fx.world.cell_center(CellCoord::new(0, 3)));
        let started = Instant::now();

        let outcome = GoToSoundPositionExecutor.execute(&mut fx.ctx).await;

        assert_eq!(outcome, ActionOutcome::TimedOut);
        assert!(started.elapsed() >= Duration::from_secs(20));
        assert!(fx.energy_total() < 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn investigate_arrives_once_the_world_moves_the_agent() {
        let mut fx = Fixture::corridor(false);
        let target = fx.world.cell_center(CellCoord::new(0, 3));
        fx.ctx.sound_target = Some(target);

        let world = Arc::clone(&fx.world);
        let mover = tokio::spawn(async move {
            loop {
                tokio::time::sleep(Duration::from_millis(100)).await;
                world.advance(0.1);
            }
        });

        let outcome = GoToSoundPositionExecutor.execute(&mut fx.ctx).await;
        mover.abort();

        assert_eq!(outcome, ActionOutcome::Arrived);
        let pose = fx.world.pose(AGENT).unwrap();
        assert!(pose.position.distance(target) < 0.5);
    }

    #[tokio::test(start_paused = true)]
    async fn follow_runs_for_its_duration() {
        let mut fx = Fixture::corridor(true);
        let started = Instant::now();

        let outcome = FollowPlayerExecutor.execute(&mut fx.ctx).await;

        assert_eq!(outcome, ActionOutcome::Elapsed);
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(fx.energy_total() < 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn follow_without_player_reports_target_missing() {
        let mut fx = Fixture::corridor(false);
        let outcome = FollowPlayerExecutor.execute(&mut fx.ctx).await;
        assert_eq!(outcome, ActionOutcome::TargetMissing);
    }

    #[tokio::test(start_paused = true)]
    async fn wander_off_the_maze_is_unreachable() {
        let mut fx = Fixture::corridor(false);
        fx.world.register(AGENT, EntityTag::Npc, Pose::at(game_core::Vec2::new(-4.0, -4.0)));

        let outcome = WanderExecutor.execute(&mut fx.ctx).await;
        assert_eq!(outcome, ActionOutcome::Unreachable);
        assert!(fx.drain().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_task_reports_completion_with_its_generation() {
        let fx = Fixture::corridor(false);
        let Fixture {
            ctx, mut effects, ..
        } = fx;

        spawn_action(Arc::new(AttackPlayerExecutor), ctx)
            .await
            .unwrap();

        let effect = effects.recv().await.unwrap();
        assert_eq!(effect.generation, 1);
        assert_eq!(effect.kind, EffectKind::Completed(ActionOutcome::TargetMissing));
    }

    #[test]
    fn standard_set_covers_every_action() {
        use strum::IntoEnumIterator;

        let set = ActionSet::standard();
        for kind in ActionKind::iter() {
            assert_eq!(set.get(kind).map(|e| e.kind()), Some(kind));
        }
    }
}
