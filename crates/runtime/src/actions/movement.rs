//! Shared travel loop of the movement actions.

use tokio::time::Instant;

use game_core::Vec2;

use super::{ActionContext, ActionOutcome, checkpoint};

/// Asks the planner to move the agent to `destination`.
pub(super) fn request(ctx: &ActionContext, destination: Vec2) -> bool {
    let planner = ctx.planner();
    planner.is_on_navigable_surface(ctx.agent) && planner.request_move(ctx.agent, destination)
}

/// Polls the planner once per check interval until the agent arrives or the
/// travel budget runs out, spending `cost_per_sec` energy per second.
pub(super) async fn await_arrival(ctx: &ActionContext, cost_per_sec: f32) -> ActionOutcome {
    let interval = ctx.tuning.check_interval();
    let max_travel = ctx.tuning.max_travel();
    let started = Instant::now();

    loop {
        let waited = checkpoint(interval).await;
        ctx.spend_energy(cost_per_sec * waited.as_secs_f32());

        if ctx.planner().remaining_distance(ctx.agent) < ctx.tuning.arrive_distance {
            return ActionOutcome::Arrived;
        }
        if started.elapsed() >= max_travel {
            return ActionOutcome::TimedOut;
        }
    }
}
