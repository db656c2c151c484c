use std::f32::consts::TAU;

use async_trait::async_trait;

use game_core::{ActionKind, RngSource, Vec2};

use super::movement::{await_arrival, request};
use super::{ActionContext, ActionExecutor, ActionOutcome};

/// Destinations tried before giving up on a wander leg.
const ATTEMPTS: usize = 8;

/// Walks to a random point within the wander radius of the origin.
pub struct WanderExecutor;

#[async_trait]
impl ActionExecutor for WanderExecutor {
    fn kind(&self) -> ActionKind {
        ActionKind::Wander
    }

    async fn execute(&self, ctx: &mut ActionContext) -> ActionOutcome {
        let radius = ctx.tuning.wander_radius.max(0.0);

        for _ in 0..ATTEMPTS {
            let angle = ctx.rng.next_float() * TAU;
            // sqrt keeps samples uniform over the disc
            let distance = radius * ctx.rng.next_float().sqrt();
            let destination = ctx.origin.position + Vec2::from_angle(angle) * distance;

            if request(ctx, destination) {
                let cost = ctx.tuning.wander_energy_cost;
                return await_arrival(ctx, cost).await;
            }
        }
        ActionOutcome::Unreachable
    }
}
