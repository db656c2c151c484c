use async_trait::async_trait;

use game_core::ActionKind;

use super::movement::{await_arrival, request};
use super::{ActionContext, ActionExecutor, ActionOutcome};

/// Travels to the position of the last heard sound.
pub struct GoToSoundPositionExecutor;

#[async_trait]
impl ActionExecutor for GoToSoundPositionExecutor {
    fn kind(&self) -> ActionKind {
        ActionKind::GoToSoundPosition
    }

    async fn execute(&self, ctx: &mut ActionContext) -> ActionOutcome {
        let Some(target) = ctx.sound_target else {
            return ActionOutcome::TargetMissing;
        };
        if !request(ctx, target) {
            return ActionOutcome::Unreachable;
        }
        let cost = ctx.tuning.chase_energy_cost;
        await_arrival(ctx, cost).await
    }
}
