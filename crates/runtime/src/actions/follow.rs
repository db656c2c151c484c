use async_trait::async_trait;
use tokio::time::Instant;

use game_core::ActionKind;

use super::movement::request;
use super::{ActionContext, ActionExecutor, ActionOutcome, checkpoint};

/// Re-targets the player's position every refresh until the follow time runs
/// out.
pub struct FollowPlayerExecutor;

#[async_trait]
impl ActionExecutor for FollowPlayerExecutor {
    fn kind(&self) -> ActionKind {
        ActionKind::FollowPlayer
    }

    async fn execute(&self, ctx: &mut ActionContext) -> ActionOutcome {
        let refresh = ctx.tuning.follow_refresh();
        let duration = ctx.tuning.follow_duration();
        let started = Instant::now();

        loop {
            let Some(player) = ctx.player_pose() else {
                return ActionOutcome::TargetMissing;
            };
            if !request(ctx, player.position) {
                return ActionOutcome::Unreachable;
            }

            let waited = checkpoint(refresh).await;
            ctx.spend_energy(ctx.tuning.chase_energy_cost * waited.as_secs_f32());

            if started.elapsed() >= duration {
                return ActionOutcome::Elapsed;
            }
        }
    }
}
