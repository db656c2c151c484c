use async_trait::async_trait;

use game_core::ActionKind;

use super::{ActionContext, ActionExecutor, ActionOutcome, checkpoint};

/// Strikes the player once, then waits out the cooldown.
pub struct AttackPlayerExecutor;

#[async_trait]
impl ActionExecutor for AttackPlayerExecutor {
    fn kind(&self) -> ActionKind {
        ActionKind::AttackPlayer
    }

    async fn execute(&self, ctx: &mut ActionContext) -> ActionOutcome {
        if ctx.player_pose().is_none() {
            return ActionOutcome::TargetMissing;
        }
        ctx.spend_energy(ctx.tuning.attack_energy_cost);
        ctx.strike_player(ctx.tuning.attack_damage);

        checkpoint(ctx.tuning.attack_cooldown()).await;
        ActionOutcome::Elapsed
    }
}
