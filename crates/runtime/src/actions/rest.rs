use async_trait::async_trait;
use tokio::time::Instant;

use game_core::ActionKind;

use super::{ActionContext, ActionExecutor, ActionOutcome, checkpoint};

/// Recovers energy in place until the rest duration elapses.
pub struct RestExecutor;

#[async_trait]
impl ActionExecutor for RestExecutor {
    fn kind(&self) -> ActionKind {
        ActionKind::Rest
    }

    async fn execute(&self, ctx: &mut ActionContext) -> ActionOutcome {
        let interval = ctx.tuning.check_interval();
        let duration = ctx.tuning.rest_duration();
        let started = Instant::now();

        loop {
            let waited = checkpoint(interval).await;
            ctx.restore_energy(ctx.tuning.rest_rate * waited.as_secs_f32());
            if started.elapsed() >= duration {
                return ActionOutcome::Elapsed;
            }
        }
    }
}
