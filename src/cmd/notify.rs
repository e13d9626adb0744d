use tracing::info;

use crate::config::POLL_INTERVAL;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::notify::{TickOutcome, run_forever, run_tick};

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    info!(
        repository = %ctx.config.repository,
        interval_secs = POLL_INTERVAL.as_secs(),
        "watching for feat commits"
    );
    run_forever(ctx, POLL_INTERVAL).await;
    Ok(())
}

pub async fn once(ctx: &AppContext) -> AppResult<TickOutcome> {
    run_tick(ctx).await
}
