use std::fmt;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::context::AppContext;
use crate::domain::commit::CommitRecord;
use crate::domain::notification::render_commit;
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The source host had no feat commits at all.
    NoMatches,
    /// Nothing newer than the stored marker.
    UpToDate,
    Announced { count: usize, marker: String },
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickOutcome::NoMatches => write!(f, "no feat commits found"),
            TickOutcome::UpToDate => write!(f, "nothing new to announce"),
            TickOutcome::Announced { count, marker } => {
                write!(f, "announced {count} commit(s), marker now {marker}")
            }
        }
    }
}

/// Commits newer than `marker`, newest first. An unknown or empty marker
/// selects the whole list.
pub fn select_new_commits<'a>(commits: &'a [CommitRecord], marker: &str) -> &'a [CommitRecord] {
    let end = commits
        .iter()
        .position(|commit| commit.id == marker)
        .unwrap_or(commits.len());
    &commits[..end]
}

/// Builds one chat message listing `new_commits` oldest first.
pub fn render_batch(repository_name: &str, new_commits: &[CommitRecord]) -> String {
    let mut message = format!("there are new features in {repository_name}!\n\n");
    for commit in new_commits.iter().rev() {
        message.push_str(&render_commit(commit));
        message.push('\n');
    }
    message
}

/// One fetch, dedupe, send, persist pass. The marker moves only after the
/// chat message has been accepted.
pub async fn run_tick(ctx: &AppContext) -> AppResult<TickOutcome> {
    let commits = ctx.source_host.feat_commits().await?;
    if commits.is_empty() {
        return Ok(TickOutcome::NoMatches);
    }

    let marker = ctx.markers.load();
    let new_commits = select_new_commits(&commits, &marker);
    let Some(newest) = new_commits.first() else {
        return Ok(TickOutcome::UpToDate);
    };

    let message = render_batch(&ctx.config.repository.name, new_commits);
    ctx.chat.send_message(&message).await?;
    ctx.markers.save(&newest.id);

    Ok(TickOutcome::Announced {
        count: new_commits.len(),
        marker: newest.id.clone(),
    })
}

/// Runs a tick immediately and then once per `period`, forever. Failed
/// ticks are logged and the loop carries on.
pub async fn run_forever(ctx: &AppContext, period: Duration) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match run_tick(ctx).await {
            Ok(outcome @ TickOutcome::Announced { .. }) => info!(%outcome, "tick complete"),
            Ok(outcome) => debug!(%outcome, "tick complete"),
            Err(err) => error!(error = %err, repository = %ctx.config.repository, "tick failed"),
        }
    }
}
