use async_trait::async_trait;

use crate::domain::commit::CommitRecord;
use crate::error::AppResult;

#[async_trait]
pub trait SourceHostService: Send + Sync {
    /// Feat commits on the default branch, newest first.
    async fn feat_commits(&self) -> AppResult<Vec<CommitRecord>>;
}
