use async_trait::async_trait;

use crate::domain::bug::{BugDraft, FiledBug};
use crate::error::AppResult;

#[async_trait]
pub trait BugTrackerService: Send + Sync {
    async fn file_bug(&self, draft: BugDraft) -> AppResult<FiledBug>;
}
