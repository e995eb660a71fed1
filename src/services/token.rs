use async_trait::async_trait;

use crate::error::AppResult;

/// Produces a fresh board OAuth token. The production implementation is
/// interactive and lives at the CLI boundary.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn obtain_token(&self) -> AppResult<String>;
}
