use async_trait::async_trait;

use crate::domain::card::Card;
use crate::error::AppResult;

/// The kanban-board side of the bridge. Authorization failures surface as
/// `AppError::BoardUnauthorized` so the workflow can renew the token and
/// retry the failing operation once.
#[async_trait]
pub trait BoardService: Send + Sync {
    async fn get_card(&self, card_id: &str) -> AppResult<Card>;
    async fn set_card_description(&self, card_id: &str, description: &str) -> AppResult<()>;

    /// Swap a freshly generated OAuth token into the live client.
    fn install_token(&self, token: &str);
}
