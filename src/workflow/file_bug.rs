use crate::context::AppContext;
use crate::domain::bug::{BugDraft, FiledBug};
use crate::domain::card::summary_from_card_name;
use crate::error::{AppError, AppResult};

pub struct FileBugOutcome {
    pub bug: FiledBug,
    pub card_short_url: String,
}

/// Fetch the card, file a bug from it, and write the bug URL back into the
/// card description. The card is only touched after the tracker accepted
/// the bug, so a tracker failure leaves the board untouched.
///
/// An unauthorized response from the board triggers one token renewal and
/// one retry of the failing operation; `renewed_token` carries the fresh
/// token back to the caller for persistence even when a later step fails.
pub async fn file_bug_from_card(
    ctx: &AppContext,
    card_id: &str,
    renewed_token: &mut Option<String>,
) -> AppResult<FileBugOutcome> {
    let card = match ctx.board.get_card(card_id).await {
        Err(AppError::BoardUnauthorized) => {
            renew_board_token(ctx, renewed_token).await?;
            ctx.board.get_card(card_id).await?
        }
        other => other?,
    };

    let draft = BugDraft {
        summary: summary_from_card_name(&card.name),
        description: card.description.clone(),
        card_url: card.short_url.clone(),
    };

    let bug = ctx.tracker.file_bug(draft).await?;

    let updated = format!("{}\n\n{}", bug.url, card.description);
    match ctx.board.set_card_description(&card.id, &updated).await {
        Err(AppError::BoardUnauthorized) => {
            renew_board_token(ctx, renewed_token).await?;
            ctx.board.set_card_description(&card.id, &updated).await?;
        }
        other => other?,
    }

    Ok(FileBugOutcome {
        bug,
        card_short_url: card.short_url,
    })
}

async fn renew_board_token(ctx: &AppContext, renewed_token: &mut Option<String>) -> AppResult<()> {
    let token = ctx.token_source.obtain_token().await?;
    ctx.board.install_token(&token);
    *renewed_token = Some(token);
    Ok(())
}
