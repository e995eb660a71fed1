use std::path::PathBuf;
use std::sync::Arc;

use crate::cmd::prompts::{self, InteractiveTokenSource};
use crate::config::{Config, default_config_path};
use crate::context::AppContext;
use crate::domain::card::card_id_from_input;
use crate::error::{AppError, AppResult};
use crate::infra::bugzilla::BugzillaClient;
use crate::infra::trello::TrelloClient;
use crate::services::{BoardService, BugTrackerService, TokenSource};
use crate::workflow::file_bug::file_bug_from_card;

#[derive(Debug, Clone)]
pub struct FileCommandArgs {
    pub card_id_or_url: String,
    pub config_path: Option<PathBuf>,
}

pub async fn run(args: FileCommandArgs) -> AppResult<()> {
    let card_id = card_id_from_input(&args.card_id_or_url)?;
    let config_path = args.config_path.unwrap_or_else(default_config_path);

    let mut config = Config::load(&config_path)?;
    let mut dirty = prompts::fill_missing_fields(&mut config)?;

    let trello_api_key = config.trello_api_key.clone().ok_or_else(|| {
        AppError::Configuration("Trello API key not configured".to_string())
    })?;
    let trello_token = config.trello_oauth_token.clone().ok_or_else(|| {
        AppError::Configuration("Trello OAuth token not configured".to_string())
    })?;

    let board: Arc<dyn BoardService> =
        Arc::new(TrelloClient::new(trello_api_key.clone(), trello_token));
    let tracker: Arc<dyn BugTrackerService> = Arc::new(BugzillaClient::from_config(&config)?);
    let token_source: Arc<dyn TokenSource> = Arc::new(InteractiveTokenSource::new(trello_api_key));
    let ctx = AppContext::new(board, tracker, token_source);

    let mut renewed_token = None;
    let result = file_bug_from_card(&ctx, &card_id, &mut renewed_token).await;

    // One scoped write per run, covering prompted fields and any renewed
    // token, even when filing failed after a renewal.
    if let Some(token) = renewed_token {
        config.trello_oauth_token = Some(token);
        dirty = true;
    }
    if dirty {
        println!("Saving changes to {}.", config_path.display());
        config.save(&config_path)?;
        println!();
    }

    let outcome = result?;

    println!("Bug {} <{}> filed:", outcome.bug.id, outcome.bug.url);
    println!("    {}", outcome.bug.summary);
    println!("Card {} updated.", outcome.card_short_url);

    Ok(())
}
