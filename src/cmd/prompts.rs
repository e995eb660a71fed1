use std::io::{self, Write};

use async_trait::async_trait;

use crate::config::{Config, Field};
use crate::error::{AppError, AppResult};
use crate::infra::trello::TrelloClient;
use crate::services::TokenSource;

/// Prompt for every absent required field. Returns whether anything was
/// filled in, so the caller knows the config needs to be written back.
pub fn fill_missing_fields(config: &mut Config) -> AppResult<bool> {
    let missing = config.missing_fields();
    if missing.is_empty() {
        return Ok(false);
    }

    for field in missing {
        let value = match field {
            Field::TrelloOauthToken => {
                // The Trello API key is always filled before the token:
                // missing_fields lists it first and the authorize URL
                // needs it.
                let api_key = config.trello_api_key.clone().ok_or_else(|| {
                    AppError::Configuration("Trello API key not configured".to_string())
                })?;
                println!("Trello OAuth token not found.");
                prompt_for_generated_token(&api_key)?
            }
            _ => {
                println!("{} not found.", field_description(field));
                println!("{}", field_instructions(field));
                prompt_until_value(&format!(
                    "You can enter one here, or use ctrl-C to quit and add it manually \
                     to your config file as \"[{}]{}\":",
                    field.section(),
                    field.key(),
                ))?
            }
        };
        config.set_field(field, value);
    }

    Ok(true)
}

/// Interactive renewal used when the board rejects the stored token
/// mid-run.
pub struct InteractiveTokenSource {
    api_key: String,
}

impl InteractiveTokenSource {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }
}

#[async_trait]
impl TokenSource for InteractiveTokenSource {
    async fn obtain_token(&self) -> AppResult<String> {
        println!("Trello OAuth token invalid or expired.");
        prompt_for_generated_token(&self.api_key)
    }
}

fn prompt_for_generated_token(api_key: &str) -> AppResult<String> {
    println!("Visit the following URL, grant access, and paste the token it shows you:");
    println!("    {}", TrelloClient::authorize_url(api_key));
    let token = prompt_until_value("Token:")?;
    println!(
        "Token saved. It will expire in 30 days, after which this tool will \
         prompt for a new one."
    );
    Ok(token)
}

fn prompt_until_value(prompt: &str) -> AppResult<String> {
    loop {
        println!();
        println!("{prompt}");
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().read_line(&mut input)?;
        if read == 0 {
            return Err(AppError::Configuration(
                "input closed before a value was entered".to_string(),
            ));
        }

        let trimmed = input.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }
}

fn field_description(field: Field) -> &'static str {
    match field {
        Field::BugzillaApiKey => "Bugzilla API key",
        Field::TrelloApiKey => "Trello API key",
        Field::TrelloApiSecret => "Trello API secret",
        Field::TrelloOauthToken => "Trello OAuth token",
    }
}

fn field_instructions(field: Field) -> &'static str {
    match field {
        Field::BugzillaApiKey => {
            "Please visit https://bugzilla.mozilla.org/userprefs.cgi?tab=apikey to see \
             your existing API keys or to generate a new one."
        }
        Field::TrelloApiKey => {
            "You can see your API key at https://trello.com/app-key in the top box."
        }
        Field::TrelloApiSecret => {
            "You can see your API secret at https://trello.com/app-key at the bottom \
             under \"OAuth\"."
        }
        Field::TrelloOauthToken => "",
    }
}
