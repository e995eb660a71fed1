use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::card::Card;
use crate::error::{AppError, AppResult};
use crate::services::BoardService;

const CARD_API_BASE: &str = "https://api.trello.com/1/cards";
const AUTHORIZE_URL: &str = "https://trello.com/1/authorize";
const TOKEN_APP_NAME: &str = "trello-to-bug";

/// Trello REST client. Requests authenticate with `key` and `token` query
/// parameters; the token slot is swappable because an expired token can be
/// renewed mid-run.
pub struct TrelloClient {
    http: Client,
    api_key: String,
    token: RwLock<String>,
}

impl TrelloClient {
    pub fn new(api_key: String, token: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            token: RwLock::new(token),
        }
    }

    /// The page where the operator grants this tool a 30-day read/write
    /// token to paste back into the CLI.
    pub fn authorize_url(api_key: &str) -> String {
        format!(
            "{AUTHORIZE_URL}?key={api_key}&name={TOKEN_APP_NAME}\
             &expiration=30days&scope=read,write&response_type=token"
        )
    }

    fn token(&self) -> String {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn card_endpoint(card_id: &str) -> String {
        format!("{CARD_API_BASE}/{card_id}")
    }
}

#[async_trait]
impl BoardService for TrelloClient {
    async fn get_card(&self, card_id: &str) -> AppResult<Card> {
        let token = self.token();
        let response = self
            .http
            .get(Self::card_endpoint(card_id))
            .query(&[
                ("key", self.api_key.as_str()),
                ("token", token.as_str()),
                ("fields", "name,desc,shortUrl"),
            ])
            .send()
            .await
            .map_err(|err| AppError::Board(format!("failed to call Trello: {err}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::BoardUnauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Board(format!(
                "Trello responded with {status}: {body}"
            )));
        }

        let payload: TrelloCardResponse = response.json().await.map_err(|err| {
            AppError::Board(format!("failed to parse Trello card response: {err}"))
        })?;

        Ok(Card {
            id: payload.id,
            name: payload.name,
            description: payload.desc,
            short_url: payload.short_url,
        })
    }

    async fn set_card_description(&self, card_id: &str, description: &str) -> AppResult<()> {
        let token = self.token();
        let response = self
            .http
            .put(format!("{}/desc", Self::card_endpoint(card_id)))
            .query(&[("key", self.api_key.as_str()), ("token", token.as_str())])
            .form(&[("value", description)])
            .send()
            .await
            .map_err(|err| AppError::Board(format!("failed to call Trello: {err}")))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::BoardUnauthorized);
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Board(format!(
                "Trello responded with {status}: {body}"
            )));
        }

        Ok(())
    }

    fn install_token(&self, token: &str) {
        let mut slot = self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = token.to_string();
    }
}

#[derive(Deserialize)]
struct TrelloCardResponse {
    id: String,
    name: String,
    #[serde(default)]
    desc: String,
    #[serde(rename = "shortUrl")]
    short_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_url_carries_key_and_scope() {
        let url = TrelloClient::authorize_url("abc123");
        assert!(url.starts_with("https://trello.com/1/authorize?key=abc123"));
        assert!(url.contains("scope=read,write"));
        assert!(url.contains("expiration=30days"));
    }

    #[test]
    fn installed_token_replaces_the_old_one() {
        let client = TrelloClient::new("key".to_string(), "old".to_string());
        client.install_token("new");
        assert_eq!(client.token(), "new");
    }
}
