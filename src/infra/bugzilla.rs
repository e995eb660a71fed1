use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::bug::{BugDraft, FiledBug, bug_url};
use crate::error::{AppError, AppResult};
use crate::services::BugTrackerService;

/// Bugzilla REST client. One endpoint is used: `POST {base}/rest/bug`.
pub struct BugzillaClient {
    http: Client,
    base_url: String,
    api_key: String,
    product: String,
    component: String,
    version: String,
}

impl BugzillaClient {
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let api_key = config
            .bugzilla_api_key
            .clone()
            .ok_or_else(|| AppError::Configuration("Bugzilla API key not configured".to_string()))?;

        Ok(Self {
            http: Client::new(),
            base_url: config.bugzilla_url().trim_end_matches('/').to_string(),
            api_key,
            product: config.bugzilla_product().to_string(),
            component: config.bugzilla_component().to_string(),
            version: config.bugzilla_version().to_string(),
        })
    }

    fn bug_endpoint(&self) -> String {
        format!("{}/rest/bug", self.base_url)
    }
}

#[async_trait]
impl BugTrackerService for BugzillaClient {
    async fn file_bug(&self, draft: BugDraft) -> AppResult<FiledBug> {
        let request_body = BugzillaCreateRequest {
            api_key: &self.api_key,
            product: &self.product,
            component: &self.component,
            version: &self.version,
            summary: &draft.summary,
            description: &draft.description,
            url: &draft.card_url,
            op_sys: "Unspecified",
            platform: "Unspecified",
        };

        let response = self
            .http
            .post(self.bug_endpoint())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::Tracker(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Tracker(error_from_body(&body)));
        }

        let payload: BugzillaCreateResponse = response.json().await.map_err(|err| {
            AppError::Tracker(format!("failed to parse Bugzilla response: {err}"))
        })?;

        Ok(FiledBug {
            id: payload.id,
            url: bug_url(&self.base_url, payload.id),
            summary: draft.summary,
        })
    }
}

/// Bugzilla error bodies usually carry a structured `{code, message}` pair;
/// fall back to the raw body when they don't.
fn error_from_body(body: &str) -> String {
    match serde_json::from_str::<BugzillaErrorBody>(body) {
        Ok(error) => format!("Error {}: {}", error.code, error.message),
        Err(_) => body.to_string(),
    }
}

#[derive(Serialize)]
struct BugzillaCreateRequest<'a> {
    api_key: &'a str,
    product: &'a str,
    component: &'a str,
    version: &'a str,
    summary: &'a str,
    description: &'a str,
    url: &'a str,
    op_sys: &'a str,
    platform: &'a str,
}

#[derive(Deserialize)]
struct BugzillaCreateResponse {
    id: u64,
}

#[derive(Deserialize)]
struct BugzillaErrorBody {
    code: i64,
    message: String,
}
