// https://api.slack.com/methods/chat.postMessage

pub mod models;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use crate::models::{PostMessageRequest, PostMessageResponse};

pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Clone)]
pub struct SlackOptions {
    pub bot_token: String,
    pub api_base: String,
}

impl SlackOptions {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Debug, Error)]
pub enum SlackError {
    #[error("Request to Slack failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Slack returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Slack API error: {0}")]
    Api(String),
}

#[derive(Debug, Clone)]
pub struct SlackService {
    options: SlackOptions,
    client: Client,
}

impl SlackService {
    pub fn new(options: SlackOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/{}", self.options.api_base.trim_end_matches('/'), method)
    }

    /// Post a Block Kit message to a channel. Returns the parsed response
    /// envelope, whose `ts` identifies the posted message.
    pub async fn post_message(
        &self,
        channel: &str,
        blocks: &[Value],
    ) -> Result<PostMessageResponse, SlackError> {
        let body = PostMessageRequest {
            channel,
            blocks,
            text: None,
        };

        let response = self
            .client
            .post(self.endpoint("chat.postMessage"))
            .bearer_auth(&self.options.bot_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let data = response.json::<PostMessageResponse>().await?;
        check_response(data)
    }
}

/// Slack reports most failures as HTTP 200 with `ok: false`.
pub fn check_response(response: PostMessageResponse) -> Result<PostMessageResponse, SlackError> {
    if response.ok {
        Ok(response)
    } else {
        Err(SlackError::Api(
            response
                .error
                .unwrap_or_else(|| "unknown_error".to_string()),
        ))
    }
}
