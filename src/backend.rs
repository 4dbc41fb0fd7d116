//! HTTP client for the chat backend (POST /ask).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AskError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("malformed response: {0}")]
    MalformedPayload(String),
}

/// Form body of POST /ask.
#[derive(Debug, Serialize)]
struct AskForm<'a> {
    user_message: &'a str,
}

/// Success payload; other fields are ignored.
#[derive(Debug, Deserialize)]
struct AskReply {
    bot_response: Option<String>,
}

/// Failure payload the server sends with 4xx/5xx.
#[derive(Debug, Deserialize)]
struct AskFailure {
    error: String,
}

/// Anything that can answer a user message.
#[async_trait]
pub trait AskEndpoint: Send + Sync {
    async fn ask(&self, message: &str) -> Result<String, AskError>;
}

pub struct AskClient {
    url: Url,
    client: reqwest::Client,
}

impl AskClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, AskError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn build_request(&self, message: &str) -> Result<reqwest::Request, AskError> {
        let request = self
            .client
            .post(self.url.clone())
            .form(&AskForm { user_message: message })
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl AskEndpoint for AskClient {
    async fn ask(&self, message: &str) -> Result<String, AskError> {
        let request = self.build_request(message)?;
        tracing::debug!(url = %self.url, bytes = message.len(), "POST /ask");
        let resp = self.client.execute(request).await?;
        let status = resp.status();
        let body = resp.text().await?;
        parse_reply(status, &body)
    }
}

/// Map a raw /ask response to the bot text or a typed error.
pub fn parse_reply(status: StatusCode, body: &str) -> Result<String, AskError> {
    if !status.is_success() {
        let message = serde_json::from_str::<AskFailure>(body)
            .map(|f| f.error)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(AskError::Status { status, message });
    }
    let reply: AskReply = serde_json::from_str(body)
        .map_err(|e| AskError::MalformedPayload(e.to_string()))?;
    reply
        .bot_response
        .ok_or_else(|| AskError::MalformedPayload("missing bot_response".into()))
}
