//! # Send API Client
//!
//! Delivers replies to the platform's Send API. Authentication is the page
//! access token passed as the `access_token` query parameter.

use super::outgoing_schemas::{OutgoingMessage, SendApiResponse};
use crate::config::AppConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends one reply.
    ///
    /// Transport failures are errors. A non-200 answer is logged and yields
    /// `Ok(None)`; a 200 with a parsable body yields the parsed response.
    async fn send_message(&self, message: &OutgoingMessage) -> Result<Option<SendApiResponse>>;
}

pub type ImplMessageSender = Arc<dyn MessageSender>;

/// Send API client backed by reqwest
pub struct GraphApiClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// Send API endpoint
    endpoint: String,
    /// Page access token
    page_access_token: String,
}

impl GraphApiClient {
    pub fn new(app_config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: app_config.send_msg_endpoint(),
            page_access_token: app_config.page_access_token.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MessageSender for GraphApiClient {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<Option<SendApiResponse>> {
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("access_token", &self.page_access_token)])
            .header("Content-Type", "application/json")
            .json(message)
            .send()
            .await
            // the url carries the access token
            .map_err(reqwest::Error::without_url)
            .context("Failed to send request to Send API")?;

        let status = response.status();
        info!(
            "Response status: {status}, header: {headers:?}",
            headers = response.headers()
        );

        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .context("Failed to read Send API response body")?;
        info!("Response body: {body}");

        if status != reqwest::StatusCode::OK {
            warn!(
                "Send API returned status {status} for recipient {recipient}",
                recipient = message.recipient_id()
            );
            return Ok(None);
        }

        match serde_json::from_str::<SendApiResponse>(&body) {
            Ok(send_response) => {
                info!(
                    "Successfully sent message with id {message_id} to recipient {recipient_id}",
                    message_id = send_response.message_id.as_deref().unwrap_or_default(),
                    recipient_id = send_response.recipient_id.as_deref().unwrap_or_default(),
                );
                Ok(Some(send_response))
            }
            Err(_) => Ok(None),
        }
    }
}
