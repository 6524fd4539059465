use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use steward_application::PushNotificationSender;
use steward_core::{AppError, AppResult};
use steward_domain::PushMessage;
use tracing::info;
use url::Url;

/// Connection settings for an FCM HTTP v1 compatible endpoint.
#[derive(Debug, Clone)]
pub struct HttpPushConfig {
    /// Base URL of the messaging API, e.g. `https://fcm.googleapis.com`.
    pub base_url: String,
    /// Project the messages are sent on behalf of.
    pub project_id: String,
    /// OAuth2 bearer token authorized for message sends.
    pub access_token: String,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    message: OutgoingMessage<'a>,
}

#[derive(Debug, Serialize)]
struct OutgoingMessage<'a> {
    token: &'a str,
    notification: OutgoingNotification<'a>,
    data: BTreeMap<&'a str, String>,
}

#[derive(Debug, Serialize)]
struct OutgoingNotification<'a> {
    title: &'a str,
    body: &'a str,
}

/// HTTP-based push sender speaking the FCM v1 `messages:send` protocol.
pub struct HttpPushNotificationSender {
    http_client: reqwest::Client,
    endpoint: Url,
    access_token: String,
}

impl HttpPushNotificationSender {
    /// Creates a sender for the configured project.
    pub fn new(http_client: reqwest::Client, config: HttpPushConfig) -> AppResult<Self> {
        let base_url = Url::parse(config.base_url.as_str()).map_err(|error| {
            AppError::Configuration(format!("invalid push base url '{}': {error}", config.base_url))
        })?;
        let endpoint = base_url
            .join(format!("v1/projects/{}/messages:send", config.project_id).as_str())
            .map_err(|error| {
                AppError::Configuration(format!("invalid push project id: {error}"))
            })?;

        Ok(Self {
            http_client,
            endpoint,
            access_token: config.access_token,
        })
    }

    fn request_body(message: &PushMessage) -> SendRequest<'_> {
        // The v1 API only accepts string data values.
        let data = message
            .data
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(value) => value.clone(),
                    other => other.to_string(),
                };
                (key.as_str(), value)
            })
            .collect();

        SendRequest {
            message: OutgoingMessage {
                token: message.token.as_str(),
                notification: OutgoingNotification {
                    title: message.title.as_str(),
                    body: message.body.as_str(),
                },
                data,
            },
        }
    }
}

#[async_trait]
impl PushNotificationSender for HttpPushNotificationSender {
    async fn send(&self, message: PushMessage) -> AppResult<()> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .bearer_auth(self.access_token.as_str())
            .json(&Self::request_body(&message))
            .send()
            .await
            .map_err(|error| {
                AppError::Infrastructure(format!("push dispatch transport error: {error}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<response body unavailable>".to_owned());
            return Err(AppError::Infrastructure(format!(
                "push dispatch failed with status {status}: {body}"
            )));
        }

        info!(endpoint = %self.endpoint, "push notification dispatched");
        Ok(())
    }
}
