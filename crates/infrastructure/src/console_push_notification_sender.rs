//! Console push sender for development. Logs messages to tracing output.

use async_trait::async_trait;
use steward_application::PushNotificationSender;
use steward_core::AppResult;
use steward_domain::PushMessage;
use tracing::info;

/// Development push sender that logs messages to the console.
#[derive(Clone)]
pub struct ConsolePushNotificationSender;

impl ConsolePushNotificationSender {
    /// Creates a new console push sender.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsolePushNotificationSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PushNotificationSender for ConsolePushNotificationSender {
    async fn send(&self, message: PushMessage) -> AppResult<()> {
        info!(
            token = %redacted_token(message.token.as_str()),
            title = %message.title,
            "--- PUSH (console) ---\nTitle: {}\nBody: {}\nData: {}\n--- END PUSH ---",
            message.title,
            message.body,
            serde_json::Value::Object(message.data.clone())
        );

        Ok(())
    }
}

/// Keeps only the last four characters of a device token for log output.
fn redacted_token(token: &str) -> String {
    let visible: String = token
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if visible.chars().count() == token.chars().count() {
        return "***".to_owned();
    }

    format!("***{visible}")
}
