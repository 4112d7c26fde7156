use std::time::Duration;

use serde_json::Value;

/// Posts the rendered payload to the incoming webhook.
///
/// One request, no retries; a transport failure or non-success status is
/// surfaced to the caller as a [`WebhookError`].
pub struct WebhookClient {
    agent: ureq::Agent,
}

impl WebhookClient {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(30))
                .timeout_read(Duration::from_secs(60))
                .build(),
        }
    }

    pub fn post(&self, webhook_url: &str, payload: &Value) -> Result<(), WebhookError> {
        log::debug!("posting notification to webhook");
        let response = self
            .agent
            .post(webhook_url)
            .set("Content-Type", "application/json")
            .send_json(payload)
            .map_err(Box::new)?;
        log::debug!("webhook responded with status {}", response.status());
        Ok(())
    }
}

impl Default for WebhookClient {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("webhook request failed: {0}")]
    Ureq(#[from] Box<ureq::Error>),
}
