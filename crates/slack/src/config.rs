use serde::Deserialize;

use crate::error::{SlackError, redact_webhook};

/// Configuration for the Slack webhook client.
///
/// Can be loaded from TOML:
///
/// ```toml
/// webhooks = [
///     "https://hooks.slack.com/services/T000/B000/XXXX",
/// ]
/// ```
#[derive(Clone, Default, Deserialize)]
pub struct SlackConfig {
    /// Incoming webhook URLs. Messages are posted to each, in order.
    #[serde(default)]
    pub webhooks: Vec<String>,
}

impl std::fmt::Debug for SlackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted: Vec<String> = self.webhooks.iter().map(|w| redact_webhook(w)).collect();
        f.debug_struct("SlackConfig")
            .field("webhooks", &redacted)
            .finish()
    }
}

impl SlackConfig {
    /// Create a new configuration posting to the given webhooks.
    pub fn new<I, S>(webhooks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            webhooks: webhooks.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a webhook URL.
    #[must_use]
    pub fn with_webhook(mut self, url: impl Into<String>) -> Self {
        self.webhooks.push(url.into());
        self
    }

    /// Check that every webhook is an absolute `http` or `https` URL.
    ///
    /// An empty list is valid; delivering to it is a no-op.
    pub fn validate(&self) -> Result<(), SlackError> {
        let invalid: Vec<String> = self
            .webhooks
            .iter()
            .enumerate()
            .filter(|(_, url)| {
                !reqwest::Url::parse(url)
                    .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            })
            .map(|(idx, _)| format!("webhook #{idx} is not a valid http(s) URL"))
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(SlackError::Configuration(invalid.join("; ")))
        }
    }
}
