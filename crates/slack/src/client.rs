use std::sync::Mutex;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument, warn};

use crate::config::SlackConfig;
use crate::error::{SlackError, redact_webhook};
use crate::params::PostMessageParams;
use crate::types::Message;

/// Anything that can post a message built from [`PostMessageParams`].
///
/// Implemented by [`SlackClient`] for real delivery and by [`MockClient`]
/// for tests that must not touch the network.
pub trait PostMessage {
    fn post_message(&self, params: &PostMessageParams) -> Result<(), SlackError>;
}

/// Posts block messages to a fixed, ordered list of Slack incoming webhooks.
///
/// Delivery is sequential and blocking. The first webhook that cannot be
/// reached, cannot be read, or does not answer `200 OK` aborts the call;
/// later webhooks are not attempted and earlier ones are not undone.
pub struct SlackClient {
    webhooks: Vec<String>,
    client: Client,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted: Vec<String> = self.webhooks.iter().map(|w| redact_webhook(w)).collect();
        f.debug_struct("SlackClient")
            .field("webhooks", &redacted)
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a client for the configured webhooks.
    ///
    /// Uses a default blocking `reqwest` client.
    pub fn new(config: SlackConfig) -> Result<Self, SlackError> {
        Self::with_client(config, Client::new())
    }

    /// Create a client with a custom HTTP client.
    ///
    /// Useful for testing or for sharing a connection pool.
    pub fn with_client(config: SlackConfig, client: Client) -> Result<Self, SlackError> {
        config.validate()?;
        Ok(Self {
            webhooks: config.webhooks,
            client,
        })
    }

    /// The webhooks this client posts to, in delivery order.
    pub fn webhooks(&self) -> &[String] {
        &self.webhooks
    }

    /// Serialize `message` once and post it to every webhook in order.
    #[instrument(skip_all, fields(webhooks = self.webhooks.len(), blocks = message.blocks.len()))]
    pub fn deliver(&self, message: &Message) -> Result<(), SlackError> {
        let body = serde_json::to_vec(message)?;

        for webhook in &self.webhooks {
            self.post_to(webhook, &body)?;
        }

        debug!("message delivered to all webhooks");
        Ok(())
    }

    fn post_to(&self, webhook: &str, body: &[u8]) -> Result<(), SlackError> {
        let redacted = redact_webhook(webhook);
        debug!(webhook = %redacted, "posting message to Slack");

        let response = self
            .client
            .post(webhook)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec())
            .send()
            .map_err(|source| {
                // reqwest errors carry the full request URL, secret included.
                let source = source.without_url();
                warn!(webhook = %redacted, error = %source, "Slack webhook unreachable");
                SlackError::Transport {
                    webhook: redacted.clone(),
                    source,
                }
            })?;

        let status = response.status();

        // Drain the body before judging the status so a broken connection
        // is reported as such.
        let text = response.text().map_err(|source| {
            let source = source.without_url();
            warn!(webhook = %redacted, error = %source, "failed to read Slack webhook response");
            SlackError::ReadBody {
                webhook: redacted.clone(),
                source,
            }
        })?;

        if status != StatusCode::OK {
            warn!(webhook = %redacted, status = status.as_u16(), body = %text, "Slack webhook rejected message");
            return Err(SlackError::UnexpectedStatus {
                webhook: redacted,
                status: status.as_u16(),
            });
        }

        Ok(())
    }
}

impl PostMessage for SlackClient {
    fn post_message(&self, params: &PostMessageParams) -> Result<(), SlackError> {
        let message = params.build()?;
        self.deliver(&message)
    }
}

/// A [`PostMessage`] implementation that records what it was asked to send.
///
/// Never performs I/O and always succeeds.
#[derive(Debug, Default)]
pub struct MockClient {
    state: Mutex<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    last: Option<PostMessageParams>,
    calls: usize,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters of the most recent call, if any.
    pub fn last_params(&self) -> Option<PostMessageParams> {
        self.lock().last.clone()
    }

    /// Number of times `post_message` has been called.
    pub fn calls(&self) -> usize {
        self.lock().calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A panic while holding the lock cannot leave MockState inconsistent.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl PostMessage for MockClient {
    fn post_message(&self, params: &PostMessageParams) -> Result<(), SlackError> {
        let mut state = self.lock();
        state.last = Some(params.clone());
        state.calls += 1;
        Ok(())
    }
}
