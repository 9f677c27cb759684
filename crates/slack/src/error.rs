use thiserror::Error;

/// Every rule a [`PostMessageParams`](crate::PostMessageParams) violated.
///
/// Rules are collected rather than short-circuited, so callers see all
/// problems at once. Displayed one message per line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .errors.join("\n"))]
pub struct ValidationError {
    errors: Vec<String>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violated rule.
    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages for each violated rule, in the order they were checked.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Errors returned while building or delivering a Slack message.
///
/// Webhook URLs embed their secret in the path, so every variant that names
/// an endpoint carries the redacted form produced by [`redact_webhook`].
#[derive(Debug, Error)]
pub enum SlackError {
    /// The message parameters failed validation. No request was sent.
    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] ValidationError),

    /// The webhook configuration is unusable.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The message could not be encoded as JSON.
    #[error("failed to serialize message: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The endpoint could not be reached.
    #[error("failed to reach {webhook}: {source}")]
    Transport {
        webhook: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered but its response body could not be read.
    #[error("failed to read response from {webhook}: {source}")]
    ReadBody {
        webhook: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with something other than HTTP 200.
    #[error("{webhook} returned status code: {status}")]
    UnexpectedStatus { webhook: String, status: u16 },
}

impl SlackError {
    /// The HTTP status code, for [`SlackError::UnexpectedStatus`].
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the caller's input was rejected before any I/O.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidParams(_))
    }

    /// Returns `true` if an endpoint could not be reached.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Reduce a webhook URL to `scheme://host[:port]` so it is safe to log.
pub fn redact_webhook(url: &str) -> String {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return "[REDACTED]".to_owned();
    };
    match (parsed.host_str(), parsed.port()) {
        (Some(host), Some(port)) => format!("{}://{host}:{port}/[REDACTED]", parsed.scheme()),
        (Some(host), None) => format!("{}://{host}/[REDACTED]", parsed.scheme()),
        (None, _) => "[REDACTED]".to_owned(),
    }
}
