//! Slack incoming-webhook notifications.
//!
//! Builds a fixed block layout from a handful of fields and posts it to one
//! or more [Slack incoming webhooks](https://api.slack.com/messaging/webhooks).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use slackhook::{PostMessage, PostMessageParams, SlackClient, SlackConfig};
//!
//! let config = SlackConfig::new(["https://hooks.slack.com/services/T000/B000/XXXX"]);
//! let client = SlackClient::new(config)?;
//!
//! let params = PostMessageParams::new("This is the description field")
//!     .with_context("Account", "123456789")
//!     .with_icon("https://example.com/icons/application_drupal.png")
//!     .with_dashboard("https://dashboard.example.com");
//!
//! client.post_message(&params)?;
//! # Ok::<(), slackhook::SlackError>(())
//! ```
//!
//! Code that only needs to send messages should depend on the
//! [`PostMessage`] trait, so tests can substitute a [`MockClient`].

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod types;

pub use client::{MockClient, PostMessage, SlackClient};
pub use config::SlackConfig;
pub use error::{SlackError, ValidationError};
pub use params::PostMessageParams;
pub use types::{Accessory, Block, ContextElement, Message, SectionText};
