use std::path::PathBuf;

use clap::Args;
use slackhook::{PostMessage, SlackClient};
use tracing::info;

use super::{MessageArgs, render_payload};
use crate::config;

#[derive(Args, Debug)]
pub struct PostArgs {
    /// Incoming webhook URL. Repeat to post to several channels.
    #[arg(long = "webhook", env = "SLACKHOOK_WEBHOOKS", value_delimiter = ',')]
    pub webhooks: Vec<String>,
    /// TOML file with a `webhooks` list. Its entries are posted to first.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Print the payload instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
    #[command(flatten)]
    pub message: MessageArgs,
}

pub fn run(args: &PostArgs) -> anyhow::Result<()> {
    if args.dry_run {
        println!("{}", render_payload(&args.message)?);
        return Ok(());
    }

    let params = args.message.to_params();

    let config = config::resolve(args.config.as_deref(), &args.webhooks)?;
    if config.webhooks.is_empty() {
        anyhow::bail!("no webhooks configured: pass --webhook, --config or set SLACKHOOK_WEBHOOKS");
    }

    let count = config.webhooks.len();
    let client = SlackClient::new(config)?;
    client.post_message(&params)?;

    info!(webhooks = count, "message posted");
    Ok(())
}
