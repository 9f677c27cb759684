pub mod post;
pub mod render;

use clap::Args;
use slackhook::PostMessageParams;

/// Message fields shared by every subcommand.
#[derive(Args, Debug)]
pub struct MessageArgs {
    /// Main body of the message (Slack markdown).
    #[arg(long)]
    pub description: String,
    /// Context labels (KEY=VALUE), shown above the description.
    #[arg(long, value_parser = parse_key_val)]
    pub context: Vec<(String, String)>,
    /// Dashboard link offered under "Next Steps".
    #[arg(long)]
    pub dashboard: Option<String>,
    /// Documentation link offered under "Next Steps".
    #[arg(long)]
    pub documentation: Option<String>,
    /// Image URL shown beside the description.
    #[arg(long)]
    pub icon: Option<String>,
}

impl MessageArgs {
    pub fn to_params(&self) -> PostMessageParams {
        PostMessageParams {
            context: self.context.iter().cloned().collect(),
            description: self.description.clone(),
            dashboard: self.dashboard.clone(),
            documentation: self.documentation.clone(),
            icon: self.icon.clone(),
        }
    }
}

/// Build the message and render it as pretty-printed JSON.
pub fn render_payload(args: &MessageArgs) -> anyhow::Result<String> {
    let message = args.to_params().build()?;
    Ok(serde_json::to_string_pretty(&message)?)
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;
    Ok((key.to_owned(), value.to_owned()))
}
