use std::path::Path;

use anyhow::Context;
use slackhook::SlackConfig;

/// Load webhook configuration from a TOML file.
pub fn load(path: &Path) -> anyhow::Result<SlackConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&content).with_context(|| format!("invalid config file {}", path.display()))
}

fn parse(content: &str) -> anyhow::Result<SlackConfig> {
    Ok(toml::from_str(content)?)
}

/// Combine webhooks from a config file with those given on the command line.
///
/// File entries come first, then command-line entries, each in their given
/// order.
pub fn resolve(file: Option<&Path>, extra: &[String]) -> anyhow::Result<SlackConfig> {
    let mut config = match file {
        Some(path) => load(path)?,
        None => SlackConfig::default(),
    };
    config.webhooks.extend(extra.iter().cloned());
    Ok(config)
}
