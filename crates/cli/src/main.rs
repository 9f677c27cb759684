//! slackhook CLI
//!
//! Posts a block-formatted message to one or more Slack incoming webhooks.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

/// slackhook — post notifications to Slack incoming webhooks.
#[derive(Parser, Debug)]
#[command(name = "slackhook", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a message and post it to every configured webhook.
    Post(commands::post::PostArgs),
    /// Print the JSON payload for a message without sending it.
    Render(commands::MessageArgs),
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Post(args) => commands::post::run(&args),
        Command::Render(args) => commands::render::run(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_post_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "slackhook",
            "post",
            "--webhook",
            "https://hooks.example.com/a",
            "--webhook",
            "https://hooks.example.com/b",
            "--description",
            "CPU high",
            "--context",
            "Env=prod",
            "--context",
            "Project=web",
        ])
        .unwrap();

        let Command::Post(args) = cli.command else {
            panic!("expected post subcommand");
        };
        assert_eq!(args.webhooks.len(), 2);
        assert_eq!(args.message.description, "CPU high");
        assert_eq!(args.message.context.len(), 2);
    }

    #[test]
    fn rejects_malformed_context() {
        let err = Cli::try_parse_from([
            "slackhook",
            "render",
            "--description",
            "d",
            "--context",
            "no-equals-sign",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("KEY=VALUE"));
    }
}
