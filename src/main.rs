use anyhow::{Context, Result, bail};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use teams_notify::{
    ActionInputs, CommitInfo, EventContext, EventKind, GitCommand, RenderConfig, StdEnvProvider,
    WebhookClient, build_card_payload, load_users,
};

/// Send a Microsoft Teams adaptive-card notification for the current
/// GitHub Actions event.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print the rendered payload instead of posting it
    #[arg(long)]
    dry_run: bool,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Off) // Turn off all logs by default
        .filter(Some("teams_notify"), cli.verbose.log_level_filter())
        .init();

    let env = StdEnvProvider;
    let inputs = ActionInputs::from_env(&env);
    let ctx = EventContext::from_env(&env)?;
    log::debug!("inputs: {inputs:?}");
    log::debug!("event context: {ctx:?}");

    let config = match &inputs.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::standard(),
    };

    let commit = match ctx.kind {
        EventKind::Issues => None,
        _ => Some(CommitInfo::collect(&ctx, &GitCommand)?),
    };
    log::debug!("commit info: {commit:?}");

    if let Some(commit) = &commit {
        if config.should_skip(&commit.message) {
            log::info!("commit message matches an ignore keyword, skipping notification");
            return Ok(());
        }
    }

    let users = match &inputs.users {
        Some(path) => load_users(path)?,
        None => Vec::new(),
    };

    let payload = build_card_payload(&config, &ctx, commit.as_ref(), &inputs, &users)?;
    log::debug!("payload: {payload}");

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let Some(webhook_url) = inputs.webhook_url.as_deref() else {
        bail!("the webhook-url input is required");
    };
    WebhookClient::new()
        .post(webhook_url, &payload)
        .context("failed to deliver notification")?;
    log::info!("notification sent");

    Ok(())
}
