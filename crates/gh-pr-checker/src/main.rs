//! Stale pull request checker
//!
//! Scans an organization's repositories, keeps the ones wired to a chat
//! notification hook, and reports open pull requests older than the
//! configured threshold, oldest first.

mod args;
mod sink;

use anyhow::{bail, Context, Result};
use args::Args;
use chrono::Utc;
use clap::Parser;
use gh_client::{GitHubClient, OctocrabClient};
use gh_stale_scan::{run_scan, ScanConfig};
use hipchat_client::{HipChatClient, NotificationSink};
use log::{info, warn};
use octocrab::Octocrab;
use sink::StdoutSink;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    info!("Starting gh-pr-checker");

    // An empty room name means "any room", same as omitting the flag.
    let room = args.room.clone().filter(|room| !room.is_empty());

    let sink: Arc<dyn NotificationSink> = match (&room, &args.hipchat_api_token) {
        (Some(_), Some(token)) => Arc::new(HipChatClient::new(token)?),
        (Some(_), None) => bail!("--hipchat-api-token is required when --room is set"),
        (None, _) => Arc::new(StdoutSink),
    };

    // Separate clients so repository/PR listing and hook listing spend
    // their own API quotas.
    let repo_client: Arc<dyn GitHubClient> =
        Arc::new(OctocrabClient::new(Arc::new(build_octocrab(
            &args.repo_api_token,
        )?)));
    let hook_client: Arc<dyn GitHubClient> =
        Arc::new(OctocrabClient::new(Arc::new(build_octocrab(
            &args.hook_api_token,
        )?)));

    let mut config = ScanConfig::new(args.org.clone());
    config.room = room;
    config.stale_after_days = args.days;
    config.concurrency = args.concurrency;

    let report = run_scan(
        Arc::clone(&repo_client),
        Arc::clone(&hook_client),
        sink,
        config,
    )
    .await;

    info!(
        "Run complete: {} repositories discovered, {} confirmed, {} stale, {} notified, {} delivery failures",
        report.repositories_discovered,
        report.repositories_confirmed,
        report.stale_total,
        report.notifications_sent,
        report.notifications_failed
    );

    report_rate_limit("repository API", repo_client.as_ref()).await;
    report_rate_limit("hook API", hook_client.as_ref()).await;

    if let Some(fatal) = report.fatal {
        return Err(fatal.into());
    }

    info!("Exiting gh-pr-checker");
    Ok(())
}

fn build_octocrab(token: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .context("Failed to build Octocrab client")
}

/// Log the remaining API quota for one client.
async fn report_rate_limit(label: &str, client: &dyn GitHubClient) {
    match client.rate_limit().await {
        Ok(rate) => {
            let until_reset = rate.reset - Utc::now();
            let mins = until_reset.num_minutes().max(0);
            let secs = (until_reset.num_seconds() - mins * 60).max(0);
            info!(
                "{} rate limit: {}/{} remaining for {}m {}s",
                label, rate.remaining, rate.limit, mins, secs
            );
        }
        Err(err) => warn!("Failed to fetch {} rate limit: {:#}", label, err),
    }
}
