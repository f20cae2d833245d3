//! CLI argument parsing
//!
//! Defines the `Args` struct using clap derive. Every token can also come
//! from the environment, so the binary works from an `.env` file without
//! flags.

use clap::Parser;
use gh_stale_scan::config::{DEFAULT_CONCURRENCY, DEFAULT_STALE_AFTER_DAYS};

#[derive(Parser, Debug)]
#[command(name = "gh-pr-checker")]
#[command(about = "Notify a chat room about stale pull requests across an organization")]
pub struct Args {
    /// Organization whose repositories are scanned.
    #[arg(long, env = "GH_PR_CHECKER_ORG")]
    pub org: String,

    /// Chat room the notification hook must target. When omitted (or
    /// empty), any chat hook qualifies and notifications go to stdout.
    #[arg(long, env = "GH_PR_CHECKER_ROOM")]
    pub room: Option<String>,

    /// HipChat API token for room notifications. Required with --room.
    #[arg(long, env = "HIPCHAT_API_TOKEN")]
    pub hipchat_api_token: Option<String>,

    /// GitHub token used for repository and pull request listing.
    #[arg(long, env = "REPO_API_TOKEN")]
    pub repo_api_token: String,

    /// GitHub token used for hook listing.
    #[arg(long, env = "HOOK_API_TOKEN")]
    pub hook_api_token: String,

    /// Age threshold in days; open pull requests strictly older are reported.
    #[arg(long, default_value_t = DEFAULT_STALE_AFTER_DAYS)]
    pub days: i64,

    /// Maximum concurrent per-repository API calls per pipeline stage.
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "gh-pr-checker",
            "--org",
            "acme",
            "--repo-api-token",
            "t1",
            "--hook-api-token",
            "t2",
        ]
    }

    #[test]
    fn test_minimal_invocation_uses_defaults() {
        let args = Args::try_parse_from(base_args()).unwrap();
        assert_eq!(args.org, "acme");
        assert!(args.room.is_none());
        assert_eq!(args.days, DEFAULT_STALE_AFTER_DAYS);
        assert_eq!(args.concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn test_missing_org_is_rejected() {
        let result = Args::try_parse_from(vec![
            "gh-pr-checker",
            "--repo-api-token",
            "t1",
            "--hook-api-token",
            "t2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_room_and_days_override() {
        let mut argv = base_args();
        argv.extend(["--room", "ops", "--days", "7"]);
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.room.as_deref(), Some("ops"));
        assert_eq!(args.days, 7);
    }
}
