//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab
//! library. Hooks and the rate limit have no typed octocrab endpoint, so
//! those are fetched as raw GET routes and deserialized locally.

use crate::client::GitHubClient;
use crate::types::{HookConfig, PullRequest, RateLimit, RepoPage, Repository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use octocrab::Octocrab;
use serde::Deserialize;
use std::sync::Arc;

const PER_PAGE: u8 = 100;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn list_repositories(&self, org: &str, page: u32) -> anyhow::Result<RepoPage> {
        debug!("Fetching repository page {} for org {}", page, org);

        let listing = self
            .octocrab
            .orgs(org)
            .list_repos()
            .per_page(PER_PAGE)
            .page(page)
            .send()
            .await?;

        let next_page = listing.next.is_some().then(|| page + 1);
        let repositories = listing
            .items
            .iter()
            .map(|repo| convert_repository(org, repo))
            .collect();

        Ok(RepoPage {
            repositories,
            next_page,
        })
    }

    async fn list_hooks(&self, owner: &str, repo: &str) -> anyhow::Result<Vec<HookConfig>> {
        debug!("Fetching hooks for {}/{}", owner, repo);

        // Raw GET: octocrab has no typed endpoint for repository hooks
        let route = format!("/repos/{}/{}/hooks", owner, repo);
        let hooks: Vec<HookPayload> = self.octocrab.get(route, None::<&()>).await?;

        Ok(hooks.into_iter().map(convert_hook).collect())
    }

    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> anyhow::Result<Vec<PullRequest>> {
        debug!("Fetching open PRs for {}/{}", owner, repo);

        let mut prs = Vec::new();
        let mut page_num = 1u32;

        loop {
            let page = self
                .octocrab
                .pulls(owner, repo)
                .list()
                .state(octocrab::params::State::Open)
                .per_page(PER_PAGE)
                .page(page_num)
                .send()
                .await?;

            if page.items.is_empty() {
                break;
            }

            prs.extend(page.items.iter().map(convert_pull_request));

            if page.next.is_none() {
                break;
            }
            page_num += 1;
        }

        debug!("Fetched {} open PRs for {}/{}", prs.len(), owner, repo);
        Ok(prs)
    }

    async fn rate_limit(&self) -> anyhow::Result<RateLimit> {
        // Raw GET: keeps the response shape under our control
        let payload: RateLimitPayload = self.octocrab.get("/rate_limit", None::<&()>).await?;

        Ok(RateLimit {
            limit: payload.rate.limit,
            remaining: payload.rate.remaining,
            reset: DateTime::from_timestamp(payload.rate.reset, 0).unwrap_or_else(Utc::now),
        })
    }
}

/// Wire shape of a repository hook, as returned by the hooks route
#[derive(Debug, Deserialize)]
struct HookPayload {
    name: String,
    #[serde(default)]
    config: HookConfigPayload,
}

#[derive(Debug, Default, Deserialize)]
struct HookConfigPayload {
    room: Option<String>,
}

/// Wire shape of the rate limit route
#[derive(Debug, Deserialize)]
struct RateLimitPayload {
    rate: RatePayload,
}

#[derive(Debug, Deserialize)]
struct RatePayload {
    limit: u64,
    remaining: u64,
    reset: i64,
}

/// Convert an octocrab repository to our Repository type
fn convert_repository(org: &str, repo: &octocrab::models::Repository) -> Repository {
    Repository {
        owner: repo
            .owner
            .as_ref()
            .map(|u| u.login.clone())
            .unwrap_or_else(|| org.to_string()),
        name: repo.name.clone(),
    }
}

/// Convert an octocrab pull request to our PullRequest type
fn convert_pull_request(pr: &octocrab::models::pulls::PullRequest) -> PullRequest {
    PullRequest {
        number: pr.number,
        title: pr.title.clone().unwrap_or_default(),
        created_at: pr.created_at.unwrap_or_else(Utc::now),
        html_url: pr
            .html_url
            .as_ref()
            .map(|u| u.to_string())
            .unwrap_or_default(),
    }
}

fn convert_hook(hook: HookPayload) -> HookConfig {
    HookConfig {
        kind: hook.name,
        room: hook.config.room,
    }
}
