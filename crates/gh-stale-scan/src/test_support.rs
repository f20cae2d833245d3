//! Mock collaborators shared by the stage and pipeline tests

use async_trait::async_trait;
use chrono::{Duration, Utc};
use gh_client::{GitHubClient, HookConfig, PullRequest, RateLimit, RepoPage, Repository};
use hipchat_client::NotificationSink;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Scriptable in-memory GitHub client
#[derive(Debug, Default)]
pub struct MockGitHubClient {
    pages: Vec<Vec<Repository>>,
    fail_listing_on_page: Option<u32>,
    hooks: HashMap<String, Vec<HookConfig>>,
    hook_failures: HashSet<String>,
    prs: HashMap<String, Vec<PullRequest>>,
    pr_failures: HashSet<String>,
}

impl MockGitHubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one page of repositories to the listing.
    pub fn with_page(mut self, repos: Vec<Repository>) -> Self {
        self.pages.push(repos);
        self
    }

    /// Make the listing fail when the given 1-based page is requested.
    pub fn fail_listing_on_page(mut self, page: u32) -> Self {
        self.fail_listing_on_page = Some(page);
        self
    }

    pub fn with_hooks(mut self, repo: &Repository, hooks: Vec<HookConfig>) -> Self {
        self.hooks.insert(repo.full_name(), hooks);
        self
    }

    pub fn fail_hooks_for(mut self, repo: &Repository) -> Self {
        self.hook_failures.insert(repo.full_name());
        self
    }

    pub fn with_prs(mut self, repo: &Repository, prs: Vec<PullRequest>) -> Self {
        self.prs.insert(repo.full_name(), prs);
        self
    }

    pub fn fail_prs_for(mut self, repo: &Repository) -> Self {
        self.pr_failures.insert(repo.full_name());
        self
    }
}

#[async_trait]
impl GitHubClient for MockGitHubClient {
    async fn list_repositories(&self, _org: &str, page: u32) -> anyhow::Result<RepoPage> {
        if self.fail_listing_on_page == Some(page) {
            anyhow::bail!("listing failed on page {}", page);
        }

        let index = (page - 1) as usize;
        let repositories = self.pages.get(index).cloned().unwrap_or_default();
        let has_more = index + 1 < self.pages.len()
            || self.fail_listing_on_page.map_or(false, |p| p > page);

        Ok(RepoPage {
            repositories,
            next_page: has_more.then(|| page + 1),
        })
    }

    async fn list_hooks(&self, owner: &str, repo: &str) -> anyhow::Result<Vec<HookConfig>> {
        let key = format!("{}/{}", owner, repo);
        if self.hook_failures.contains(&key) {
            anyhow::bail!("hook listing failed for {}", key);
        }
        Ok(self.hooks.get(&key).cloned().unwrap_or_default())
    }

    async fn list_open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
    ) -> anyhow::Result<Vec<PullRequest>> {
        let key = format!("{}/{}", owner, repo);
        if self.pr_failures.contains(&key) {
            anyhow::bail!("pull request listing failed for {}", key);
        }
        Ok(self.prs.get(&key).cloned().unwrap_or_default())
    }

    async fn rate_limit(&self) -> anyhow::Result<RateLimit> {
        Ok(RateLimit {
            limit: 5000,
            remaining: 5000,
            reset: Utc::now(),
        })
    }
}

/// Sink that records deliveries and can reject selected messages
#[derive(Debug, Default)]
pub struct MockSink {
    pub sent: Mutex<Vec<(String, String)>>,
    fail_containing: Option<String>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any message whose text contains `needle`.
    pub fn fail_messages_containing(mut self, needle: &str) -> Self {
        self.fail_containing = Some(needle.to_string());
        self
    }

    pub fn messages(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationSink for MockSink {
    async fn send_message(&self, room: &str, text: &str) -> anyhow::Result<()> {
        if let Some(needle) = &self.fail_containing {
            if text.contains(needle) {
                anyhow::bail!("delivery rejected");
            }
        }
        self.sent
            .lock()
            .unwrap()
            .push((room.to_string(), text.to_string()));
        Ok(())
    }
}

/// A repository named `name` under the `acme` org
pub fn repo(name: &str) -> Repository {
    Repository::new("acme", name)
}

/// A chat hook of the given kind pointing at `room`
pub fn hook(kind: &str, room: Option<&str>) -> HookConfig {
    HookConfig {
        kind: kind.to_string(),
        room: room.map(str::to_string),
    }
}

/// An open pull request created `age_days` ago
pub fn pr(number: u64, age_days: i64) -> PullRequest {
    PullRequest {
        number,
        title: format!("PR #{}", number),
        created_at: Utc::now() - Duration::days(age_days),
        html_url: format!("https://github.com/acme/repo/pull/{}", number),
    }
}
