//! Repository discovery stage
//!
//! Pages through an organization's repositories and streams them into the
//! raw-repository channel. The channel closes when this function returns,
//! on success and on failure alike, so downstream stages always see a
//! terminal close.

use crate::error::ScanError;
use gh_client::{GitHubClient, Repository};
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Stream all repositories of `org` into `tx`, page by page.
///
/// Returns the number of repositories discovered. A page-fetch error stops
/// enumeration: everything already sent stays in flight downstream and the
/// error is returned as the run's fatal outcome.
pub async fn run_repository_lister(
    client: Arc<dyn GitHubClient>,
    org: String,
    tx: mpsc::Sender<Repository>,
) -> Result<usize, ScanError> {
    let mut page = 1u32;
    let mut discovered = 0usize;

    loop {
        info!("Fetching repository page {} for {}", page, org);

        let repo_page = client
            .list_repositories(&org, page)
            .await
            .map_err(|source| ScanError::Listing {
                org: org.clone(),
                page,
                source,
            })?;

        for repo in repo_page.repositories {
            if tx.send(repo).await.is_err() {
                // Receiver is gone; nothing downstream can use more repos.
                debug!("Raw repository channel closed, stopping enumeration");
                return Ok(discovered);
            }
            discovered += 1;
        }

        match repo_page.next_page {
            Some(next) => page = next,
            None => break,
        }
    }

    info!("Discovered {} repositories in {}", discovered, org);
    Ok(discovered)
}
