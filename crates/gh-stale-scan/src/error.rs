//! Pipeline error types
//!
//! Only repository discovery can fail the run. Hook-listing, pull-request
//! and delivery failures are scoped to one repository or one message and
//! are absorbed by their stage.

use thiserror::Error;

/// Fatal pipeline error
#[derive(Debug, Error)]
pub enum ScanError {
    /// Repository listing failed; enumeration stops at this page
    #[error("repository listing for {org} failed on page {page}: {source}")]
    Listing {
        org: String,
        page: u32,
        #[source]
        source: anyhow::Error,
    },
}
