//! Scan configuration

/// Default staleness threshold in days
pub const DEFAULT_STALE_AFTER_DAYS: i64 = 3;

/// Default bound on concurrent per-repository API calls within a stage
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Parameters for one pipeline run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Organization whose repositories are scanned
    pub org: String,

    /// Chat room the notification hook must target; `None` matches any
    /// room as long as the hook kind is right
    pub room: Option<String>,

    /// Pull requests strictly older than this many days are stale
    pub stale_after_days: i64,

    /// Maximum in-flight per-repository API calls per fan-out stage.
    /// A value of 1 reproduces fully sequential scanning.
    pub concurrency: usize,
}

impl ScanConfig {
    /// Configuration with default threshold and concurrency
    pub fn new(org: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            room: None,
            stale_after_days: DEFAULT_STALE_AFTER_DAYS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}
